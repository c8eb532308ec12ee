use core::fmt::Debug;

use crate::{
    config::{validate_max_level, Config, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT},
    internal::{Arena, Cursor, Head, Node, NodeId},
    level::{GeometricLevels, LevelGenerator},
    Result,
};

/// An ordered map backed by a skip list.
///
/// Nodes live in an arena owned by the list and link to each other by index. The
/// head tower has `max_level` forward links; every other node gets a random
/// height drawn from the list's [`LevelGenerator`].
///
/// Lookups, insertions and removals walk the list once, top-down, narrowing the
/// search on each level before descending, and take expected `O(log n)` steps.
pub struct SkipList<K, V, G = GeometricLevels> {
    head: Head,
    arena: Arena<K, V>,
    generator: G,
    max_level: usize,
    // Number of levels in use, the top one is never empty unless `level == 1`
    level: usize,
    len: usize,
}

impl<K, V> SkipList<K, V>
where
    K: Ord,
{
    /// Creates an empty list with the given maximum level and level probability.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is not in `1..=MAX_LEVEL_LIMIT` or `probability` is
    /// not inside the open interval (0, 1). Use [`SkipList::try_new`] to get an
    /// error instead.
    pub fn new(max_level: usize, probability: f64) -> Self {
        match Self::try_new(max_level, probability) {
            Ok(list) => list,
            Err(e) => panic!("{e}"),
        }
    }

    /// Creates an empty list, rejecting invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxLevel`](crate::Error::InvalidMaxLevel) or
    /// [`Error::InvalidProbability`](crate::Error::InvalidProbability).
    pub fn try_new(max_level: usize, probability: f64) -> Result<Self> {
        Self::with_config(Config::new().max_level(max_level).probability(probability))
    }

    /// Creates an empty list from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config does not validate.
    pub fn with_config(config: Config) -> Result<Self> {
        let generator = config.level_generator()?;
        Self::with_generator(generator)
    }

    pub fn probability(&self) -> f64 {
        self.generator.probability()
    }
}

impl<K, V, G> SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    /// Creates an empty list drawing node heights from `generator`.
    ///
    /// The list's maximum level is the generator's.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMaxLevel`](crate::Error::InvalidMaxLevel) if the
    /// generator's maximum level is not in `1..=MAX_LEVEL_LIMIT`.
    pub fn with_generator(generator: G) -> Result<Self> {
        let max_level = generator.max_level();
        validate_max_level(max_level)?;

        log::debug!("creating skip list with max level {max_level}");

        Ok(SkipList {
            head: Head::new(max_level),
            arena: Arena::new(),
            generator,
            max_level,
            level: 1,
            len: 0,
        })
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.seek(key).map(|id| &self.arena[id].val)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.seek(key).map(|id| {
            let node = &self.arena[id];
            (&node.key, &node.val)
        })
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.seek(key)?;
        Some(&mut self.arena[id].val)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.seek(key).is_some()
    }

    /// Inserts a value in the list given a key.
    ///
    /// If the key is already present its value is replaced in place and the old
    /// value is returned; the structure of the list does not change.
    pub fn insert(&mut self, key: K, val: V) -> Option<V> {
        let SearchResult { mut prev, target } = self.find(&key);

        if let Some(target) = target {
            return Some(core::mem::replace(&mut self.arena[target].val, val));
        }

        let height = self.random_height();

        if height > self.level {
            // no real node reaches these levels yet
            for p in &mut prev[self.level..height] {
                *p = Cursor::Head;
            }

            log::trace!("raising level from {} to {height}", self.level);
            self.level = height;
        }

        let new_node = self.arena.alloc(Node::new(key, val, height));
        self.link_node(new_node, &prev[..height]);
        self.len += 1;

        log::trace!("inserted {new_node:?} with height {height}, len {}", self.len);

        None
    }

    /// Removes `key` from the list, returning its value.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, val)| val)
    }

    /// Removes `key` from the list, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let SearchResult { prev, target } = self.find(key);
        let target = target?;

        self.unlink(target, &prev);

        Some(self.release(target))
    }

    /// Removes the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.head.levels[0]?;

        // the head precedes the first node on every level it spans
        self.unlink(first, &[Cursor::Head; MAX_LEVEL_LIMIT]);

        Some(self.release(first))
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = &self.arena[self.head.levels[0]?];
        Some((&node.key, &node.val))
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut curr = Cursor::Head;

        for level in (0..self.level).rev() {
            while let Some(next) = self.next(curr, level) {
                curr = Cursor::Node(next);
            }
        }

        match curr {
            Cursor::Head => None,
            Cursor::Node(id) => {
                let node = &self.arena[id];
                Some((&node.key, &node.val))
            }
        }
    }

    /// Drops all entries, keeping the configuration and the level generator.
    pub fn clear(&mut self) {
        log::debug!("clearing skip list with {} entries", self.len);

        self.arena.clear();
        self.head.levels.clear();
        self.level = 1;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels currently in use.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The maximum level a node can be assigned, fixed at construction.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    fn random_height(&mut self) -> usize {
        let height = self.generator.random_level();
        debug_assert!(
            (1..=self.max_level).contains(&height),
            "level generator returned {height}, outside of 1..={}",
            self.max_level
        );

        height.clamp(1, self.max_level)
    }

    fn next(&self, cursor: Cursor, level: usize) -> Option<NodeId> {
        match cursor {
            Cursor::Head => self.head.levels[level],
            Cursor::Node(id) => self.arena[id].levels[level],
        }
    }

    fn set_next(&mut self, cursor: Cursor, level: usize, next: Option<NodeId>) {
        match cursor {
            Cursor::Head => self.head.levels[level] = next,
            Cursor::Node(id) => self.arena[id].levels[level] = next,
        }
    }

    /// Moves right on `level` for as long as the next key is smaller than `key`.
    fn advance(&self, mut curr: Cursor, level: usize, key: &K) -> Cursor {
        while let Some(next) = self.next(curr, level) {
            if self.arena[next].key >= *key {
                break;
            }
            curr = Cursor::Node(next);
        }

        curr
    }

    /// Read-only search, returning the node holding `key`.
    fn seek(&self, key: &K) -> Option<NodeId> {
        let mut curr = Cursor::Head;

        for level in (0..self.level).rev() {
            curr = self.advance(curr, level, key);
        }

        self.next(curr, 0).filter(|&next| self.arena[next].key == *key)
    }

    /// Search that also records the predecessor of `key` on every active level.
    fn find(&self, key: &K) -> SearchResult {
        let mut prev = [Cursor::Head; MAX_LEVEL_LIMIT];
        let mut curr = Cursor::Head;

        for level in (0..self.level).rev() {
            curr = self.advance(curr, level, key);
            prev[level] = curr;
        }

        let target = self
            .next(curr, 0)
            .filter(|&next| self.arena[next].key == *key);

        SearchResult { prev, target }
    }

    /// Splices `new_node` in after `prev[i]` on every level `i` of `prev`.
    fn link_node(&mut self, new_node: NodeId, prev: &[Cursor]) {
        for (level, &p) in prev.iter().enumerate() {
            let next = self.next(p, level);
            self.arena[new_node].levels[level] = next;
            self.set_next(p, level, Some(new_node));
        }
    }

    /// Logically removes the node from the list by linking its neighbours to one another.
    fn unlink(&mut self, node: NodeId, prev: &[Cursor]) {
        for (level, &p) in prev.iter().enumerate().take(self.level) {
            // a node has no gaps in its tower, so nothing above links to it either
            if self.next(p, level) != Some(node) {
                break;
            }

            let next = self.arena[node].levels[level];
            self.set_next(p, level, next);
        }
    }

    /// Frees an unlinked node and lowers the level past any emptied top levels.
    fn release(&mut self, node: NodeId) -> (K, V) {
        let Node { key, val, .. } = self.arena.release(node);
        self.len -= 1;
        debug_assert_eq!(self.arena.len(), self.len, "arena out of sync with len");

        log::trace!("removed {node:?}, len {}", self.len);

        let level = self.level;
        while self.level > 1 && self.head.levels[self.level - 1].is_none() {
            self.level -= 1;
        }

        if self.level < level {
            log::trace!("lowering level from {level} to {}", self.level);
        }

        (key, val)
    }

    /// Visits every entry in key order.
    fn traverse_with<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        let mut curr = self.head.levels[0];

        while let Some(id) = curr {
            let node = &self.arena[id];
            f(&node.key, &node.val);
            curr = node.levels[0];
        }
    }
}

struct SearchResult {
    prev: [Cursor; MAX_LEVEL_LIMIT],
    target: Option<NodeId>,
}

impl<K, V> Default for SkipList<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY)
    }
}

impl<K, V, G> Extend<(K, V)> for SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, val) in iter {
            self.insert(key, val);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SkipList<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}

impl<K, V, G> Debug for SkipList<K, V, G>
where
    K: Ord + Debug,
    V: Debug,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        struct Entries<'a, K, V, G>(&'a SkipList<K, V, G>);

        impl<K, V, G> Debug for Entries<'_, K, V, G>
        where
            K: Ord + Debug,
            V: Debug,
            G: LevelGenerator,
        {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut map = f.debug_map();
                self.0.traverse_with(|k, v| {
                    map.entry(k, v);
                });
                map.finish()
            }
        }

        f.debug_struct("SkipList")
            .field("len", &self.len)
            .field("level", &self.level)
            .field("max_level", &self.max_level)
            .field("entries", &Entries(self))
            .finish()
    }
}

#[cfg(test)]
impl<K, V, G> SkipList<K, V, G>
where
    K: Ord + Debug,
    G: LevelGenerator,
{
    /// Walks every level from the head and panics if a structural invariant is broken.
    pub(crate) fn check_integrity(&self) {
        use std::collections::HashSet;

        assert!((1..=self.max_level).contains(&self.level), "level out of range");

        // level 0 holds every node exactly once, in strictly increasing order
        let mut base = Vec::new();
        let mut seen = HashSet::new();
        let mut curr = self.head.levels[0];
        while let Some(id) = curr {
            assert!(seen.insert(id), "cycle at level 0");
            base.push(id);
            curr = self.arena[id].levels[0];
        }
        assert_eq!(base.len(), self.len, "len");
        assert_eq!(self.arena.len(), self.len, "arena len");
        for pair in base.windows(2) {
            assert!(
                self.arena[pair[0]].key < self.arena[pair[1]].key,
                "unordered keys {:?} >= {:?}",
                self.arena[pair[0]].key,
                self.arena[pair[1]].key
            );
        }

        for level in 1..self.max_level {
            // every level is the subsequence of level 0 made of nodes tall enough for it
            let expected = base
                .iter()
                .copied()
                .filter(|&id| self.arena[id].height() > level)
                .collect::<Vec<_>>();

            let mut actual = Vec::new();
            let mut curr = self.head.levels[level];
            while let Some(id) = curr {
                actual.push(id);
                curr = self.arena[id].levels[level];
            }

            assert_eq!(actual, expected, "chain at level {level}");

            if level >= self.level {
                assert!(actual.is_empty(), "inactive level {level} is not empty");
            }
        }

        if self.level > 1 {
            assert!(
                self.head.levels[self.level - 1].is_some(),
                "top level {} is empty",
                self.level
            );
        }
    }
}
