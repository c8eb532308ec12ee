use core::{
    fmt::{Debug, Display},
    ops::{Index, IndexMut},
};

/// Stable address of a node inside the [`Arena`](super::Arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(slot: usize) -> Self {
        NodeId(slot)
    }

    pub(crate) fn slot(self) -> usize {
        self.0
    }
}

/// The forward links of a node, one per level it participates in.
///
/// `levels[i]` is the next node whose own height is at least `i + 1`.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Levels {
    pointers: Box<[Option<NodeId>]>,
}

impl Levels {
    pub(crate) fn new(height: usize) -> Self {
        Levels {
            pointers: vec![None; height].into_boxed_slice(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.pointers.len()
    }

    pub(crate) fn clear(&mut self) {
        self.pointers.fill(None);
    }
}

impl Index<usize> for Levels {
    type Output = Option<NodeId>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.pointers[index]
    }
}

impl IndexMut<usize> for Levels {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.pointers[index]
    }
}

impl Debug for Levels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.pointers.iter().map(|p| p.map(NodeId::slot)))
            .finish()
    }
}

/// Head stores the first pointer tower at the beginning of the list. It is always of
/// maximum height and holds no key, so it never takes part in comparisons.
#[derive(Debug)]
pub(crate) struct Head {
    pub(crate) levels: Levels,
}

impl Head {
    pub(crate) fn new(max_level: usize) -> Self {
        Head {
            levels: Levels::new(max_level),
        }
    }
}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    pub(crate) levels: Levels,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, val: V, height: usize) -> Self {
        Node {
            key,
            val,
            levels: Levels::new(height),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.levels.height()
    }
}

/// A position in the list during traversal: either the head or a real node.
///
/// Predecessors recorded on the way down are `Cursor`s, since the head is the
/// predecessor on every level no real node reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cursor {
    Head,
    Node(NodeId),
}

impl<K, V> PartialEq for Node<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.val == other.val
    }
}

impl<K, V> Debug for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("val", &self.val)
            .field("height", &self.height())
            .field("levels", &self.levels)
            .finish()
    }
}

impl<K, V> Display for Node<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (1..=self.height()).try_for_each(|level| {
            writeln!(
                f,
                "[key:  {:?}, val: {:?}, level: {}]",
                self.key, self.val, level,
            )
        })
    }
}
