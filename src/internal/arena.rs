use core::ops::{Index, IndexMut};

use slab::Slab;

use super::node::{Node, NodeId};

/// Owns every node of a list.
///
/// Nodes are addressed by [`NodeId`], which stays valid until the node is released.
/// Released slots are handed out again, most recent first, before the slab grows.
pub(crate) struct Arena<K, V> {
    nodes: Slab<Node<K, V>>,
}

impl<K, V> Default for Arena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self { nodes: Slab::new() }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        NodeId::new(self.nodes.insert(node))
    }

    /// Takes the node out of the arena, freeing its slot.
    ///
    /// The caller must have unlinked the node from every level beforehand.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<K, V> {
        match self.nodes.try_remove(id.slot()) {
            Some(node) => node,
            None => unreachable!("double release of {id:?}"),
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.nodes.get(id.slot()) {
            Some(node) => node,
            None => unreachable!("dangling node id {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.nodes.get_mut(id.slot()) {
            Some(node) => node,
            None => unreachable!("dangling node id {id:?}"),
        }
    }
}

#[cfg(test)]
mod arena_test {
    use super::*;

    #[test]
    fn test_alloc_and_index() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new(1, "a", 1));
        let b = arena.alloc(Node::new(2, "b", 2));

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[a].key, 1);
        assert_eq!(arena[b].val, "b");

        arena[b].val = "c";
        assert_eq!(arena[b].val, "c");
    }

    #[test]
    fn test_release_reuses_slots() {
        let mut arena = Arena::new();
        let ids = (0..4)
            .map(|i| arena.alloc(Node::new(i, (), 1)))
            .collect::<Vec<_>>();

        let node = arena.release(ids[1]);
        assert_eq!(node.key, 1);
        arena.release(ids[3]);
        assert_eq!(arena.len(), 2);

        // last released slot is reused first
        assert_eq!(arena.alloc(Node::new(10, (), 1)), ids[3]);
        assert_eq!(arena.alloc(Node::new(11, (), 1)), ids[1]);
        assert_eq!(arena[ids[1]].key, 11);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    #[should_panic(expected = "double release")]
    fn test_double_release() {
        let mut arena = Arena::new();
        let id = arena.alloc(Node::new(1, (), 1));
        arena.release(id);
        arena.release(id);
    }

    #[test]
    #[should_panic(expected = "dangling node id")]
    fn test_dangling_index() {
        let mut arena = Arena::new();
        let id = arena.alloc(Node::new(1, (), 1));
        arena.release(id);
        let _ = &arena[id];
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        arena.alloc(Node::new(1, (), 1));
        arena.alloc(Node::new(2, (), 1));
        arena.clear();

        assert_eq!(arena.len(), 0);
    }
}
