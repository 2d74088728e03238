use slab::Slab;

use crate::key::Key;

/// Index of a node inside the list's arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    key: Key<K>,
    skips: Vec<NodeId>,
}

impl<K> Node<K> {
    /// A node whose `level + 1` forward slots all point at `next`.
    pub(crate) fn new(key: Key<K>, level: usize, next: NodeId) -> Self {
        Self {
            key,
            skips: vec![next; level + 1],
        }
    }

    #[inline]
    pub(crate) fn next(&self, n: usize) -> NodeId {
        self.skips[n]
    }

    #[inline]
    pub(crate) fn set_next(&mut self, n: usize, node: NodeId) {
        self.skips[n] = node
    }

    #[inline]
    pub(crate) fn key(&self) -> &Key<K> {
        &self.key
    }

    /// Highest level this node has a forward slot for.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.skips.len() - 1
    }
}

/// Slot storage for every node of one list. Nodes refer to each other by [`NodeId`], so a node
/// reachable from several predecessors still has exactly one owner.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K> {
    nodes: Slab<Node<K>>,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self { nodes: Slab::new() }
    }

    /// Id the next [`Arena::alloc`] will hand out.
    pub(crate) fn vacant_id(&self) -> NodeId {
        NodeId(self.nodes.vacant_key())
    }

    pub(crate) fn alloc(&mut self, node: Node<K>) -> NodeId {
        NodeId(self.nodes.insert(node))
    }

    pub(crate) fn free(&mut self, id: NodeId) -> Node<K> {
        self.nodes.remove(id.0)
    }

    /// Drops every node except `keep`.
    pub(crate) fn retain(&mut self, keep: &[NodeId]) {
        self.nodes.retain(|slot, _| keep.contains(&NodeId(slot)));
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.0]
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_free() {
        let mut arena = Arena::new();
        let tail = arena.vacant_id();
        assert_eq!(arena.alloc(Node::new(Key::<i64>::PosInf, 3, tail)), tail);
        let a = arena.alloc(Node::new(Key::Value(1), 0, tail));
        let b = arena.alloc(Node::new(Key::Value(2), 2, tail));
        assert_eq!(arena.get(b).level(), 2);
        assert_eq!(arena.get(a).next(0), tail);

        arena.get_mut(a).set_next(0, b);
        assert_eq!(arena.get(a).next(0), b);

        let freed = arena.free(a);
        assert_eq!(freed.key(), &Key::Value(1));
        assert_eq!(arena.len(), 2);

        arena.retain(&[tail]);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(tail).key(), &Key::PosInf);
    }
}
