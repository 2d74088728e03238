use arrayvec::ArrayVec;
use log::trace;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

use crate::key::Key;
use crate::level::{GeometricLevels, LevelGenerator, LEVEL_CAPACITY};
use crate::node::{Arena, Node, NodeId};
use crate::options::Options;
use crate::{ensure, Error};

/// Last node visited at each level during a descent, i.e. the node a key would be spliced in
/// after. Slots above the list's current level hold the header.
type Predecessors = ArrayVec<NodeId, LEVEL_CAPACITY>;

/// An ordered set of keys kept in a skip list.
///
/// Nodes live in an arena owned by the list; `header` (−∞) and `tail` (+∞) are allocated once
/// and span every level up to `max_level`. The tail's own slots loop back to itself.
#[derive(Clone)]
pub struct SkipList<K, G = GeometricLevels> {
    arena: Arena<K>,
    header: NodeId,
    tail: NodeId,
    level: usize,
    max_level: usize,
    len: usize,
    levels: G,
}

impl<K: Ord> SkipList<K> {
    /// A list with default [`Options`] and an OS-seeded level generator.
    pub fn new() -> Self {
        let opts = Options::default();
        Self::build(opts.max_level, GeometricLevels::new(opts.probability))
    }

    pub fn with_options(opts: Options) -> crate::Result<Self> {
        opts.validate()?;
        let levels = match opts.seed {
            Some(seed) => GeometricLevels::seeded(opts.probability, seed),
            None => GeometricLevels::new(opts.probability),
        };
        Ok(Self::build(opts.max_level, levels))
    }
}

impl<K: Ord> Default for SkipList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, G: LevelGenerator> SkipList<K, G> {
    /// A list drawing node levels from `levels`. Draws above `max_level` are capped.
    pub fn with_generator(max_level: usize, levels: G) -> crate::Result<Self> {
        ensure!(
            max_level < LEVEL_CAPACITY,
            Error::InvalidMaxLevel(max_level, LEVEL_CAPACITY)
        );
        Ok(Self::build(max_level, levels))
    }

    fn build(max_level: usize, levels: G) -> Self {
        let mut arena = Arena::new();
        let tail = arena.vacant_id();
        arena.alloc(Node::new(Key::PosInf, max_level, tail));
        let header = arena.alloc(Node::new(Key::NegInf, max_level, tail));
        SkipList {
            arena,
            header,
            tail,
            level: 0,
            max_level,
            len: 0,
            levels,
        }
    }

    fn random_level(&mut self) -> usize {
        self.levels
            .random_level(self.max_level)
            .min(self.max_level)
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K> {
        self.arena.get(id)
    }

    fn find_predecessors(&self, value: &K) -> Predecessors {
        let mut update: Predecessors = std::iter::repeat(self.header)
            .take(self.max_level + 1)
            .collect();
        let mut current = self.header;
        for i in (0..=self.level).rev() {
            loop {
                let next = self.node(current).next(i);
                if !self.node(next).key().lt_value(value) {
                    break;
                }
                current = next;
            }
            update[i] = current;
        }
        update
    }

    /// Looks `value` up, recording every `(level, node)` stand along the way.
    ///
    /// The descent stops at the first level where the next node holds `value`, so a key that
    /// reaches a high level is found with a shorter path than one only linked at level 0.
    pub fn search(&self, value: &K) -> SearchResult<'_, K> {
        let mut path = Vec::new();
        let mut current = self.header;
        let mut stop = 0;
        for i in (0..=self.level).rev() {
            loop {
                let next = self.node(current).next(i);
                if !self.node(next).key().lt_value(value) {
                    break;
                }
                path.push(self.step(i, current));
                current = next;
            }
            path.push(self.step(i, current));
            stop = i;
            let next = self.node(current).next(i);
            if self.node(next).key().eq_value(value) {
                break;
            }
        }

        let candidate = self.node(current).next(stop);
        let found = self.node(candidate).key().eq_value(value);
        SearchResult {
            found,
            node: found.then(|| self.node_ref(candidate)),
            path,
        }
    }

    /// Adds `value`. Returns `false`, leaving the list untouched, if it is already present.
    pub fn insert(&mut self, value: K) -> bool {
        let update = self.find_predecessors(&value);
        let next = self.node(update[0]).next(0);
        if self.node(next).key().eq_value(&value) {
            trace!("insert rejected, key already present");
            return false;
        }

        let new_level = self.random_level();
        if new_level > self.level {
            trace!("raising list level {} -> {}", self.level, new_level);
            self.level = new_level;
        }

        let current = self
            .arena
            .alloc(Node::new(Key::Value(value), new_level, self.tail));
        for (i, prev) in update.iter().take(new_level + 1).enumerate() {
            let succ = self.arena.get(*prev).next(i);
            self.arena.get_mut(current).set_next(i, succ);
            self.arena.get_mut(*prev).set_next(i, current);
        }

        self.len += 1;
        trace!("inserted node at level {}, len {}", new_level, self.len);
        true
    }

    /// Removes `value`. Returns `false` if it was not present.
    pub fn delete(&mut self, value: &K) -> bool {
        let update = self.find_predecessors(value);
        let target = self.node(update[0]).next(0);
        if !self.node(target).key().eq_value(value) {
            trace!("delete missed, key absent");
            return false;
        }

        for (i, prev) in update.iter().take(self.level + 1).enumerate() {
            if self.arena.get(*prev).next(i) != target {
                break;
            }
            let succ = self.arena.get(target).next(i);
            self.arena.get_mut(*prev).set_next(i, succ);
        }
        self.arena.free(target);
        self.len -= 1;

        while self.level > 0 && self.node(self.header).next(self.level) == self.tail {
            self.level -= 1;
        }
        trace!("deleted node, list level {}, len {}", self.level, self.len);
        true
    }

    /// Drops every key. Header and tail survive and are relinked directly.
    pub fn clear(&mut self) {
        self.arena.retain(&[self.header, self.tail]);
        let tail = self.tail;
        let header = self.arena.get_mut(self.header);
        for i in 0..=self.max_level {
            header.set_next(i, tail);
        }
        self.level = 0;
        self.len = 0;
        trace!("cleared list");
    }

    pub fn contains(&self, value: &K) -> bool {
        let update = self.find_predecessors(value);
        let next = self.node(update[0]).next(0);
        self.node(next).key().eq_value(value)
    }
}

impl<K, G> SkipList<K, G> {
    /// Highest level any key currently occupies.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn header(&self) -> NodeRef<'_, K> {
        self.node_ref(self.header)
    }

    pub fn tail(&self) -> NodeRef<'_, K> {
        self.node_ref(self.tail)
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_, K> {
        NodeRef {
            arena: &self.arena,
            id,
        }
    }

    fn step(&self, level: usize, id: NodeId) -> PathStep<'_, K> {
        PathStep {
            level,
            node: self.node_ref(id),
        }
    }

    /// Walks level 0 in ascending key order, sentinels excluded.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            next: self.arena.get(self.header).next(0),
            remaining: self.len,
        }
    }

    /// Every node in ascending key order.
    pub fn all_nodes(&self) -> Vec<NodeRef<'_, K>> {
        self.iter().collect()
    }

    pub fn keys(&self) -> Vec<&K> {
        self.iter().filter_map(|node| node.value()).collect()
    }

    /// Keys linked at each active level, top level first.
    pub fn levels(&self) -> Vec<Vec<&K>> {
        (0..=self.level)
            .rev()
            .map(|level| {
                let mut row = Vec::new();
                let mut current = self.header().next(level);
                while let Some(node) = current {
                    if let Some(k) = node.value() {
                        row.push(k);
                    }
                    current = node.next(level);
                }
                row
            })
            .collect()
    }

    /// Nodes held by the arena, the two sentinels included.
    #[cfg(test)]
    pub(crate) fn allocated_nodes(&self) -> usize {
        self.arena.len()
    }
}

impl<K: Debug, G> Debug for SkipList<K, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipList")
            .field("level", &self.level)
            .field("max_level", &self.max_level)
            .field("keys", &self.keys())
            .finish()
    }
}

impl<'a, K, G> IntoIterator for &'a SkipList<K, G> {
    type Item = NodeRef<'a, K>;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only handle to one node of a list, sentinels included.
///
/// Two handles are equal when they point at the same node.
pub struct NodeRef<'a, K> {
    arena: &'a Arena<K>,
    id: NodeId,
}

impl<'a, K> NodeRef<'a, K> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a Key<K> {
        self.arena.get(self.id).key()
    }

    /// The stored key, or `None` for a sentinel.
    pub fn value(&self) -> Option<&'a K> {
        self.key().value()
    }

    pub fn level(&self) -> usize {
        self.arena.get(self.id).level()
    }

    pub fn is_header(&self) -> bool {
        matches!(self.key(), Key::NegInf)
    }

    pub fn is_tail(&self) -> bool {
        matches!(self.key(), Key::PosInf)
    }

    /// Successor at `level`; `None` past this node's level or from the tail.
    pub fn next(&self, level: usize) -> Option<NodeRef<'a, K>> {
        if self.is_tail() || level > self.level() {
            return None;
        }
        Some(NodeRef {
            arena: self.arena,
            id: self.arena.get(self.id).next(level),
        })
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.arena, other.arena)
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: Debug> Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("level", &self.level())
            .finish()
    }
}

/// One stand of a search: the node the walk stood on at `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep<'a, K> {
    pub level: usize,
    pub node: NodeRef<'a, K>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<'a, K> {
    pub found: bool,
    pub node: Option<NodeRef<'a, K>>,
    pub path: Vec<PathStep<'a, K>>,
}

impl<K> SearchResult<'_, K> {
    /// Number of stands recorded, the usual cost metric for a lookup.
    pub fn steps(&self) -> usize {
        self.path.len()
    }
}

pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    next: NodeId,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = NodeRef<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.next);
        if node.key().is_sentinel() {
            return None;
        }
        let current = NodeRef {
            arena: self.arena,
            id: self.next,
        };
        self.next = node.next(0);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::key::Key;
    use crate::level::LevelGenerator;
    use crate::options::Options;
    use crate::skiplist::SkipList;

    /// Levels handed out in order; zero once the script runs out.
    fn scripted(levels: Vec<usize>) -> impl LevelGenerator + Clone {
        let mut idx = 0;
        move |_max: usize| {
            let level = levels.get(idx).copied().unwrap_or(0);
            idx += 1;
            level
        }
    }

    /// 15(0) 25(2) 35(1) 45(0) 55(1)
    fn make_skiplist() -> SkipList<i64, impl LevelGenerator + Clone> {
        let mut list = SkipList::with_generator(15, scripted(vec![0, 2, 1, 0, 1])).unwrap();
        for k in [15, 25, 35, 45, 55] {
            assert!(list.insert(k));
        }
        list
    }

    fn keys(list: &SkipList<i64, impl LevelGenerator>) -> Vec<i64> {
        list.keys().into_iter().copied().collect()
    }

    #[test]
    fn test_insert_links_every_level() {
        let list = make_skiplist();
        assert_eq!(list.level(), 2);
        assert_eq!(list.len(), 5);
        assert_eq!(
            list.levels(),
            vec![vec![&25], vec![&25, &35, &55], vec![&15, &25, &35, &45, &55]]
        );
        let levels: Vec<usize> = list.iter().map(|n| n.level()).collect();
        assert_eq!(levels, vec![0, 2, 1, 0, 1]);
    }

    #[test]
    fn test_no_dupes() {
        let mut list = make_skiplist();
        let before = list.allocated_nodes();
        assert!(!list.insert(35));
        assert!(!list.insert(15));
        assert_eq!(list.len(), 5);
        assert_eq!(list.allocated_nodes(), before);
    }

    #[test]
    fn test_search_stops_at_first_equal_level() {
        let list = make_skiplist();
        let result = list.search(&35);
        assert!(result.found);
        assert_eq!(result.node.unwrap().value(), Some(&35));

        let stands: Vec<(usize, Key<i64>)> = result
            .path
            .iter()
            .map(|s| (s.level, *s.node.key()))
            .collect();
        assert_eq!(
            stands,
            vec![(2, Key::NegInf), (2, Key::Value(25)), (1, Key::Value(25))]
        );
        assert_eq!(result.steps(), 3);
    }

    #[test]
    fn test_search_missing_descends_to_level_zero() {
        let list = make_skiplist();
        let result = list.search(&40);
        assert!(!result.found);
        assert!(result.node.is_none());
        let stands: Vec<(usize, Key<i64>)> = result
            .path
            .iter()
            .map(|s| (s.level, *s.node.key()))
            .collect();
        assert_eq!(
            stands,
            vec![
                (2, Key::NegInf),
                (2, Key::Value(25)),
                (1, Key::Value(25)),
                (1, Key::Value(35)),
                (0, Key::Value(35)),
            ]
        );
    }

    #[test]
    fn test_search_empty_list() {
        let list: SkipList<i64> = SkipList::new();
        let result = list.search(&7);
        assert!(!result.found);
        assert_eq!(result.steps(), 1);
        assert!(result.path[0].node.is_header());
        assert!(list.search(&i64::MIN).node.is_none());
        assert!(list.search(&i64::MAX).node.is_none());
    }

    #[test]
    fn test_delete_lowers_level() {
        let mut list = make_skiplist();
        assert!(list.delete(&25));
        assert_eq!(list.level(), 1);
        assert_eq!(keys(&list), vec![15, 35, 45, 55]);
        assert_eq!(list.levels(), vec![vec![&35, &55], vec![&15, &35, &45, &55]]);

        assert!(list.delete(&35));
        assert!(list.delete(&55));
        assert_eq!(list.level(), 0);
        assert_eq!(list.allocated_nodes(), 4);
    }

    #[test]
    fn test_delete_absent() {
        let mut list = make_skiplist();
        assert!(!list.delete(&999));
        assert!(!list.delete(&i64::MIN));
        assert_eq!(keys(&list), vec![15, 25, 35, 45, 55]);
        assert_eq!(list.level(), 2);
    }

    #[test]
    fn test_level_draws_are_capped() {
        let mut list = SkipList::with_generator(3, scripted(vec![10])).unwrap();
        assert!(list.insert(1_i64));
        assert_eq!(list.level(), 3);
        assert_eq!(list.header().next(3).unwrap().value(), Some(&1));
    }

    #[test]
    fn test_with_generator_rejects_oversized_max_level() {
        assert!(SkipList::<i64, _>::with_generator(32, scripted(vec![])).is_err());
    }

    #[test]
    fn test_clear_releases_nodes() {
        let mut list = make_skiplist();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.level(), 0);
        assert!(list.all_nodes().is_empty());
        assert_eq!(list.allocated_nodes(), 2);
        for level in 0..=list.max_level() {
            assert!(list.header().next(level).unwrap().is_tail());
        }
        assert!(list.insert(3));
        assert_eq!(keys(&list), vec![3]);
    }

    #[test]
    fn test_node_refs() {
        let list = make_skiplist();
        let header = list.header();
        assert!(header.is_header());
        assert_eq!(header.level(), 15);
        assert!(list.tail().is_tail());
        assert!(list.tail().next(0).is_none());

        let first = header.next(0).unwrap();
        assert_eq!(first.value(), Some(&15));
        assert!(first.next(1).is_none());
        assert_eq!(header.next(2).unwrap(), list.search(&25).node.unwrap());
        assert_eq!(header.next(14).unwrap(), list.tail());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = make_skiplist();
        let mut copy = original.clone();
        assert_eq!(copy.levels(), original.levels());

        assert!(original.delete(&35));
        assert!(copy.insert(60));
        assert_eq!(keys(&original), vec![15, 25, 45, 55]);
        assert_eq!(keys(&copy), vec![15, 25, 35, 45, 55, 60]);
    }

    #[test]
    fn test_iter_len() {
        let list = make_skiplist();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);
        assert_eq!((&list).into_iter().count(), 5);
    }

    #[test]
    fn test_contains() {
        let mut list = SkipList::with_options(Options::default().seed(7)).unwrap();
        for k in (0..100_i64).step_by(3) {
            list.insert(k);
        }
        assert!(list.contains(&0));
        assert!(list.contains(&99));
        assert!(!list.contains(&1));
        assert!(!list.contains(&100));
    }

    #[test]
    fn test_debug() {
        let list = make_skiplist();
        assert_eq!(
            format!("{:?}", list),
            "SkipList { level: 2, max_level: 15, keys: [15, 25, 35, 45, 55] }"
        );
    }
}
