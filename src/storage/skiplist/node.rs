// Skip list node
//
// A node owns its key, value and its tower of forward links. The tower is sized once at construction
// to level + 1 and never resized.
//
// ┌─────────────────────┐
// │ key                 │
// │ value               │
// ├─────────────────────┤
// │ tower[0]            │ level 0
// │ tower[1]            │ level 1
// │ ...                 │ up to level
// └─────────────────────┘
//
// Forward links are NodeIds into the arena. They don't own anything, the skip list owns every node
// through its arena.

use crate::storage::arena::NodeId;

pub struct Node<K, V> {
    key: K,
    value: V,
    tower: Box<[Option<NodeId>]>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        Self {
            key,
            value,
            tower: vec![None; level + 1].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Highest level this node is linked into.
    #[inline]
    pub fn level(&self) -> usize {
        self.tower.len() - 1
    }

    #[inline(always)]
    pub(crate) fn next(&self, level: usize) -> Option<NodeId> {
        debug_assert!(level < self.tower.len());
        self.tower[level]
    }

    #[inline(always)]
    pub(crate) fn set_next(&mut self, level: usize, next: Option<NodeId>) {
        debug_assert!(level < self.tower.len());
        self.tower[level] = next;
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("level", &self.level())
            .finish()
    }
}
