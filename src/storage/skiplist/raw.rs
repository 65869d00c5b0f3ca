// Unsynchronised skip list engine
//
// RawSkipList holds the header tower, the node arena and the bookkeeping (top level, count).
// It takes &self for reads and &mut self for structural changes and leaves locking to SkipList.
//
// Header tower (always max_level + 1 wide, never holds a key):
//
//   level 3  H ─────────────────────────────► 9 ──────────► ∅
//   level 2  H ─────────► 4 ────────────────► 9 ──────────► ∅
//   level 1  H ─► 1 ────► 4 ──────► 6 ──────► 9 ──► 12 ───► ∅
//   level 0  H ─► 1 ─► 2 ─► 4 ─► 5 ─► 6 ─► 7 ─► 9 ─► 12 ─► ∅
//
// Search starts at H on the current top level, moves right while the next key is strictly less than
// the target, then drops one level from where it stopped. The last position on each level is the
// predecessor (the update vector) used to splice a node in or out.

use std::fmt;

use crate::storage::arena::{ArenaPolicy, NodeArena, NodeId};
use crate::storage::comparator::Comparator;
use crate::storage::skiplist::node::Node;

// A position in a level chain: either the header or a data node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    At(NodeId),
}

pub(crate) struct RawSkipList<K, V, C> {
    head: Box<[Option<NodeId>]>,
    arena: NodeArena<K, V>,
    top_level: usize,
    count: usize,
    max_level: usize,
    comparator: C,
}

impl<K, V, C> RawSkipList<K, V, C>
where
    C: Comparator<K>,
{
    pub(crate) fn new(max_level: usize, comparator: C, policy: ArenaPolicy) -> Self {
        Self {
            head: vec![None; max_level + 1].into_boxed_slice(),
            arena: NodeArena::new(policy),
            top_level: 0,
            count: 0,
            max_level,
            comparator,
        }
    }

    #[inline(always)]
    fn next(&self, at: Position, level: usize) -> Option<NodeId> {
        match at {
            Position::Head => self.head[level],
            Position::At(id) => self.arena.get(id).next(level),
        }
    }

    #[inline(always)]
    fn set_next(&mut self, at: Position, level: usize, next: Option<NodeId>) {
        match at {
            Position::Head => self.head[level] = next,
            Position::At(id) => self.arena.get_mut(id).set_next(level, next),
        }
    }

    // Descending search. Returns the level 0 predecessor of `key` and, when asked, records the
    // predecessor on every level from the top level down.
    fn search(&self, key: &K, mut update: Option<&mut [Position]>) -> Position {
        let mut cursor = Position::Head;

        for level in (0..=self.top_level).rev() {
            while let Some(next) = self.next(cursor, level) {
                if !self.comparator.less(self.arena.get(next).key(), key) {
                    break;
                }
                cursor = Position::At(next);
            }

            if let Some(update) = update.as_deref_mut() {
                update[level] = cursor;
            }
        }

        cursor
    }

    #[inline]
    fn matches(&self, candidate: Option<NodeId>, key: &K) -> Option<NodeId> {
        let id = candidate?;
        self.comparator
            .equivalent(self.arena.get(id).key(), key)
            .then_some(id)
    }

    pub(crate) fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let cursor = self.search(key, None);
        let id = self.matches(self.next(cursor, 0), key)?;
        Some(self.arena.get(id))
    }

    pub(crate) fn find_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        let cursor = self.search(key, None);
        let id = self.matches(self.next(cursor, 0), key)?;
        Some(self.arena.get_mut(id))
    }

    // First node whose key is not less than `key`
    pub(crate) fn lower_bound(&self, key: &K) -> Option<&Node<K, V>> {
        let cursor = self.search(key, None);
        self.next(cursor, 0).map(|id| self.arena.get(id))
    }

    pub(crate) fn first(&self) -> Option<&Node<K, V>> {
        self.head[0].map(|id| self.arena.get(id))
    }

    pub(crate) fn last(&self) -> Option<&Node<K, V>> {
        let mut cursor = Position::Head;
        for level in (0..=self.top_level).rev() {
            while let Some(next) = self.next(cursor, level) {
                cursor = Position::At(next);
            }
        }

        match cursor {
            Position::Head => None,
            Position::At(id) => Some(self.arena.get(id)),
        }
    }

    /// Inserts `key` unless an equivalent key is present. `next_level` is only drawn for a new key.
    pub(crate) fn insert_with<F>(&mut self, key: K, value: V, next_level: F) -> bool
    where
        F: FnOnce() -> usize,
    {
        // Levels above the current top level keep the header as predecessor
        let mut update = vec![Position::Head; self.max_level + 1];
        let cursor = self.search(&key, Some(update.as_mut_slice()));

        if self.matches(self.next(cursor, 0), &key).is_some() {
            return false;
        }

        let level = next_level().min(self.max_level);
        if level > self.top_level {
            for slot in &mut update[self.top_level + 1..=level] {
                *slot = Position::Head;
            }
            self.top_level = level;
        }

        let id = self.arena.alloc(Node::new(key, value, level));

        for (l, &pred) in update.iter().enumerate().take(level + 1) {
            let succ = self.next(pred, l);
            self.arena.get_mut(id).set_next(l, succ);
            self.set_next(pred, l, Some(id));
        }

        self.count += 1;
        debug_assert_eq!(self.arena.live(), self.count);
        true
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let mut update = vec![Position::Head; self.max_level + 1];
        let cursor = self.search(key, Some(update.as_mut_slice()));

        let target = self.matches(self.next(cursor, 0), key)?;
        let level = self.arena.get(target).level();

        for (l, &pred) in update.iter().enumerate().take(level + 1) {
            // A predecessor that doesn't point at the target means the update vector is stale
            if self.next(pred, l) != Some(target) {
                break;
            }
            let succ = self.arena.get(target).next(l);
            self.set_next(pred, l, succ);
        }

        while self.top_level > 0 && self.head[self.top_level].is_none() {
            self.top_level -= 1;
        }

        let (_, value) = self.arena.release(target)?.into_entry();
        self.count -= 1;
        debug_assert_eq!(self.arena.live(), self.count);
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        self.head.fill(None);
        self.arena.clear();
        self.top_level = 0;
        self.count = 0;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn top_level(&self) -> usize {
        self.top_level
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V, C> {
        self.level_iter(0)
    }

    pub(crate) fn level_iter(&self, level: usize) -> Iter<'_, K, V, C> {
        Iter {
            list: self,
            level,
            next: self.head[level],
        }
    }

    pub(crate) fn write_levels<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        writeln!(out, "====================display list BEGIN====================")?;
        for level in (0..=self.top_level).rev() {
            writeln!(out, "Level: {level}")?;
            for node in self.level_iter(level) {
                write!(out, "{}:{};", node.key(), node.value())?;
            }
            writeln!(out)?;
        }
        writeln!(out, "=====================display list END=====================")
    }
}

pub(crate) struct Iter<'a, K, V, C> {
    list: &'a RawSkipList<K, V, C>,
    level: usize,
    next: Option<NodeId>,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.arena.get(self.next?);
        self.next = node.next(self.level);
        Some(node)
    }
}
