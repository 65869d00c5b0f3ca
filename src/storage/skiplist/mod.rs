// SkipList
//
// The public engine. One reader-writer lock guards the whole node graph together with the top level
// and the count:
//
// - find, contains, iteration and display take the shared lock for the full traversal
// - insert, update, remove and clear take the exclusive lock for search + splice as one unit
// - the level generator lives inside the exclusive side, it is only touched by insert
//
// Every operation runs to completion while holding its guard. Guards are scoped so early returns
// (duplicate key, absent key) release the lock like any other exit.

pub(crate) mod level;
pub mod node;
pub(crate) mod raw;

use std::fmt;

use tracing::{debug, trace};

use crate::config::SkipListConfig;
use crate::error::ConfigError;
use crate::storage::comparator::{Comparator, DefaultComparator};
use crate::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use level::random_level;
pub use node::Node;

use level::LevelGenerator;
use raw::RawSkipList;

pub(crate) struct Inner<K, V, C> {
    pub(crate) list: RawSkipList<K, V, C>,
    levels: LevelGenerator,
}

impl<K, V, C: Comparator<K>> Inner<K, V, C> {
    #[inline]
    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        let levels = &mut self.levels;
        self.list.insert_with(key, value, || levels.next_level())
    }
}

pub struct SkipList<K, V, C = DefaultComparator> {
    inner: RwLock<Inner<K, V, C>>,
    max_level: usize,
    probability: f64,
}

impl<K: Ord, V> SkipList<K, V, DefaultComparator> {
    /// Skip list over the natural ordering of `K`.
    ///
    /// ```
    /// use skiplist_kv::SkipList;
    ///
    /// let list = SkipList::new(6, 0.5).unwrap();
    /// assert!(list.insert(7, "seven"));
    /// assert!(!list.insert(7, "again"));
    /// assert_eq!(list.find(&7), Some("seven"));
    /// ```
    pub fn new(max_level: usize, level_up_probability: f64) -> Result<Self, ConfigError> {
        Self::from_config(SkipListConfig::new(max_level, level_up_probability))
    }

    pub fn from_config(config: SkipListConfig) -> Result<Self, ConfigError> {
        Self::with_comparator(config, DefaultComparator {})
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    C: Comparator<K>,
{
    pub fn with_comparator(config: SkipListConfig, comparator: C) -> Result<Self, ConfigError> {
        config.validate()?;

        debug!(
            max_level = config.max_level,
            probability = config.level_up_probability,
            seeded = config.seed.is_some(),
            "creating skip list"
        );

        let list = RawSkipList::new(config.max_level, comparator, config.arena.to_policy());
        let levels =
            LevelGenerator::new(config.max_level, config.level_up_probability, config.seed);

        Ok(Self {
            inner: RwLock::new(Inner { list, levels }),
            max_level: config.max_level,
            probability: config.level_up_probability,
        })
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Inner<K, V, C>> {
        self.inner.read()
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Inner<K, V, C>> {
        self.inner.write()
    }

    /// Value stored under `key`, if any.
    pub fn find(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.find_map(key, |node| node.value().clone())
    }

    /// Runs `f` on the node holding `key` while the shared lock is held.
    pub fn find_map<R, F>(&self, key: &K, f: F) -> Option<R>
    where
        F: FnOnce(&Node<K, V>) -> R,
    {
        let guard = self.read();
        guard.list.find(key).map(f)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.read().list.find(key).is_some()
    }

    /// Inserts a new entry. Returns false and leaves the stored value alone if the key is already present.
    pub fn insert(&self, key: K, value: V) -> bool {
        let inserted = self.write().insert(key, value);
        if !inserted {
            debug!("insert rejected, key already present");
        }
        inserted
    }

    /// Applies `f` to the value of an existing key. Never inserts.
    pub fn update<F>(&self, key: &K, f: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let mut guard = self.write();
        match guard.list.find_mut(key) {
            Some(node) => {
                f(node.value_mut());
                true
            }
            None => false,
        }
    }

    /// Removes `key`, returning its value. Removing an absent key is a no-op.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.write();
        let removed = guard.list.remove(key);
        trace!(
            removed = removed.is_some(),
            top_level = guard.list.top_level(),
            "remove"
        );
        removed
    }

    pub fn clear(&self) {
        let mut guard = self.write();
        debug!(entries = guard.list.len(), "clearing skip list");
        guard.list.clear();
    }

    pub fn size(&self) -> usize {
        self.read().list.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Highest level currently populated by a data node.
    pub fn current_top_level(&self) -> usize {
        self.read().list.top_level()
    }

    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    #[inline]
    pub fn level_up_probability(&self) -> f64 {
        self.probability
    }

    pub fn first(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read().list.first().map(cloned)
    }

    pub fn last(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read().list.last().map(cloned)
    }

    /// First entry whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read().list.lower_bound(key).map(cloned)
    }

    /// All entries in ascending key order, copied out under one shared lock.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.read().list.iter().map(cloned).collect()
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.read().list.iter().map(|n| n.key().clone()).collect()
    }

    /// Renders every level from the top level down to 0. Debugging aid, not a stable format.
    pub fn display_list(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

#[inline]
fn cloned<K: Clone, V: Clone>(node: &Node<K, V>) -> (K, V) {
    (node.key().clone(), node.value().clone())
}

impl<K, V, C> fmt::Display for SkipList<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
    C: Comparator<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read().list.write_levels(f)
    }
}

impl<K, V, C> fmt::Debug for SkipList<K, V, C>
where
    C: Comparator<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read();
        f.debug_struct("SkipList")
            .field("len", &guard.list.len())
            .field("top_level", &guard.list.top_level())
            .field("max_level", &self.max_level)
            .field("level_up_probability", &self.probability)
            .finish()
    }
}
