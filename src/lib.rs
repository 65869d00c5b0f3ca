//! Ordered in-memory key/value container backed by a skip list.
//!
//! [`SkipList`] gives expected `O(log n)` find, insert and remove over any key ordering, sorted
//! iteration, and a flat binary snapshot for fixed width key/value types. One reader-writer lock
//! guards each list: lookups share it, mutations take it exclusively.
//!
//! ```
//! use skiplist_kv::{SkipList, SkipListConfig};
//!
//! let list = SkipList::from_config(SkipListConfig::new(6, 0.5)).unwrap();
//! for k in (1..=9).chain([12345]) {
//!     list.insert(k, k * 10);
//! }
//!
//! assert_eq!(list.find(&7), Some(70));
//! assert_eq!(list.find(&124), None);
//! assert_eq!(list.size(), 10);
//!
//! list.remove(&7);
//! assert_eq!(list.find(&7), None);
//! assert_eq!(list.size(), 9);
//! ```

pub mod config;
pub mod error;
pub mod storage;
mod sync;

pub use config::SkipListConfig;
pub use error::{ConfigError, SnapshotError};
pub use storage::arena::ArenaSize;
pub use storage::comparator::{Comparator, DefaultComparator, LessThan};
pub use storage::skiplist::{Node, SkipList};
pub use storage::snapshot::FixedRecord;
