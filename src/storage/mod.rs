pub mod arena;
pub mod comparator;
pub mod skiplist;
pub mod snapshot;
