#![allow(dead_code)]

use skiplist_kv::{SkipList, SkipListConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn seeded<K: Ord, V>(max_level: usize, p: f64, seed: u64) -> SkipList<K, V> {
    SkipList::from_config(SkipListConfig::new(max_level, p).with_seed(seed))
        .expect("valid config")
}
