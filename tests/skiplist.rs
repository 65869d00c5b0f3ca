mod common;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skiplist_kv::{ArenaSize, ConfigError, LessThan, SkipList, SkipListConfig};

#[test]
fn scenario_insert_find() {
    common::init_tracing();
    let list = common::seeded(6, 0.5, 1);

    for k in (1..=9).chain([12345]) {
        assert!(list.insert(k, format!("test{k}")));
    }

    assert_eq!(list.find(&7).as_deref(), Some("test7"));
    assert_eq!(list.find(&124), None);
    assert_eq!(list.size(), 10);
}

#[test]
fn scenario_remove() {
    let list = common::seeded(6, 0.5, 2);
    for k in (1..=9).chain([12345]) {
        list.insert(k, format!("test{k}"));
    }

    list.remove(&7);
    assert_eq!(list.find(&7), None);
    assert_eq!(list.size(), 9);
}

#[test]
fn no_duplicate_law() {
    let list = common::seeded(8, 0.5, 3);

    assert!(list.insert("key", "v1"));
    assert!(!list.insert("key", "v2"));
    assert_eq!(list.find(&"key"), Some("v1"));
}

// Random operations checked against a BTreeMap model
#[test]
fn matches_ordered_map_model() {
    let list = common::seeded(12, 0.5, 4);
    let mut model = BTreeMap::new();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..5_000 {
        let key: u16 = rng.random_range(0..500);
        match rng.random_range(0..3) {
            0 | 1 => {
                let value: u32 = rng.random();
                let fresh = !model.contains_key(&key);
                assert_eq!(list.insert(key, value), fresh);
                model.entry(key).or_insert(value);
            }
            _ => {
                assert_eq!(list.remove(&key), model.remove(&key));
            }
        }
    }

    // Order and count invariants
    let entries = list.entries();
    assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(entries, model.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>());
    assert_eq!(list.size(), model.len());

    for key in 0..500u16 {
        assert_eq!(list.find(&key), model.get(&key).copied());
    }
}

#[test]
fn top_level_shrinks_when_emptied() {
    let list = common::seeded(16, 0.5, 5);
    for k in 0..2_000u32 {
        list.insert(k, ());
    }
    assert!(list.current_top_level() > 0);
    assert!(list.current_top_level() <= list.max_level());

    for k in 0..2_000u32 {
        list.remove(&k);
    }
    assert!(list.is_empty());
    assert_eq!(list.current_top_level(), 0);
}

#[test]
fn range_adjacent_lookups() {
    let list = common::seeded(8, 0.5, 6);
    for k in [10u32, 20, 30] {
        list.insert(k, k * 2);
    }

    assert_eq!(list.first(), Some((10, 20)));
    assert_eq!(list.last(), Some((30, 60)));
    assert_eq!(list.lower_bound(&11), Some((20, 40)));
    assert_eq!(list.lower_bound(&31), None);
}

#[test]
fn comparator_defines_equality() {
    // Keys that differ only in case are the same key
    let cmp = LessThan(|a: &String, b: &String| a.to_ascii_lowercase() < b.to_ascii_lowercase());
    let list = SkipList::with_comparator(SkipListConfig::new(6, 0.5).with_seed(7), cmp).unwrap();

    assert!(list.insert("Alpha".to_string(), 1));
    assert!(!list.insert("ALPHA".to_string(), 2));
    assert_eq!(list.find(&"alpha".to_string()), Some(1));

    list.remove(&"aLpHa".to_string());
    assert!(list.is_empty());
}

#[test]
fn display_lists_every_level() {
    let list = common::seeded(4, 0.5, 8);
    for k in 1..=5u8 {
        list.insert(k, k);
    }

    let rendered = list.display_list();
    let levels: Vec<&str> = rendered
        .lines()
        .filter(|l| l.starts_with("Level: "))
        .collect();

    assert_eq!(levels.len(), list.current_top_level() + 1);
    assert!(rendered.contains("1:1;2:2;3:3;4:4;5:5;"));
    assert!(rendered.starts_with("====================display list BEGIN"));
}

#[test]
fn config_arena_presets() {
    for arena in [ArenaSize::Nodes(1), ArenaSize::Small, ArenaSize::Large] {
        let list = SkipList::from_config(SkipListConfig::new(4, 0.25).with_arena(arena)).unwrap();
        for k in 0..300u32 {
            list.insert(k, k);
        }
        assert_eq!(list.size(), 300);
    }
}

#[test]
fn oversized_arena_config_is_an_error() {
    let config: SkipListConfig =
        serde_json::from_str(r#"{"max_level":6,"arena":{"nodes":18446744073709551615}}"#).unwrap();

    let result = SkipList::<u64, u64>::from_config(config);
    assert!(matches!(result, Err(ConfigError::ArenaCapacity { .. })));
}
