extern crate env_logger;
extern crate hashed_treap;
extern crate rand;

use hashed_treap::treap::TreapMap;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded_rng() -> rand::XorShiftRng {
    rand::SeedableRng::from_seed([1, 1, 1, 1])
}

#[test]
fn int_test_treap() {
    init_logger();
    let mut rng = seeded_rng();
    let mut map = TreapMap::with_keys(1, 1);
    let mut expected = Vec::new();
    for _ in 0..100_000 {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        map.insert(key, val);
        expected.push((key, val));
    }

    expected.reverse();
    expected.sort_by(|l, r| l.0.cmp(&r.0));
    expected.dedup_by_key(|pair| pair.0);

    assert_eq!(map.size(), expected.len());
    assert!(map.is_bst());
    assert!(map.is_heap());

    assert_eq!(map.min(), Some(&expected[0].0));
    assert_eq!(map.max(), Some(&expected[expected.len() - 1].0));

    for entry in &expected {
        assert!(map.contains_key(&entry.0));
        assert_eq!(map.get(&entry.0), Some(&entry.1));
    }

    for entry in &mut expected {
        let val_1 = rng.gen::<u32>();
        let val_2 = rng.gen::<u32>();

        let old_val = map.insert(entry.0, val_1);
        assert_eq!(old_val, Some(entry.1));
        {
            let old_val = map.get_mut(&entry.0);
            *old_val.unwrap() = val_2;
        }
        *entry = (entry.0, val_2);
        assert_eq!(map.get(&entry.0), Some(&val_2));
    }

    let mut expected_size = expected.len();
    for entry in expected {
        let old_entry = map.remove(&entry.0);
        expected_size -= 1;
        assert_eq!(old_entry, Some((entry.0, entry.1)));
        assert_eq!(map.size(), expected_size);
    }
    assert!(map.is_empty());
}

#[test]
fn test_invariants_after_each_insert() {
    init_logger();
    let mut rng = seeded_rng();
    let mut map = TreapMap::new();
    let mut keys = HashSet::new();
    for _ in 0..55 {
        let key = char::from(rng.gen_range(1u8, 201u8));
        let val = rng.gen_range(1u32, 100_001u32);
        map.insert(key, val);
        keys.insert(key);
        assert!(map.is_bst());
        assert!(map.is_heap());
        assert_eq!(map.size(), keys.len());
    }
}

#[test]
fn test_bounded_alphabet_counts_distinct_keys() {
    init_logger();
    let mut rng = seeded_rng();
    let mut map = TreapMap::new();
    let mut keys = HashSet::new();
    for _ in 0..1000 {
        let key = char::from(rng.gen_range(0u8, 251u8));
        let val = rng.gen::<f64>();
        map.insert(key, val);
        keys.insert(key);
    }
    assert!(keys.len() < 1000);
    assert_eq!(map.size(), keys.len());
    assert_eq!(map.iter().count(), keys.len());
    assert!(map.is_heap());
    for key in &keys {
        assert!(map.get(key).is_some());
    }
}

#[test]
fn test_alphabet_delete() {
    init_logger();
    let mut map = TreapMap::new();
    for offset in 0..26u8 {
        let key = ((b'A' + offset) as char).to_string();
        map.insert(key.clone(), key);
    }
    assert_eq!(map.size(), 26);
    assert_eq!(map.get("A").map(String::as_str), Some("A"));

    assert!(map.delete("A"));
    assert_eq!(map.size(), 25);
    assert_eq!(map.get("A"), None);
    assert!(map.is_bst());
    assert!(map.is_heap());

    assert!(!map.delete(" "));
    assert_eq!(map.size(), 25);
}

#[test]
fn test_delete_in_insertion_order() {
    init_logger();
    let keys: Vec<char> = (0..95u8).map(|offset| (b'A' + offset) as char).collect();
    let mut map = TreapMap::new();
    for &key in &keys {
        map.insert(key, key);
        assert_eq!(map.get(&key), Some(&key));
    }
    assert_eq!(map.size(), 95);

    for (index, key) in keys.iter().enumerate() {
        assert!(map.delete(key));
        assert!(map.is_bst());
        assert!(map.is_heap());
        assert_eq!(map.size(), 95 - index - 1);
    }
    for key in &keys {
        assert_eq!(map.get(key), None);
    }
    assert_eq!(map.size(), 0);
    assert!(!map.delete(&'A'));
}

#[test]
fn test_find_insert_heap() {
    init_logger();
    let mut rng = seeded_rng();
    let mut map = TreapMap::new();
    let mut keys = HashSet::new();
    for _ in 0..10_000 {
        let draw = rng.gen_range(0u64, 10_000_001u64);
        let key = draw.to_string();
        let val = 10_000 * draw;
        map.insert(key.clone(), val);
        assert_eq!(map.get(&key), Some(&val));
        keys.insert(key);
    }
    assert!(map.is_heap());
    assert_eq!(map.size(), keys.len());
}

#[test]
fn test_sequential_keys_stay_shallow() {
    init_logger();
    let mut map = TreapMap::with_keys(2, 3);
    for key in 0..10_000u32 {
        map.insert(key, key);
    }
    assert!(map.height() < 60);
    for key in (0..10_000u32).rev().step_by(2) {
        assert!(map.delete(&key));
    }
    assert_eq!(map.size(), 5000);
    assert!(map.height() < 60);
    assert!(map.is_bst());
    assert!(map.is_heap());
}

#[test]
fn test_mixed_operations_against_btreemap() {
    init_logger();
    let mut rng = seeded_rng();
    let mut map = TreapMap::new();
    let mut model = BTreeMap::new();
    for step in 0..20_000 {
        let key = rng.gen_range(0u32, 500u32);
        if rng.gen::<bool>() {
            let val = rng.gen::<u32>();
            assert_eq!(map.insert(key, val), model.insert(key, val));
        } else {
            assert_eq!(map.delete(&key), model.remove(&key).is_some());
        }
        assert_eq!(map.size(), model.len());
        if step % 500 == 0 {
            assert!(map.is_bst());
            assert!(map.is_heap());
        }
    }
    assert!(map.iter().eq(model.iter()));
}
