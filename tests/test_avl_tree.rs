extern crate extended_containers;
extern crate rand;
extern crate serde_test;
extern crate simplelog;

use extended_containers::avl_tree::{BalancedTree, OrderedMap, OrderedMultiset, OrderedSet};
use extended_containers::Error;
use rand::Rng;
use simplelog::{Config, LevelFilter, SimpleLogger};
use std::collections::{BTreeMap, BTreeSet};

const NUM_OF_OPERATIONS: usize = 20_000;

fn init_logger() {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());
}

fn rng() -> rand::XorShiftRng {
    rand::SeedableRng::from_seed([1, 1, 1, 1])
}

#[test]
fn int_test_ascending_inserts() {
    init_logger();
    let mut tree = BalancedTree::new(false);
    tree.insert(10);
    tree.insert(20);
    tree.insert(30);

    assert_eq!(tree.top(), Ok(&20));
    assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![10, 20, 30]);
}

#[test]
fn int_test_multiset_duplicates() {
    init_logger();
    let mut multiset = OrderedMultiset::new();
    for value in &[10, 20, 10, 30] {
        multiset.insert(*value);
    }

    assert_eq!(multiset.iter().cloned().collect::<Vec<u32>>(), vec![10, 10, 20, 30]);
    assert_eq!(multiset.count(&10), 2);
}

#[test]
fn int_test_map_index_inserts_default() {
    init_logger();
    let mut map = OrderedMap::new();
    map.insert(1, String::from("a"));
    map.insert(2, String::from("b"));

    assert_eq!(map.get_or_insert_default(3).as_str(), "");
    assert_eq!(map.len(), 3);
    let error = map.at(&99).unwrap_err();
    assert_eq!(error, Error::KeyNotFound);
    assert!(error.is_out_of_range());
}

#[test]
fn int_test_ordered_set() {
    init_logger();
    let mut rng = rng();
    let mut set = OrderedSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1000u32);
        if rng.gen_weighted_bool(2) {
            assert_eq!(set.remove(&key), expected.take(&key));
        } else {
            assert_eq!(set.insert(key).1, expected.insert(key));
        }
        assert_eq!(set.len(), expected.len());
    }

    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
    assert_eq!(
        set.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    for key in 0..1000 {
        assert_eq!(set.contains(&key), expected.contains(&key));
        assert_eq!(
            set.get(set.lower_bound(&key)),
            expected.range(key..).next(),
        );
    }
}

#[test]
fn int_test_ordered_multiset() {
    init_logger();
    let mut rng = rng();
    let mut multiset = OrderedMultiset::new();
    let mut expected: BTreeMap<u32, usize> = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 200u32);
        if rng.gen_weighted_bool(3) {
            let removed = multiset.remove(&key);
            let present = match expected.get_mut(&key) {
                Some(count) => {
                    *count -= 1;
                    true
                },
                None => false,
            };
            assert_eq!(removed.is_some(), present);
            if expected.get(&key) == Some(&0) {
                expected.remove(&key);
            }
        } else {
            multiset.insert(key);
            *expected.entry(key).or_insert(0) += 1;
        }
    }

    for key in 0..200 {
        let count = expected.get(&key).cloned().unwrap_or(0);
        assert_eq!(multiset.count(&key), count);
        let (from, to) = multiset.equal_range(&key);
        assert_eq!(multiset.range(from, to).count(), count);
    }
    assert_eq!(multiset.len(), expected.values().sum::<usize>());
}

#[test]
fn int_test_ordered_map() {
    init_logger();
    let mut rng = rng();
    let mut map = OrderedMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1000u32);
        let val = rng.gen::<u32>();
        match rng.gen_range(0, 4) {
            0 => assert_eq!(map.remove(&key), expected.remove(&key).map(|old| (key, old))),
            1 => {
                map.insert_or_assign(key, val);
                expected.insert(key, val);
            },
            2 => {
                let value = map.get_or_insert_default(key);
                *value = value.wrapping_add(1);
                let value = expected.entry(key).or_insert(0);
                *value = value.wrapping_add(1);
            },
            _ => {
                let inserted = map.insert(key, val).1;
                assert_eq!(inserted, !expected.contains_key(&key));
                expected.entry(key).or_insert(val);
            },
        }
        assert_eq!(map.at(&key).ok(), expected.get(&key));
    }

    assert_eq!(map.len(), expected.len());
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );
}

#[test]
fn int_test_cursor_walks_both_ways() {
    init_logger();
    let mut rng = rng();
    let mut tree = BalancedTree::new(true);
    for _ in 0..1000 {
        tree.insert(rng.gen_range(0, 100u32));
    }

    let mut forward = Vec::new();
    let mut cursor = tree.begin();
    while cursor != tree.end() {
        forward.push(tree.get(cursor).cloned());
        cursor = tree.next(cursor);
    }

    let mut backward = Vec::new();
    let mut cursor = tree.end();
    while cursor != tree.begin() {
        cursor = tree.prev(cursor);
        backward.push(tree.get(cursor).cloned());
    }
    backward.reverse();

    assert_eq!(forward.len(), 1000);
    assert_eq!(forward, backward);
    assert!(forward.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn int_test_copy_and_move() {
    init_logger();
    let mut set: OrderedSet<u32> = (0..100).collect();
    let copy = set.clone();
    for key in 0..50 {
        set.remove(&key);
    }
    assert_eq!(copy.len(), 100);
    assert_eq!(set.len(), 50);

    let moved = std::mem::replace(&mut set, OrderedSet::new());
    assert!(set.is_empty());
    assert_eq!(moved.min(), Some(&50));
}

#[test]
fn int_test_merge_drains_source() {
    init_logger();
    let mut left: OrderedMultiset<u32> = (0..50).collect();
    let mut right: OrderedMultiset<u32> = (25..75).collect();
    left.merge(&mut right);
    assert!(right.is_empty());
    assert_eq!(left.len(), 100);
    assert_eq!(left.count(&30), 2);

    let mut left: OrderedSet<u32> = (0..50).collect();
    let mut right: OrderedSet<u32> = (25..75).collect();
    left.merge(&mut right);
    assert!(right.is_empty());
    assert_eq!(left.len(), 75);
}

#[test]
fn int_test_serde_rebuilds_tree() {
    use serde_test::{assert_de_tokens, Token};

    init_logger();
    let expected: OrderedMultiset<u32> = vec![1, 2, 2, 3].into_iter().collect();
    assert_de_tokens(
        &expected,
        &[
            Token::Seq { len: Some(4) },
            Token::U32(2),
            Token::U32(3),
            Token::U32(1),
            Token::U32(2),
            Token::SeqEnd,
        ],
    );
}
