use criterion::{black_box, criterion_group, criterion_main, Criterion};
use extended_containers::avl_tree::{OrderedMap, OrderedMultiset};
use extended_containers::list::LinkedList;
use extended_containers::vector::DynamicArray;
use rand::Rng;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreemap_insert(c: &mut Criterion) {
    c.bench_function("bench btreemap insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = BTreeMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                map.insert(key, val);
            }
        })
    });
}

fn bench_ordered_map_insert(c: &mut Criterion) {
    c.bench_function("bench ordered map insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = OrderedMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                map.insert_or_assign(key, val);
            }
        })
    });
}

fn bench_ordered_map_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = OrderedMap::new();
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        map.insert_or_assign(key, val);
        keys.push(key);
    }

    c.bench_function("bench ordered map get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

fn bench_ordered_multiset_count(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut multiset = OrderedMultiset::new();
    for _ in 0..NUM_OF_OPERATIONS {
        multiset.insert(rng.gen_range(0, 10u32));
    }

    c.bench_function("bench ordered multiset count", move |b| {
        b.iter(|| {
            for key in 0..10 {
                black_box(multiset.count(&key));
            }
        })
    });
}

fn bench_linked_list_sort(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let values: Vec<u32> = (0..NUM_OF_OPERATIONS).map(|_| rng.next_u32()).collect();

    c.bench_function("bench linked list sort", move |b| {
        b.iter(|| {
            let mut list: LinkedList<u32> = values.iter().cloned().collect();
            list.sort();
            black_box(list.front().ok().cloned());
        })
    });
}

fn bench_dynamic_array_push_back(c: &mut Criterion) {
    c.bench_function("bench dynamic array push back", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for i in 0..NUM_OF_OPERATIONS {
                array.push_back(i);
            }
            black_box(array.capacity());
        })
    });
}

criterion_group!(
    benches,
    bench_btreemap_insert,
    bench_ordered_map_insert,
    bench_ordered_map_get,
    bench_ordered_multiset_count,
    bench_linked_list_sort,
    bench_dynamic_array_push_back,
);
criterion_main!(benches);
