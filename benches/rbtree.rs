use criterion::{criterion_group, criterion_main, Criterion};
use rb_index::OrderedMap;

fn set(c: &mut Criterion) {
    let mut map: OrderedMap<usize, usize> = OrderedMap::new("bench-set");
    c.bench_function("rbtree_set", |b| {
        b.iter(|| {
            for k in 0..1000 {
                map.set(k, k);
            }
        })
    });
}

fn get(c: &mut Criterion) {
    let map = OrderedMap::load_from("bench-get", (0..10_000).map(|k: usize| (k, k))).unwrap();
    c.bench_function("rbtree_get", |b| {
        b.iter(|| {
            for k in 0..1000 {
                criterion::black_box(map.get(&(k * 7)));
            }
        })
    });
}

fn set_delete(c: &mut Criterion) {
    let mut map: OrderedMap<usize, usize> = OrderedMap::new("bench-delete");
    c.bench_function("rbtree_set_delete", |b| {
        b.iter(|| {
            for k in 0..1000 {
                map.set(k, k);
            }
            for k in 0..1000 {
                map.delete(&k);
            }
        })
    });
}

criterion_group!(benches, set, get, set_delete);
criterion_main!(benches);
