use avl_interval_index::{EntityRef, IntervalIndex};
use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

struct IntervalGenerator {
    rng: StdRng,
    limit: i64,
    count: usize,
}

impl IntervalGenerator {
    fn new() -> Self {
        const LIMIT: i64 = 1000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
            count: 0,
        }
    }

    fn next(&mut self) -> (i64, i64, EntityRef) {
        let start = self.rng.gen_range(0..self.limit - 1);
        let end = self.rng.gen_range(start..self.limit);
        self.count += 1;
        (start, end, EntityRef::object(format!("obj-{}", self.count)))
    }
}

// insert helper fn
fn interval_index_insert(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let entries: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut index = IntervalIndex::new();
        for (start, end, data) in entries.clone() {
            black_box(index.insert(start, end, data).unwrap());
        }
    });
}

// insert and remove-by-id helper fn
fn interval_index_insert_remove(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let entries: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut index = IntervalIndex::new();
        for (start, end, data) in entries.clone() {
            black_box(index.insert(start, end, data).unwrap());
        }
        for (_, _, data) in &entries {
            black_box(index.remove_by_id(&data.id));
        }
    });
}

// point query helper fn
fn interval_index_find_overlapping(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let entries: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut index = IntervalIndex::new();
    for (start, end, data) in entries {
        index.insert(start, end, data).unwrap();
    }
    let points: Vec<i64> = (0..1000).map(|_| gen.rng.gen_range(0..gen.limit)).collect();
    bench.iter(|| {
        for &point in &points {
            black_box(index.find_overlapping(point));
        }
    });
}

fn bench_interval_index_insert(c: &mut Criterion) {
    c.bench_function("bench_interval_index_insert_100", |b| {
        interval_index_insert(100, b)
    });
    c.bench_function("bench_interval_index_insert_1000", |b| {
        interval_index_insert(1000, b)
    });
    c.bench_function("bench_interval_index_insert_10,000", |b| {
        interval_index_insert(10_000, b)
    });
}

fn bench_interval_index_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_interval_index_insert_remove_100", |b| {
        interval_index_insert_remove(100, b)
    });
    c.bench_function("bench_interval_index_insert_remove_1000", |b| {
        interval_index_insert_remove(1000, b)
    });
}

fn bench_interval_index_find_overlapping(c: &mut Criterion) {
    c.bench_function("bench_interval_index_find_overlapping_100", |b| {
        interval_index_find_overlapping(100, b)
    });
    c.bench_function("bench_interval_index_find_overlapping_1000", |b| {
        interval_index_find_overlapping(1000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_interval_index_insert, bench_interval_index_insert_remove,
}

criterion_group! {
    name = benches_query;
    config = criterion_config();
    targets = bench_interval_index_find_overlapping
}

criterion_main!(benches_basic_op, benches_query);
