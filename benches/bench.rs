use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use range_dict::{Interval, RangeDict};
use std::hint::black_box;

struct IntervalGenerator {
    rng: StdRng,
}
impl IntervalGenerator {
    fn new() -> Self {
        Self {
            rng: StdRng::from_seed([0; 32]),
        }
    }

    /// Disjoint half-open intervals `[2k, 2k + 1)`, shuffled.
    fn disjoint(&mut self, count: usize) -> Vec<Interval<u32>> {
        let mut intervals: Vec<_> = (0..count as u32)
            .map(|k| Interval::closed_open(2 * k, 2 * k + 1).unwrap())
            .collect();
        intervals.shuffle(&mut self.rng);
        intervals
    }

    fn points(&mut self, count: usize, limit: u32) -> Vec<u32> {
        std::iter::repeat_with(|| self.rng.gen_range(0..limit))
            .take(count)
            .collect()
    }
}

// insert helper fn
fn range_dict_insert(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals = gen.disjoint(count);
    bench.iter(|| {
        let mut map = RangeDict::new();
        for i in &intervals {
            black_box(map.insert(i, ()).unwrap());
        }
    });
}

// insert and remove helper fn
fn range_dict_insert_remove(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals = gen.disjoint(count);
    bench.iter(|| {
        let mut map = RangeDict::new();
        for i in &intervals {
            black_box(map.insert(i, ()).unwrap());
        }
        for i in &intervals {
            black_box(map.remove(i).unwrap());
        }
    });
}

// point lookup helper fn
fn range_dict_lookup(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals = gen.disjoint(count);
    let points = gen.points(count, 2 * count as u32);
    let mut map = RangeDict::new();
    for (v, i) in intervals.iter().enumerate() {
        map.insert(i, v).unwrap();
    }
    bench.iter(|| {
        for p in &points {
            black_box(map.get(*p));
        }
    });
}

fn bench_range_dict_insert(c: &mut Criterion) {
    c.bench_function("bench_range_dict_insert_100", |b| range_dict_insert(100, b));
    c.bench_function("bench_range_dict_insert_1000", |b| {
        range_dict_insert(1000, b)
    });
    c.bench_function("bench_range_dict_insert_10,000", |b| {
        range_dict_insert(10_000, b)
    });
    c.bench_function("bench_range_dict_insert_100,000", |b| {
        range_dict_insert(100_000, b)
    });
}

fn bench_range_dict_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_range_dict_insert_remove_100", |b| {
        range_dict_insert_remove(100, b)
    });
    c.bench_function("bench_range_dict_insert_remove_1000", |b| {
        range_dict_insert_remove(1000, b)
    });
    c.bench_function("bench_range_dict_insert_remove_10,000", |b| {
        range_dict_insert_remove(10_000, b)
    });
    c.bench_function("bench_range_dict_insert_remove_100,000", |b| {
        range_dict_insert_remove(100_000, b)
    });
}

fn bench_range_dict_lookup(c: &mut Criterion) {
    c.bench_function("bench_range_dict_lookup_1000", |b| {
        range_dict_lookup(1000, b)
    });
    c.bench_function("bench_range_dict_lookup_100,000", |b| {
        range_dict_lookup(100_000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_range_dict_insert, bench_range_dict_insert_remove,
}

criterion_group! {
    name = benches_lookup;
    config = criterion_config();
    targets = bench_range_dict_lookup
}

criterion_main!(benches_basic_op, benches_lookup);
