use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quickfilter::QuickFilter;
use std::hint::black_box;

const SIZES: &[usize] = &[100, 1000, 20000];

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_operations");

    group.bench_function("add", |b| {
        let mut filter = QuickFilter::new(20000);
        let mut i = 0;
        b.iter(|| {
            filter.add(black_box(i % 20000));
            i += 7;
        });
    });

    group.bench_function("delete", |b| {
        let mut filter = QuickFilter::new_filled(20000);
        let mut i = 0;
        b.iter(|| {
            filter.delete(black_box(i % 20000));
            i += 7;
        });
    });

    group.bench_function("has", |b| {
        let filter = QuickFilter::from_fn(20000, |i| i % 3 == 0);
        let mut i = 0;
        b.iter(|| {
            black_box(filter.has(i % 20000));
            i += 7;
        });
    });

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let dense = QuickFilter::from_fn(size, |i| i % 2 == 0);
        group.bench_with_input(BenchmarkId::new("dense", size), &dense, |b, filter| {
            b.iter(|| filter.iter().fold(0usize, |acc, i| acc.wrapping_add(i)));
        });

        let sparse = QuickFilter::from_fn(size, |i| i % 97 == 0);
        group.bench_with_input(BenchmarkId::new("sparse", size), &sparse, |b, filter| {
            b.iter(|| filter.iter().fold(0usize, |acc, i| acc.wrapping_add(i)));
        });
    }

    group.finish();
}

fn bench_bulk_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_operations");

    for &size in SIZES {
        let a = QuickFilter::from_fn(size, |i| i % 2 == 0);
        let b_filter = QuickFilter::from_fn(size, |i| i % 3 == 0);

        group.bench_with_input(BenchmarkId::new("union_of", size), &size, |b, _| {
            let mut dst = QuickFilter::new(size);
            b.iter(|| {
                dst.union_of(black_box(&a), black_box(&b_filter)).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("intersection_with", size), &size, |b, _| {
            let mut dst = a.clone();
            b.iter(|| {
                dst.intersection_with(black_box(&b_filter)).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("fill_clear", size), &size, |b, _| {
            let mut dst = QuickFilter::new(size);
            b.iter(|| {
                dst.fill();
                dst.clear();
            });
        });

        group.bench_with_input(BenchmarkId::new("resize", size), &size, |b, &size| {
            let mut dst = QuickFilter::new_filled(size);
            b.iter(|| {
                dst.resize(size / 2).resize(size);
            });
        });
    }

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &size in SIZES {
        let data: Vec<u32> = (0..size as u32).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("from_slice", size), &data, |b, data| {
            b.iter(|| QuickFilter::from_slice(data, |v| v % 2 == 0));
        });

        group.bench_with_input(BenchmarkId::new("add_loop", size), &data, |b, data| {
            b.iter(|| {
                let mut filter = QuickFilter::new(data.len());
                for (i, v) in data.iter().enumerate() {
                    if v % 2 == 0 {
                        filter.add(i);
                    }
                }
                filter
            });
        });
    }

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    let filter = QuickFilter::new_filled(20000);
    group.bench_function("clone", |b| {
        b.iter(|| black_box(filter.clone()));
    });
    group.bench_function("copy_from", |b| {
        let mut dst = QuickFilter::new(20000);
        b.iter(|| {
            dst.copy_from(black_box(&filter));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_point_operations,
    bench_iteration,
    bench_bulk_operations,
    bench_construction,
    bench_clone
);
criterion_main!(benches);
