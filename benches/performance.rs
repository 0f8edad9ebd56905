use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use revlist::{RevList, Sequence};

fn bench_sequential_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_append");

    for size in [10, 100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("from_empty", size), size, |b, &size| {
            b.iter(|| {
                let list = RevList::new();
                for i in 0..size {
                    black_box(list.append(i).unwrap());
                }
                black_box(list.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("presized", size), size, |b, &size| {
            b.iter(|| {
                let list = RevList::with_capacity(size).unwrap();
                for i in 0..size {
                    black_box(list.append(i).unwrap());
                }
                black_box(list.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("get_operations", size), size, |b, &size| {
            let list: RevList<usize> = (0..size).collect();

            b.iter(|| {
                for i in 0..size {
                    black_box(list.get(i).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("full_iteration", size), size, |b, &size| {
            let list: RevList<usize> = (0..size).collect();

            b.iter(|| {
                for item in black_box(&list) {
                    black_box(item.unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("cursor_remove_odd", size), size, |b, &size| {
            b.iter(|| {
                let list: RevList<usize> = (0..size).collect();
                let mut cursor = list.cursor();
                while let Some(value) = cursor.next().unwrap() {
                    if value % 2 == 1 {
                        black_box(cursor.remove().unwrap());
                    }
                }
                black_box(list.len())
            });
        });
    }
    group.finish();
}

fn bench_bulk_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("remove_range", size), size, |b, &size| {
            b.iter(|| {
                let list: RevList<usize> = (0..size).collect();
                list.remove_range(size / 4, size / 2).unwrap();
                black_box(list.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("insert_all_front", size), size, |b, &size| {
            b.iter(|| {
                let list: RevList<usize> = (0..size).collect();
                list.insert_all(0, 0..size).unwrap();
                black_box(list.len())
            });
        });
    }
    group.finish();
}

fn bench_nested_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("three_deep_get", size), size, |b, &size| {
            let list: RevList<usize> = (0..size * 2).collect();
            let outer = list.sub_range(1, size * 2 - 1).unwrap();
            let middle = outer.sub_range(1, size * 2 - 3).unwrap();
            let inner = middle.sub_range(1, size).unwrap();

            b.iter(|| {
                for i in 0..inner.size().unwrap() {
                    black_box(inner.get(i).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_append,
    bench_random_access,
    bench_iterator_performance,
    bench_bulk_operations,
    bench_nested_views
);
criterion_main!(benches);
