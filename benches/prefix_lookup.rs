use std::hint::black_box;

use contextkeeper::{ContextItem, ItemStore, JsonFileStore};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

/// Store with `count` random-id items; nothing is persisted until a mutation
fn populated_store(dir: &TempDir, count: usize) -> (JsonFileStore, Vec<String>) {
    let items: Vec<ContextItem> = (0..count).map(|i| ContextItem::new(format!("note {}", i))).collect();
    let ids = items.iter().map(|item| item.id.clone()).collect();

    let store = JsonFileStore::new(dir.path());
    store.set_items(items).unwrap();
    (store, ids)
}

fn bench_prefix_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_lookup");

    for size in [100, 1_000, 10_000] {
        let dir = TempDir::new().unwrap();
        let (store, ids) = populated_store(&dir, size);
        let last = ids.last().unwrap().clone();

        group.bench_with_input(BenchmarkId::new("get_by_id_last", size), &size, |b, _| {
            b.iter(|| store.get_by_id(black_box(&last)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("get_by_prefix_short", size), &size, |b, _| {
            b.iter(|| store.get_by_prefix(black_box(&last[..8])).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("resolve_full_id", size), &size, |b, _| {
            b.iter(|| store.resolve(black_box(&last)).unwrap());
        });

        // Single hex digit prefixes are almost always ambiguous at these sizes
        group.bench_with_input(BenchmarkId::new("find_by_prefix_one_char", size), &size, |b, _| {
            b.iter(|| store.find_by_prefix(black_box(&last[..1])));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prefix_lookup);
criterion_main!(benches);
