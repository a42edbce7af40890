use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use symtable::{GrowthPolicy, HashSymTable, ListSymTable, SymTableBuilder, SymbolTable};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled<T: SymbolTable<u64>>(mut t: T, seed: u64, n: usize) -> (T, Vec<String>) {
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.put(k, i as u64).unwrap();
    }
    (t, keys)
}

fn bench_put_fresh(c: &mut Criterion) {
    let mut g = c.benchmark_group("put_fresh_10k");
    g.bench_function("hash_fixed", |b| {
        b.iter_batched(
            HashSymTable::<u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.put(&key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    g.bench_function("hash_growing", |b| {
        b.iter_batched(
            || {
                SymTableBuilder::new()
                    .with_growth(GrowthPolicy::LoadFactor(0.75))
                    .build::<u64>()
            },
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.put(&key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut g = c.benchmark_group("get_hit_1k");
    let (hash, keys) = filled(HashSymTable::new(), 7, 10_000);
    g.bench_function("hash_on_10k", |b| {
        b.iter(|| {
            for k in keys.iter().step_by(10) {
                black_box(hash.get(k));
            }
        })
    });
    let (list, keys) = filled(ListSymTable::new(), 7, 1_000);
    g.bench_function("list_on_1k", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(list.get(k));
            }
        })
    });
    g.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let (t, _) = filled(HashSymTable::new(), 11, 10_000);
    c.bench_function("hash::get_miss_1k_on_10k", |b| {
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..1_000 {
                if let Some(x) = miss.next() {
                    black_box(t.get(&key(x)));
                }
            }
        })
    });
}

fn bench_remove_all(c: &mut Criterion) {
    c.bench_function("hash::remove_all_10k", |b| {
        b.iter_batched(
            || filled(HashSymTable::new(), 5, 10_000),
            |(mut t, keys)| {
                for k in &keys {
                    black_box(t.remove(k));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_map(c: &mut Criterion) {
    let (mut t, _) = filled(HashSymTable::new(), 13, 10_000);
    c.bench_function("hash::map_10k", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            t.map(|_, v, acc: &mut u64| *acc = acc.wrapping_add(*v), &mut sum);
            black_box(sum)
        })
    });
}

fn configure() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_put_fresh, bench_get_hit, bench_get_miss, bench_remove_all, bench_map
}
criterion_main!(benches);
