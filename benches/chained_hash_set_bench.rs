use chained_hashset::ChainedHashSet;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_fresh_100k");
    group.bench_function("chained", |b| {
        b.iter_batched(
            ChainedHashSet::<String>::new,
            |mut s| {
                for x in lcg(1).take(100_000) {
                    s.insert(key(x));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("hashbrown", |b| {
        b.iter_batched(
            hashbrown::HashSet::<String>::new,
            |mut s| {
                for x in lcg(1).take(100_000) {
                    s.insert(key(x));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("std", |b| {
        b.iter_batched(
            std::collections::HashSet::<String>::new,
            |mut s| {
                for x in lcg(1).take(100_000) {
                    s.insert(key(x));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_contains_hit_10k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(7).take(20_000).map(key).collect();
    let chained: ChainedHashSet<String> = keys.iter().cloned().collect();
    let brown: hashbrown::HashSet<String> = keys.iter().cloned().collect();

    let mut group = c.benchmark_group("contains_hit_10k");
    group.bench_function("chained", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in keys.iter().take(10_000) {
                hits += chained.contains(k.as_str()) as usize;
            }
            black_box(hits)
        })
    });
    group.bench_function("hashbrown", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in keys.iter().take(10_000) {
                hits += brown.contains(k.as_str()) as usize;
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_erase_half_of_50k(c: &mut Criterion) {
    let keys: Vec<String> = lcg(3).take(50_000).map(key).collect();
    c.bench_function("chained::erase_half_of_50k", |b| {
        b.iter_batched(
            || keys.iter().cloned().collect::<ChainedHashSet<String>>(),
            |mut s| {
                for k in keys.iter().step_by(2) {
                    s.erase(k.as_str());
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iterate_100k(c: &mut Criterion) {
    let s: ChainedHashSet<u64> = lcg(11).take(100_000).collect();
    let mut group = c.benchmark_group("iterate_100k");
    group.bench_function("iter", |b| b.iter(|| black_box(s.iter().fold(0u64, |a, v| a ^ v))));
    group.bench_function("cursor", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            let mut cur = s.begin();
            while !cur.is_end() {
                if let Ok(v) = cur.value(&s) {
                    acc ^= v;
                }
                let _ = cur.advance(&s);
            }
            black_box(acc)
        })
    });
    group.finish();
}

fn configure() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = configure();
    targets = bench_insert_fresh_100k, bench_contains_hit_10k, bench_erase_half_of_50k, bench_iterate_100k
}
criterion_main!(benches);
