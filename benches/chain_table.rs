use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::distributions::Alphanumeric;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use chain_bench::{cmp_ignore_case, ChainTable};

fn make_names(n: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    (0..n)
        .map(|_| -> String {
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(10)
                .map(char::from)
                .collect()
        })
        .collect()
}

pub fn chain_table_benchmark(c: &mut Criterion) {
    let shuffled = make_names(10_000);
    let mut sorted = shuffled.clone();
    sorted.sort_by(|a, b| cmp_ignore_case(a, b));

    let mut group = c.benchmark_group("chain_table");
    for (label, names) in [("sorted", &sorted), ("shuffled", &shuffled)].iter() {
        group.bench_with_input(BenchmarkId::new("insert", label), names, |b, names| {
            b.iter(|| {
                let mut table = ChainTable::new("bench");
                for name in names.iter() {
                    table.insert(name.as_str());
                }
                black_box(table.len())
            })
        });

        let table = ChainTable::load_from("bench", names.iter().map(String::as_str));
        group.bench_with_input(BenchmarkId::new("search", label), names, |b, names| {
            b.iter(|| names.iter().filter(|name| table.contains(name.as_str())).count())
        });

        group.bench_with_input(BenchmarkId::new("delete", label), names, |b, names| {
            b.iter_batched(
                || table.clone(),
                |mut table| {
                    for name in names.iter() {
                        table.remove(name.as_str());
                    }
                    table
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, chain_table_benchmark);
criterion_main!(benches);
