use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use artisum_core::{digests_from_source, Algorithm};
use artisum_testkit::memory_source;

fn single_pass(c: &mut Criterion) {
    let data = vec![0x5au8; 4 * 1024 * 1024];
    let sets: [(&str, Vec<Algorithm>); 2] = [
        ("sha256", vec![Algorithm::sha256()]),
        (
            "sha256+sha512+blake3",
            vec![
                Algorithm::sha256(),
                Algorithm::new("sha512").unwrap(),
                Algorithm::new("blake3").unwrap(),
            ],
        ),
    ];

    let mut group = c.benchmark_group("digests_from_source");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for (name, algorithms) in &sets {
        group.bench_with_input(BenchmarkId::from_parameter(name), algorithms, |b, algorithms| {
            b.iter(|| {
                let mut source = memory_source("bench", &data);
                let engines = digests_from_source(&mut source, algorithms).unwrap();
                for engine in engines.into_values() {
                    black_box(engine.finalize_hex());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, single_pass);
criterion_main!(benches);
