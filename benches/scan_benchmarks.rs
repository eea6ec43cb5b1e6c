/// Performance benchmarks for the seed scan
///
/// Run with: cargo bench
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seedshift::scoring::global_match_score;
use seedshift::{scan, AlignedRecord, Alignment, Candidate, ScanConfig};

/// Synthetic alignment: one gapped anchor and `variants` mutated copies
fn synthetic_alignment(width: usize, variants: usize, seed: u64) -> Alignment {
    let mut rng = StdRng::seed_from_u64(seed);
    let bases = [b'A', b'C', b'G', b'U'];
    let anchor: Vec<u8> = (0..width)
        .map(|i| if i % 37 == 0 { b'-' } else { bases[rng.gen_range(0..4)] })
        .collect();

    let mut records = vec![AlignedRecord::new(
        "anchor.1",
        String::from_utf8(anchor.clone()).unwrap(),
    )];
    for v in 0..variants {
        let mut seq = anchor.clone();
        for _ in 0..width / 20 {
            let pos = rng.gen_range(0..width);
            seq[pos] = bases[rng.gen_range(0..4)];
        }
        records.push(AlignedRecord::new(
            format!("variant{v}.1"),
            String::from_utf8(seq).unwrap(),
        ));
    }
    Alignment::new(records).unwrap()
}

fn synthetic_candidates(count: usize, max_position: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| {
            let positions: Vec<usize> = (0..4).map(|k| 1 + (i * 13 + k * 97) % max_position).collect();
            let seeds = vec!["ACGUACG".to_string(); positions.len()];
            Candidate::new(format!("anchor.{i}"), format!("miR-{}", i % 50), positions, seeds).unwrap()
        })
        .collect()
}

fn bench_scan_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let alignment = synthetic_alignment(5000, 50, 42);

    for size in [100, 1000].iter() {
        let candidates = synthetic_candidates(*size, 4000);
        group.throughput(Throughput::Elements(*size as u64));
        group.sample_size(10);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(scan(&alignment, &candidates, &ScanConfig::default())));
        });
    }

    group.finish();
}

fn bench_seed_scoring(c: &mut Criterion) {
    c.bench_function("global_match_score_8mer", |b| {
        b.iter(|| global_match_score(black_box("ACG-UACG"), black_box("ACGGUA-G")))
    });
}

criterion_group!(benches, bench_scan_pipeline, bench_seed_scoring);
criterion_main!(benches);
