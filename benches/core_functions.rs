//! Benchmarks for core fgsheet functions.
//!
//! Run with: `cargo bench`
//! View reports in: `target/criterion/report/index.html`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use fgsheet_dna::{count_mismatches, reverse_complement};
use fgsheet_lib::color_balance::lane_color_balance;
use fgsheet_lib::mismatch::DistanceMatrix;
use fgsheet_lib::options::ValidationContext;
use fgsheet_lib::orchestrator::ValidationOrchestrator;
use fgsheet_lib::override_cycles::resolve_override_cycles;
use fgsheet_lib::padding::{PaddedIndexTable, PaddingLength};
use fgsheet_lib::run_config::{ReadCycles, RunConfiguration};
use fgsheet_lib::sample::{SampleRecord, SampleTable};
use fgsheet_lib::source::Snapshot;

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Deterministic index of `length` bases for sample `n`.
fn index(n: usize, length: usize) -> String {
    (0..length).map(|i| BASES[(n / 4_usize.pow((i % 8) as u32) + i) % 4] as char).collect()
}

fn samples(n: usize) -> SampleTable {
    SampleTable::new(
        (0..n)
            .map(|i| {
                SampleRecord::new(&format!("S{i}"), [1], &index(i, 10), "Y{r}-I{i}-I{i}-Y{r}")
                    .with_i5(&index(i + 7, 10))
            })
            .collect(),
    )
}

fn run() -> RunConfiguration {
    RunConfiguration::new(ReadCycles::new(151, 10, 10, 151), [1])
}

/// Benchmark pairwise mismatch counting
fn bench_mismatches(c: &mut Criterion) {
    let mut group = c.benchmark_group("mismatches");
    let a = index(3, 10);
    let b = format!("{}NN", &index(5, 8));

    group.bench_function("count_mismatches", |bench| {
        bench.iter(|| black_box(count_mismatches(black_box(a.as_bytes()), black_box(b.as_bytes()))));
    });
    group.bench_function("reverse_complement", |bench| {
        bench.iter(|| black_box(reverse_complement(black_box(&a))));
    });

    group.finish();
}

/// Benchmark distance matrix construction at increasing sample counts
fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for n in [96_usize, 384, 1536] {
        let table = samples(n);
        let padded = PaddedIndexTable::from_indexes(
            table.records.iter().map(|r| (r.sample_id.as_str(), Some(r.index_i7.as_str()))),
            10,
        );
        group.throughput(Throughput::Elements((n * (n - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &padded, |bench, padded| {
            bench.iter(|| black_box(DistanceMatrix::from_padded(black_box(padded))));
        });
    }

    group.finish();
}

/// Benchmark override-cycles resolution
fn bench_override_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("override_cycles");
    let cycles = ReadCycles::new(151, 10, 10, 151);

    for pattern in ["Y{r}-I{i}-I{i}-Y{r}", "U7N1Y{r}-I8N{i}-I{i}-N1Y{r}"] {
        group.bench_with_input(BenchmarkId::from_parameter(pattern), pattern, |bench, pattern| {
            bench.iter(|| black_box(resolve_override_cycles(black_box(pattern), &cycles)));
        });
    }

    group.finish();
}

/// Benchmark color balance and a full validation pass
fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let table = samples(384);
    let run = run();

    group.bench_function("lane_color_balance", |bench| {
        bench.iter(|| black_box(lane_color_balance(&table, &run, 1, PaddingLength::RunCycles)));
    });

    let snapshot = Snapshot::new(table.clone(), run.clone());
    let context = ValidationContext::default();
    let orchestrator = ValidationOrchestrator::new(&context);
    group.sample_size(20);
    group.bench_function("validate_snapshot_384", |bench| {
        bench.iter(|| black_box(orchestrator.validate_snapshot(black_box(&snapshot))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mismatches,
    bench_distance_matrix,
    bench_override_cycles,
    bench_validation
);
criterion_main!(benches);
