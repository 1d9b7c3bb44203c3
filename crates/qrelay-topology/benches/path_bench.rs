//! Benchmarks for path selection
//!
//! Run with: cargo bench -p qrelay-topology

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qrelay_topology::{
    CouplingGraph, GreedyLongest, LookaheadGreedy, PathStrategy, RandomizedGreedy, ShortestPath,
};

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for rows in &[3_u32, 5, 7] {
        let graph = CouplingGraph::heavy_hex(*rows, 15);
        let target = graph.num_qubits() - 1;
        group.bench_with_input(BenchmarkId::new("heavy_hex", rows), &graph, |b, graph| {
            b.iter(|| ShortestPath::new(0, target).select(black_box(graph)).unwrap());
        });
    }

    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_longest");
    let graph = CouplingGraph::heavy_hex(7, 15);

    group.bench_function("first_free", |b| {
        b.iter(|| GreedyLongest::default().select(black_box(&graph)).unwrap());
    });
    group.bench_function("lookahead", |b| {
        b.iter(|| LookaheadGreedy::default().select(black_box(&graph)).unwrap());
    });
    group.bench_function("random_64", |b| {
        b.iter(|| RandomizedGreedy::new(64, 42).select(black_box(&graph)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_greedy);
criterion_main!(benches);
