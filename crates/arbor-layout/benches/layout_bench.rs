//! Benchmarks for Arbor layout
//!
//! Measures layout of:
//! - Complete trees (heap shapes)
//! - Degenerate chains (sorted BST inserts)

use arbor_layout::{tree_layout, NodeId, Topology, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Complete binary tree over `0..len`, indexed like a heap.
struct Complete(usize);

impl Topology for Complete {
    type Handle = usize;

    fn root(&self) -> Option<usize> {
        (self.0 > 0).then_some(0)
    }
    fn left(&self, node: usize) -> Option<usize> {
        Some(2 * node + 1).filter(|&i| i < self.0)
    }
    fn right(&self, node: usize) -> Option<usize> {
        Some(2 * node + 2).filter(|&i| i < self.0)
    }
    fn id(&self, node: usize) -> NodeId {
        NodeId(node as u64)
    }
    fn value(&self, node: usize) -> Value {
        node as Value
    }
}

/// Right-leaning chain of `len` nodes.
struct Chain(usize);

impl Topology for Chain {
    type Handle = usize;

    fn root(&self) -> Option<usize> {
        (self.0 > 0).then_some(0)
    }
    fn left(&self, _: usize) -> Option<usize> {
        None
    }
    fn right(&self, node: usize) -> Option<usize> {
        Some(node + 1).filter(|&i| i < self.0)
    }
    fn id(&self, node: usize) -> NodeId {
        NodeId(node as u64)
    }
    fn value(&self, node: usize) -> Value {
        node as Value
    }
}

fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_complete");

    for &len in &[15usize, 127, 1023, 16_383] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| tree_layout(black_box(&Complete(len))))
        });
    }
    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_chain");

    for &len in &[100usize, 1000, 10_000] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| tree_layout(black_box(&Chain(len))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_complete, bench_chain);
criterion_main!(benches);
