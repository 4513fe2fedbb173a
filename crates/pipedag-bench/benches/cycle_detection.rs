//! Cycle detection benchmarks (build, `is_acyclic`, `find_cycle`, full report).
#![allow(clippy::expect_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pipedag_bench::{GeneratorConfig, SizeTier, generate_pipeline};
use pipedag_core::{build_graph, find_cycle, is_acyclic};

const TIERS: [(&str, SizeTier); 3] = [
    ("S", SizeTier::Small),
    ("M", SizeTier::Medium),
    ("L", SizeTier::Large),
];

fn with_cycles(config: GeneratorConfig) -> GeneratorConfig {
    GeneratorConfig {
        inject_cycles: true,
        ..config
    }
}

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");

    for (name, tier) in TIERS {
        let req = generate_pipeline(&tier.config(42));
        group.throughput(Throughput::Elements(
            (req.nodes.len() + req.edges.len()) as u64,
        ));
        group.bench_with_input(BenchmarkId::new("acyclic", name), &req, |b, req| {
            b.iter(|| build_graph(black_box(&req.nodes), black_box(&req.edges)));
        });
    }
    group.finish();
}

fn bench_is_acyclic(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_acyclic");

    for (name, tier) in TIERS {
        let acyclic = generate_pipeline(&tier.config(42));
        let cyclic = generate_pipeline(&with_cycles(tier.config(42)));
        let acyclic_graph = build_graph(&acyclic.nodes, &acyclic.edges);
        let cyclic_graph = build_graph(&cyclic.nodes, &cyclic.edges);

        group.throughput(Throughput::Elements(
            (acyclic_graph.node_count() + acyclic_graph.edge_count()) as u64,
        ));
        group.bench_with_input(
            BenchmarkId::new("acyclic", name),
            &acyclic_graph,
            |b, g| {
                b.iter(|| assert!(is_acyclic(black_box(g))));
            },
        );
        group.bench_with_input(BenchmarkId::new("cyclic", name), &cyclic_graph, |b, g| {
            b.iter(|| assert!(!is_acyclic(black_box(g))));
        });
        group.bench_with_input(
            BenchmarkId::new("cyclic_witness", name),
            &cyclic_graph,
            |b, g| {
                b.iter(|| find_cycle(black_box(g)).expect("cycle present"));
            },
        );
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for (name, tier) in TIERS {
        let req = generate_pipeline(&tier.config(42));
        group.bench_with_input(BenchmarkId::new("acyclic", name), &req, |b, req| {
            b.iter(|| black_box(req).report());
        });

        let json = serde_json::to_string(&req).expect("serialize");
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_and_report", name), &json, |b, json| {
            b.iter(|| {
                let parsed: pipedag_core::PipelineRequest =
                    serde_json::from_str(black_box(json)).expect("parse");
                parsed.report()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_graph, bench_is_acyclic, bench_report);
criterion_main!(benches);
