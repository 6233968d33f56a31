// benches/compile_performance.rs
//! Benchmarks for failure construction, compilation and boundary replies.

use apperr::signals::Cancelled;
use apperr::{
    definitions, Boundary, BoundaryConfig, Catalog, Classifier, Code, Failure, Language, Message,
    RequestMeta, ServiceType,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io;
use std::sync::Arc;

// ============================================================================
// FAILURE CONSTRUCTION BENCHMARKS
// ============================================================================

fn bench_failure_leaf(c: &mut Criterion) {
    c.bench_function("failure_leaf_static", |b| {
        b.iter(|| black_box(Failure::with_code(definitions::SQL_READ, "select users")))
    });
}

fn bench_failure_wrap_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("failure_wrap_chain");
    for depth in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut err = Failure::wrap_with_code(
                    io::Error::other("connection reset"),
                    definitions::SQL_READ,
                    "select users",
                );
                for _ in 0..depth {
                    err = Failure::wrap(err, "layer");
                }
                black_box(err)
            })
        });
    }
    group.finish();
}

// ============================================================================
// COMPILE BENCHMARKS
// ============================================================================

fn bench_compile_generic_hit(c: &mut Criterion) {
    let classifier = Classifier::standard();
    let err = Failure::with_code(definitions::SQL_UNIQUE_CONSTRAINT, "insert user");
    c.bench_function("compile_generic_hit", |b| {
        b.iter(|| black_box(classifier.compile(ServiceType::Internal, &err, Language::En, false)))
    });
}

fn bench_compile_fallback(c: &mut Criterion) {
    let classifier = Classifier::standard();
    let err = Failure::with_code(Code::new(77_777), "unmapped");
    c.bench_function("compile_fallback", |b| {
        b.iter(|| black_box(classifier.compile(ServiceType::Internal, &err, Language::Id, false)))
    });
}

fn bench_compile_debug(c: &mut Criterion) {
    let classifier = Classifier::standard();
    let err = Failure::wrap(
        Failure::with_code(definitions::CACHE_DECODE, "bad bytes").with_metadata("key", "session:1"),
        "load session",
    );
    c.bench_function("compile_with_debug_error", |b| {
        b.iter(|| black_box(classifier.compile(ServiceType::Cache, &err, Language::En, true)))
    });
}

fn bench_compile_annotated(c: &mut Criterion) {
    let catalog = Catalog::new([(
        definitions::VALUE_INVALID,
        Message::new(400, "Invalid value: {}", "Nilai tidak valid: {}").annotated(),
    )])
    .unwrap();
    let classifier = Classifier::builder().register(ServiceType::Common, catalog).build();
    let err = Failure::annotate("parse int", definitions::VALUE_INVALID, "age must be >= 0");
    c.bench_function("compile_annotated", |b| {
        b.iter(|| black_box(classifier.compile(ServiceType::Internal, &err, Language::En, false)))
    });
}

// ============================================================================
// BOUNDARY BENCHMARKS
// ============================================================================

fn bench_boundary_compiled(c: &mut Criterion) {
    let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());
    let meta = RequestMeta::new(Language::En, false);
    c.bench_function("boundary_compiled_reply", |b| {
        b.iter(|| {
            let err = Failure::with_code(definitions::HTTP_NOT_FOUND, "order 9");
            let reply = boundary.respond(err, &meta, &["order does not exist"]);
            black_box(reply.to_body_bytes().unwrap())
        })
    });
}

fn bench_boundary_cancelled(c: &mut Criterion) {
    let boundary = Boundary::new(Arc::new(Classifier::standard()), BoundaryConfig::default());
    let meta = RequestMeta::default();
    c.bench_function("boundary_cancelled_reply", |b| {
        b.iter(|| {
            let err = Failure::wrap_with_code(Cancelled, definitions::SQL_READ, "select");
            black_box(boundary.respond(err, &meta, &[]))
        })
    });
}

// ============================================================================
// BENCHMARK GROUPS
// ============================================================================

criterion_group!(failure_benches, bench_failure_leaf, bench_failure_wrap_chain);

criterion_group!(
    compile_benches,
    bench_compile_generic_hit,
    bench_compile_fallback,
    bench_compile_debug,
    bench_compile_annotated,
);

criterion_group!(boundary_benches, bench_boundary_compiled, bench_boundary_cancelled);

criterion_main!(failure_benches, compile_benches, boundary_benches);
