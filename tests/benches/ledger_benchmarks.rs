//! # Garment-Ledger Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | gl-01 Asset Contract | canonical encoding, contract dispatch |
//! | shared-types | proposal signature verification |
//! | gl-03 → gl-02 | full submit through an in-process peer |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use garment_node::{GarmentNode, NodeConfig};
use gl_01_asset_contract::prelude::*;
use gl_03_gateway_client::{new_proposal, sign_proposal, Ed25519Signer};
use shared_types::verify_signed_proposal;
use std::time::Duration;

// ============================================================================
// gl-01: Canonical encoding
// ============================================================================

fn bench_canonical_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("gl-01-canonical");
    let seeds = seed_garments();

    group.bench_function("canonicalize_single", |b| {
        b.iter(|| black_box(canonicalize(&seeds[0]).is_ok()))
    });

    group.throughput(Throughput::Elements(seeds.len() as u64));
    group.bench_function("canonicalize_seed_set", |b| {
        b.iter(|| black_box(canonicalize(&seeds).is_ok()))
    });

    group.finish();
}

// ============================================================================
// gl-01: Contract dispatch over the in-memory store
// ============================================================================

fn bench_contract_dispatch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("gl-01-dispatch");

    let contract = GarmentContract::new(InMemoryStateStore::new());
    runtime.block_on(async {
        invoke(&contract, functions::INIT_LEDGER, &[]).await;
    });

    group.bench_function("read_garment", |b| {
        let args = vec!["garment3".to_string()];
        b.iter(|| {
            runtime.block_on(async {
                black_box(invoke(&contract, functions::READ_GARMENT, &args).await)
            })
        })
    });

    for size in [10usize, 100, 1000] {
        let contract = GarmentContract::new(InMemoryStateStore::new());
        runtime.block_on(async {
            for i in 0..size {
                let args = vec![
                    format!("g{:05}", i),
                    "red".to_string(),
                    "M".to_string(),
                    "alice".to_string(),
                    "100".to_string(),
                ];
                invoke(&contract, functions::CREATE_GARMENT, &args).await;
            }
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("get_all_garments", size), &size, |b, _| {
            b.iter(|| {
                runtime.block_on(async {
                    black_box(invoke(&contract, functions::GET_ALL_GARMENTS, &[]).await)
                })
            })
        });
    }

    group.finish();
}

// ============================================================================
// shared-types: Signature verification
// ============================================================================

fn bench_proposal_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-types-security");
    let signer = Ed25519Signer::generate();
    let identity = signer.identity("Org1MSP");
    let proposal = new_proposal("mychannel", "basic", "ReadGarment", &["garment1"], &identity)
        .expect("proposal");
    let signed = sign_proposal(proposal, &signer).expect("signed proposal");

    group.bench_function("verify_signed_proposal", |b| {
        b.iter(|| black_box(verify_signed_proposal(&signed).is_ok()))
    });

    group.finish();
}

// ============================================================================
// gl-03 → gl-02: End-to-end submit
// ============================================================================

fn bench_submit_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("gl-03-submit");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let mut config = NodeConfig::default();
    config.peer.batch_size = 1;
    let node = runtime.block_on(async { GarmentNode::start(config) }).expect("node");
    runtime
        .block_on(node.garments().init_ledger())
        .expect("seeded");

    let mut owner = 0u64;
    group.bench_function("transfer_garment", |b| {
        b.iter(|| {
            owner += 1;
            runtime
                .block_on(node.garments().transfer("garment1", &format!("owner{}", owner)))
                .is_ok()
        })
    });

    group.bench_function("evaluate_read", |b| {
        b.iter(|| runtime.block_on(node.garments().read("garment2")).is_ok())
    });

    runtime.block_on(node.shutdown());
    group.finish();
}

criterion_group!(
    benches,
    bench_canonical_encoding,
    bench_contract_dispatch,
    bench_proposal_verification,
    bench_submit_round_trip,
);
criterion_main!(benches);
