//! # LL-01 Signature Verification Benchmarks
//!
//! Every channel update and close verifies two signatures, so verification
//! cost bounds channel throughput.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use ll_01_signature_verification::{
    channel_digest, recover_address, ChannelMessage, EcdsaVerifier, Intent, IntentSigner,
    SignatureVerifier,
};
use shared_types::Amount;
use std::time::Duration;

fn message(nonce: u64) -> ChannelMessage {
    ChannelMessage {
        intent: Intent::Update,
        channel_id: [0x42u8; 32],
        balance_a: Amount::from(700_000u64),
        balance_b: Amount::from(300_000u64),
        nonce,
    }
}

pub fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ll-01/digest");
    let channel_id = [0x42u8; 32];

    group.bench_function("channel_digest", |b| {
        b.iter(|| {
            black_box(channel_digest(
                Intent::Close,
                black_box(&channel_id),
                Amount::from(700_000u64),
                Amount::from(300_000u64),
                black_box(7),
            ))
        })
    });
    group.finish();
}

pub fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("ll-01/verify");
    group.measurement_time(Duration::from_secs(10));

    let verifier = EcdsaVerifier::new();
    let signer = IntentSigner::generate();
    let stranger = IntentSigner::generate();
    let msg = message(1);
    let Ok(signature) = signer.sign_digest(&msg.digest()) else {
        return;
    };

    group.bench_function("valid_signer", |b| {
        b.iter(|| black_box(verifier.verify(&msg, &signature, &signer.address())))
    });
    group.bench_function("wrong_signer", |b| {
        b.iter(|| black_box(verifier.verify(&msg, &signature, &stranger.address())))
    });
    group.bench_function("recover_address", |b| {
        b.iter(|| black_box(recover_address(&msg.digest(), &signature)))
    });

    for size in [10u64, 100, 500] {
        let signed: Vec<_> = (1..=size)
            .filter_map(|nonce| {
                let msg = message(nonce);
                signer.sign_digest(&msg.digest()).ok().map(|sig| (msg, sig))
            })
            .collect();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("sequential_states", size), &signed, |b, signed| {
            b.iter(|| {
                signed
                    .iter()
                    .filter(|(msg, sig)| verifier.verify(msg, sig, &signer.address()))
                    .count()
            })
        });
    }
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_digest(c);
    bench_verify(c);
}
