//! # Slick Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Addressing | Keccak-256 derivation per account kind |
//! | Engine | `create_post` and `vote_poll` through the commit path |
//! | Queries | Scan-of-kind filters as the record count grows |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use slick_state::test_utils::{content_hash, identity, TestHarness};
use slick_state::{
    community_address, follow_address, like_address, post_address, profile_address, Identity,
    SocialApi, SocialConfig, SocialQueryApi,
};
use std::time::Duration;

// ============================================================================
// Address derivation
// ============================================================================

fn bench_address_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("address-derivation");
    let mut rng = rand::thread_rng();
    let user = Identity::new(rng.gen());
    let other = Identity::new(rng.gen());
    let community = community_address(42);
    let post = post_address(&community, 7);

    group.bench_function("profile", |b| b.iter(|| black_box(profile_address(&user))));
    group.bench_function("post", |b| {
        b.iter(|| black_box(post_address(&community, black_box(7))))
    });
    group.bench_function("like", |b| b.iter(|| black_box(like_address(&post, &user))));
    group.bench_function("follow", |b| {
        b.iter(|| {
            black_box(follow_address(
                &profile_address(&user),
                &profile_address(&other),
            ))
        })
    });

    group.finish();
}

// ============================================================================
// Commit path
// ============================================================================

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(1));

    group.bench_function("create_post", |b| {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        b.iter(|| {
            black_box(
                h.service
                    .create_post(
                        alice,
                        community,
                        "ipfs://bench".into(),
                        content_hash(1),
                        false,
                        None,
                    )
                    .unwrap(),
            )
        })
    });

    group.bench_function("vote_poll_rejected_duplicate", |b| {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let poll = h.poll(alice, community, 3);
        h.service.vote_poll(alice, poll, 0).unwrap();
        b.iter(|| black_box(h.service.vote_poll(alice, poll, 1).is_err()))
    });

    group.finish();
}

// ============================================================================
// Scan-of-kind queries
// ============================================================================

fn bench_scans(c: &mut Criterion) {
    let mut group = c.benchmark_group("scans");

    for size in [100u64, 1_000, 5_000] {
        // Posts split across two communities so the filter discards half.
        let h = TestHarness::with_config(
            SocialConfig::default().with_parallel_scan_threshold(usize::MAX),
        );
        let alice = h.user(1);
        let first = h.community(alice, 1);
        let second = h.community(alice, 2);
        for i in 0..size {
            let community = if i % 2 == 0 { first } else { second };
            h.service
                .create_post(
                    alice,
                    community,
                    format!("ipfs://post/{i}"),
                    content_hash(i as u8),
                    false,
                    None,
                )
                .unwrap();
        }
        let parallel = h.share_with_config(SocialConfig::default().with_parallel_scan_threshold(0));

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("community_posts", size), &first, |b, c| {
            b.iter(|| black_box(h.service.community_posts(c).unwrap().len()))
        });
        group.bench_with_input(
            BenchmarkId::new("community_posts_parallel", size),
            &first,
            |b, c| b.iter(|| black_box(parallel.community_posts(c).unwrap().len())),
        );
    }

    group.bench_function("is_member_point_lookup", |b| {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let stranger = identity(99);
        b.iter(|| black_box(h.service.is_member(&community, &stranger).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_address_derivation, bench_mutations, bench_scans);

criterion_main!(benches);
