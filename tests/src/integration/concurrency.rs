//! # Concurrency
//!
//! Operations racing on threads. Colliding creates must yield exactly one
//! winner; operations that only share a counter must all land.

#[cfg(test)]
mod tests {
    use slick_state::test_utils::{content_hash, identity, TestHarness};
    use slick_state::{
        AccountKind, ErrorKind, SocialApi, SocialConfig, SocialQueryApi, SocialResult,
        DEFAULT_TIP_LAMPORTS,
    };
    use std::collections::BTreeSet;
    use std::sync::Barrier;
    use std::thread;

    const THREADS: usize = 16;

    /// Generous re-execution budget so counter contention never surfaces
    /// as `Contention` in these tests.
    fn harness() -> TestHarness {
        TestHarness::with_config(SocialConfig::default().with_max_commit_attempts(10_000))
    }

    /// Run `op(i)` on `THREADS` threads released together.
    fn race<R, F>(op: F) -> Vec<SocialResult<R>>
    where
        R: Send,
        F: Fn(usize) -> SocialResult<R> + Sync,
    {
        let barrier = Barrier::new(THREADS);
        thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let barrier = &barrier;
                    let op = &op;
                    scope.spawn(move || {
                        barrier.wait();
                        op(i)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("worker panicked"))
                .collect()
        })
    }

    fn successes<R>(results: &[SocialResult<R>]) -> usize {
        results.iter().filter(|r| r.is_ok()).count()
    }

    #[test]
    fn test_duplicate_profile_race_has_one_winner() {
        let h = harness();
        let owner = identity(1);

        let results = race(|i| {
            h.service
                .create_profile(owner, format!("claimant-{i}"), String::new())
        });

        assert_eq!(successes(&results), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(err.is_collision(AccountKind::Profile));
        }

        let winner = results.iter().find_map(|r| r.as_ref().ok()).unwrap();
        assert_eq!(h.service.get_profile(&owner).unwrap(), *winner);
    }

    #[test]
    fn test_double_vote_race_counts_once() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let poll = h.poll(alice, community, 3);

        let results = race(|i| h.service.vote_poll(alice, poll, (i % 3) as u8));

        assert_eq!(successes(&results), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind() == ErrorKind::AlreadyExists));
        assert_eq!(h.service.get_poll(&poll).unwrap().account.total_votes(), 1);
    }

    #[test]
    fn test_distinct_voters_all_counted() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let voters: Vec<_> = (0..THREADS)
            .map(|i| h.member(community, 10 + i as u8))
            .collect();
        let poll = h.poll(alice, community, 2);

        let results = race(|i| h.service.vote_poll(voters[i], poll, (i % 2) as u8));

        assert_eq!(successes(&results), THREADS);
        let stored = h.service.get_poll(&poll).unwrap().account;
        assert_eq!(stored.total_votes(), THREADS as u64);
        assert_eq!(stored.votes_per_option, vec![8, 8]);
    }

    #[test]
    fn test_concurrent_joins_all_counted() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let joiners: Vec<_> = (0..THREADS).map(|i| h.user(10 + i as u8)).collect();

        let results = race(|i| h.service.join_community(joiners[i], community));

        assert_eq!(successes(&results), THREADS);
        assert_eq!(
            h.service.get_community(&community).unwrap().account.member_count,
            THREADS as u64 + 1
        );
    }

    #[test]
    fn test_concurrent_posts_get_unique_gapless_ids() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);

        let results = race(|i| {
            h.service.create_post(
                alice,
                community,
                format!("ipfs://post/{i}"),
                content_hash(i as u8),
                false,
                None,
            )
        });

        let ids: BTreeSet<u64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().account.post_id)
            .collect();
        assert_eq!(ids, (0..THREADS as u64).collect::<BTreeSet<_>>());
        assert_eq!(
            h.service.get_community(&community).unwrap().account.post_counter,
            THREADS as u64
        );
    }

    #[test]
    fn test_double_like_race_has_one_winner() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let bob = h.member(community, 2);
        let post = h.post(alice, community);

        let results = race(|_| h.service.like_post(bob, post));

        assert_eq!(successes(&results), 1);
        assert_eq!(h.service.get_post(&post).unwrap().account.likes_count, 1);
    }

    #[test]
    fn test_tips_never_overdraw() {
        let h = harness();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let post = h.post(alice, community);
        let tipper = identity(2);
        let affordable = 5;
        h.ledger.credit(tipper, affordable * DEFAULT_TIP_LAMPORTS);

        let results = race(|_| h.service.tip_post(tipper, post, alice, DEFAULT_TIP_LAMPORTS));

        assert_eq!(successes(&results), affordable as usize);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind() == ErrorKind::External));
        assert_eq!(
            h.service.get_post(&post).unwrap().account.total_tip_lamports,
            affordable * DEFAULT_TIP_LAMPORTS
        );
        assert_eq!(h.ledger.balance(&tipper), 0);
        assert_eq!(h.ledger.balance(&alice), affordable * DEFAULT_TIP_LAMPORTS);
    }

    #[test]
    fn test_disjoint_communities_do_not_interfere() {
        let h = harness();
        let founders: Vec<_> = (0..THREADS).map(|i| h.user(10 + i as u8)).collect();

        let results = race(|i| {
            h.service
                .create_community(founders[i], format!("c{i}"), String::new(), i as u64)
        });

        assert_eq!(successes(&results), THREADS);
        assert_eq!(h.service.all_communities().unwrap().len(), THREADS);
    }
}
