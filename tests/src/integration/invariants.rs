//! # Invariants Under Random Workloads
//!
//! Seeded random sequences of operations, many of which are rejected, with
//! the relational invariants checked against the records after every run.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use slick_state::test_utils::{content_hash, identity, TestHarness, POLL_END};
    use slick_state::{Address, Identity, SocialApi, SocialQueryApi};

    const SEEDS: [u64; 4] = [1, 7, 42, 2024];

    fn users(h: &TestHarness, count: u8) -> Vec<Identity> {
        (1..=count).map(|seed| h.user(seed)).collect()
    }

    #[test]
    fn test_member_count_mirrors_memberships() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = TestHarness::new();
            let people = users(&h, 8);
            let communities: Vec<Address> =
                (0..3).map(|id| h.community(people[id as usize], id)).collect();

            for _ in 0..200 {
                let user = people[rng.gen_range(0..people.len())];
                let community = communities[rng.gen_range(0..communities.len())];
                if rng.gen_bool(0.5) {
                    let _ = h.service.join_community(user, community);
                } else {
                    let _ = h.service.leave_community(user, community);
                }
            }

            for community in &communities {
                let stored = h.service.get_community(community).unwrap().account;
                let live = h.service.community_members(community).unwrap();
                assert_eq!(stored.member_count, live.len() as u64, "seed {seed}");
                for membership in live {
                    assert!(h
                        .service
                        .is_member(community, &membership.account.user)
                        .unwrap());
                }
            }
        }
    }

    #[test]
    fn test_likes_count_mirrors_likes() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = TestHarness::new();
            let author = h.user(1);
            let community = h.community(author, 1);
            let fans: Vec<Identity> = (2..=6).map(|s| h.member(community, s)).collect();
            let post = h.post(author, community);

            for _ in 0..150 {
                let fan = fans[rng.gen_range(0..fans.len())];
                if rng.gen_bool(0.6) {
                    let _ = h.service.like_post(fan, post);
                } else {
                    let _ = h.service.unlike_post(fan, post);
                }
            }

            let liked = fans
                .iter()
                .filter(|fan| h.service.has_liked(&post, fan).unwrap())
                .count() as u64;
            assert_eq!(
                h.service.get_post(&post).unwrap().account.likes_count,
                liked,
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_follow_counts_mirror_edges() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = TestHarness::new();
            let people = users(&h, 6);

            for _ in 0..200 {
                let a = people[rng.gen_range(0..people.len())];
                let b = people[rng.gen_range(0..people.len())];
                if rng.gen_bool(0.6) {
                    let _ = h.service.follow_user(a, b);
                } else {
                    let _ = h.service.unfollow_user(a, b);
                }
            }

            for person in &people {
                let profile = h.service.get_profile(person).unwrap().account;
                assert_eq!(
                    profile.follower_count,
                    h.service.followers(person).unwrap().len() as u64,
                    "seed {seed}"
                );
                assert_eq!(
                    profile.following_count,
                    h.service.following(person).unwrap().len() as u64,
                    "seed {seed}"
                );
                assert!(!h.service.is_following(person, person).unwrap());
            }
        }
    }

    #[test]
    fn test_child_ids_are_gapless() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = TestHarness::new();
            let alice = h.user(1);
            let outsider = h.user(2);
            let community = h.community(alice, 1);
            let mut last_counter = 0;

            for _ in 0..60 {
                let author = if rng.gen_bool(0.7) { alice } else { outsider };
                match rng.gen_range(0..3) {
                    0 => {
                        let _ = h.service.create_post(
                            author,
                            community,
                            "ipfs://p".into(),
                            content_hash(0),
                            false,
                            None,
                        );
                    }
                    1 => {
                        let _ = h.service.create_post(
                            author,
                            community,
                            "ipfs://p".into(),
                            content_hash(0),
                            true,
                            // Sometimes missing, which must not burn an id.
                            rng.gen_bool(0.5).then(|| "anon".to_string()),
                        );
                    }
                    _ => {
                        let _ = h.service.create_poll(
                            author,
                            community,
                            "ipfs://q".into(),
                            vec![identity(1), identity(2)],
                            POLL_END,
                        );
                    }
                }

                let counter = h
                    .service
                    .get_community(&community)
                    .unwrap()
                    .account
                    .post_counter;
                assert!(counter >= last_counter);
                last_counter = counter;
            }

            let stored = h.service.get_community(&community).unwrap().account;
            let post_ids: Vec<u64> = h
                .service
                .community_posts(&community)
                .unwrap()
                .iter()
                .map(|p| p.account.post_id)
                .collect();
            let poll_ids: Vec<u64> = h
                .service
                .community_polls(&community)
                .unwrap()
                .iter()
                .map(|p| p.account.poll_id)
                .collect();

            assert_eq!(post_ids, (0..stored.post_counter).collect::<Vec<_>>());
            assert_eq!(poll_ids, (0..stored.poll_counter).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_tally_sum_equals_distinct_voters() {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = TestHarness::new();
            let alice = h.user(1);
            let community = h.community(alice, 1);
            let voters: Vec<Identity> = (2..=12).map(|s| h.member(community, s)).collect();
            let poll = h.poll(alice, community, 4);

            for _ in 0..40 {
                let voter = voters[rng.gen_range(0..voters.len())];
                let _ = h.service.vote_poll(voter, poll, rng.gen_range(0..4));
            }

            let distinct = voters
                .iter()
                .filter(|v| h.service.has_voted(&poll, v).unwrap())
                .count() as u64;
            let stored = h.service.get_poll(&poll).unwrap().account;
            assert_eq!(stored.total_votes(), distinct, "seed {seed}");
            assert_eq!(stored.votes_per_option.len(), stored.option_profiles.len());
        }
    }
}
