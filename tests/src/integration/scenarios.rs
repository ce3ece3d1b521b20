//! # End-to-End Scenarios
//!
//! User journeys across profiles, communities, posts and polls, checked
//! through the query port after every step.

#[cfg(test)]
mod tests {
    use slick_state::test_utils::{content_hash, identity, TestHarness, POLL_END};
    use slick_state::{
        membership_address, AccountKind, ErrorKind, SocialApi, SocialError, SocialEvent,
        SocialQueryApi,
    };

    #[test]
    fn test_first_posts_get_sequential_ids() {
        let h = TestHarness::new();
        let alice = identity(1);

        h.service
            .create_profile(alice, "Alice".into(), "ipfs://alice".into())
            .unwrap();
        let community = h
            .service
            .create_community(alice, "C".into(), "ipfs://c".into(), 1)
            .unwrap();
        assert_eq!(community.account.member_count, 1);
        assert_eq!(community.account.post_counter, 0);

        let first = h
            .service
            .create_post(
                alice,
                community.address,
                "ipfs://p0".into(),
                content_hash(0),
                false,
                None,
            )
            .unwrap();
        assert_eq!(first.account.post_id, 0);
        assert_eq!(first.account.author(), Some(&alice));
        assert_eq!(
            h.service
                .get_community(&community.address)
                .unwrap()
                .account
                .post_counter,
            1
        );

        let second = h
            .service
            .create_post(
                alice,
                community.address,
                "ipfs://p1".into(),
                content_hash(1),
                false,
                None,
            )
            .unwrap();
        assert_eq!(second.account.post_id, 1);
    }

    #[test]
    fn test_join_then_leave_restores_member_count() {
        let h = TestHarness::new();
        let alice = h.user(1);
        let bob = h.user(2);
        let community = h.community(alice, 1);

        h.service.join_community(bob, community).unwrap();
        assert_eq!(
            h.service.get_community(&community).unwrap().account.member_count,
            2
        );

        h.service.leave_community(bob, community).unwrap();
        assert_eq!(
            h.service.get_community(&community).unwrap().account.member_count,
            1
        );
        assert_eq!(
            h.service.get_membership(&community, &bob).unwrap_err(),
            SocialError::NotFound {
                kind: AccountKind::Membership,
                address: membership_address(&community, &bob)
            }
        );
    }

    #[test]
    fn test_single_vote_per_voter() {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let poll = h.poll(alice, community, 3);

        h.service.vote_poll(alice, poll, 1).unwrap();
        assert_eq!(
            h.service.get_poll(&poll).unwrap().account.votes_per_option,
            vec![0, 1, 0]
        );

        let err = h.service.vote_poll(alice, poll, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(
            h.service.get_poll(&poll).unwrap().account.votes_per_option,
            vec![0, 1, 0]
        );
    }

    #[test]
    fn test_full_community_lifecycle() {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 42);
        let bob = h.member(community, 2);
        let carol = h.member(community, 3);

        h.service.follow_user(bob, alice).unwrap();
        h.service.follow_user(carol, alice).unwrap();

        let post = h.post(alice, community);
        h.service.like_post(bob, post).unwrap();
        h.service.like_post(carol, post).unwrap();
        h.service
            .comment_on_post(bob, post, "ipfs://nice".into(), content_hash(5))
            .unwrap();

        h.ledger.credit(carol, 10_000_000);
        let tip = h.service.config().fixed_tip_lamports.unwrap_or(1);
        h.service.tip_post(carol, post, alice, tip).unwrap();

        let poll = h.poll(alice, community, 2);
        h.service.vote_poll(bob, poll, 0).unwrap();
        h.service.vote_poll(carol, poll, 1).unwrap();

        let stored = h.service.get_post(&post).unwrap().account;
        assert_eq!(stored.likes_count, 2);
        assert_eq!(stored.comments_count, 1);
        assert_eq!(stored.total_tip_lamports, tip);
        assert_eq!(h.ledger.balance(&alice), tip);

        let profile = h.service.get_profile(&alice).unwrap().account;
        assert_eq!(profile.follower_count, 2);
        assert_eq!(h.service.followers(&alice).unwrap().len(), 2);

        assert_eq!(
            h.service.get_poll(&poll).unwrap().account.total_votes(),
            2
        );
        assert_eq!(h.service.community_members(&community).unwrap().len(), 3);

        // Voting closes at the end time.
        h.clock.set(POLL_END);
        assert!(matches!(
            h.service.vote_poll(alice, poll, 0),
            Err(SocialError::PollEnded { .. })
        ));

        let tipped = h
            .events
            .events()
            .iter()
            .filter(|e| matches!(e, SocialEvent::PostTipped { .. }))
            .count();
        assert_eq!(tipped, 1);
    }

    #[test]
    fn test_anonymous_post_hides_author_everywhere() {
        let h = TestHarness::new();
        let alice = h.user(1);
        let community = h.community(alice, 1);

        let post = h
            .service
            .create_post(
                alice,
                community,
                "ipfs://confession".into(),
                content_hash(9),
                true,
                Some("nightowl".into()),
            )
            .unwrap();

        let stored = h.service.get_post(&post.address).unwrap().account;
        assert_eq!(stored.author(), None);
        assert_eq!(stored.pseudonym(), Some("nightowl"));

        let created = h
            .events
            .events()
            .into_iter()
            .find_map(|e| match e {
                SocialEvent::PostCreated {
                    author,
                    is_anonymous,
                    ..
                } => Some((author, is_anonymous)),
                _ => None,
            })
            .unwrap();
        assert_eq!(created, (None, true));

        // The real author can like an anonymous post: nothing ties it to them.
        h.service.like_post(alice, post.address).unwrap();
    }
}
