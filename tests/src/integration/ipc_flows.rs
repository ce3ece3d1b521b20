//! # IPC Flows
//!
//! Requests driven through `SocialRequestHandler` as JSON, the way a
//! transport would deliver them.

#[cfg(test)]
mod tests {
    use slick_state::test_utils::{content_hash, identity, TestHarness, TestService, POLL_END};
    use slick_state::{
        community_address, AuthenticatedRequest, ErrorKind, Identity, SocialRequest,
        SocialRequestHandler, SocialResponse, SocialResponsePayload,
    };
    use std::sync::Arc;

    struct Client {
        handler: SocialRequestHandler<TestService>,
    }

    impl Client {
        fn new(harness: &TestHarness) -> Self {
            Self {
                handler: SocialRequestHandler::new(Arc::new(harness.share())),
            }
        }

        /// Encode, handle, and decode one request as JSON.
        fn call(&self, caller: Identity, request: SocialRequest) -> SocialResponse {
            let envelope = AuthenticatedRequest::new(caller, request);
            let raw = self
                .handler
                .handle_json(&serde_json::to_string(&envelope).unwrap())
                .unwrap();
            let response: SocialResponse = serde_json::from_str(&raw).unwrap();
            assert_eq!(response.correlation_id, envelope.correlation_id);
            response
        }

        fn ok(&self, caller: Identity, request: SocialRequest) -> SocialResponsePayload {
            match self.call(caller, request).result {
                Ok(payload) => payload,
                Err(err) => panic!("request failed: {err:?}"),
            }
        }
    }

    fn profile(name: &str) -> SocialRequest {
        SocialRequest::CreateProfile {
            display_name: name.into(),
            avatar_uri: format!("ipfs://{name}"),
        }
    }

    #[test]
    fn test_community_feed_over_json() {
        let h = TestHarness::new();
        let client = Client::new(&h);
        let (alice, bob) = (identity(1), identity(2));

        client.ok(alice, profile("alice"));
        client.ok(bob, profile("bob"));
        let community = match client.ok(
            alice,
            SocialRequest::CreateCommunity {
                name: "Rustaceans".into(),
                description_uri: "ipfs://rust".into(),
                community_id: 7,
            },
        ) {
            SocialResponsePayload::Community(c) => c.address,
            other => panic!("unexpected payload: {other:?}"),
        };
        assert_eq!(community, community_address(7));
        client.ok(bob, SocialRequest::JoinCommunity { community });

        for i in 0..3u8 {
            client.ok(
                alice,
                SocialRequest::CreatePost {
                    community,
                    content_uri: format!("ipfs://post/{i}"),
                    content_hash: content_hash(i),
                    is_anonymous: false,
                    pseudonym: None,
                },
            );
        }

        let posts = match client.ok(bob, SocialRequest::CommunityPosts { community }) {
            SocialResponsePayload::Posts(posts) => posts,
            other => panic!("unexpected payload: {other:?}"),
        };
        let ids: Vec<u64> = posts.iter().map(|p| p.account.post_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let post = posts[1].address;
        client.ok(bob, SocialRequest::LikePost { post });
        assert_eq!(
            client.ok(alice, SocialRequest::HasLiked { post, user: bob }),
            SocialResponsePayload::Flag(true)
        );
        let stray = client.call(alice, SocialRequest::UnlikePost { post });
        assert_eq!(stray.result.unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(
            client.ok(bob, SocialRequest::UnlikePost { post }),
            SocialResponsePayload::Done
        );
        assert_eq!(
            client.ok(alice, SocialRequest::HasLiked { post, user: bob }),
            SocialResponsePayload::Flag(false)
        );
    }

    #[test]
    fn test_rejections_come_back_as_error_responses() {
        let h = TestHarness::new();
        let client = Client::new(&h);
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let post = h.post(alice, community);

        let response = client.call(alice, SocialRequest::LikePost { post });
        let err = response.result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PolicyRejected);
        assert_eq!(err.code, "CannotLikeOwnPost");

        let response = client.call(identity(9), SocialRequest::JoinCommunity { community });
        let err = response.result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.code, "NoProfile");

        let response = client.call(
            alice,
            SocialRequest::GetCommunity { community_id: 404 },
        );
        assert_eq!(response.result.unwrap_err().kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_poll_voting_over_json() {
        let h = TestHarness::new();
        let client = Client::new(&h);
        let alice = h.user(1);
        let community = h.community(alice, 1);
        let bob = h.member(community, 2);

        let poll = match client.ok(
            alice,
            SocialRequest::CreatePoll {
                community,
                question_uri: "ipfs://q".into(),
                option_profiles: vec![identity(1), identity(2), identity(3)],
                end_time: POLL_END,
            },
        ) {
            SocialResponsePayload::Poll(poll) => poll.address,
            other => panic!("unexpected payload: {other:?}"),
        };

        client.ok(bob, SocialRequest::VotePoll { poll, option_index: 2 });
        let second = client.call(bob, SocialRequest::VotePoll { poll, option_index: 0 });
        assert_eq!(second.result.unwrap_err().kind, ErrorKind::AlreadyExists);

        let out_of_range = client.call(alice, SocialRequest::VotePoll { poll, option_index: 3 });
        assert_eq!(out_of_range.result.unwrap_err().code, "InvalidPollOption");

        match client.ok(alice, SocialRequest::GetPoll { poll }) {
            SocialResponsePayload::Poll(poll) => {
                assert_eq!(poll.account.votes_per_option, vec![0, 0, 1])
            }
            other => panic!("unexpected payload: {other:?}"),
        }
        assert_eq!(
            client.ok(alice, SocialRequest::HasVoted { poll, voter: bob }),
            SocialResponsePayload::Flag(true)
        );
    }

    #[test]
    fn test_follow_graph_over_json() {
        let h = TestHarness::new();
        let client = Client::new(&h);
        let alice = h.user(1);
        let bob = h.user(2);
        let carol = h.user(3);

        client.ok(bob, SocialRequest::FollowUser { target: alice });
        client.ok(carol, SocialRequest::FollowUser { target: alice });

        match client.ok(bob, SocialRequest::Followers { user: alice }) {
            SocialResponsePayload::Follows(follows) => assert_eq!(follows.len(), 2),
            other => panic!("unexpected payload: {other:?}"),
        }
        match client.ok(bob, SocialRequest::GetProfile { owner: alice }) {
            SocialResponsePayload::Profile(p) => assert_eq!(p.account.follower_count, 2),
            other => panic!("unexpected payload: {other:?}"),
        }

        client.ok(bob, SocialRequest::UnfollowUser { target: alice });
        let again = client.call(bob, SocialRequest::UnfollowUser { target: alice });
        assert_eq!(again.result.unwrap_err().code, "NotFollowing");
    }

    #[test]
    fn test_handled_requests_show_up_in_metrics() {
        slick_telemetry::register_metrics().unwrap();
        let h = TestHarness::new();
        let client = Client::new(&h);

        client.ok(identity(1), profile("alice"));
        client.ok(identity(1), SocialRequest::ListCommunities);

        let text = slick_telemetry::gather_metrics().unwrap();
        assert!(text.contains("slick_engine_operations_total"));
        assert!(text.contains("create_profile"));
        assert!(text.contains("slick_query_scans_total"));
    }
}
