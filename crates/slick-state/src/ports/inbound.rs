//! # Inbound Ports (Driving Ports)
//!
//! The operation surface offered to callers. Every mutating call names the
//! authenticated caller explicitly as its first identity argument.

use crate::domain::{
    Address, Comment, Community, ContentHash, Follow, Identity, Keyed, Like, Membership, Poll,
    Post, Profile, SocialResult, Timestamp, Vote,
};

/// State transitions. Each call is one atomic unit: it either commits all of
/// its writes or returns an error having written nothing.
pub trait SocialApi {
    // === Profiles ===

    fn create_profile(
        &self,
        owner: Identity,
        display_name: String,
        avatar_uri: String,
    ) -> SocialResult<Keyed<Profile>>;

    /// Absent fields are left unchanged.
    fn update_profile(
        &self,
        owner: Identity,
        display_name: Option<String>,
        avatar_uri: Option<String>,
    ) -> SocialResult<Keyed<Profile>>;

    fn follow_user(&self, follower: Identity, followed: Identity) -> SocialResult<Keyed<Follow>>;

    fn unfollow_user(&self, follower: Identity, followed: Identity) -> SocialResult<()>;

    // === Communities ===

    fn create_community(
        &self,
        creator: Identity,
        name: String,
        description_uri: String,
        community_id: u64,
    ) -> SocialResult<Keyed<Community>>;

    fn join_community(&self, user: Identity, community: Address) -> SocialResult<Keyed<Membership>>;

    fn leave_community(&self, user: Identity, community: Address) -> SocialResult<()>;

    // === Posts ===

    fn create_post(
        &self,
        author: Identity,
        community: Address,
        content_uri: String,
        content_hash: ContentHash,
        is_anonymous: bool,
        pseudonym: Option<String>,
    ) -> SocialResult<Keyed<Post>>;

    fn like_post(&self, liker: Identity, post: Address) -> SocialResult<Keyed<Like>>;

    fn unlike_post(&self, liker: Identity, post: Address) -> SocialResult<()>;

    fn tip_post(
        &self,
        tipper: Identity,
        post: Address,
        recipient: Identity,
        amount: u64,
    ) -> SocialResult<Keyed<Post>>;

    fn comment_on_post(
        &self,
        commenter: Identity,
        post: Address,
        content_uri: String,
        content_hash: ContentHash,
    ) -> SocialResult<Keyed<Comment>>;

    // === Polls ===

    fn create_poll(
        &self,
        creator: Identity,
        community: Address,
        question_uri: String,
        option_profiles: Vec<Identity>,
        end_time: Timestamp,
    ) -> SocialResult<Keyed<Poll>>;

    fn vote_poll(&self, voter: Identity, poll: Address, option_index: u8) -> SocialResult<Keyed<Vote>>;
}

/// Read access: point lookups by address and scan-of-kind with a predicate.
///
/// Scans cost O(accounts of that kind); callers that query repeatedly
/// should cache.
pub trait SocialQueryApi {
    // === Point lookups (NotFound when absent) ===

    fn get_profile(&self, owner: &Identity) -> SocialResult<Keyed<Profile>>;

    fn get_community(&self, community: &Address) -> SocialResult<Keyed<Community>>;

    fn get_community_by_id(&self, community_id: u64) -> SocialResult<Keyed<Community>>;

    fn get_post(&self, post: &Address) -> SocialResult<Keyed<Post>>;

    fn get_comment(&self, comment: &Address) -> SocialResult<Keyed<Comment>>;

    fn get_poll(&self, poll: &Address) -> SocialResult<Keyed<Poll>>;

    fn get_membership(&self, community: &Address, user: &Identity) -> SocialResult<Keyed<Membership>>;

    fn get_vote(&self, poll: &Address, voter: &Identity) -> SocialResult<Keyed<Vote>>;

    fn get_like(&self, post: &Address, liker: &Identity) -> SocialResult<Keyed<Like>>;

    /// The edge between two users' profiles.
    fn get_follow(&self, follower: &Identity, followed: &Identity) -> SocialResult<Keyed<Follow>>;

    // === Existence predicates ===

    fn is_member(&self, community: &Address, user: &Identity) -> SocialResult<bool>;

    fn has_liked(&self, post: &Address, user: &Identity) -> SocialResult<bool>;

    fn is_following(&self, follower: &Identity, followed: &Identity) -> SocialResult<bool>;

    fn has_voted(&self, poll: &Address, voter: &Identity) -> SocialResult<bool>;

    // === Scans ===

    fn all_communities(&self) -> SocialResult<Vec<Keyed<Community>>>;

    fn all_posts(&self) -> SocialResult<Vec<Keyed<Post>>>;

    fn all_polls(&self) -> SocialResult<Vec<Keyed<Poll>>>;

    /// Ordered by post id.
    fn community_posts(&self, community: &Address) -> SocialResult<Vec<Keyed<Post>>>;

    /// Ordered by poll id.
    fn community_polls(&self, community: &Address) -> SocialResult<Vec<Keyed<Poll>>>;

    /// Ordered by comment id.
    fn post_comments(&self, post: &Address) -> SocialResult<Vec<Keyed<Comment>>>;

    /// Follow edges pointing at `user`'s profile.
    fn followers(&self, user: &Identity) -> SocialResult<Vec<Keyed<Follow>>>;

    /// Follow edges leaving `user`'s profile.
    fn following(&self, user: &Identity) -> SocialResult<Vec<Keyed<Follow>>>;

    fn user_memberships(&self, user: &Identity) -> SocialResult<Vec<Keyed<Membership>>>;

    fn community_members(&self, community: &Address) -> SocialResult<Vec<Keyed<Membership>>>;
}
