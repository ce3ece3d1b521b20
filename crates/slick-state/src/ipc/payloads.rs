//! Request and response envelopes.
//!
//! Every request names its caller once, in the envelope. Variants never
//! carry a second identity for the acting user.

use crate::domain::{
    Address, Comment, Community, ContentHash, ErrorKind, Follow, Identity, Keyed, Like,
    Membership, Poll, Post, Profile, SocialError, Timestamp, Vote,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialRequest {
    // === Mutations ===
    CreateProfile {
        display_name: String,
        avatar_uri: String,
    },
    UpdateProfile {
        display_name: Option<String>,
        avatar_uri: Option<String>,
    },
    FollowUser {
        target: Identity,
    },
    UnfollowUser {
        target: Identity,
    },
    CreateCommunity {
        name: String,
        description_uri: String,
        community_id: u64,
    },
    JoinCommunity {
        community: Address,
    },
    LeaveCommunity {
        community: Address,
    },
    CreatePost {
        community: Address,
        content_uri: String,
        content_hash: ContentHash,
        is_anonymous: bool,
        pseudonym: Option<String>,
    },
    LikePost {
        post: Address,
    },
    UnlikePost {
        post: Address,
    },
    TipPost {
        post: Address,
        recipient: Identity,
        amount: u64,
    },
    CommentOnPost {
        post: Address,
        content_uri: String,
        content_hash: ContentHash,
    },
    CreatePoll {
        community: Address,
        question_uri: String,
        option_profiles: Vec<Identity>,
        end_time: Timestamp,
    },
    VotePoll {
        poll: Address,
        option_index: u8,
    },

    // === Queries ===
    GetProfile {
        owner: Identity,
    },
    GetCommunity {
        community_id: u64,
    },
    GetCommunityAt {
        community: Address,
    },
    GetPost {
        post: Address,
    },
    GetComment {
        comment: Address,
    },
    GetPoll {
        poll: Address,
    },
    GetMembership {
        community: Address,
        user: Identity,
    },
    GetLike {
        post: Address,
        user: Identity,
    },
    GetFollow {
        follower: Identity,
        followed: Identity,
    },
    GetVote {
        poll: Address,
        voter: Identity,
    },
    ListCommunities,
    ListPosts,
    ListPolls,
    CommunityPosts {
        community: Address,
    },
    CommunityPolls {
        community: Address,
    },
    PostComments {
        post: Address,
    },
    Followers {
        user: Identity,
    },
    Following {
        user: Identity,
    },
    UserMemberships {
        user: Identity,
    },
    CommunityMembers {
        community: Address,
    },
    IsMember {
        community: Address,
        user: Identity,
    },
    HasLiked {
        post: Address,
        user: Identity,
    },
    IsFollowing {
        follower: Identity,
        followed: Identity,
    },
    HasVoted {
        poll: Address,
        voter: Identity,
    },
}

impl SocialRequest {
    /// Operation name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            SocialRequest::CreateProfile { .. } => "create_profile",
            SocialRequest::UpdateProfile { .. } => "update_profile",
            SocialRequest::FollowUser { .. } => "follow_user",
            SocialRequest::UnfollowUser { .. } => "unfollow_user",
            SocialRequest::CreateCommunity { .. } => "create_community",
            SocialRequest::JoinCommunity { .. } => "join_community",
            SocialRequest::LeaveCommunity { .. } => "leave_community",
            SocialRequest::CreatePost { .. } => "create_post",
            SocialRequest::LikePost { .. } => "like_post",
            SocialRequest::UnlikePost { .. } => "unlike_post",
            SocialRequest::TipPost { .. } => "tip_post",
            SocialRequest::CommentOnPost { .. } => "comment_on_post",
            SocialRequest::CreatePoll { .. } => "create_poll",
            SocialRequest::VotePoll { .. } => "vote_poll",
            SocialRequest::GetProfile { .. } => "get_profile",
            SocialRequest::GetCommunity { .. } => "get_community",
            SocialRequest::GetCommunityAt { .. } => "get_community_at",
            SocialRequest::GetPost { .. } => "get_post",
            SocialRequest::GetComment { .. } => "get_comment",
            SocialRequest::GetPoll { .. } => "get_poll",
            SocialRequest::GetMembership { .. } => "get_membership",
            SocialRequest::GetLike { .. } => "get_like",
            SocialRequest::GetFollow { .. } => "get_follow",
            SocialRequest::GetVote { .. } => "get_vote",
            SocialRequest::ListCommunities => "list_communities",
            SocialRequest::ListPosts => "list_posts",
            SocialRequest::ListPolls => "list_polls",
            SocialRequest::CommunityPosts { .. } => "community_posts",
            SocialRequest::CommunityPolls { .. } => "community_polls",
            SocialRequest::PostComments { .. } => "post_comments",
            SocialRequest::Followers { .. } => "followers",
            SocialRequest::Following { .. } => "following",
            SocialRequest::UserMemberships { .. } => "user_memberships",
            SocialRequest::CommunityMembers { .. } => "community_members",
            SocialRequest::IsMember { .. } => "is_member",
            SocialRequest::HasLiked { .. } => "has_liked",
            SocialRequest::IsFollowing { .. } => "is_following",
            SocialRequest::HasVoted { .. } => "has_voted",
        }
    }
}

/// A request from an already authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedRequest {
    pub correlation_id: Uuid,
    pub caller: Identity,
    pub request: SocialRequest,
}

impl AuthenticatedRequest {
    pub fn new(caller: Identity, request: SocialRequest) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            caller,
            request,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialResponsePayload {
    /// Success with nothing to return (unfollow, leave, unlike).
    Done,
    Flag(bool),
    Profile(Keyed<Profile>),
    Community(Keyed<Community>),
    Membership(Keyed<Membership>),
    Post(Keyed<Post>),
    Comment(Keyed<Comment>),
    Like(Keyed<Like>),
    Follow(Keyed<Follow>),
    Poll(Keyed<Poll>),
    Vote(Keyed<Vote>),
    Communities(Vec<Keyed<Community>>),
    Posts(Vec<Keyed<Post>>),
    Polls(Vec<Keyed<Poll>>),
    Comments(Vec<Keyed<Comment>>),
    Follows(Vec<Keyed<Follow>>),
    Memberships(Vec<Keyed<Membership>>),
}

/// Failure as seen by a remote caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    /// Stable code, e.g. `"CannotFollowSelf"`.
    pub code: String,
    pub message: String,
}

impl From<&SocialError> for ErrorResponse {
    fn from(err: &SocialError) -> Self {
        Self {
            kind: err.kind(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialResponse {
    pub correlation_id: Uuid,
    pub result: Result<SocialResponsePayload, ErrorResponse>,
}

impl SocialResponse {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
