use crate::domain::{Address, Identity, Timestamp};
use serde::{Deserialize, Serialize};

/// Domain events, published only after the transition that produced them
/// has committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialEvent {
    ProfileCreated {
        profile: Address,
        owner: Identity,
        display_name: String,
        timestamp: Timestamp,
    },
    ProfileUpdated {
        profile: Address,
        owner: Identity,
        timestamp: Timestamp,
    },
    UserFollowed {
        follower: Address,
        followed: Address,
        timestamp: Timestamp,
    },
    UserUnfollowed {
        follower: Address,
        unfollowed: Address,
        timestamp: Timestamp,
    },
    CommunityCreated {
        community: Address,
        creator: Identity,
        name: String,
        timestamp: Timestamp,
    },
    CommunityJoined {
        community: Address,
        user: Identity,
        timestamp: Timestamp,
    },
    CommunityLeft {
        community: Address,
        user: Identity,
        timestamp: Timestamp,
    },
    PostCreated {
        post: Address,
        community: Address,
        post_id: u64,
        author: Option<Identity>,
        is_anonymous: bool,
        timestamp: Timestamp,
    },
    PostLiked {
        post: Address,
        liker: Identity,
        timestamp: Timestamp,
    },
    PostUnliked {
        post: Address,
        unliker: Identity,
        timestamp: Timestamp,
    },
    CommentCreated {
        comment: Address,
        post: Address,
        comment_id: u64,
        commenter: Identity,
        timestamp: Timestamp,
    },
    PostTipped {
        post: Address,
        tipper: Identity,
        recipient: Identity,
        amount: u64,
        timestamp: Timestamp,
    },
    PollCreated {
        poll: Address,
        community: Address,
        poll_id: u64,
        creator: Identity,
        end_time: Timestamp,
        timestamp: Timestamp,
    },
    PollVoted {
        poll: Address,
        voter: Identity,
        option_index: u8,
        timestamp: Timestamp,
    },
}

impl SocialEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SocialEvent::ProfileCreated { .. } => "ProfileCreated",
            SocialEvent::ProfileUpdated { .. } => "ProfileUpdated",
            SocialEvent::UserFollowed { .. } => "UserFollowed",
            SocialEvent::UserUnfollowed { .. } => "UserUnfollowed",
            SocialEvent::CommunityCreated { .. } => "CommunityCreated",
            SocialEvent::CommunityJoined { .. } => "CommunityJoined",
            SocialEvent::CommunityLeft { .. } => "CommunityLeft",
            SocialEvent::PostCreated { .. } => "PostCreated",
            SocialEvent::PostLiked { .. } => "PostLiked",
            SocialEvent::PostUnliked { .. } => "PostUnliked",
            SocialEvent::CommentCreated { .. } => "CommentCreated",
            SocialEvent::PostTipped { .. } => "PostTipped",
            SocialEvent::PollCreated { .. } => "PollCreated",
            SocialEvent::PollVoted { .. } => "PollVoted",
        }
    }
}
