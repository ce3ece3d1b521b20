//! # Account Records
//!
//! One record type per account kind. Records never move: updates mutate
//! fields in place at the same derived address, deletes vacate the address.
//!
//! ## Type Decisions
//!
//! - Counters are `u64` and only change through checked arithmetic
//!   (see `domain::validation`); poll tallies are `u32` per option.
//! - Timestamps are unix seconds (`i64`), taken from the `TimeSource` port.
//! - Content is never stored: only URIs into the external blob store plus a
//!   32-byte integrity hash.

use super::address::{AccountKind, Address, Identity};
use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// 32-byte integrity hash of off-store content.
pub type ContentHash = [u8; 32];

/// User profile, keyed by owner identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub owner: Identity,
    pub display_name: String,
    pub avatar_uri: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub created_at: Timestamp,
}

/// Community, keyed by a caller-chosen id.
///
/// `post_counter` and `poll_counter` are sequence generators for child ids;
/// they only ever increase and are bumped in the same commit that creates
/// the child.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub name: String,
    pub description_uri: String,
    pub creator: Identity,
    pub community_id: u64,
    pub member_count: u64,
    pub post_counter: u64,
    pub poll_counter: u64,
    pub created_at: Timestamp,
}

/// Proof that `user` belongs to `community`. Existence is the predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub community: Address,
    pub user: Identity,
    pub joined_at: Timestamp,
}

/// Who wrote a post.
///
/// An anonymous post has no author but must carry a pseudonym; a signed post
/// has an author and no pseudonym. The enum makes "both" and "neither"
/// unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorship {
    Author(Identity),
    Anonymous { pseudonym: String },
}

impl Authorship {
    pub fn author(&self) -> Option<&Identity> {
        match self {
            Authorship::Author(identity) => Some(identity),
            Authorship::Anonymous { .. } => None,
        }
    }

    pub fn pseudonym(&self) -> Option<&str> {
        match self {
            Authorship::Author(_) => None,
            Authorship::Anonymous { pseudonym } => Some(pseudonym),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Authorship::Anonymous { .. })
    }
}

/// Post, keyed by (community, post_id).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub community: Address,
    pub post_id: u64,
    pub content_uri: String,
    pub content_hash: ContentHash,
    pub authorship: Authorship,
    pub likes_count: u64,
    pub comments_count: u64,
    pub total_tip_lamports: u64,
    pub created_at: Timestamp,
}

impl Post {
    pub fn author(&self) -> Option<&Identity> {
        self.authorship.author()
    }

    pub fn pseudonym(&self) -> Option<&str> {
        self.authorship.pseudonym()
    }
}

/// Comment, keyed by (post, comment_id).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub post: Address,
    pub commenter: Identity,
    pub comment_id: u64,
    pub content_uri: String,
    pub content_hash: ContentHash,
    pub created_at: Timestamp,
}

/// Like, keyed by (post, liker).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub post: Address,
    pub liker: Identity,
    pub liked_at: Timestamp,
}

/// Follow edge between two profiles, keyed by the profile addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub follower: Address,
    pub followed: Address,
    pub followed_at: Timestamp,
}

/// Poll, keyed by (community, poll_id).
///
/// `votes_per_option` is parallel to `option_profiles`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub community: Address,
    pub poll_id: u64,
    pub question_uri: String,
    pub option_profiles: Vec<Identity>,
    pub votes_per_option: Vec<u32>,
    pub created_by: Identity,
    pub end_time: Timestamp,
    pub created_at: Timestamp,
}

impl Poll {
    pub fn total_votes(&self) -> u64 {
        self.votes_per_option.iter().map(|v| u64::from(*v)).sum()
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }
}

/// Vote, keyed by (poll, voter). Immutable once cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub poll: Address,
    pub voter: Identity,
    pub option_index: u8,
    pub voted_at: Timestamp,
}

/// Tagged union of every record, the unit the store serializes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Profile(Profile),
    Community(Community),
    Membership(Membership),
    Post(Post),
    Comment(Comment),
    Like(Like),
    Follow(Follow),
    Poll(Poll),
    Vote(Vote),
}

impl Account {
    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Profile(_) => AccountKind::Profile,
            Account::Community(_) => AccountKind::Community,
            Account::Membership(_) => AccountKind::Membership,
            Account::Post(_) => AccountKind::Post,
            Account::Comment(_) => AccountKind::Comment,
            Account::Like(_) => AccountKind::Like,
            Account::Follow(_) => AccountKind::Follow,
            Account::Poll(_) => AccountKind::Poll,
            Account::Vote(_) => AccountKind::Vote,
        }
    }
}

/// A record type that can live in the store.
pub trait AccountData: Clone + Send + Sync + Sized + 'static {
    const KIND: AccountKind;

    fn into_account(self) -> Account;

    /// `None` if `account` is a different kind.
    fn from_account(account: Account) -> Option<Self>;
}

macro_rules! impl_account_data {
    ($($ty:ident),* $(,)?) => {
        $(
            impl AccountData for $ty {
                const KIND: AccountKind = AccountKind::$ty;

                fn into_account(self) -> Account {
                    Account::$ty(self)
                }

                fn from_account(account: Account) -> Option<Self> {
                    match account {
                        Account::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_account_data!(Profile, Community, Membership, Post, Comment, Like, Follow, Poll, Vote);

/// A record together with the address it was read from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyed<T> {
    pub address: Address,
    pub account: T,
}

impl<T> Keyed<T> {
    pub fn new(address: Address, account: T) -> Self {
        Self { address, account }
    }
}
