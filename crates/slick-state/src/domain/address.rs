//! # Address Derivation
//!
//! Every account lives at an address that is a pure function of its kind
//! and an ordered tuple of semantic key parts. Creating an account requires
//! its derived address to be vacant; looking one up requires it to be
//! occupied. Two creates for the same key tuple therefore collide on the
//! same address and only one of them can commit.
//!
//! ## Encoding
//!
//! ```text
//! keccak256( DOMAIN_TAG
//!          || u32le(len(kind_seed)) || kind_seed
//!          || for each part: u32le(len(part)) || part )
//! ```
//!
//! Length prefixes make the preimage injective: `("ab", "c")` and
//! `("a", "bc")` hash different byte strings.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Namespace mixed into every derivation.
pub const DOMAIN_TAG: &[u8] = b"slick/derived-address/v1";

/// A caller identity (32-byte public key).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Identity(pub [u8; 32]);

/// A derived storage address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Identity {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Address {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}..)", hex::encode(&self.0[..4]))
    }
}

/// The nine account kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountKind {
    Profile,
    Community,
    Membership,
    Post,
    Comment,
    Like,
    Follow,
    Poll,
    Vote,
}

impl AccountKind {
    pub const ALL: [AccountKind; 9] = [
        AccountKind::Profile,
        AccountKind::Community,
        AccountKind::Membership,
        AccountKind::Post,
        AccountKind::Comment,
        AccountKind::Like,
        AccountKind::Follow,
        AccountKind::Poll,
        AccountKind::Vote,
    ];

    /// Seed tag hashed into every address of this kind.
    pub const fn seed(&self) -> &'static [u8] {
        match self {
            AccountKind::Profile => b"profile",
            AccountKind::Community => b"community",
            AccountKind::Membership => b"membership",
            AccountKind::Post => b"post",
            AccountKind::Comment => b"comment",
            AccountKind::Like => b"like",
            AccountKind::Follow => b"follow",
            AccountKind::Poll => b"poll",
            AccountKind::Vote => b"vote",
        }
    }

    /// One-byte prefix partitioning the store keyspace by kind.
    pub const fn prefix(&self) -> u8 {
        match self {
            AccountKind::Profile => 0x01,
            AccountKind::Community => 0x02,
            AccountKind::Membership => 0x03,
            AccountKind::Post => 0x04,
            AccountKind::Comment => 0x05,
            AccountKind::Like => 0x06,
            AccountKind::Follow => 0x07,
            AccountKind::Poll => 0x08,
            AccountKind::Vote => 0x09,
        }
    }

    pub fn from_prefix(prefix: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    /// Lowercase name, used as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Profile => "profile",
            AccountKind::Community => "community",
            AccountKind::Membership => "membership",
            AccountKind::Post => "post",
            AccountKind::Comment => "comment",
            AccountKind::Like => "like",
            AccountKind::Follow => "follow",
            AccountKind::Poll => "poll",
            AccountKind::Vote => "vote",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ordered component of a key tuple.
#[derive(Clone, Copy, Debug)]
pub enum Seed<'a> {
    Bytes(&'a [u8]),
    Identity(&'a Identity),
    Address(&'a Address),
    /// Sequential ids and community ids, little-endian.
    U64(u64),
}

impl Seed<'_> {
    fn absorb(&self, hasher: &mut Keccak256) {
        match self {
            Seed::Bytes(bytes) => absorb_part(hasher, bytes),
            Seed::Identity(identity) => absorb_part(hasher, identity.as_bytes()),
            Seed::Address(address) => absorb_part(hasher, address.as_bytes()),
            Seed::U64(value) => absorb_part(hasher, &value.to_le_bytes()),
        }
    }
}

fn absorb_part(hasher: &mut Keccak256, part: &[u8]) {
    hasher.update((part.len() as u32).to_le_bytes());
    hasher.update(part);
}

/// Derive the address of an account of `kind` keyed by `seeds`.
pub fn derive_address(kind: AccountKind, seeds: &[Seed<'_>]) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(DOMAIN_TAG);
    absorb_part(&mut hasher, kind.seed());
    for seed in seeds {
        seed.absorb(&mut hasher);
    }
    Address(hasher.finalize().into())
}

pub fn profile_address(owner: &Identity) -> Address {
    derive_address(AccountKind::Profile, &[Seed::Identity(owner)])
}

pub fn community_address(community_id: u64) -> Address {
    derive_address(AccountKind::Community, &[Seed::U64(community_id)])
}

pub fn membership_address(community: &Address, user: &Identity) -> Address {
    derive_address(
        AccountKind::Membership,
        &[Seed::Address(community), Seed::Identity(user)],
    )
}

pub fn post_address(community: &Address, post_id: u64) -> Address {
    derive_address(AccountKind::Post, &[Seed::Address(community), Seed::U64(post_id)])
}

pub fn comment_address(post: &Address, comment_id: u64) -> Address {
    derive_address(AccountKind::Comment, &[Seed::Address(post), Seed::U64(comment_id)])
}

pub fn like_address(post: &Address, liker: &Identity) -> Address {
    derive_address(AccountKind::Like, &[Seed::Address(post), Seed::Identity(liker)])
}

/// Follows are keyed by the two profile addresses, not the raw identities.
pub fn follow_address(follower_profile: &Address, followed_profile: &Address) -> Address {
    derive_address(
        AccountKind::Follow,
        &[Seed::Address(follower_profile), Seed::Address(followed_profile)],
    )
}

pub fn poll_address(community: &Address, poll_id: u64) -> Address {
    derive_address(AccountKind::Poll, &[Seed::Address(community), Seed::U64(poll_id)])
}

pub fn vote_address(poll: &Address, voter: &Identity) -> Address {
    derive_address(AccountKind::Vote, &[Seed::Address(poll), Seed::Identity(voter)])
}
