//! # Domain Errors
//!
//! Every failure is raised before anything is committed, so an error never
//! leaves partially applied state behind.
//!
//! Each variant projects onto a coarse [`ErrorKind`] and a stable
//! [`SocialError::code`] that callers can match on without parsing messages.

use super::address::{AccountKind, Address, Identity};
use super::entities::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse failure classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Create at an occupied address.
    AlreadyExists,
    /// Required account absent.
    NotFound,
    /// Caller is not the identity the mutation requires.
    NotAuthorized,
    /// Malformed input: lengths, empties, indices, pseudonym presence.
    ValidationFailed,
    /// Counter overflow or underflow.
    InvariantViolation,
    /// Well-formed but disallowed: self-follow, self-like, ended poll, tips.
    PolicyRejected,
    /// Optimistic commit kept losing races.
    Conflict,
    /// The external ledger refused a transfer.
    External,
    /// Store or codec failure.
    Storage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialError {
    #[error("{kind} already exists at {address}")]
    AlreadyExists { kind: AccountKind, address: Address },

    #[error("{kind} not found at {address}")]
    NotFound { kind: AccountKind, address: Address },

    #[error("No profile for {owner}")]
    NoProfile { owner: Identity },

    #[error("Not following this user")]
    NotFollowing { follower: Identity, followed: Identity },

    #[error("{user} is not a member of community {community}")]
    NotMember { community: Address, user: Identity },

    #[error("Caller {caller} is not the owner {owner}")]
    NotOwner { owner: Identity, caller: Identity },

    #[error("{field} is too long: {actual} bytes, max {max}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("Pseudonym is required for anonymous posts")]
    PseudonymRequired,

    #[error("Pseudonym not allowed for non-anonymous posts")]
    PseudonymNotAllowed,

    #[error("Too many poll options: {actual}, max {max}")]
    TooManyPollOptions { max: usize, actual: usize },

    #[error("Too few poll options: {actual}, min {min}")]
    TooFewPollOptions { min: usize, actual: usize },

    #[error("Invalid poll option {index}: poll has {options} options")]
    InvalidPollOption { index: u8, options: usize },

    #[error("Poll end time {end_time} is not after now ({now})")]
    PollEndTimeInPast { end_time: Timestamp, now: Timestamp },

    #[error("Arithmetic overflow on {counter}")]
    ArithmeticOverflow { counter: &'static str },

    #[error("Counter {counter} would go negative")]
    CounterUnderflow { counter: &'static str },

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("Cannot like your own post")]
    CannotLikeOwnPost,

    #[error("Cannot tip your own post")]
    CannotTipOwnPost,

    #[error("Poll has ended at {end_time} (now {now})")]
    PollEnded { end_time: Timestamp, now: Timestamp },

    #[error("Invalid tip amount {amount}")]
    InvalidTipAmount { amount: u64, expected: Option<u64> },

    #[error("Tip recipient {actual} is not the post author")]
    WrongRecipient {
        expected: Option<Identity>,
        actual: Identity,
    },

    #[error("Gave up after {attempts} conflicting commit attempts")]
    Contention { attempts: u32 },

    #[error("Ledger rejected transfer: {0}")]
    LedgerRejected(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SocialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SocialError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            SocialError::NotFound { .. }
            | SocialError::NoProfile { .. }
            | SocialError::NotFollowing { .. } => ErrorKind::NotFound,
            SocialError::NotMember { .. } | SocialError::NotOwner { .. } => {
                ErrorKind::NotAuthorized
            }
            SocialError::FieldTooLong { .. }
            | SocialError::EmptyField { .. }
            | SocialError::PseudonymRequired
            | SocialError::PseudonymNotAllowed
            | SocialError::TooManyPollOptions { .. }
            | SocialError::TooFewPollOptions { .. }
            | SocialError::InvalidPollOption { .. }
            | SocialError::PollEndTimeInPast { .. } => ErrorKind::ValidationFailed,
            SocialError::ArithmeticOverflow { .. } | SocialError::CounterUnderflow { .. } => {
                ErrorKind::InvariantViolation
            }
            SocialError::CannotFollowSelf
            | SocialError::CannotLikeOwnPost
            | SocialError::CannotTipOwnPost
            | SocialError::PollEnded { .. }
            | SocialError::InvalidTipAmount { .. }
            | SocialError::WrongRecipient { .. } => ErrorKind::PolicyRejected,
            SocialError::Contention { .. } => ErrorKind::Conflict,
            SocialError::LedgerRejected(_) => ErrorKind::External,
            SocialError::Storage(_) | SocialError::Serialization(_) => ErrorKind::Storage,
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SocialError::AlreadyExists { .. } => "AlreadyExists",
            SocialError::NotFound { .. } => "NotFound",
            SocialError::NoProfile { .. } => "NoProfile",
            SocialError::NotFollowing { .. } => "NotFollowing",
            SocialError::NotMember { .. } => "NotMember",
            SocialError::NotOwner { .. } => "NotOwner",
            SocialError::FieldTooLong { .. } => "TooLong",
            SocialError::EmptyField { .. } => "EmptyField",
            SocialError::PseudonymRequired => "PseudonymRequired",
            SocialError::PseudonymNotAllowed => "PseudonymNotAllowed",
            SocialError::TooManyPollOptions { .. } => "TooManyPollOptions",
            SocialError::TooFewPollOptions { .. } => "TooFewPollOptions",
            SocialError::InvalidPollOption { .. } => "InvalidPollOption",
            SocialError::PollEndTimeInPast { .. } => "PollEndTimeInPast",
            SocialError::ArithmeticOverflow { .. } => "ArithmeticOverflow",
            SocialError::CounterUnderflow { .. } => "CounterUnderflow",
            SocialError::CannotFollowSelf => "CannotFollowSelf",
            SocialError::CannotLikeOwnPost => "CannotLikeOwnPost",
            SocialError::CannotTipOwnPost => "CannotTipOwnPost",
            SocialError::PollEnded { .. } => "PollEnded",
            SocialError::InvalidTipAmount { .. } => "InvalidTipAmount",
            SocialError::WrongRecipient { .. } => "WrongRecipient",
            SocialError::Contention { .. } => "Contention",
            SocialError::LedgerRejected(_) => "LedgerRejected",
            SocialError::Storage(_) => "Storage",
            SocialError::Serialization(_) => "Serialization",
        }
    }

    /// True for a create that lost to an existing account of `kind`.
    pub fn is_collision(&self, kind: AccountKind) -> bool {
        matches!(self, SocialError::AlreadyExists { kind: k, .. } if *k == kind)
    }
}

pub type SocialResult<T> = Result<T, SocialError>;
