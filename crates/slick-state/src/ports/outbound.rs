//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the transition engine requires the host to provide.
//!
//! Testing and single-process use: the in-memory adapters in `adapters/`.

use crate::domain::{Account, AccountKind, Address, Identity, SocialError, Timestamp};
use crate::events::SocialEvent;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// ACCOUNT STORE
// =============================================================================

/// Store key: the account kind (as a one-byte prefix) plus its address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey {
    pub kind: AccountKind,
    pub address: Address,
}

impl AccountKey {
    pub const LEN: usize = 33;

    pub fn new(kind: AccountKind, address: Address) -> Self {
        Self { kind, address }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut key = [0u8; Self::LEN];
        key[0] = self.kind.prefix();
        key[1..].copy_from_slice(self.address.as_bytes());
        key
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::LEN {
            return None;
        }
        let kind = AccountKind::from_prefix(bytes[0])?;
        let mut address = [0u8; 32];
        address.copy_from_slice(&bytes[1..]);
        Some(Self::new(kind, Address(address)))
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.kind, self.address)
    }
}

/// Serialized record plus the commit sequence that last wrote it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAccount {
    pub version: u64,
    pub data: Vec<u8>,
}

/// A single write inside a batch, with the state it expects to find.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Address must be vacant.
    Create { key: AccountKey, data: Vec<u8> },
    /// Address must still hold `expected_version`.
    Update {
        key: AccountKey,
        data: Vec<u8>,
        expected_version: u64,
    },
    /// Address must still hold `expected_version`; vacated afterwards.
    Delete { key: AccountKey, expected_version: u64 },
}

impl WriteOp {
    pub fn key(&self) -> &AccountKey {
        match self {
            WriteOp::Create { key, .. } | WriteOp::Update { key, .. } | WriteOp::Delete { key, .. } => {
                key
            }
        }
    }
}

/// Everything one transition read and wants to write.
///
/// `reads` records the version observed for every key consulted (`None` for
/// vacant). The store applies `writes` only if every read still holds.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    pub reads: Vec<(AccountKey, Option<u64>)>,
    pub writes: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Store sequence number assigned to this commit.
    pub sequence: u64,
    pub writes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("corrupt store key: {0}")]
    CorruptKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// A read or write expectation no longer holds. Nothing was applied.
    #[error("stale read of {key:?}")]
    Stale { key: AccountKey },

    /// The precommit hook refused. Nothing was applied.
    #[error("precommit rejected: {0}")]
    Rejected(SocialError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Versioned key-value store holding serialized accounts.
///
/// ## Atomicity
///
/// `commit_with` validates the read set and every write expectation, runs
/// `precommit`, and applies all writes as one unit. Any failure leaves the
/// store untouched. Commits touching disjoint keys never invalidate each
/// other.
pub trait AccountStore: Send + Sync {
    fn get(&self, key: &AccountKey) -> Result<Option<StoredAccount>, StoreError>;

    /// Every account of one kind.
    fn prefix_scan(&self, kind: AccountKind) -> Result<Vec<(Address, StoredAccount)>, StoreError>;

    fn commit_with(
        &self,
        batch: WriteBatch,
        precommit: &mut dyn FnMut() -> Result<(), SocialError>,
    ) -> Result<CommitReceipt, CommitError>;

    fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, CommitError> {
        self.commit_with(batch, &mut || Ok(()))
    }
}

// =============================================================================
// TIME
// =============================================================================

/// Current time, injectable for tests.
pub trait TimeSource: Send + Sync {
    /// Unix seconds.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// LEDGER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: {account} has {available}, needs {required}")]
    InsufficientFunds {
        account: Identity,
        required: u64,
        available: u64,
    },

    #[error("recipient balance would overflow")]
    BalanceOverflow,

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// External balance transfer used for tips.
pub trait TipLedger: Send + Sync {
    fn transfer(&self, from: &Identity, to: &Identity, lamports: u64) -> Result<(), LedgerError>;
}

// =============================================================================
// EVENTS
// =============================================================================

pub trait EventPublisher: Send + Sync {
    fn publish(&self, events: Vec<SocialEvent>);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SerializationError(pub String);

pub trait AccountSerializer: Send + Sync {
    fn serialize(&self, account: &Account) -> Result<Vec<u8>, SerializationError>;

    fn deserialize(&self, data: &[u8]) -> Result<Account, SerializationError>;
}

// =============================================================================
// ERROR CONVERSIONS
// =============================================================================

impl From<StoreError> for SocialError {
    fn from(err: StoreError) -> Self {
        SocialError::Storage(err.to_string())
    }
}

impl From<LedgerError> for SocialError {
    fn from(err: LedgerError) -> Self {
        SocialError::LedgerRejected(err.to_string())
    }
}

impl From<SerializationError> for SocialError {
    fn from(err: SerializationError) -> Self {
        SocialError::Serialization(err.0)
    }
}

// =============================================================================
// SHARED HANDLES
// =============================================================================

impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    fn get(&self, key: &AccountKey) -> Result<Option<StoredAccount>, StoreError> {
        (**self).get(key)
    }

    fn prefix_scan(&self, kind: AccountKind) -> Result<Vec<(Address, StoredAccount)>, StoreError> {
        (**self).prefix_scan(kind)
    }

    fn commit_with(
        &self,
        batch: WriteBatch,
        precommit: &mut dyn FnMut() -> Result<(), SocialError>,
    ) -> Result<CommitReceipt, CommitError> {
        (**self).commit_with(batch, precommit)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<T: TipLedger + ?Sized> TipLedger for Arc<T> {
    fn transfer(&self, from: &Identity, to: &Identity, lamports: u64) -> Result<(), LedgerError> {
        (**self).transfer(from, to, lamports)
    }
}

impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    fn publish(&self, events: Vec<SocialEvent>) {
        (**self).publish(events)
    }
}
