use crate::domain::{AccountKind, Address, SocialError};
use crate::ports::{
    AccountKey, AccountStore, CommitError, CommitReceipt, StoreError, StoredAccount, WriteBatch,
    WriteOp,
};
use parking_lot::RwLock;
use slick_telemetry::log_event;
use slick_telemetry::logging::subsystems;
use std::collections::BTreeMap;

type RawKey = [u8; AccountKey::LEN];

#[derive(Default)]
struct StoreState {
    /// Ordered so each kind occupies one contiguous key range.
    accounts: BTreeMap<RawKey, StoredAccount>,
    /// Last assigned commit sequence.
    sequence: u64,
}

impl StoreState {
    fn version_of(&self, key: &AccountKey) -> Option<u64> {
        self.accounts.get(&key.to_bytes()).map(|a| a.version)
    }

    fn validate(&self, batch: &WriteBatch) -> Result<(), CommitError> {
        for (key, observed) in &batch.reads {
            if self.version_of(key) != *observed {
                return Err(CommitError::Stale { key: *key });
            }
        }
        for op in &batch.writes {
            let current = self.version_of(op.key());
            let holds = match op {
                WriteOp::Create { .. } => current.is_none(),
                WriteOp::Update {
                    expected_version, ..
                }
                | WriteOp::Delete {
                    expected_version, ..
                } => current == Some(*expected_version),
            };
            if !holds {
                return Err(CommitError::Stale { key: *op.key() });
            }
        }
        Ok(())
    }
}

/// In-memory versioned account store.
///
/// Commits are validated and applied under one write lock, so a commit
/// either sees every expectation hold and applies every write, or applies
/// nothing.
#[derive(Default)]
pub struct InMemoryAccountStore {
    state: RwLock<StoreState>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live accounts across all kinds.
    pub fn len(&self) -> usize {
        self.state.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequence number of the latest commit (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.state.read().sequence
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, key: &AccountKey) -> Result<Option<StoredAccount>, StoreError> {
        Ok(self.state.read().accounts.get(&key.to_bytes()).cloned())
    }

    fn prefix_scan(&self, kind: AccountKind) -> Result<Vec<(Address, StoredAccount)>, StoreError> {
        let low = AccountKey::new(kind, Address([0x00; 32])).to_bytes();
        let high = AccountKey::new(kind, Address([0xFF; 32])).to_bytes();

        let state = self.state.read();
        state
            .accounts
            .range(low..=high)
            .map(|(raw, account)| {
                let key = AccountKey::from_bytes(raw)
                    .ok_or_else(|| StoreError::CorruptKey(hex::encode(raw)))?;
                Ok((key.address, account.clone()))
            })
            .collect()
    }

    fn commit_with(
        &self,
        batch: WriteBatch,
        precommit: &mut dyn FnMut() -> Result<(), SocialError>,
    ) -> Result<CommitReceipt, CommitError> {
        let mut state = self.state.write();

        if let Err(err) = state.validate(&batch) {
            log_event!(
                debug,
                subsystems::STORE,
                "Commit refused",
                reads = batch.reads.len(),
                writes = batch.writes.len(),
                error = %err
            );
            return Err(err);
        }
        precommit().map_err(CommitError::Rejected)?;

        state.sequence += 1;
        let sequence = state.sequence;
        let writes = batch.writes.len();

        for op in batch.writes {
            match op {
                WriteOp::Create { key, data } | WriteOp::Update { key, data, .. } => {
                    state.accounts.insert(
                        key.to_bytes(),
                        StoredAccount {
                            version: sequence,
                            data,
                        },
                    );
                }
                WriteOp::Delete { key, .. } => {
                    state.accounts.remove(&key.to_bytes());
                }
            }
        }

        Ok(CommitReceipt { sequence, writes })
    }
}
