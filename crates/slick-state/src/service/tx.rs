//! Unit of work for one execution attempt of one operation.
//!
//! Every store read goes through the transaction so its observed version
//! lands in the read set. Writes, ledger transfers and events are only
//! buffered; the executor decides whether they become visible.

use crate::domain::{AccountData, AccountKind, Address, Identity, Keyed, SocialError, SocialResult, Timestamp};
use crate::events::SocialEvent;
use crate::ports::{AccountKey, AccountSerializer, AccountStore, WriteBatch, WriteOp};
use std::collections::BTreeMap;

/// A record read inside a transaction, carrying the version it was read at.
#[derive(Debug, Clone)]
pub(crate) struct Loaded<T> {
    pub address: Address,
    pub version: u64,
    pub account: T,
}

/// Balance movement executed inside the commit critical section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub from: Identity,
    pub to: Identity,
    pub lamports: u64,
}

/// Buffered output of a finished handler.
pub(crate) struct Staged {
    pub batch: WriteBatch,
    pub transfers: Vec<Transfer>,
    pub events: Vec<SocialEvent>,
}

pub(crate) struct Transaction<'a> {
    store: &'a dyn AccountStore,
    serializer: &'a dyn AccountSerializer,
    now: Timestamp,
    /// First version observed per key; later reads must not overwrite it.
    reads: BTreeMap<AccountKey, Option<u64>>,
    writes: Vec<WriteOp>,
    transfers: Vec<Transfer>,
    events: Vec<SocialEvent>,
}

/// Decode `data` as a `T`, rejecting records of any other kind.
pub(crate) fn decode<T: AccountData>(
    serializer: &dyn AccountSerializer,
    address: &Address,
    data: &[u8],
) -> SocialResult<T> {
    let account = serializer.deserialize(data)?;
    let found = account.kind();
    T::from_account(account).ok_or_else(|| {
        SocialError::Serialization(format!(
            "expected {} at {}, found {}",
            T::KIND,
            address,
            found
        ))
    })
}

impl<'a> Transaction<'a> {
    pub fn new(
        store: &'a dyn AccountStore,
        serializer: &'a dyn AccountSerializer,
        now: Timestamp,
    ) -> Self {
        Self {
            store,
            serializer,
            now,
            reads: BTreeMap::new(),
            writes: Vec::new(),
            transfers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Timestamp shared by every record and event of this attempt.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    fn observe(&mut self, kind: AccountKind, address: Address) -> SocialResult<Option<(u64, Vec<u8>)>> {
        let key = AccountKey::new(kind, address);
        let stored = self.store.get(&key)?;
        self.reads
            .entry(key)
            .or_insert_with(|| stored.as_ref().map(|s| s.version));
        Ok(stored.map(|s| (s.version, s.data)))
    }

    /// Read the `T` at `address`, if any.
    pub fn load<T: AccountData>(&mut self, address: Address) -> SocialResult<Option<Loaded<T>>> {
        match self.observe(T::KIND, address)? {
            None => Ok(None),
            Some((version, data)) => Ok(Some(Loaded {
                address,
                version,
                account: decode(self.serializer, &address, &data)?,
            })),
        }
    }

    /// Read the `T` at `address`, failing `NotFound` if vacant.
    pub fn require<T: AccountData>(&mut self, address: Address) -> SocialResult<Loaded<T>> {
        self.load(address)?.ok_or(SocialError::NotFound {
            kind: T::KIND,
            address,
        })
    }

    /// Whether an account of `kind` occupies `address`.
    pub fn exists(&mut self, kind: AccountKind, address: Address) -> SocialResult<bool> {
        Ok(self.observe(kind, address)?.is_some())
    }

    /// Fail `AlreadyExists` unless `address` is vacant for `kind`.
    pub fn ensure_vacant(&mut self, kind: AccountKind, address: Address) -> SocialResult<()> {
        if self.exists(kind, address)? {
            return Err(SocialError::AlreadyExists { kind, address });
        }
        Ok(())
    }

    pub fn create<T: AccountData>(&mut self, address: Address, account: T) -> SocialResult<Keyed<T>> {
        let data = self.serializer.serialize(&account.clone().into_account())?;
        self.writes.push(WriteOp::Create {
            key: AccountKey::new(T::KIND, address),
            data,
        });
        Ok(Keyed::new(address, account))
    }

    pub fn update<T: AccountData>(&mut self, loaded: Loaded<T>) -> SocialResult<Keyed<T>> {
        let data = self.serializer.serialize(&loaded.account.clone().into_account())?;
        self.writes.push(WriteOp::Update {
            key: AccountKey::new(T::KIND, loaded.address),
            data,
            expected_version: loaded.version,
        });
        Ok(Keyed::new(loaded.address, loaded.account))
    }

    pub fn remove<T: AccountData>(&mut self, loaded: Loaded<T>) {
        self.writes.push(WriteOp::Delete {
            key: AccountKey::new(T::KIND, loaded.address),
            expected_version: loaded.version,
        });
    }

    pub fn transfer(&mut self, from: Identity, to: Identity, lamports: u64) {
        self.transfers.push(Transfer { from, to, lamports });
    }

    pub fn emit(&mut self, event: SocialEvent) {
        self.events.push(event);
    }

    pub fn finish(self) -> Staged {
        Staged {
            batch: WriteBatch {
                reads: self.reads.into_iter().collect(),
                writes: self.writes,
            },
            transfers: self.transfers,
            events: self.events,
        }
    }
}
