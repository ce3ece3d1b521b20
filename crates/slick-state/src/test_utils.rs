//! Fixtures shared by unit and integration tests.
//!
//! Requires feature: `test-utils`

use crate::adapters::{
    BincodeAccountSerializer, InMemoryAccountStore, InMemoryEventLog, InMemoryLedger, ManualClock,
};
use crate::domain::{Address, ContentHash, Identity, SocialConfig, Timestamp};
use crate::ports::SocialApi;
use crate::service::{SocialDependencies, SocialService};
use std::sync::Arc;

/// Clock start for every harness: 2023-11-14T22:13:20Z.
pub const GENESIS_TIME: Timestamp = 1_700_000_000;

/// One hour past [`GENESIS_TIME`].
pub const POLL_END: Timestamp = GENESIS_TIME + 3_600;

pub type TestService = SocialService<
    Arc<InMemoryAccountStore>,
    Arc<ManualClock>,
    Arc<InMemoryLedger>,
    Arc<InMemoryEventLog>,
    BincodeAccountSerializer,
>;

pub fn identity(seed: u8) -> Identity {
    Identity([seed; 32])
}

pub fn content_hash(seed: u8) -> ContentHash {
    [seed; 32]
}

/// A service over in-memory adapters, with handles kept for inspection.
pub struct TestHarness {
    pub service: TestService,
    pub store: Arc<InMemoryAccountStore>,
    pub clock: Arc<ManualClock>,
    pub ledger: Arc<InMemoryLedger>,
    pub events: Arc<InMemoryEventLog>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(SocialConfig::default())
    }

    pub fn with_config(config: SocialConfig) -> Self {
        let store = Arc::new(InMemoryAccountStore::new());
        let clock = Arc::new(ManualClock::new(GENESIS_TIME));
        let ledger = Arc::new(InMemoryLedger::new());
        let events = Arc::new(InMemoryEventLog::new());

        let service = SocialService::new(
            SocialDependencies {
                store: Arc::clone(&store),
                time_source: Arc::clone(&clock),
                ledger: Arc::clone(&ledger),
                publisher: Arc::clone(&events),
                serializer: BincodeAccountSerializer,
            },
            config,
        );

        Self {
            service,
            store,
            clock,
            ledger,
            events,
        }
    }

    /// Another service over this harness's adapters and config.
    pub fn share(&self) -> TestService {
        self.share_with_config(self.service.config().clone())
    }

    /// Another service over the same adapters with a different config.
    pub fn share_with_config(&self, config: SocialConfig) -> TestService {
        SocialService::new(
            SocialDependencies {
                store: Arc::clone(&self.store),
                time_source: Arc::clone(&self.clock),
                ledger: Arc::clone(&self.ledger),
                publisher: Arc::clone(&self.events),
                serializer: BincodeAccountSerializer,
            },
            config,
        )
    }

    /// Create a profile for `identity(seed)` and return the identity.
    pub fn user(&self, seed: u8) -> Identity {
        let owner = identity(seed);
        self.service
            .create_profile(owner, format!("user-{seed}"), format!("ipfs://avatar/{seed}"))
            .expect("create profile");
        owner
    }

    pub fn community(&self, creator: Identity, community_id: u64) -> Address {
        self.service
            .create_community(
                creator,
                format!("community-{community_id}"),
                format!("ipfs://community/{community_id}"),
                community_id,
            )
            .expect("create community")
            .address
    }

    /// Create a profile for `identity(seed)` and join it to `community`.
    pub fn member(&self, community: Address, seed: u8) -> Identity {
        let user = self.user(seed);
        self.service
            .join_community(user, community)
            .expect("join community");
        user
    }

    pub fn post(&self, author: Identity, community: Address) -> Address {
        self.service
            .create_post(
                author,
                community,
                "ipfs://post".to_string(),
                content_hash(1),
                false,
                None,
            )
            .expect("create post")
            .address
    }

    /// Poll whose options are the first `options` seeds, ending at [`POLL_END`].
    pub fn poll(&self, creator: Identity, community: Address, options: u8) -> Address {
        self.service
            .create_poll(
                creator,
                community,
                "ipfs://question".to_string(),
                (1..=options).map(identity).collect(),
                POLL_END,
            )
            .expect("create poll")
            .address
    }
}
