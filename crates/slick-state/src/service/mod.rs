//! # Social Service
//!
//! The application service implementing `SocialApi` and `SocialQueryApi`.
//!
//! ## Execution Model
//!
//! Every operation runs as:
//! 1. Open a `Transaction` over the store at the current time
//! 2. Run the handler, which reads through the transaction and buffers its
//!    writes, ledger transfers and events
//! 3. Commit the batch, with the ledger transfers as the precommit hook
//! 4. On a stale read, re-run the handler against fresh state
//! 5. After commit, publish events and record metrics
//!
//! Handler errors are final. Only stale commits are re-executed, and a
//! re-execution re-validates everything, so a create that lost its race
//! comes back as `AlreadyExists`.

mod community;
mod poll;
mod post;
mod profile;
mod queries;
mod tx;

use crate::adapters::{
    BincodeAccountSerializer, InMemoryAccountStore, InMemoryEventLog, InMemoryLedger,
    SystemTimeSource,
};
use crate::domain::{
    Address, Comment, Community, ContentHash, Follow, Identity, Keyed, Like, Membership, Poll,
    Post, Profile, SocialConfig, SocialError, SocialResult, Timestamp, Vote,
};
use crate::ports::{
    AccountSerializer, AccountStore, CommitError, EventPublisher, SocialApi, TimeSource,
    TipLedger,
};
use slick_telemetry::{log_event, metric_inc};
use slick_telemetry::logging::subsystems;
use slick_telemetry::{COMMIT_CONFLICTS, OPERATIONS_TOTAL, OPERATION_DURATION};
use std::sync::Arc;
use tx::{Staged, Transaction};

pub struct SocialService<S, T, L, E, C = BincodeAccountSerializer>
where
    S: AccountStore,
    T: TimeSource,
    L: TipLedger,
    E: EventPublisher,
    C: AccountSerializer,
{
    pub(crate) store: S,
    pub(crate) time_source: T,
    /// External balance transfer for tips.
    pub(crate) ledger: L,
    pub(crate) publisher: E,
    pub(crate) serializer: C,
    pub(crate) config: SocialConfig,
}

/// Dependencies for SocialService
pub struct SocialDependencies<S, T, L, E, C = BincodeAccountSerializer> {
    pub store: S,
    pub time_source: T,
    pub ledger: L,
    pub publisher: E,
    pub serializer: C,
}

/// Service wired to the in-memory adapters and the wall clock.
pub type InMemorySocialService = SocialService<
    Arc<InMemoryAccountStore>,
    SystemTimeSource,
    Arc<InMemoryLedger>,
    Arc<InMemoryEventLog>,
>;

impl<S, T, L, E, C> SocialService<S, T, L, E, C>
where
    S: AccountStore,
    T: TimeSource,
    L: TipLedger,
    E: EventPublisher,
    C: AccountSerializer,
{
    pub fn new(deps: SocialDependencies<S, T, L, E, C>, config: SocialConfig) -> Self {
        Self {
            store: deps.store,
            time_source: deps.time_source,
            ledger: deps.ledger,
            publisher: deps.publisher,
            serializer: deps.serializer,
            config,
        }
    }

    pub fn config(&self) -> &SocialConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn publisher(&self) -> &E {
        &self.publisher
    }

    /// Run `handler` to a committed result, re-executing on stale reads.
    fn execute<R>(
        &self,
        operation: &'static str,
        mut handler: impl FnMut(&mut Transaction<'_>) -> SocialResult<R>,
    ) -> SocialResult<R> {
        let timer = OPERATION_DURATION
            .with_label_values(&[operation])
            .start_timer();
        let result = self.run(operation, &mut handler);
        timer.observe_duration();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.code(),
        };
        metric_inc!(OPERATIONS_TOTAL, &[operation, outcome]);

        if let Err(err) = &result {
            log_event!(
                debug,
                subsystems::ENGINE,
                "Operation rejected",
                operation = operation,
                code = err.code(),
                error = %err
            );
        }
        result
    }

    fn run<R>(
        &self,
        operation: &'static str,
        handler: &mut dyn FnMut(&mut Transaction<'_>) -> SocialResult<R>,
    ) -> SocialResult<R> {
        let attempts = self.config.max_commit_attempts.max(1);

        for attempt in 1..=attempts {
            let mut tx = Transaction::new(&self.store, &self.serializer, self.time_source.now());
            let output = handler(&mut tx)?;
            let Staged {
                batch,
                transfers,
                events,
            } = tx.finish();

            let ledger = &self.ledger;
            let mut precommit = || -> SocialResult<()> {
                for transfer in &transfers {
                    ledger.transfer(&transfer.from, &transfer.to, transfer.lamports)?;
                }
                Ok(())
            };

            match self.store.commit_with(batch, &mut precommit) {
                Ok(receipt) => {
                    log_event!(
                        info,
                        subsystems::ENGINE,
                        "Operation committed",
                        operation = operation,
                        sequence = receipt.sequence,
                        writes = receipt.writes,
                        attempt = attempt
                    );
                    self.publisher.publish(events);
                    return Ok(output);
                }
                Err(CommitError::Stale { key }) => {
                    metric_inc!(COMMIT_CONFLICTS);
                    log_event!(
                        warn,
                        subsystems::ENGINE,
                        "Stale read, re-executing",
                        operation = operation,
                        key = ?key,
                        attempt = attempt
                    );
                }
                Err(CommitError::Rejected(err)) => return Err(err),
                Err(CommitError::Store(err)) => return Err(err.into()),
            }
        }

        Err(SocialError::Contention { attempts })
    }
}

impl InMemorySocialService {
    /// Fresh service over empty in-memory adapters.
    pub fn in_memory(config: SocialConfig) -> Self {
        Self::new(
            SocialDependencies {
                store: Arc::new(InMemoryAccountStore::new()),
                time_source: SystemTimeSource,
                ledger: Arc::new(InMemoryLedger::new()),
                publisher: Arc::new(InMemoryEventLog::new()),
                serializer: BincodeAccountSerializer,
            },
            config,
        )
    }
}

impl<S, T, L, E, C> SocialApi for SocialService<S, T, L, E, C>
where
    S: AccountStore,
    T: TimeSource,
    L: TipLedger,
    E: EventPublisher,
    C: AccountSerializer,
{
    fn create_profile(
        &self,
        owner: Identity,
        display_name: String,
        avatar_uri: String,
    ) -> SocialResult<Keyed<Profile>> {
        self.execute("create_profile", |tx| {
            profile::create_profile(tx, &self.config, owner, &display_name, &avatar_uri)
        })
    }

    fn update_profile(
        &self,
        owner: Identity,
        display_name: Option<String>,
        avatar_uri: Option<String>,
    ) -> SocialResult<Keyed<Profile>> {
        self.execute("update_profile", |tx| {
            profile::update_profile(
                tx,
                &self.config,
                owner,
                display_name.as_deref(),
                avatar_uri.as_deref(),
            )
        })
    }

    fn follow_user(&self, follower: Identity, followed: Identity) -> SocialResult<Keyed<Follow>> {
        self.execute("follow_user", |tx| profile::follow_user(tx, follower, followed))
    }

    fn unfollow_user(&self, follower: Identity, followed: Identity) -> SocialResult<()> {
        self.execute("unfollow_user", |tx| {
            profile::unfollow_user(tx, follower, followed)
        })
    }

    fn create_community(
        &self,
        creator: Identity,
        name: String,
        description_uri: String,
        community_id: u64,
    ) -> SocialResult<Keyed<Community>> {
        self.execute("create_community", |tx| {
            community::create_community(
                tx,
                &self.config,
                creator,
                &name,
                &description_uri,
                community_id,
            )
        })
    }

    fn join_community(&self, user: Identity, community: Address) -> SocialResult<Keyed<Membership>> {
        self.execute("join_community", |tx| {
            community::join_community(tx, user, community)
        })
    }

    fn leave_community(&self, user: Identity, community: Address) -> SocialResult<()> {
        self.execute("leave_community", |tx| {
            community::leave_community(tx, user, community)
        })
    }

    fn create_post(
        &self,
        author: Identity,
        community: Address,
        content_uri: String,
        content_hash: ContentHash,
        is_anonymous: bool,
        pseudonym: Option<String>,
    ) -> SocialResult<Keyed<Post>> {
        self.execute("create_post", |tx| {
            post::create_post(
                tx,
                &self.config,
                author,
                community,
                &content_uri,
                content_hash,
                is_anonymous,
                pseudonym.as_deref(),
            )
        })
    }

    fn like_post(&self, liker: Identity, post: Address) -> SocialResult<Keyed<Like>> {
        self.execute("like_post", |tx| post::like_post(tx, liker, post))
    }

    fn unlike_post(&self, liker: Identity, post: Address) -> SocialResult<()> {
        self.execute("unlike_post", |tx| post::unlike_post(tx, liker, post))
    }

    fn tip_post(
        &self,
        tipper: Identity,
        post: Address,
        recipient: Identity,
        amount: u64,
    ) -> SocialResult<Keyed<Post>> {
        self.execute("tip_post", |tx| {
            post::tip_post(tx, &self.config, tipper, post, recipient, amount)
        })
    }

    fn comment_on_post(
        &self,
        commenter: Identity,
        post: Address,
        content_uri: String,
        content_hash: ContentHash,
    ) -> SocialResult<Keyed<Comment>> {
        self.execute("comment_on_post", |tx| {
            post::comment_on_post(tx, &self.config, commenter, post, &content_uri, content_hash)
        })
    }

    fn create_poll(
        &self,
        creator: Identity,
        community: Address,
        question_uri: String,
        option_profiles: Vec<Identity>,
        end_time: Timestamp,
    ) -> SocialResult<Keyed<Poll>> {
        self.execute("create_poll", |tx| {
            poll::create_poll(
                tx,
                &self.config,
                creator,
                community,
                &question_uri,
                &option_profiles,
                end_time,
            )
        })
    }

    fn vote_poll(&self, voter: Identity, poll: Address, option_index: u8) -> SocialResult<Keyed<Vote>> {
        self.execute("vote_poll", |tx| poll::vote_poll(tx, voter, poll, option_index))
    }
}
