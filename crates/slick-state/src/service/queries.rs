//! Read side: point lookups by derived address and scan-of-kind filters.
//!
//! There are no secondary indexes. A relational query such as "posts of a
//! community" decodes every record of that kind and keeps the matches.

use super::tx::decode;
use super::SocialService;
use crate::domain::{
    community_address, follow_address, like_address, membership_address,
    profile_address, vote_address, AccountData, AccountKind, Address, Comment, Community, Follow,
    Identity, Keyed, Like, Membership, Poll, Post, Profile, SocialError, SocialResult, Vote,
};
use crate::ports::{
    AccountKey, AccountSerializer, AccountStore, EventPublisher, SocialQueryApi, StoredAccount,
    TimeSource, TipLedger,
};
use rayon::prelude::*;
use slick_telemetry::log_event;
use slick_telemetry::logging::subsystems;
use slick_telemetry::{SCANNED_RECORDS, SCANS_TOTAL};

impl<S, T, L, E, C> SocialService<S, T, L, E, C>
where
    S: AccountStore,
    T: TimeSource,
    L: TipLedger,
    E: EventPublisher,
    C: AccountSerializer,
{
    fn fetch<A: AccountData>(&self, address: Address) -> SocialResult<Option<Keyed<A>>> {
        match self.store.get(&AccountKey::new(A::KIND, address))? {
            None => Ok(None),
            Some(stored) => {
                let account = decode::<A>(&self.serializer, &address, &stored.data)?;
                Ok(Some(Keyed::new(address, account)))
            }
        }
    }

    fn fetch_required<A: AccountData>(&self, address: Address) -> SocialResult<Keyed<A>> {
        self.fetch(address)?.ok_or(SocialError::NotFound {
            kind: A::KIND,
            address,
        })
    }

    fn occupied(&self, kind: AccountKind, address: Address) -> SocialResult<bool> {
        Ok(self.store.get(&AccountKey::new(kind, address))?.is_some())
    }

    /// Decode every `A` and keep those matching `predicate`, in address order.
    fn scan<A, P>(&self, predicate: P) -> SocialResult<Vec<Keyed<A>>>
    where
        A: AccountData,
        P: Fn(&A) -> bool + Sync,
    {
        let records = self.store.prefix_scan(A::KIND)?;
        let scanned = records.len();
        let serializer: &dyn AccountSerializer = &self.serializer;

        let keep = |(address, stored): (Address, StoredAccount)| {
            decode::<A>(serializer, &address, &stored.data)
                .map(|account| predicate(&account).then(|| Keyed::new(address, account)))
        };

        let decoded: Vec<Option<Keyed<A>>> = if scanned > self.config.parallel_scan_threshold {
            records.into_par_iter().map(keep).collect::<SocialResult<_>>()?
        } else {
            records.into_iter().map(keep).collect::<SocialResult<_>>()?
        };
        let matched: Vec<Keyed<A>> = decoded.into_iter().flatten().collect();

        SCANS_TOTAL.with_label_values(&[A::KIND.as_str()]).inc();
        SCANNED_RECORDS
            .with_label_values(&[A::KIND.as_str()])
            .inc_by(scanned as f64);
        log_event!(
            debug,
            subsystems::QUERY,
            "Scanned accounts",
            kind = A::KIND.as_str(),
            scanned = scanned,
            matched = matched.len()
        );

        Ok(matched)
    }
}

impl<S, T, L, E, C> SocialQueryApi for SocialService<S, T, L, E, C>
where
    S: AccountStore,
    T: TimeSource,
    L: TipLedger,
    E: EventPublisher,
    C: AccountSerializer,
{
    fn get_profile(&self, owner: &Identity) -> SocialResult<Keyed<Profile>> {
        self.fetch_required(profile_address(owner))
    }

    fn get_community(&self, community: &Address) -> SocialResult<Keyed<Community>> {
        self.fetch_required(*community)
    }

    fn get_community_by_id(&self, community_id: u64) -> SocialResult<Keyed<Community>> {
        self.fetch_required(community_address(community_id))
    }

    fn get_post(&self, post: &Address) -> SocialResult<Keyed<Post>> {
        self.fetch_required(*post)
    }

    fn get_comment(&self, comment: &Address) -> SocialResult<Keyed<Comment>> {
        self.fetch_required(*comment)
    }

    fn get_poll(&self, poll: &Address) -> SocialResult<Keyed<Poll>> {
        self.fetch_required(*poll)
    }

    fn get_membership(&self, community: &Address, user: &Identity) -> SocialResult<Keyed<Membership>> {
        self.fetch_required(membership_address(community, user))
    }

    fn get_vote(&self, poll: &Address, voter: &Identity) -> SocialResult<Keyed<Vote>> {
        self.fetch_required(vote_address(poll, voter))
    }

    fn get_like(&self, post: &Address, liker: &Identity) -> SocialResult<Keyed<Like>> {
        self.fetch_required(like_address(post, liker))
    }

    fn get_follow(&self, follower: &Identity, followed: &Identity) -> SocialResult<Keyed<Follow>> {
        self.fetch_required(follow_address(
            &profile_address(follower),
            &profile_address(followed),
        ))
    }

    fn is_member(&self, community: &Address, user: &Identity) -> SocialResult<bool> {
        self.occupied(AccountKind::Membership, membership_address(community, user))
    }

    fn has_liked(&self, post: &Address, user: &Identity) -> SocialResult<bool> {
        self.occupied(AccountKind::Like, like_address(post, user))
    }

    fn is_following(&self, follower: &Identity, followed: &Identity) -> SocialResult<bool> {
        self.occupied(
            AccountKind::Follow,
            follow_address(&profile_address(follower), &profile_address(followed)),
        )
    }

    fn has_voted(&self, poll: &Address, voter: &Identity) -> SocialResult<bool> {
        self.occupied(AccountKind::Vote, vote_address(poll, voter))
    }

    fn all_communities(&self) -> SocialResult<Vec<Keyed<Community>>> {
        let mut communities = self.scan::<Community, _>(|_| true)?;
        communities.sort_by_key(|c| c.account.community_id);
        Ok(communities)
    }

    fn all_posts(&self) -> SocialResult<Vec<Keyed<Post>>> {
        self.scan(|_: &Post| true)
    }

    fn all_polls(&self) -> SocialResult<Vec<Keyed<Poll>>> {
        self.scan(|_: &Poll| true)
    }

    fn community_posts(&self, community: &Address) -> SocialResult<Vec<Keyed<Post>>> {
        let mut posts = self.scan(|p: &Post| p.community == *community)?;
        posts.sort_by_key(|p| p.account.post_id);
        Ok(posts)
    }

    fn community_polls(&self, community: &Address) -> SocialResult<Vec<Keyed<Poll>>> {
        let mut polls = self.scan(|p: &Poll| p.community == *community)?;
        polls.sort_by_key(|p| p.account.poll_id);
        Ok(polls)
    }

    fn post_comments(&self, post: &Address) -> SocialResult<Vec<Keyed<Comment>>> {
        let mut comments = self.scan(|c: &Comment| c.post == *post)?;
        comments.sort_by_key(|c| c.account.comment_id);
        Ok(comments)
    }

    fn followers(&self, user: &Identity) -> SocialResult<Vec<Keyed<Follow>>> {
        let profile = profile_address(user);
        self.scan(|f: &Follow| f.followed == profile)
    }

    fn following(&self, user: &Identity) -> SocialResult<Vec<Keyed<Follow>>> {
        let profile = profile_address(user);
        self.scan(|f: &Follow| f.follower == profile)
    }

    fn user_memberships(&self, user: &Identity) -> SocialResult<Vec<Keyed<Membership>>> {
        self.scan(|m: &Membership| m.user == *user)
    }

    fn community_members(&self, community: &Address) -> SocialResult<Vec<Keyed<Membership>>> {
        self.scan(|m: &Membership| m.community == *community)
    }
}
