//! Community and membership transitions.

use super::tx::Transaction;
use crate::domain::validation::{check_len, check_required, decrement, increment};
use crate::domain::{
    community_address, membership_address, profile_address, AccountKind, Address, Community,
    Identity, Keyed, Membership, SocialConfig, SocialError, SocialResult,
};
use crate::events::SocialEvent;

pub(super) fn create_community(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    creator: Identity,
    name: &str,
    description_uri: &str,
    community_id: u64,
) -> SocialResult<Keyed<Community>> {
    let address = community_address(community_id);
    tx.ensure_vacant(AccountKind::Community, address)?;

    if !tx.exists(AccountKind::Profile, profile_address(&creator))? {
        return Err(SocialError::NoProfile { owner: creator });
    }

    check_required("name", name, config.max_community_name_len)?;
    check_len("description_uri", description_uri, config.max_description_uri_len)?;

    let membership = membership_address(&address, &creator);
    tx.ensure_vacant(AccountKind::Membership, membership)?;

    let now = tx.now();
    let community = tx.create(
        address,
        Community {
            name: name.to_string(),
            description_uri: description_uri.to_string(),
            creator,
            community_id,
            member_count: 1,
            post_counter: 0,
            poll_counter: 0,
            created_at: now,
        },
    )?;
    tx.create(
        membership,
        Membership {
            community: address,
            user: creator,
            joined_at: now,
        },
    )?;

    tx.emit(SocialEvent::CommunityCreated {
        community: address,
        creator,
        name: name.to_string(),
        timestamp: now,
    });
    tx.emit(SocialEvent::CommunityJoined {
        community: address,
        user: creator,
        timestamp: now,
    });
    Ok(community)
}

pub(super) fn join_community(
    tx: &mut Transaction<'_>,
    user: Identity,
    community: Address,
) -> SocialResult<Keyed<Membership>> {
    let mut loaded = tx.require::<Community>(community)?;

    if !tx.exists(AccountKind::Profile, profile_address(&user))? {
        return Err(SocialError::NoProfile { owner: user });
    }

    let address = membership_address(&community, &user);
    tx.ensure_vacant(AccountKind::Membership, address)?;

    loaded.account.member_count = increment("member_count", loaded.account.member_count)?;

    let now = tx.now();
    let membership = tx.create(
        address,
        Membership {
            community,
            user,
            joined_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::CommunityJoined {
        community,
        user,
        timestamp: now,
    });
    Ok(membership)
}

pub(super) fn leave_community(
    tx: &mut Transaction<'_>,
    user: Identity,
    community: Address,
) -> SocialResult<()> {
    let mut loaded = tx.require::<Community>(community)?;
    let membership = tx.require::<Membership>(membership_address(&community, &user))?;

    if membership.account.user != user {
        return Err(SocialError::NotOwner {
            owner: membership.account.user,
            caller: user,
        });
    }

    // member_count mirrors live memberships, so hitting zero here means the
    // two have diverged.
    loaded.account.member_count = decrement("member_count", loaded.account.member_count)?;

    tx.remove(membership);
    tx.update(loaded)?;

    tx.emit(SocialEvent::CommunityLeft {
        community,
        user,
        timestamp: tx.now(),
    });
    Ok(())
}

/// Fail `NotMember` unless `user` holds a membership in `community`.
pub(super) fn require_member(
    tx: &mut Transaction<'_>,
    community: Address,
    user: Identity,
) -> SocialResult<()> {
    if tx.exists(AccountKind::Membership, membership_address(&community, &user))? {
        Ok(())
    } else {
        Err(SocialError::NotMember { community, user })
    }
}
