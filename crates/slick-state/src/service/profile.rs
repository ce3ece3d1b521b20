//! Profile and follow-graph transitions.

use super::tx::Transaction;
use crate::domain::validation::{check_len, check_required, decrement, increment};
use crate::domain::{
    follow_address, profile_address, AccountKind, Follow, Identity, Keyed, Profile, SocialConfig,
    SocialError, SocialResult,
};
use crate::events::SocialEvent;

pub(super) fn create_profile(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    owner: Identity,
    display_name: &str,
    avatar_uri: &str,
) -> SocialResult<Keyed<Profile>> {
    let address = profile_address(&owner);
    tx.ensure_vacant(AccountKind::Profile, address)?;

    check_required("display_name", display_name, config.max_display_name_len)?;
    check_len("avatar_uri", avatar_uri, config.max_avatar_uri_len)?;

    let now = tx.now();
    let profile = tx.create(
        address,
        Profile {
            owner,
            display_name: display_name.to_string(),
            avatar_uri: avatar_uri.to_string(),
            follower_count: 0,
            following_count: 0,
            created_at: now,
        },
    )?;

    tx.emit(SocialEvent::ProfileCreated {
        profile: address,
        owner,
        display_name: display_name.to_string(),
        timestamp: now,
    });
    Ok(profile)
}

pub(super) fn update_profile(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    owner: Identity,
    display_name: Option<&str>,
    avatar_uri: Option<&str>,
) -> SocialResult<Keyed<Profile>> {
    let address = profile_address(&owner);
    let mut profile = tx
        .load::<Profile>(address)?
        .ok_or(SocialError::NoProfile { owner })?;

    if profile.account.owner != owner {
        return Err(SocialError::NotOwner {
            owner: profile.account.owner,
            caller: owner,
        });
    }

    if let Some(name) = display_name {
        check_required("display_name", name, config.max_display_name_len)?;
        profile.account.display_name = name.to_string();
    }
    if let Some(uri) = avatar_uri {
        check_len("avatar_uri", uri, config.max_avatar_uri_len)?;
        profile.account.avatar_uri = uri.to_string();
    }

    let updated = tx.update(profile)?;
    tx.emit(SocialEvent::ProfileUpdated {
        profile: address,
        owner,
        timestamp: tx.now(),
    });
    Ok(updated)
}

pub(super) fn follow_user(
    tx: &mut Transaction<'_>,
    follower: Identity,
    followed: Identity,
) -> SocialResult<Keyed<Follow>> {
    if follower == followed {
        return Err(SocialError::CannotFollowSelf);
    }

    let mut follower_profile = tx
        .load::<Profile>(profile_address(&follower))?
        .ok_or(SocialError::NoProfile { owner: follower })?;
    let mut followed_profile = tx.require::<Profile>(profile_address(&followed))?;

    let address = follow_address(&follower_profile.address, &followed_profile.address);
    tx.ensure_vacant(AccountKind::Follow, address)?;

    follower_profile.account.following_count =
        increment("following_count", follower_profile.account.following_count)?;
    followed_profile.account.follower_count =
        increment("follower_count", followed_profile.account.follower_count)?;

    let now = tx.now();
    let follow = tx.create(
        address,
        Follow {
            follower: follower_profile.address,
            followed: followed_profile.address,
            followed_at: now,
        },
    )?;

    tx.emit(SocialEvent::UserFollowed {
        follower: follower_profile.address,
        followed: followed_profile.address,
        timestamp: now,
    });
    tx.update(follower_profile)?;
    tx.update(followed_profile)?;
    Ok(follow)
}

pub(super) fn unfollow_user(
    tx: &mut Transaction<'_>,
    follower: Identity,
    followed: Identity,
) -> SocialResult<()> {
    let not_following = SocialError::NotFollowing { follower, followed };
    if follower == followed {
        return Err(not_following);
    }

    let mut follower_profile = tx
        .load::<Profile>(profile_address(&follower))?
        .ok_or(SocialError::NoProfile { owner: follower })?;
    let mut followed_profile = tx.require::<Profile>(profile_address(&followed))?;

    let address = follow_address(&follower_profile.address, &followed_profile.address);
    let follow = tx.load::<Follow>(address)?.ok_or(not_following)?;

    follower_profile.account.following_count =
        decrement("following_count", follower_profile.account.following_count)?;
    followed_profile.account.follower_count =
        decrement("follower_count", followed_profile.account.follower_count)?;

    tx.emit(SocialEvent::UserUnfollowed {
        follower: follower_profile.address,
        unfollowed: followed_profile.address,
        timestamp: tx.now(),
    });
    tx.remove(follow);
    tx.update(follower_profile)?;
    tx.update(followed_profile)?;
    Ok(())
}
