//! Poll transitions.

use super::community::require_member;
use super::tx::Transaction;
use crate::domain::validation::{check_required, increment, increment_tally};
use crate::domain::{
    poll_address, vote_address, AccountKind, Address, Community, Identity, Keyed, Poll,
    SocialConfig, SocialError, SocialResult, Timestamp, Vote,
};
use crate::events::SocialEvent;

pub(super) fn create_poll(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    creator: Identity,
    community: Address,
    question_uri: &str,
    option_profiles: &[Identity],
    end_time: Timestamp,
) -> SocialResult<Keyed<Poll>> {
    let mut loaded = tx.require::<Community>(community)?;
    require_member(tx, community, creator)?;

    check_required("question_uri", question_uri, config.max_question_uri_len)?;

    let options = option_profiles.len();
    if options < config.min_poll_options {
        return Err(SocialError::TooFewPollOptions {
            min: config.min_poll_options,
            actual: options,
        });
    }
    if options > config.max_poll_options {
        return Err(SocialError::TooManyPollOptions {
            max: config.max_poll_options,
            actual: options,
        });
    }

    let now = tx.now();
    if end_time <= now {
        return Err(SocialError::PollEndTimeInPast { end_time, now });
    }

    let poll_id = loaded.account.poll_counter;
    let address = poll_address(&community, poll_id);
    tx.ensure_vacant(AccountKind::Poll, address)?;

    loaded.account.poll_counter = increment("poll_counter", poll_id)?;

    let poll = tx.create(
        address,
        Poll {
            community,
            poll_id,
            question_uri: question_uri.to_string(),
            option_profiles: option_profiles.to_vec(),
            votes_per_option: vec![0; options],
            created_by: creator,
            end_time,
            created_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::PollCreated {
        poll: address,
        community,
        poll_id,
        creator,
        end_time,
        timestamp: now,
    });
    Ok(poll)
}

pub(super) fn vote_poll(
    tx: &mut Transaction<'_>,
    voter: Identity,
    poll: Address,
    option_index: u8,
) -> SocialResult<Keyed<Vote>> {
    let mut loaded = tx.require::<Poll>(poll)?;

    let now = tx.now();
    if loaded.account.has_ended(now) {
        return Err(SocialError::PollEnded {
            end_time: loaded.account.end_time,
            now,
        });
    }

    let options = loaded.account.option_profiles.len();
    let slot = usize::from(option_index);
    if slot >= options || slot >= loaded.account.votes_per_option.len() {
        return Err(SocialError::InvalidPollOption {
            index: option_index,
            options,
        });
    }

    require_member(tx, loaded.account.community, voter)?;

    let address = vote_address(&poll, &voter);
    tx.ensure_vacant(AccountKind::Vote, address)?;

    let tally = &mut loaded.account.votes_per_option[slot];
    *tally = increment_tally(*tally)?;

    let vote = tx.create(
        address,
        Vote {
            poll,
            voter,
            option_index,
            voted_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::PollVoted {
        poll,
        voter,
        option_index,
        timestamp: now,
    });
    Ok(vote)
}
