//! Post, like, comment and tip transitions.

use super::community::require_member;
use super::tx::Transaction;
use crate::domain::validation::{add, check_len, check_required, decrement, increment};
use crate::domain::{
    comment_address, like_address, post_address, AccountKind, Address, Authorship, Comment,
    Community, ContentHash, Identity, Keyed, Like, Post, SocialConfig, SocialError, SocialResult,
};
use crate::events::SocialEvent;

/// Resolve who a new post is attributed to.
///
/// An empty pseudonym counts as absent.
fn authorship(
    config: &SocialConfig,
    author: Identity,
    is_anonymous: bool,
    pseudonym: Option<&str>,
) -> SocialResult<Authorship> {
    let pseudonym = pseudonym.filter(|p| !p.is_empty());
    match (is_anonymous, pseudonym) {
        (true, None) => Err(SocialError::PseudonymRequired),
        (true, Some(pseudonym)) => {
            check_len("pseudonym", pseudonym, config.max_pseudonym_len)?;
            Ok(Authorship::Anonymous {
                pseudonym: pseudonym.to_string(),
            })
        }
        (false, Some(_)) => Err(SocialError::PseudonymNotAllowed),
        (false, None) => Ok(Authorship::Author(author)),
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn create_post(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    author: Identity,
    community: Address,
    content_uri: &str,
    content_hash: ContentHash,
    is_anonymous: bool,
    pseudonym: Option<&str>,
) -> SocialResult<Keyed<Post>> {
    let mut loaded = tx.require::<Community>(community)?;
    require_member(tx, community, author)?;

    check_required("content_uri", content_uri, config.max_content_uri_len)?;
    let authorship = authorship(config, author, is_anonymous, pseudonym)?;

    let post_id = loaded.account.post_counter;
    let address = post_address(&community, post_id);
    tx.ensure_vacant(AccountKind::Post, address)?;

    loaded.account.post_counter = increment("post_counter", post_id)?;

    let now = tx.now();
    let post = tx.create(
        address,
        Post {
            community,
            post_id,
            content_uri: content_uri.to_string(),
            content_hash,
            authorship,
            likes_count: 0,
            comments_count: 0,
            total_tip_lamports: 0,
            created_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::PostCreated {
        post: address,
        community,
        post_id,
        author: post.account.author().copied(),
        is_anonymous,
        timestamp: now,
    });
    Ok(post)
}

pub(super) fn like_post(
    tx: &mut Transaction<'_>,
    liker: Identity,
    post: Address,
) -> SocialResult<Keyed<Like>> {
    let mut loaded = tx.require::<Post>(post)?;

    if loaded.account.author() == Some(&liker) {
        return Err(SocialError::CannotLikeOwnPost);
    }
    require_member(tx, loaded.account.community, liker)?;

    let address = like_address(&post, &liker);
    tx.ensure_vacant(AccountKind::Like, address)?;

    loaded.account.likes_count = increment("likes_count", loaded.account.likes_count)?;

    let now = tx.now();
    let like = tx.create(
        address,
        Like {
            post,
            liker,
            liked_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::PostLiked {
        post,
        liker,
        timestamp: now,
    });
    Ok(like)
}

pub(super) fn unlike_post(
    tx: &mut Transaction<'_>,
    liker: Identity,
    post: Address,
) -> SocialResult<()> {
    let mut loaded = tx.require::<Post>(post)?;
    let like = tx.require::<Like>(like_address(&post, &liker))?;

    loaded.account.likes_count = decrement("likes_count", loaded.account.likes_count)?;

    tx.remove(like);
    tx.update(loaded)?;

    tx.emit(SocialEvent::PostUnliked {
        post,
        unliker: liker,
        timestamp: tx.now(),
    });
    Ok(())
}

pub(super) fn tip_post(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    tipper: Identity,
    post: Address,
    recipient: Identity,
    amount: u64,
) -> SocialResult<Keyed<Post>> {
    let mut loaded = tx.require::<Post>(post)?;

    let expected = config.fixed_tip_lamports;
    if amount == 0 || expected.is_some_and(|fixed| fixed != amount) {
        return Err(SocialError::InvalidTipAmount { amount, expected });
    }

    let author = *loaded.account.author().ok_or(SocialError::WrongRecipient {
        expected: None,
        actual: recipient,
    })?;
    if author == tipper {
        return Err(SocialError::CannotTipOwnPost);
    }
    if author != recipient {
        return Err(SocialError::WrongRecipient {
            expected: Some(author),
            actual: recipient,
        });
    }

    loaded.account.total_tip_lamports =
        add("total_tip_lamports", loaded.account.total_tip_lamports, amount)?;

    tx.transfer(tipper, recipient, amount);
    tx.emit(SocialEvent::PostTipped {
        post,
        tipper,
        recipient,
        amount,
        timestamp: tx.now(),
    });
    tx.update(loaded)
}

pub(super) fn comment_on_post(
    tx: &mut Transaction<'_>,
    config: &SocialConfig,
    commenter: Identity,
    post: Address,
    content_uri: &str,
    content_hash: ContentHash,
) -> SocialResult<Keyed<Comment>> {
    let mut loaded = tx.require::<Post>(post)?;
    require_member(tx, loaded.account.community, commenter)?;

    check_required("content_uri", content_uri, config.max_content_uri_len)?;

    let comment_id = loaded.account.comments_count;
    let address = comment_address(&post, comment_id);
    tx.ensure_vacant(AccountKind::Comment, address)?;

    loaded.account.comments_count = increment("comments_count", comment_id)?;

    let now = tx.now();
    let comment = tx.create(
        address,
        Comment {
            post,
            commenter,
            comment_id,
            content_uri: content_uri.to_string(),
            content_hash,
            created_at: now,
        },
    )?;
    tx.update(loaded)?;

    tx.emit(SocialEvent::CommentCreated {
        comment: address,
        post,
        comment_id,
        commenter,
        timestamp: now,
    });
    Ok(comment)
}
