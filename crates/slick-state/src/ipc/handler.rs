//! # IPC Handler
//!
//! Dispatches [`AuthenticatedRequest`]s to the service and wraps the result
//! in a [`SocialResponse`] carrying the same correlation id.
//!
//! ## Security Model
//!
//! Signature checks happen upstream. The handler trusts `caller` and only
//! ever acts as that identity: no request variant lets a caller name a
//! different acting user.

use super::payloads::{
    AuthenticatedRequest, ErrorResponse, SocialRequest, SocialResponse, SocialResponsePayload,
};
use crate::domain::{Identity, SocialResult};
use crate::ports::{SocialApi, SocialQueryApi};
use slick_telemetry::log_event;
use slick_telemetry::logging::subsystems;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("Malformed request: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encoding(#[source] serde_json::Error),
}

pub struct SocialRequestHandler<A> {
    service: Arc<A>,
}

impl<A> Clone for SocialRequestHandler<A> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<A> SocialRequestHandler<A>
where
    A: SocialApi + SocialQueryApi,
{
    pub fn new(service: Arc<A>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    pub fn handle(&self, request: AuthenticatedRequest) -> SocialResponse {
        let AuthenticatedRequest {
            correlation_id,
            caller,
            request,
        } = request;
        let operation = request.name();

        let result = self.dispatch(caller, request);

        match &result {
            Ok(_) => log_event!(
                debug,
                subsystems::IPC,
                "Request handled",
                correlation_id = %correlation_id,
                operation = operation
            ),
            Err(err) => log_event!(
                info,
                subsystems::IPC,
                "Request failed",
                correlation_id = %correlation_id,
                operation = operation,
                code = err.code()
            ),
        }

        SocialResponse {
            correlation_id,
            result: result.map_err(|err| ErrorResponse::from(&err)),
        }
    }

    /// Decode a JSON request, handle it, and encode the JSON response.
    pub fn handle_json(&self, raw: &str) -> Result<String, IpcError> {
        let request: AuthenticatedRequest =
            serde_json::from_str(raw).map_err(IpcError::MalformedRequest)?;
        let response = self.handle(request);
        serde_json::to_string(&response).map_err(IpcError::Encoding)
    }

    fn dispatch(
        &self,
        caller: Identity,
        request: SocialRequest,
    ) -> SocialResult<SocialResponsePayload> {
        use SocialResponsePayload as P;
        let service = &*self.service;

        Ok(match request {
            SocialRequest::CreateProfile {
                display_name,
                avatar_uri,
            } => P::Profile(service.create_profile(caller, display_name, avatar_uri)?),
            SocialRequest::UpdateProfile {
                display_name,
                avatar_uri,
            } => P::Profile(service.update_profile(caller, display_name, avatar_uri)?),
            SocialRequest::FollowUser { target } => P::Follow(service.follow_user(caller, target)?),
            SocialRequest::UnfollowUser { target } => {
                service.unfollow_user(caller, target)?;
                P::Done
            }
            SocialRequest::CreateCommunity {
                name,
                description_uri,
                community_id,
            } => P::Community(service.create_community(
                caller,
                name,
                description_uri,
                community_id,
            )?),
            SocialRequest::JoinCommunity { community } => {
                P::Membership(service.join_community(caller, community)?)
            }
            SocialRequest::LeaveCommunity { community } => {
                service.leave_community(caller, community)?;
                P::Done
            }
            SocialRequest::CreatePost {
                community,
                content_uri,
                content_hash,
                is_anonymous,
                pseudonym,
            } => P::Post(service.create_post(
                caller,
                community,
                content_uri,
                content_hash,
                is_anonymous,
                pseudonym,
            )?),
            SocialRequest::LikePost { post } => P::Like(service.like_post(caller, post)?),
            SocialRequest::UnlikePost { post } => {
                service.unlike_post(caller, post)?;
                P::Done
            }
            SocialRequest::TipPost {
                post,
                recipient,
                amount,
            } => P::Post(service.tip_post(caller, post, recipient, amount)?),
            SocialRequest::CommentOnPost {
                post,
                content_uri,
                content_hash,
            } => P::Comment(service.comment_on_post(caller, post, content_uri, content_hash)?),
            SocialRequest::CreatePoll {
                community,
                question_uri,
                option_profiles,
                end_time,
            } => P::Poll(service.create_poll(
                caller,
                community,
                question_uri,
                option_profiles,
                end_time,
            )?),
            SocialRequest::VotePoll { poll, option_index } => {
                P::Vote(service.vote_poll(caller, poll, option_index)?)
            }

            SocialRequest::GetProfile { owner } => P::Profile(service.get_profile(&owner)?),
            SocialRequest::GetCommunity { community_id } => {
                P::Community(service.get_community_by_id(community_id)?)
            }
            SocialRequest::GetCommunityAt { community } => {
                P::Community(service.get_community(&community)?)
            }
            SocialRequest::GetPost { post } => P::Post(service.get_post(&post)?),
            SocialRequest::GetComment { comment } => P::Comment(service.get_comment(&comment)?),
            SocialRequest::GetPoll { poll } => P::Poll(service.get_poll(&poll)?),
            SocialRequest::GetMembership { community, user } => {
                P::Membership(service.get_membership(&community, &user)?)
            }
            SocialRequest::GetLike { post, user } => P::Like(service.get_like(&post, &user)?),
            SocialRequest::GetFollow { follower, followed } => {
                P::Follow(service.get_follow(&follower, &followed)?)
            }
            SocialRequest::GetVote { poll, voter } => P::Vote(service.get_vote(&poll, &voter)?),
            SocialRequest::ListCommunities => P::Communities(service.all_communities()?),
            SocialRequest::ListPosts => P::Posts(service.all_posts()?),
            SocialRequest::ListPolls => P::Polls(service.all_polls()?),
            SocialRequest::CommunityPosts { community } => {
                P::Posts(service.community_posts(&community)?)
            }
            SocialRequest::CommunityPolls { community } => {
                P::Polls(service.community_polls(&community)?)
            }
            SocialRequest::PostComments { post } => P::Comments(service.post_comments(&post)?),
            SocialRequest::Followers { user } => P::Follows(service.followers(&user)?),
            SocialRequest::Following { user } => P::Follows(service.following(&user)?),
            SocialRequest::UserMemberships { user } => {
                P::Memberships(service.user_memberships(&user)?)
            }
            SocialRequest::CommunityMembers { community } => {
                P::Memberships(service.community_members(&community)?)
            }
            SocialRequest::IsMember { community, user } => {
                P::Flag(service.is_member(&community, &user)?)
            }
            SocialRequest::HasLiked { post, user } => P::Flag(service.has_liked(&post, &user)?),
            SocialRequest::IsFollowing { follower, followed } => {
                P::Flag(service.is_following(&follower, &followed)?)
            }
            SocialRequest::HasVoted { poll, voter } => P::Flag(service.has_voted(&poll, &voter)?),
        })
    }
}
