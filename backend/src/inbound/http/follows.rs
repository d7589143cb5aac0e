//! Follow graph handlers.
//!
//! ```text
//! POST /api/users/follow   {"followerId":1,"followingId":2}
//! POST /api/users/unfollow {"followerId":1,"followingId":2}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::MessageBody;
use crate::inbound::http::validation::{FieldName, require_body_id};

const FOLLOWER_FIELD: FieldName = FieldName::new("followerId");
const FOLLOWING_FIELD: FieldName = FieldName::new("followingId");

/// Directed edge named by its two endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    #[schema(example = 1)]
    pub follower_id: Option<i64>,
    #[schema(example = 2)]
    pub following_id: Option<i64>,
}

impl FollowRequest {
    fn endpoints(&self) -> Result<(UserId, UserId), Error> {
        let follower = require_body_id(self.follower_id, FOLLOWER_FIELD)?;
        let followee = require_body_id(self.following_id, FOLLOWING_FIELD)?;
        Ok((follower, followee))
    }
}

/// Make one user follow another.
#[utoipa::path(
    post,
    path = "/api/users/follow",
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Now following", body = MessageBody),
        (status = 400, description = "Invalid ids or self-follow", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Already following", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "followUser"
)]
#[post("/users/follow")]
pub async fn follow_user(
    state: web::Data<HttpState>,
    payload: web::Json<FollowRequest>,
) -> ApiResult<web::Json<MessageBody>> {
    let (follower, followee) = payload.endpoints()?;
    let confirmation = state.follows.follow(follower, followee).await?;
    Ok(web::Json(MessageBody::new(confirmation.message())))
}

/// Remove a follow edge.
#[utoipa::path(
    post,
    path = "/api/users/unfollow",
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Edge removed", body = MessageBody),
        (status = 400, description = "Invalid ids", body = ErrorSchema),
        (status = 404, description = "Not following", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "unfollowUser"
)]
#[post("/users/unfollow")]
pub async fn unfollow_user(
    state: web::Data<HttpState>,
    payload: web::Json<FollowRequest>,
) -> ApiResult<web::Json<MessageBody>> {
    let (follower, followee) = payload.endpoints()?;
    state.follows.unfollow(follower, followee).await?;
    debug!(%follower, %followee, "unfollow handled");
    Ok(web::Json(MessageBody::new("Unfollowed successfully")))
}
