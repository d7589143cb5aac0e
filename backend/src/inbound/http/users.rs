//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users {"name":"Alice","email":"alice@example.com","phone":"555-0100","dob":"1990-04-01"}
//! PUT    /api/users/{id} {"imageUrl":null}
//! DELETE /api/users/{id}
//! GET    /api/users/{id}/edges
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{
    CreateUserRequest, FollowEdgesBody, MessageBody, UpdateUserRequest, UserBody, UserEnvelope,
};
use crate::inbound::http::validation::{FieldName, parse_path_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// List every user with follower and following summaries.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserBody]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    let profiles = state.directory.list().await?;
    Ok(web::Json(profiles.iter().map(UserBody::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserBody>> {
    let id = parse_path_id(&path, ID_FIELD)?;
    let profile = state.directory.get(id).await?;
    Ok(web::Json(UserBody::from(profile)))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state.directory.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserEnvelope::new("User created", &profile)))
}

/// Merge a partial update into a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parse_path_id(&path, ID_FIELD)?;
    let profile = state
        .directory
        .update(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserEnvelope::new("User updated", &profile)))
}

/// Delete a user and every follow edge touching it.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = parse_path_id(&path, ID_FIELD)?;
    state.directory.remove(id).await?;
    Ok(web::Json(MessageBody::new("User deleted")))
}

/// Ids following the user and ids the user follows.
#[utoipa::path(
    get,
    path = "/api/users/{id}/edges",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Follow edges", body = FollowEdgesBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "userEdges"
)]
#[get("/users/{id}/edges")]
pub async fn user_edges(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FollowEdgesBody>> {
    let id = parse_path_id(&path, ID_FIELD)?;
    let sets = state.follows.edges_for(id).await?;
    Ok(web::Json(FollowEdgesBody::from(sets)))
}

#[cfg(test)]
mod tests;
