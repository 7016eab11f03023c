use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use common::types::Message;
use service::users::{User, UserInput, UserPatch};

use crate::{errors::JsonApiError, extract::JsonBody, state::ServerState};

pub const NO_USERS_FOUND: &str = "No Users Found!";
pub const USER_NOT_FOUND: &str = "User Not Found";
pub const NO_SUCH_USER: &str = "No such user exists!";

#[derive(Serialize)]
pub struct ListUsersOutput {
    pub users: Vec<User>,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct CreateUserOutput {
    pub user: User,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ViewUserOutput {
    pub data: User,
    pub message: &'static str,
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    responses(
        (status = 200, description = "Fetched user data successfully!"),
        (status = 404, description = "No Users Found!", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<ListUsersOutput>, JsonApiError> {
    let users = state.users.list().await.map_err(|e| JsonApiError::from_service(e, NO_USERS_FOUND))?;
    info!(count = users.len(), "list users");
    Ok(Json(ListUsersOutput { users, message: "Fetched user data successfully!" }))
}

#[utoipa::path(
    post, path = "/createUser", tag = "users",
    request_body = crate::openapi::UserBodyDoc,
    responses((status = 201, description = "User created successfully!"))
)]
pub async fn create_user(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<(StatusCode, Json<CreateUserOutput>), JsonApiError> {
    let user = state.users.create(input).await.map_err(JsonApiError::internal)?;
    Ok((StatusCode::CREATED, Json(CreateUserOutput { user, message: "User created successfully!" })))
}

#[utoipa::path(
    get, path = "/viewUser/{userId}", tag = "users",
    params(("userId" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Fetched User Successfully!"),
        (status = 404, description = "User Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn view_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ViewUserOutput>, JsonApiError> {
    let data = state.users.get(&user_id).await.map_err(|e| JsonApiError::from_service(e, USER_NOT_FOUND))?;
    Ok(Json(ViewUserOutput { data, message: "Fetched User Successfully!" }))
}

#[utoipa::path(
    delete, path = "/deleteAllUsers", tag = "users",
    responses(
        (status = 200, description = "Deleted all users successfully!", body = crate::openapi::MessageDoc),
        (status = 404, description = "No Users Found!", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete_all_users(State(state): State<ServerState>) -> Result<Json<Message>, JsonApiError> {
    state.users.delete_all().await.map_err(|e| JsonApiError::from_service(e, NO_USERS_FOUND))?;
    Ok(Json(Message::new("Deleted all users successfully!")))
}

#[utoipa::path(
    delete, path = "/deleteUser/{userId}", tag = "users",
    params(("userId" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user successfully!", body = crate::openapi::MessageDoc),
        (status = 404, description = "No such user exists!", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    state.users.delete(&user_id).await.map_err(|e| JsonApiError::from_service(e, NO_SUCH_USER))?;
    Ok(Json(Message::new("Deleted user successfully!")))
}

#[utoipa::path(
    put, path = "/updateUser/{userId}", tag = "users",
    params(("userId" = String, Path, description = "User id")),
    request_body = crate::openapi::UserBodyDoc,
    responses(
        (status = 200, description = "User updated successfully!", body = crate::openapi::MessageDoc),
        (status = 404, description = "No such user exists!", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    JsonBody(patch): JsonBody<UserPatch>,
) -> Result<Json<Message>, JsonApiError> {
    state.users.update(&user_id, patch).await.map_err(|e| JsonApiError::from_service(e, NO_SUCH_USER))?;
    Ok(Json(Message::new("User updated successfully!")))
}
