//! User endpoints

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::domain::user::{User, UserDraft};

use super::DeletedResponse;

/// User representation returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            name: user.name().to_string(),
            age: user.age(),
            phone: user.phone().to_string(),
            team_id: user.team_id().map(|id| id.value()),
        }
    }
}

pub(crate) fn to_responses(users: &[User]) -> Vec<UserResponse> {
    users.iter().map(UserResponse::from).collect()
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list().await.map_err(ApiError::from)?;

    Ok(Json(to_responses(&users)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(draft): Json<UserDraft>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(name = %draft.name, "Creating user");

    let user = state
        .user_service
        .create(draft)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = state
        .user_service
        .get(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    let user = state
        .user_service
        .update(&user_id, draft)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    let user = state
        .user_service
        .delete(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DeletedResponse::new(user.id().value())))
}
