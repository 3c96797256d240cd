//! Team endpoints, including team membership

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::team::{Team, TeamDraft, TeamWithUsers};
use crate::domain::user::UserDraft;

use super::users::{to_responses, UserResponse};
use super::DeletedResponse;

/// Query parameters for team reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncludeUsersQuery {
    #[serde(default)]
    pub include_users: bool,
}

/// Team representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserResponse>>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().value(),
            name: team.name().to_string(),
            users: None,
        }
    }
}

impl From<&TeamWithUsers> for TeamResponse {
    fn from(entry: &TeamWithUsers) -> Self {
        Self {
            users: Some(to_responses(&entry.users)),
            ..Self::from(&entry.team)
        }
    }
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<IncludeUsersQuery>,
) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    debug!(include_users = query.include_users, "Listing teams");

    let teams = if query.include_users {
        let teams = state
            .team_service
            .list_with_users()
            .await
            .map_err(ApiError::from)?;
        teams.iter().map(TeamResponse::from).collect()
    } else {
        let teams = state.team_service.list().await.map_err(ApiError::from)?;
        teams.iter().map(TeamResponse::from).collect()
    };

    Ok(Json(teams))
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(draft): Json<TeamDraft>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(name = %draft.name, "Creating team");

    let team = state
        .team_service
        .create(draft)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(query): Query<IncludeUsersQuery>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, include_users = query.include_users, "Getting team");

    let response = if query.include_users {
        let team = state
            .team_service
            .get_with_users(&team_id)
            .await
            .map_err(ApiError::from)?;
        TeamResponse::from(&team)
    } else {
        let team = state
            .team_service
            .get(&team_id)
            .await
            .map_err(ApiError::from)?;
        TeamResponse::from(&team)
    };

    Ok(Json(response))
}

/// PUT /teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(draft): Json<TeamDraft>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Updating team");

    let team = state
        .team_service
        .update(&team_id, draft)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    debug!(team_id = %team_id, "Deleting team");

    let team = state
        .team_service
        .delete(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DeletedResponse::new(team.id().value())))
}

/// GET /teams/{team_id}/users
pub async fn list_team_users(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!(team_id = %team_id, "Listing team users");

    let users = state
        .user_service
        .list_by_team(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(to_responses(&users)))
}

/// POST /teams/{team_id}/users
pub async fn create_team_users(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(drafts): Json<Vec<UserDraft>>,
) -> Result<(StatusCode, Json<Vec<UserResponse>>), ApiError> {
    debug!(team_id = %team_id, count = drafts.len(), "Creating team users");

    let users = state
        .team_service
        .create_users(&team_id, drafts)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(to_responses(&users))))
}

/// DELETE /teams/{team_id}/users/{user_id}
pub async fn remove_team_user(
    State(state): State<AppState>,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(team_id = %team_id, user_id = %user_id, "Removing user from team");

    let user = state
        .team_service
        .remove_user(&team_id, &user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse::from(&user)))
}
