//! User and team endpoints

pub mod teams;
pub mod users;

use axum::{
    routing::{delete, get},
    Router,
};
use serde::Serialize;

use super::state::AppState;

/// Body returned by the delete endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
    pub id: i64,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self { deleted: true, id }
    }
}

/// Create the user and team router
pub fn create_roster_router() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Team membership
        .route(
            "/teams/{team_id}/users",
            get(teams::list_team_users).post(teams::create_team_users),
        )
        .route(
            "/teams/{team_id}/users/{user_id}",
            delete(teams::remove_team_user),
        )
}
