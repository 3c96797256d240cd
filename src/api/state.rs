//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::storage::Repositories;
use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::UserService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub team_service: Arc<TeamService>,
}

impl AppState {
    pub fn new(user_service: UserService, team_service: TeamService) -> Self {
        Self {
            user_service: Arc::new(user_service),
            team_service: Arc::new(team_service),
        }
    }

    /// Wire both services onto the same repositories
    pub fn from_repositories(repos: Repositories) -> Self {
        Self::new(
            UserService::new(repos.users.clone(), repos.teams.clone()),
            TeamService::new(repos.teams, repos.users),
        )
    }
}
