//! Team service for team management

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::team::{validate_team, Team, TeamDraft, TeamId, TeamRepository, TeamWithUsers};
use crate::domain::user::{validate_user, User, UserDraft, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{parse_team_id, parse_user_id};

/// Team service for managing teams and their members
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(teams: Arc<dyn TeamRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { teams, users }
    }

    async fn require(&self, team_id: TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", team_id)))
    }

    /// Create a new team
    pub async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError> {
        info!(name = %draft.name, "Creating team");

        validate_team(&draft).map_err(|e| DomainError::validation(e.to_string()))?;

        let team = self.teams.create(draft).await?;
        info!(id = %team.id(), "Team created");

        Ok(team)
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = parse_team_id(id)?;
        self.require(team_id).await
    }

    /// Get a team by ID together with its users
    pub async fn get_with_users(&self, id: &str) -> Result<TeamWithUsers, DomainError> {
        let team_id = parse_team_id(id)?;
        let team = self.require(team_id).await?;
        let users = self.users.list_by_team(team_id).await?;

        Ok(TeamWithUsers { team, users })
    }

    /// List all teams
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.teams.list().await
    }

    /// List all teams, each with its users
    ///
    /// Users referencing a team that no longer exists are not returned.
    pub async fn list_with_users(&self) -> Result<Vec<TeamWithUsers>, DomainError> {
        let teams = self.teams.list().await?;
        let users = self.users.list().await?;

        let mut by_team: HashMap<TeamId, Vec<User>> = HashMap::new();

        for user in users {
            if let Some(team_id) = user.team_id() {
                by_team.entry(team_id).or_default().push(user);
            }
        }

        let result = teams
            .into_iter()
            .map(|team| {
                let users = by_team.remove(&team.id()).unwrap_or_default();
                TeamWithUsers { team, users }
            })
            .collect();

        Ok(result)
    }

    /// Replace all fields of an existing team
    pub async fn update(&self, id: &str, draft: TeamDraft) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let team_id = parse_team_id(id)?;
        let mut team = self.require(team_id).await?;

        validate_team(&draft).map_err(|e| DomainError::validation(e.to_string()))?;
        team.apply(draft);

        self.teams
            .update(team)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", team_id)))
    }

    /// Delete a team, returning the removed record
    ///
    /// Users of the team are kept and still reference the deleted ID.
    pub async fn delete(&self, id: &str) -> Result<Team, DomainError> {
        info!(id = %id, "Deleting team");

        let team_id = parse_team_id(id)?;

        self.teams
            .delete(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", team_id)))
    }

    /// Remove a user from a team by deleting the user record
    ///
    /// The user is deleted outright, not unlinked.
    pub async fn remove_user(&self, team_id: &str, user_id: &str) -> Result<User, DomainError> {
        let team_id = parse_team_id(team_id)?;
        let user_id = parse_user_id(user_id)?;

        warn!(team_id = %team_id, user_id = %user_id, "Deleting user through team removal");

        self.users
            .delete_from_team(team_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "User {} not found in team {}",
                    user_id, team_id
                ))
            })
    }

    /// Create several users for a team in one atomic batch
    ///
    /// Every payload is assigned to the team, then validated. The first invalid
    /// payload aborts the batch before anything is written.
    pub async fn create_users(
        &self,
        team_id: &str,
        drafts: Vec<UserDraft>,
    ) -> Result<Vec<User>, DomainError> {
        let team_id = parse_team_id(team_id)?;
        info!(team_id = %team_id, count = drafts.len(), "Creating users for team");

        self.require(team_id).await?;

        let drafts: Vec<UserDraft> = drafts
            .into_iter()
            .map(|draft| draft.with_team(team_id))
            .collect();

        for (index, draft) in drafts.iter().enumerate() {
            validate_user(draft).map_err(|e| {
                DomainError::validation(format!("users[{}].{}: {}", index, e.field(), e))
            })?;
        }

        if drafts.is_empty() {
            debug!(team_id = %team_id, "Empty batch, nothing to create");
            return Ok(Vec::new());
        }

        self.users.create_batch(drafts).await
    }
}
