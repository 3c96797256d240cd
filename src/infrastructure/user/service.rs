//! User service for user management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{TeamId, TeamRepository};
use crate::domain::user::{validate_user, User, UserDraft, UserId, UserRepository};
use crate::domain::DomainError;

/// Parse a user ID path segment into a `UserId`
pub(crate) fn parse_user_id(id: &str) -> Result<UserId, DomainError> {
    UserId::parse(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

/// Parse a team ID path segment into a `TeamId`
pub(crate) fn parse_team_id(id: &str) -> Result<TeamId, DomainError> {
    TeamId::parse(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

/// Reject a team reference that does not name an existing team
pub(crate) async fn ensure_team_reference(
    teams: &dyn TeamRepository,
    team_id: Option<TeamId>,
) -> Result<(), DomainError> {
    if let Some(team_id) = team_id {
        if !teams.exists(team_id).await? {
            return Err(DomainError::validation(format!(
                "Team {} does not exist",
                team_id
            )));
        }
    }

    Ok(())
}

/// User service: validates payloads and drives the user repository
///
/// Every mutation validates before touching storage.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl UserService {
    /// Create a new user service
    pub fn new(users: Arc<dyn UserRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { users, teams }
    }

    /// Create a new user
    pub async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        info!(name = %draft.name, "Creating user");

        validate_user(&draft).map_err(|e| DomainError::validation(e.to_string()))?;
        ensure_team_reference(self.teams.as_ref(), draft.team_id).await?;

        let user = self.users.create(draft).await?;
        info!(id = %user.id(), "User created");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let user_id = parse_user_id(id)?;

        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", user_id)))
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    /// List the users referencing a team
    ///
    /// The team itself is not required to exist; a stale reference still
    /// matches.
    pub async fn list_by_team(&self, team_id: &str) -> Result<Vec<User>, DomainError> {
        let team_id = parse_team_id(team_id)?;
        debug!(team_id = %team_id, "Listing team users");

        self.users.list_by_team(team_id).await
    }

    /// Replace all fields of an existing user
    pub async fn update(&self, id: &str, draft: UserDraft) -> Result<User, DomainError> {
        info!(id = %id, "Updating user");

        let user_id = parse_user_id(id)?;

        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", user_id)))?;

        validate_user(&draft).map_err(|e| DomainError::validation(e.to_string()))?;
        ensure_team_reference(self.teams.as_ref(), draft.team_id).await?;

        user.apply(draft);

        self.users
            .update(user)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", user_id)))
    }

    /// Delete a user, returning the removed record
    pub async fn delete(&self, id: &str) -> Result<User, DomainError> {
        info!(id = %id, "Deleting user");

        let user_id = parse_user_id(id)?;

        self.users
            .delete(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User {} not found", user_id)))
    }

    /// Check the backing store responds
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.users.list().await.map(|_| ())
    }
}
