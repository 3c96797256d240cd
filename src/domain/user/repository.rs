//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserDraft, UserId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users in primary-key order
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// List the users whose team reference equals `team_id`
    async fn list_by_team(&self, team_id: TeamId) -> Result<Vec<User>, DomainError>;

    /// Store a new user, assigning its ID
    async fn create(&self, draft: UserDraft) -> Result<User, DomainError>;

    /// Store several users atomically: either all are persisted or none
    async fn create_batch(&self, drafts: Vec<UserDraft>) -> Result<Vec<User>, DomainError>;

    /// Overwrite an existing user, returning `None` if it does not exist
    async fn update(&self, user: User) -> Result<Option<User>, DomainError>;

    /// Delete a user, returning the removed record if it existed
    async fn delete(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Delete a user only if it belongs to `team_id`
    async fn delete_from_team(
        &self,
        team_id: TeamId,
        id: UserId,
    ) -> Result<Option<User>, DomainError>;
}
