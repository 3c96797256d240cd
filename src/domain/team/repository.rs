//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamDraft, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// List all teams in primary-key order
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Store a new team, assigning its ID
    async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError>;

    /// Overwrite an existing team, returning `None` if it does not exist
    async fn update(&self, team: Team) -> Result<Option<Team>, DomainError>;

    /// Delete a team, returning the removed record if it existed
    async fn delete(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Check if a team exists
    async fn exists(&self, id: TeamId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
