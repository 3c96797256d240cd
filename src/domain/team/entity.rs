//! Team entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{parse_team_id, TeamValidationError};
use crate::domain::user::User;

/// Team identifier - positive integer assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TeamId(i64);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(value: i64) -> Result<Self, TeamValidationError> {
        if value <= 0 {
            return Err(TeamValidationError::InvalidId(value.to_string()));
        }

        Ok(Self(value))
    }

    /// Parse a TeamId from a path segment or other textual input
    pub fn parse(raw: &str) -> Result<Self, TeamValidationError> {
        parse_team_id(raw).map(Self)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for i64 {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team fields as supplied by a client on create or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDraft {
    #[serde(default)]
    pub name: String,
}

impl TeamDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier, immutable once assigned
    id: TeamId,
    /// Display name
    name: String,
}

impl Team {
    /// Build a stored team from its assigned ID and the client fields
    pub fn new(id: TeamId, draft: TeamDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace all mutable fields with the given draft
    pub fn apply(&mut self, draft: TeamDraft) {
        self.name = draft.name;
    }
}

/// A team together with the users that reference it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWithUsers {
    pub team: Team,
    pub users: Vec<User>,
}
