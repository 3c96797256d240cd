//! User entity and related types

use serde::{Deserialize, Deserializer, Serialize};

use super::validation::{parse_user_id, UserValidationError};
use crate::domain::team::TeamId;

/// User identifier - positive integer assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::InvalidId(value.to_string()));
        }

        Ok(Self(value))
    }

    /// Parse a UserId from a path segment or other textual input
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        parse_user_id(raw).map(Self)
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `team_id` of `0`, `null` or absent all mean "no team"
fn deserialize_team_ref<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(value) => TeamId::new(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// User fields as supplied by a client on create or update
///
/// Missing fields decode to their zero value and are then caught by
/// validation, so a client gets a field-level message instead of a decode
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "deserialize_team_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub team_id: Option<TeamId>,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, age: i32, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            phone: phone.into(),
            team_id: None,
        }
    }

    /// Assign the draft to a team (builder pattern)
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, immutable once assigned
    id: UserId,
    name: String,
    age: i32,
    phone: String,
    /// Team this user belongs to, if any. May be stale after a team is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
}

impl User {
    /// Build a stored user from its assigned ID and the client fields
    pub fn new(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            phone: draft.phone,
            team_id: draft.team_id,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    // Mutators

    /// Replace all mutable fields with the given draft (full-record update)
    pub fn apply(&mut self, draft: UserDraft) {
        self.name = draft.name;
        self.age = draft.age;
        self.phone = draft.phone;
        self.team_id = draft.team_id;
    }

    /// Check if the user belongs to the given team
    pub fn belongs_to(&self, team_id: TeamId) -> bool {
        self.team_id == Some(team_id)
    }
}
