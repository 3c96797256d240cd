//! Team validation

use thiserror::Error;

use super::entity::TeamDraft;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Invalid team ID: '{0}'")]
    InvalidId(String),

    #[error("Team name is required")]
    EmptyName,

    #[error("Team name must be at least {0} characters long")]
    NameTooShort(usize),
}

impl TeamValidationError {
    /// Name of the payload field that failed, if any
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "id",
            Self::EmptyName | Self::NameTooShort(_) => "name",
        }
    }
}

const MIN_TEAM_NAME_LENGTH: usize = 3;

/// Parse a team ID from its textual form
///
/// IDs are positive decimal integers; anything else is rejected.
pub fn parse_team_id(raw: &str) -> Result<i64, TeamValidationError> {
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(TeamValidationError::InvalidId(raw.to_string())),
    }
}

/// Validate a team name
///
/// Rules, checked in order:
/// - Cannot be empty
/// - Minimum 3 characters
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() < MIN_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooShort(MIN_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team payload for create or update
pub fn validate_team(draft: &TeamDraft) -> Result<(), TeamValidationError> {
    validate_team_name(&draft.name)
}
