//! Team domain module
//!
//! Teams group users through the users' `team_id` reference. Removing a team
//! leaves its users in place.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamDraft, TeamId, TeamWithUsers};
pub use repository::TeamRepository;
pub use validation::{parse_team_id, validate_team, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
