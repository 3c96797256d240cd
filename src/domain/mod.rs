//! Domain layer - Core business logic and entities

pub mod error;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use team::{Team, TeamDraft, TeamId, TeamRepository, TeamValidationError, TeamWithUsers};
pub use user::{User, UserDraft, UserId, UserRepository, UserValidationError};
