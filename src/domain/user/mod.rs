//! User domain
//!
//! This module provides the user entity, the payload validator and the
//! repository trait implemented by each storage backend.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserDraft, UserId};
pub use repository::UserRepository;
pub use validation::{
    parse_user_id, validate_age, validate_name, validate_phone, validate_user,
    UserValidationError,
};

#[cfg(test)]
pub use repository::MockUserRepository;
