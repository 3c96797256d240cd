//! User validation utilities

use thiserror::Error;

use super::entity::UserDraft;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Invalid user ID: '{0}'")]
    InvalidId(String),

    #[error("User name cannot be empty")]
    EmptyName,

    #[error("User age must be between {min} and {max}, got {value}")]
    AgeOutOfRange { value: i32, min: i32, max: i32 },

    #[error("User phone must be at least {0} characters long")]
    PhoneTooShort(usize),

    #[error("User phone contains invalid character: '{0}'. Only digits are allowed")]
    InvalidPhoneCharacter(char),
}

impl UserValidationError {
    /// Name of the payload field that failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "id",
            Self::EmptyName => "name",
            Self::AgeOutOfRange { .. } => "age",
            Self::PhoneTooShort(_) | Self::InvalidPhoneCharacter(_) => "phone",
        }
    }
}

const MIN_AGE: i32 = 0;
const MAX_AGE: i32 = 150;
const MIN_PHONE_LENGTH: usize = 10;

/// Parse a user ID from its textual form
///
/// IDs are positive decimal integers; anything else is rejected.
pub fn parse_user_id(raw: &str) -> Result<i64, UserValidationError> {
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(UserValidationError::InvalidId(raw.to_string())),
    }
}

/// Validate a user name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    Ok(())
}

/// Validate a user age (0 to 150 inclusive)
pub fn validate_age(age: i32) -> Result<(), UserValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(UserValidationError::AgeOutOfRange {
            value: age,
            min: MIN_AGE,
            max: MAX_AGE,
        });
    }

    Ok(())
}

/// Validate a phone number
///
/// Rules, checked in order:
/// - Cannot be empty and must be at least 10 characters
/// - Only ASCII digits
pub fn validate_phone(phone: &str) -> Result<(), UserValidationError> {
    if phone.is_empty() || phone.len() < MIN_PHONE_LENGTH {
        return Err(UserValidationError::PhoneTooShort(MIN_PHONE_LENGTH));
    }

    if let Some(c) = phone.chars().find(|c| !c.is_ascii_digit()) {
        return Err(UserValidationError::InvalidPhoneCharacter(c));
    }

    Ok(())
}

/// Validate a user payload, stopping at the first failing field
///
/// Order: name, age, phone length, phone digits.
pub fn validate_user(draft: &UserDraft) -> Result<(), UserValidationError> {
    validate_name(&draft.name)?;
    validate_age(draft.age)?;
    validate_phone(&draft.phone)?;

    Ok(())
}
