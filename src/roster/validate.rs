//! # Field Validation
//!
//! Pure predicates over the raw strings a UI collects, one per field. They are
//! advisory: the record store never calls them. Callers (the command layer)
//! run them before any mutation so that no partially valid record is ever
//! constructed or persisted.
//!
//! | Field | Rule |
//! |-------|------|
//! | age   | integer, 5 to 100 inclusive |
//! | email | contains `@` and `.` anywhere |
//! | phone | digits only once `-` and spaces are removed, not empty |
//! | grade | not blank |

use thiserror::Error;

pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 100;

/// The first field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Student ID cannot be empty!")]
    EmptyId,

    #[error("Invalid age! Must be between {MIN_AGE} and {MAX_AGE}.")]
    Age(String),

    #[error("Grade cannot be empty!")]
    Grade,

    #[error("Invalid email format!")]
    Email(String),

    #[error("Invalid phone number!")]
    Phone(String),
}

/// Parses an age, returning it only when it falls inside the allowed range.
pub fn parse_age(value: &str) -> Option<u32> {
    let age: i64 = value.trim().parse().ok()?;
    if (MIN_AGE as i64..=MAX_AGE as i64).contains(&age) {
        Some(age as u32)
    } else {
        None
    }
}

pub fn validate_age(value: &str) -> bool {
    parse_age(value).is_some()
}

/// Presence check only: no position or structure rules.
pub fn validate_email(value: &str) -> bool {
    value.contains('@') && value.contains('.')
}

pub fn validate_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| *c != '-' && *c != ' ').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_grade(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn check_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyId)
    } else {
        Ok(())
    }
}

pub fn check_age(value: &str) -> Result<u32, ValidationError> {
    parse_age(value).ok_or_else(|| ValidationError::Age(value.to_string()))
}

pub fn check_grade(value: &str) -> Result<(), ValidationError> {
    if validate_grade(value) {
        Ok(())
    } else {
        Err(ValidationError::Grade)
    }
}

pub fn check_email(value: &str) -> Result<(), ValidationError> {
    if validate_email(value) {
        Ok(())
    } else {
        Err(ValidationError::Email(value.to_string()))
    }
}

pub fn check_phone(value: &str) -> Result<(), ValidationError> {
    if validate_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::Phone(value.to_string()))
    }
}
