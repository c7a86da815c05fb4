//! Error types for console input
//!
//! I/O and configuration failures travel as `anyhow::Error`. The variants
//! here are the ones the console reports back to the user before returning
//! to the menu, plus the interruption signal that ends the loop.

use thiserror::Error;

/// Failures caused by what the user typed
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Search name cannot be empty.")]
    EmptyQuery,

    #[error("Name cannot contain a comma.")]
    CommaInName,

    #[error("Age must be a valid number.")]
    InvalidAge,

    #[error("Grade must be a valid number (e.g., 8.5).")]
    InvalidGrade,

    #[error("Invalid sort key '{0}'. Use name, age or grade.")]
    InvalidSortKey(String),

    /// Ctrl+C or end of input at a prompt
    #[error("input interrupted")]
    Interrupted,
}

/// Validate a name for a new or updated record
pub fn validate_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    if name.contains(',') {
        return Err(InputError::CommaInName);
    }
    Ok(name.to_string())
}

/// Ages are typed as plain digits; signs and spaces are rejected
pub fn parse_age(input: &str) -> Result<u32, InputError> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::InvalidAge);
    }
    input.parse().map_err(|_| InputError::InvalidAge)
}

pub fn parse_grade(input: &str) -> Result<f64, InputError> {
    input.trim().parse().map_err(|_| InputError::InvalidGrade)
}
