//! Validation utilities for request inputs
//!
//! Provides regex patterns and length checks used by the HTTP layer before any
//! recommendation work starts.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Email regex pattern (basic validation)
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Length of the identifier strings accepted as query filters (UUID text form)
pub const FILTER_ID_LENGTH: usize = 36;

/// Validate email address format
///
/// # Examples
///
/// ```
/// use carematch_core::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let at_signs = email.matches('@').count();
    if at_signs != 1 {
        return Err(CoreError::validation_field(
            "The email address is not valid. It must have exactly one @-sign.",
            "email",
        ));
    }

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::validation_field(
            "Invalid email address format",
            "email",
        ))
    }
}

/// Validate string length (in characters)
pub fn validate_string_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min {
        return Err(CoreError::validation_field(
            format!("{} must be at least {} characters", field, min),
            field,
        ));
    }
    if len > max {
        return Err(CoreError::validation_field(
            format!("{} must be at most {} characters", field, max),
            field,
        ));
    }
    Ok(())
}

/// Validate a fixed-length identifier filter such as `city` or `speciality`
pub fn validate_filter_id(value: &str, field: &str) -> Result<(), CoreError> {
    validate_string_length(value, field, FILTER_ID_LENGTH, FILTER_ID_LENGTH)
}
