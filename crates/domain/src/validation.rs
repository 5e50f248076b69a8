// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules.
//!
//! These checks run before any store access; a request that fails here
//! never reaches the persistence layer.

use crate::error::DomainError;

const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 50;

/// Validates a tender or bid name.
///
/// # Errors
///
/// Returns an error if the name is empty or outside 3..=50 characters.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let len = name.chars().count();
    if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "length must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validates a tender or bid description.
///
/// # Errors
///
/// Returns an error if the description is empty.
pub fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.trim().is_empty() {
        return Err(DomainError::InvalidDescription(
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates the mutable fields of a tender.
///
/// # Errors
///
/// Returns an error if the name or description violates the field rules.
pub fn validate_tender_fields(name: &str, description: &str) -> Result<(), DomainError> {
    validate_name(name)?;
    validate_description(description)
}

/// Validates the mutable fields of a bid.
///
/// # Errors
///
/// Returns an error if the name or description violates the field rules.
pub fn validate_bid_fields(name: &str, description: &str) -> Result<(), DomainError> {
    validate_name(name)?;
    validate_description(description)
}

/// Validates a caller-supplied username.
///
/// # Errors
///
/// Returns an error if the username is empty.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidUsername("must not be empty".to_string()));
    }
    Ok(())
}

/// Validates review feedback text.
///
/// # Errors
///
/// Returns an error if the text is empty.
pub fn validate_feedback(feedback: &str) -> Result<(), DomainError> {
    if feedback.trim().is_empty() {
        return Err(DomainError::InvalidFeedback("must not be empty".to_string()));
    }
    Ok(())
}
