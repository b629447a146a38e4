//! Input validation for city mutations
//!
//! Checks and normalizes user-supplied fields before any repository call.
//! A rejected payload stops the operation with no side effects.

use crate::error::AppError;
use crate::models::CityPayload;

/// Maximum city name length in characters
pub const MAX_NAME_LENGTH: usize = 120;

/// Validate and sanitize the fields of a city create request
///
/// # Returns
/// * `Ok(CityPayload)` - Trimmed name and normalized state code
/// * `Err(AppError)` - Validation error describing the rejected field
pub fn validate_insert_city(name: &str, state_id: &str) -> Result<CityPayload, AppError> {
    sanitize(name, state_id)
}

/// Validate and sanitize the fields of a city update request
///
/// Updates are full field replacements, so the rules match
/// [`validate_insert_city`].
pub fn validate_update_city(name: &str, state_id: &str) -> Result<CityPayload, AppError> {
    sanitize(name, state_id)
}

fn sanitize(name: &str, state_id: &str) -> Result<CityPayload, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "City name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "City name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    let state_id = state_id.trim();
    if state_id.is_empty() {
        return Err(AppError::Validation(
            "State reference cannot be empty".to_string(),
        ));
    }

    Ok(CityPayload {
        name: name.to_string(),
        // State codes are stored uppercase
        state_id: state_id.to_uppercase(),
    })
}
