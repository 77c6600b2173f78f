//! Shared threshold validation helpers.
//!
//! Provides reusable range-checking functions used by multiple domain modules.

use crate::error::CoreError;

/// Validate that a count is in `1..=max`.
///
/// `label` prefixes the error message, e.g. `"Block"` yields
/// `"Block count must be between 1 and 500, got 0"`.
pub fn validate_count_range(count: usize, max: usize, label: &str) -> Result<(), CoreError> {
    if count == 0 || count > max {
        return Err(CoreError::Validation(format!(
            "{label} count must be between 1 and {max}, got {count}"
        )));
    }
    Ok(())
}

/// Validate that a value is finite and at least `min`.
pub fn validate_min_value(value: f64, min: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < min {
        return Err(CoreError::Validation(format!(
            "{name} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a value is finite and not negative.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
