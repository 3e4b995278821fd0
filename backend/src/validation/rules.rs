//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates the display name a student registers a session with.
///
/// Requirements:
/// - At least 3 characters after trimming
/// - At most 120 characters
///
/// Accented letters and inner spaces are fine ("Ana Gómez").
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < 3 {
        return Err(ValidationError::new("display_name_too_short"));
    }

    if trimmed.chars().count() > 120 {
        return Err(ValidationError::new("display_name_too_long"));
    }

    Ok(())
}
