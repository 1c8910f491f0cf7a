//! Input validation helpers
//!
//! Text length limits mirror the column sizes of the catalog schema.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Item names
pub const MAX_NAME_LEN: usize = 100;

/// Category labels
pub const MAX_CATEGORY_LEN: usize = 50;

/// Serving size ("Serves 10-12", "6 pieces")
pub const MAX_SERVING_SIZE_LEN: usize = 50;

/// Stored image references
pub const MAX_IMAGE_REF_LEN: usize = 200;

/// Admin usernames
pub const MAX_USERNAME_LEN: usize = 20;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Contact form subject line
pub const MAX_SUBJECT_LEN: usize = 200;

/// Contact form body and item descriptions
pub const MAX_MESSAGE_LEN: usize = 5000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::validation(format!("{field} must not be empty")).with_detail("field", field)
        );
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Cut `value` to at most `max_len` characters after trimming.
pub fn clip_text(value: &str, max_len: usize) -> String {
    value.trim().chars().take(max_len).collect()
}
