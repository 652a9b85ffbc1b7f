//! Input validation utilities

use crate::error::ApiError;
use uuid::Uuid;

/// Parse an entity id from a path or query parameter
pub fn parse_id(value: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::Validation(format!("Invalid {}", what)))
}

/// Require a non-empty text field, trimming surrounding whitespace
pub fn require_text(value: Option<&str>, what: &str) -> Result<String, ApiError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ApiError::Validation(format!("{} is required", what))),
    }
}

/// Clamp a 1-based page number
pub fn clamp_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

/// Clamp a page size to 1..=100, defaulting to 10
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(10).clamp(1, 100)
}
