use std::borrow::Cow;

use validator::ValidationError;

use crate::errors::AppError;

// ───── Form input parsing ───────────────────────────────────────────

/// Splits a comma-separated input, trimming each element and dropping empties.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank input clears an optional field; anything else is kept as typed.
pub fn optional_text(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// For single-token fields such as URLs, where surrounding whitespace is noise.
pub fn optional_trimmed(value: &str) -> Option<String> {
    optional_text(value.trim())
}

pub fn parse_bool(field: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        _ => Err(AppError::field(field, "Must be true or false")),
    }
}

pub fn parse_i32(field: &str, value: &str) -> Result<i32, AppError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::field(field, "Must be a whole number"))
}

pub fn parse_optional_i32(field: &str, value: &str) -> Result<Option<i32>, AppError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_i32(field, value).map(Some)
}

pub fn unknown_field(field: &str) -> AppError {
    AppError::field(field, "Unknown field")
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("required", "This field is required"));
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
