//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or whitespace only) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length, counted in characters
    TooLong { field: &'static str, max: usize },

    /// Field contains a control character (NUL, newline, escape, ...)
    ControlCharacter { field: &'static str },

    /// Request body could not be decoded into the expected shape
    MalformedBody(String),

    /// Path parameter could not be parsed (e.g. non-numeric id)
    InvalidPath(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::ControlCharacter { field } => {
                write!(f, "{} cannot contain control characters", field)
            }
            Self::MalformedBody(reason) => write!(f, "invalid request body: {}", reason),
            Self::InvalidPath(reason) => write!(f, "invalid path: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `raw` and check it against the `1..=max` character bounds.
///
/// Control characters are rejected outright; SQLite's `length()` stops at
/// the first NUL, which would fail the schema's length check.
pub(crate) fn bounded_text(
    raw: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 500,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 500 characters"
        );
    }

    #[test]
    fn bounded_text_counts_chars_not_bytes() {
        // 3 chars, 9 bytes
        assert!(bounded_text("日本語", "name", 3).is_ok());
        assert!(bounded_text("日本語!", "name", 3).is_err());
    }

    #[test]
    fn bounded_text_rejects_embedded_control_chars() {
        assert_eq!(
            bounded_text("a\u{0}b", "name", 10),
            Err(ValidationError::ControlCharacter { field: "name" })
        );
        assert!(bounded_text("line\nbreak", "name", 20).is_err());
    }
}
