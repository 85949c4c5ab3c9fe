//! List name validation

use super::validation::{bounded_text, ValidationError};

/// Maximum length for list names
pub const MAX_LIST_NAME_LEN: usize = 200;

/// Validated task list name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListName(String);

impl ListName {
    /// Create a new list name.
    ///
    /// # Rules
    /// - Non-empty after trimming whitespace
    /// - Max 200 characters after trimming
    /// - No control characters
    ///
    /// Uniqueness is not checked here; that is the list service's job.
    ///
    /// # Example
    /// ```
    /// use dotoday_server::models::ListName;
    ///
    /// assert!(ListName::new("Shopping").is_ok());
    /// assert!(ListName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "name", MAX_LIST_NAME_LEN).map(Self)
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
