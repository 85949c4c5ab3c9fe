//! Task title validation

use super::validation::{bounded_text, ValidationError};

/// Maximum length for task titles
pub const MAX_TASK_TITLE_LEN: usize = 500;

/// Validated task title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a new task title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 500 characters
    ///
    /// # Example
    /// ```
    /// use dotoday_server::models::TaskTitle;
    ///
    /// assert!(TaskTitle::new("Buy milk").is_ok());
    /// assert!(TaskTitle::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "title", MAX_TASK_TITLE_LEN).map(Self)
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
