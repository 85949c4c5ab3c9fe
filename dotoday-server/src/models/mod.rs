//! Validated input types
//!
//! User input is validated when these types are constructed, so the
//! service layer only ever sees well-formed names and titles.
//! Invalid input returns ValidationError, not panic.

pub mod list_name;
pub mod task_title;
pub mod validation;

pub use list_name::{ListName, MAX_LIST_NAME_LEN};
pub use task_title::{TaskTitle, MAX_TASK_TITLE_LEN};
pub use validation::ValidationError;
