//! Business rules on top of the repositories
//!
//! Services own the name-uniqueness rule and list-existence checks, and
//! publish a sync event once a mutation has been committed.

pub mod lists;
pub mod tasks;

pub use lists::{ListService, ListWithTasks};
pub use tasks::{TaskPatch, TaskService};

use crate::db::DbError;

/// Service-level failure
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("A list with name '{name}' already exists.")]
    DuplicateName { name: String },

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
