//! Repository implementations for database access
//!
//! Each repository is a thin borrow of the pool and follows these patterns:
//! - One statement per operation, using `RETURNING` instead of re-selecting
//! - Constraint violations surface as typed errors, never raw driver errors

pub mod lists;
pub mod tasks;

pub use lists::{ListRepo, TaskList};
pub use tasks::{Task, TaskRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// The store rejected a write because of a unique index.
    #[error("unique constraint violated")]
    UniqueViolation,
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        let unique = e
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());

        if unique {
            Self::UniqueViolation
        } else {
            Self::Sqlx(e)
        }
    }
}
