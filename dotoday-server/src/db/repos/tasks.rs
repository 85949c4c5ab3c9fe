//! Task repository
//!
//! Every single-task lookup is keyed by both list id and task id, so a task
//! can never be read or written through a list that does not own it.

use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::TaskTitle;

/// Task record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub is_completed: bool,
}

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Tasks owned by a list, in creation order.
    pub async fn list_for_list(&self, list_id: i64) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, list_id, title, is_completed
            FROM tasks
            WHERE list_id = ?1
            ORDER BY id
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn get(&self, list_id: i64, task_id: i64) -> Result<Option<Task>, DbError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, list_id, title, is_completed
            FROM tasks
            WHERE id = ?1 AND list_id = ?2
            "#,
        )
        .bind(task_id)
        .bind(list_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(task)
    }

    /// Insert a new, not yet completed task.
    ///
    /// The caller is expected to have checked that the list exists; the
    /// foreign key still rejects orphans.
    pub async fn insert(&self, list_id: i64, title: &TaskTitle) -> Result<Task, DbError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (list_id, title, is_completed)
            VALUES (?1, ?2, FALSE)
            RETURNING id, list_id, title, is_completed
            "#,
        )
        .bind(list_id)
        .bind(title.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(task)
    }

    /// Persist title and completion for an existing task.
    ///
    /// Returns `None` if the task vanished (e.g. its list was deleted)
    /// between read and write.
    pub async fn save(&self, task: &Task) -> Result<Option<Task>, DbError> {
        let saved = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?1, is_completed = ?2
            WHERE id = ?3 AND list_id = ?4
            RETURNING id, list_id, title, is_completed
            "#,
        )
        .bind(&task.title)
        .bind(task.is_completed)
        .bind(task.id)
        .bind(task.list_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(saved)
    }
}
