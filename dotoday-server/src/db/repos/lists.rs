//! Task list repository
//!
//! Handles list rows only; tasks are loaded through [`super::TaskRepo`].

use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::ListName;

/// Task list record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TaskList {
    pub id: i64,
    pub name: String,
}

/// Task list repository
pub struct ListRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All lists in creation order.
    pub async fn list(&self) -> Result<Vec<TaskList>, DbError> {
        let lists = sqlx::query_as::<_, TaskList>("SELECT id, name FROM task_lists ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(lists)
    }

    pub async fn get(&self, id: i64) -> Result<Option<TaskList>, DbError> {
        let list = sqlx::query_as::<_, TaskList>("SELECT id, name FROM task_lists WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(list)
    }

    /// Whether any list other than `exclude_id` already uses `name`.
    ///
    /// Comparison is exact and case-sensitive (SQLite BINARY collation).
    pub async fn exists_with_name(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM task_lists
                WHERE name = ?1 AND (?2 IS NULL OR id <> ?2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a new list.
    ///
    /// Returns [`DbError::UniqueViolation`] if the name is already taken.
    pub async fn insert(&self, name: &ListName) -> Result<TaskList, DbError> {
        let list = sqlx::query_as::<_, TaskList>(
            "INSERT INTO task_lists (name) VALUES (?1) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(list)
    }

    /// Rename a list, returning `None` if it does not exist.
    pub async fn rename(&self, id: i64, name: &ListName) -> Result<Option<TaskList>, DbError> {
        let list = sqlx::query_as::<_, TaskList>(
            "UPDATE task_lists SET name = ?1 WHERE id = ?2 RETURNING id, name",
        )
        .bind(name.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }

    /// Delete a list and, through the foreign key, its tasks.
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM task_lists WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn name(s: &str) -> ListName {
        ListName::new(s).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);

        let a = repo.insert(&name("A")).await.unwrap();
        let b = repo.insert(&name("B")).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(repo.list().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_unique_violation() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);

        repo.insert(&name("Shopping")).await.unwrap();
        let err = repo.insert(&name("Shopping")).await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation));
    }

    #[tokio::test]
    async fn exists_with_name_is_case_sensitive() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);
        repo.insert(&name("Work")).await.unwrap();

        assert!(repo.exists_with_name("Work", None).await.unwrap());
        assert!(!repo.exists_with_name("work", None).await.unwrap());
    }

    #[tokio::test]
    async fn exists_with_name_excludes_own_id() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);
        let list = repo.insert(&name("Work")).await.unwrap();

        assert!(!repo.exists_with_name("Work", Some(list.id)).await.unwrap());
        assert!(repo.exists_with_name("Work", Some(list.id + 1)).await.unwrap());
    }

    #[tokio::test]
    async fn rename_missing_returns_none() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);

        assert!(repo.rename(42, &name("X")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() {
        let pool = test_pool().await;
        let repo = ListRepo::new(&pool);
        let list = repo.insert(&name("Temp")).await.unwrap();

        assert!(repo.delete(list.id).await.unwrap());
        assert!(!repo.delete(list.id).await.unwrap());
        assert!(repo.get(list.id).await.unwrap().is_none());
    }
}
