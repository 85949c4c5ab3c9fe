//! Schema setup for task lists and tasks
//!
//! Every statement is idempotent, so this runs on each startup.

use sqlx::SqlitePool;

/// Create tables and indexes if they do not exist yet.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS task_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 200)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Backs the name uniqueness rule; the service pre-check only makes the
    // common case produce a friendly error.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_task_lists_name ON task_lists (name)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            list_id INTEGER NOT NULL REFERENCES task_lists (id) ON DELETE CASCADE,
            title TEXT NOT NULL CHECK (length(title) BETWEEN 1 AND 500),
            is_completed BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_list_id ON tasks (list_id)")
        .execute(pool)
        .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn run_is_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('task_lists', 'tasks') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<_> = tables.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, vec!["task_lists", "tasks"]);
    }

    #[tokio::test]
    async fn name_index_is_unique() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();

        sqlx::query("INSERT INTO task_lists (name) VALUES ('A')")
            .execute(&pool)
            .await
            .unwrap();
        let err = sqlx::query("INSERT INTO task_lists (name) VALUES ('A')")
            .execute(&pool)
            .await
            .unwrap_err();

        let db_err = err.as_database_error().expect("database error");
        assert!(db_err.is_unique_violation());
    }
}
