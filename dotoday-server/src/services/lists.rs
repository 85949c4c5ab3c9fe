//! Task list service

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::db::{DbError, ListRepo, Task, TaskList, TaskRepo};
use crate::models::ListName;
use crate::notify::{NotificationHub, SyncEvent};

/// A list together with its tasks in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWithTasks {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<Task>,
}

impl ListWithTasks {
    fn new(list: TaskList, tasks: Vec<Task>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            tasks,
        }
    }
}

#[derive(Clone)]
pub struct ListService {
    pool: SqlitePool,
    hub: Arc<NotificationHub>,
}

impl ListService {
    pub fn new(pool: SqlitePool, hub: Arc<NotificationHub>) -> Self {
        Self { pool, hub }
    }

    /// All lists as summaries (no tasks).
    pub async fn list_all(&self) -> ServiceResult<Vec<TaskList>> {
        Ok(ListRepo::new(&self.pool).list().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<ListWithTasks>> {
        let Some(list) = ListRepo::new(&self.pool).get(id).await? else {
            return Ok(None);
        };
        let tasks = TaskRepo::new(&self.pool).list_for_list(id).await?;

        Ok(Some(ListWithTasks::new(list, tasks)))
    }

    /// Create a list with a name no other list uses.
    pub async fn create(&self, name: ListName) -> ServiceResult<ListWithTasks> {
        let repo = ListRepo::new(&self.pool);

        if repo.exists_with_name(name.as_str(), None).await? {
            return Err(duplicate(&name));
        }

        let list = repo
            .insert(&name)
            .await
            .map_err(|e| translate_write_error(e, &name))?;

        info!(list_id = list.id, name = %list.name, "list created");
        self.hub
            .publish(&SyncEvent::ListCreated { list_id: list.id })
            .await;

        Ok(ListWithTasks::new(list, Vec::new()))
    }

    /// Rename a list. Renaming a list to its current name succeeds.
    pub async fn update(&self, id: i64, name: ListName) -> ServiceResult<ListWithTasks> {
        let repo = ListRepo::new(&self.pool);

        if repo.get(id).await?.is_none() {
            return Err(not_found(id));
        }

        if repo.exists_with_name(name.as_str(), Some(id)).await? {
            return Err(duplicate(&name));
        }

        let list = repo
            .rename(id, &name)
            .await
            .map_err(|e| translate_write_error(e, &name))?
            .ok_or_else(|| not_found(id))?;
        let tasks = TaskRepo::new(&self.pool).list_for_list(id).await?;

        info!(list_id = id, name = %list.name, "list renamed");
        self.hub
            .publish(&SyncEvent::ListUpdated { list_id: id })
            .await;

        Ok(ListWithTasks::new(list, tasks))
    }

    /// Delete a list and its tasks. Returns `false` if it did not exist.
    pub async fn delete(&self, id: i64) -> ServiceResult<bool> {
        let deleted = ListRepo::new(&self.pool).delete(id).await?;
        if !deleted {
            return Ok(false);
        }

        info!(list_id = id, "list deleted");
        self.hub
            .publish(&SyncEvent::ListDeleted { list_id: id })
            .await;

        Ok(true)
    }
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound { resource: "list", id }
}

fn duplicate(name: &ListName) -> ServiceError {
    ServiceError::DuplicateName {
        name: name.as_str().to_owned(),
    }
}

/// A unique violation here means another request took the name between our
/// pre-check and the write.
fn translate_write_error(err: DbError, name: &ListName) -> ServiceError {
    match err {
        DbError::UniqueViolation => duplicate(name),
        other => ServiceError::Database(other),
    }
}
