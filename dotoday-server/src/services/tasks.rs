//! Task service

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use super::ServiceResult;
use crate::db::{ListRepo, Task, TaskRepo};
use crate::models::TaskTitle;
use crate::notify::{NotificationHub, SyncEvent};

/// Partial update for a task.
///
/// `None` means "leave unchanged". A present `is_completed` is an explicit
/// value, not a toggle: `Some(false)` clears the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<TaskTitle>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title.as_str().to_owned();
        }
        if let Some(done) = self.is_completed {
            task.is_completed = done;
        }
    }
}

#[derive(Clone)]
pub struct TaskService {
    pool: SqlitePool,
    hub: Arc<NotificationHub>,
}

impl TaskService {
    pub fn new(pool: SqlitePool, hub: Arc<NotificationHub>) -> Self {
        Self { pool, hub }
    }

    /// Create a task under an existing list. Returns `None` (and writes
    /// nothing) if the list does not exist.
    pub async fn create(&self, list_id: i64, title: TaskTitle) -> ServiceResult<Option<Task>> {
        if ListRepo::new(&self.pool).get(list_id).await?.is_none() {
            return Ok(None);
        }

        let task = TaskRepo::new(&self.pool).insert(list_id, &title).await?;

        info!(list_id, task_id = task.id, "task created");
        self.hub
            .publish(&SyncEvent::TaskCreated {
                list_id,
                task_id: task.id,
            })
            .await;

        Ok(Some(task))
    }

    /// Fetch a task only if `list_id` owns it.
    pub async fn get_by_id(&self, list_id: i64, task_id: i64) -> ServiceResult<Option<Task>> {
        Ok(TaskRepo::new(&self.pool).get(list_id, task_id).await?)
    }

    /// Apply the fields present in `patch`. Returns `None` if no task
    /// matches both ids.
    pub async fn update(
        &self,
        list_id: i64,
        task_id: i64,
        patch: TaskPatch,
    ) -> ServiceResult<Option<Task>> {
        let repo = TaskRepo::new(&self.pool);

        let Some(mut task) = repo.get(list_id, task_id).await? else {
            return Ok(None);
        };
        patch.apply(&mut task);

        let Some(saved) = repo.save(&task).await? else {
            return Ok(None);
        };

        info!(list_id, task_id, completed = saved.is_completed, "task updated");
        self.hub
            .publish(&SyncEvent::TaskUpdated { list_id, task_id })
            .await;

        Ok(Some(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::ListName;

    struct Fixture {
        svc: TaskService,
        hub: Arc<NotificationHub>,
        pool: SqlitePool,
        list_id: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let hub = Arc::new(NotificationHub::new());
        let list_id = ListRepo::new(&pool)
            .insert(&ListName::new("Shopping").unwrap())
            .await
            .unwrap()
            .id;
        Fixture {
            svc: TaskService::new(pool.clone(), Arc::clone(&hub)),
            hub,
            pool,
            list_id,
        }
    }

    fn title(s: &str) -> TaskTitle {
        TaskTitle::new(s).unwrap()
    }

    async fn task_count(pool: &SqlitePool) -> i64 {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    #[tokio::test]
    async fn create_under_existing_list() {
        let f = fixture().await;

        let task = f.svc.create(f.list_id, title("Buy milk")).await.unwrap().unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.list_id, f.list_id);
        assert!(!task.is_completed);
    }

    #[tokio::test]
    async fn create_under_missing_list_writes_nothing() {
        let f = fixture().await;

        let result = f.svc.create(999, title("Orphan")).await.unwrap();

        assert!(result.is_none());
        assert_eq!(task_count(&f.pool).await, 0);
    }

    #[tokio::test]
    async fn get_by_id_rejects_other_list() {
        let f = fixture().await;
        let other = ListRepo::new(&f.pool)
            .insert(&ListName::new("Other").unwrap())
            .await
            .unwrap();
        let task = f.svc.create(f.list_id, title("Mine")).await.unwrap().unwrap();

        assert!(f.svc.get_by_id(f.list_id, task.id).await.unwrap().is_some());
        assert!(f.svc.get_by_id(other.id, task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn completion_patch_keeps_title_and_sets_back() {
        let f = fixture().await;
        let task = f.svc.create(f.list_id, title("Buy milk")).await.unwrap().unwrap();

        let done = TaskPatch {
            is_completed: Some(true),
            ..Default::default()
        };
        let updated = f.svc.update(f.list_id, task.id, done).await.unwrap().unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.title, "Buy milk");

        let undone = TaskPatch {
            is_completed: Some(false),
            ..Default::default()
        };
        let updated = f.svc.update(f.list_id, task.id, undone).await.unwrap().unwrap();
        assert!(!updated.is_completed);
        assert_eq!(updated.title, "Buy milk");
    }

    #[tokio::test]
    async fn title_patch_keeps_completion() {
        let f = fixture().await;
        let task = f.svc.create(f.list_id, title("Draft")).await.unwrap().unwrap();
        f.svc
            .update(
                f.list_id,
                task.id,
                TaskPatch {
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let renamed = f
            .svc
            .update(
                f.list_id,
                task.id,
                TaskPatch {
                    title: Some(title("Final")),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(renamed.title, "Final");
        assert!(renamed.is_completed);
    }

    #[tokio::test]
    async fn empty_patch_is_noop() {
        let f = fixture().await;
        let task = f.svc.create(f.list_id, title("Same")).await.unwrap().unwrap();

        let updated = f
            .svc
            .update(f.list_id, task.id, TaskPatch::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated, task);
    }

    #[tokio::test]
    async fn update_through_wrong_list_is_none() {
        let f = fixture().await;
        let task = f.svc.create(f.list_id, title("Mine")).await.unwrap().unwrap();

        let result = f
            .svc
            .update(
                f.list_id + 1,
                task.id,
                TaskPatch {
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        let stored = f.svc.get_by_id(f.list_id, task.id).await.unwrap().unwrap();
        assert!(!stored.is_completed);
    }

    #[tokio::test]
    async fn task_events_go_to_list_group_only() {
        let f = fixture().await;
        let (member, mut member_rx) = f.hub.register().await;
        let (_outsider, mut outsider_rx) = f.hub.register().await;
        f.hub.join(member.id, f.list_id).await;

        let task = f.svc.create(f.list_id, title("Ping")).await.unwrap().unwrap();
        f.svc
            .update(f.list_id, task.id, TaskPatch::default())
            .await
            .unwrap();

        let created: serde_json::Value =
            serde_json::from_str(&member_rx.try_recv().unwrap()).unwrap();
        assert_eq!(created["type"], "TaskCreated");
        assert_eq!(created["listId"], f.list_id);
        assert_eq!(created["taskId"], task.id);

        let updated: serde_json::Value =
            serde_json::from_str(&member_rx.try_recv().unwrap()).unwrap();
        assert_eq!(updated["type"], "TaskUpdated");

        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn missing_list_publishes_nothing() {
        let f = fixture().await;
        let (sub, mut rx) = f.hub.register().await;
        f.hub.join(sub.id, 999).await;

        f.svc.create(999, title("Nope")).await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}
