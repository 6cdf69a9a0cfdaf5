//! In-memory task store.
//!
//! Assigns increasing ids starting at 1 and stamps creation/update times.
//! Ids are never reused for the lifetime of the store.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use taskdesk_proto::Task;
use tokio::sync::RwLock;

use crate::validation::NewTask;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

/// Thread-safe task storage behind a [`RwLock`].
#[derive(Debug, Default)]
pub struct TaskStore {
    inner: RwLock<Inner>,
}

/// Formats a timestamp the way the API serializes datetimes.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a validated task and returns the stored record.
    pub async fn insert(&self, new_task: NewTask) -> Task {
        self.insert_at(new_task, Utc::now()).await
    }

    async fn insert_at(&self, new_task: NewTask, now: DateTime<Utc>) -> Task {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let stamp = format_timestamp(now);
        let task = Task {
            id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status.to_string(),
            due_date: format_timestamp(new_task.due_date),
            created_at: stamp.clone(),
            updated_at: stamp,
        };
        inner.tasks.insert(id, task.clone());
        drop(inner);
        task
    }

    /// Looks up a task by id.
    pub async fn get(&self, id: u64) -> Option<Task> {
        self.inner.read().await.tasks.get(&id).cloned()
    }

    /// Number of stored tasks.
    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
