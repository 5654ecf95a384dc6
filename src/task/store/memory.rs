//! In-memory task store (non-persistent).

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{TaskPage, TaskStore};
use crate::db::StoreError;
use crate::task::{NewTask, Task};

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<TaskPage, StoreError> {
        let inner = self.inner.read().await;
        // Ids are handed out in increasing order, so insertion order is id order.
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let items = inner.tasks.iter().skip(offset).take(limit).cloned().collect();
        Ok(TaskPage {
            total: inner.tasks.len() as u64,
            items,
        })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.tasks.len() as u64)
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let task = task.into_task(inner.next_id);
        inner.tasks.push(task.clone());
        Ok(task)
    }
}
