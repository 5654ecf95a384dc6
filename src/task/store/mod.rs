//! Task storage with pluggable backends.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, for testing)
//! - `sqlite`: SQLite database shared with the user table

mod memory;
mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use async_trait::async_trait;
use std::sync::Arc;

use super::{NewTask, Task};
use crate::config::Config;
use crate::db::{Database, StoreError};

/// A window of tasks together with the size of the full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    pub total: u64,
    pub items: Vec<Task>,
}

/// Task store trait - implemented by all storage backends.
///
/// Listing order is ascending `id` in every backend.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// Count all tasks and fetch up to `limit` of them starting at `offset`.
    async fn list_page(&self, offset: u64, limit: u64) -> Result<TaskPage, StoreError>;

    /// Total number of stored tasks.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Insert a task and return it with its assigned id.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;
}

/// Task store type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStoreType {
    Memory,
    #[default]
    Sqlite,
}

impl TaskStoreType {
    /// Parse from environment variable value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "sqlite" | "db" => Some(Self::Sqlite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Create a task store based on configuration.
pub async fn create_task_store(config: &Config) -> Result<Arc<dyn TaskStore>, StoreError> {
    match config.store_type {
        TaskStoreType::Memory => Ok(Arc::new(InMemoryTaskStore::new())),
        TaskStoreType::Sqlite => {
            let db = Database::open(config.database_path.clone()).await?;
            Ok(Arc::new(SqliteTaskStore::new(db)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MEMORY_PATH;

    fn new_task(name: &str) -> NewTask {
        NewTask::validate(Some(name), Some("description")).unwrap()
    }

    fn backends() -> Vec<Box<dyn TaskStore>> {
        vec![
            Box::new(InMemoryTaskStore::new()),
            Box::new(SqliteTaskStore::new(Database::open_in_memory().unwrap())),
        ]
    }

    #[test]
    fn test_store_type_parse() {
        assert_eq!(TaskStoreType::parse("memory"), Some(TaskStoreType::Memory));
        assert_eq!(TaskStoreType::parse(" SQLite "), Some(TaskStoreType::Sqlite));
        assert_eq!(TaskStoreType::parse("json"), None);
        for kind in [TaskStoreType::Memory, TaskStoreType::Sqlite] {
            assert_eq!(TaskStoreType::parse(kind.as_str()), Some(kind));
        }
    }

    #[tokio::test]
    async fn test_backends_list_in_insertion_order() {
        for store in backends() {
            for i in 1..=5 {
                store.create(new_task(&format!("task {}", i))).await.unwrap();
            }

            let page = store.list_page(1, 3).await.unwrap();
            assert_eq!(page.total, 5);
            let names: Vec<_> = page.items.iter().map(|t| t.name.as_str()).collect();
            assert_eq!(names, ["task 2", "task 3", "task 4"]);
            assert!(page.items.windows(2).all(|w| w[0].id < w[1].id));
        }
    }

    #[tokio::test]
    async fn test_backends_offset_past_end_is_empty() {
        for store in backends() {
            store.create(new_task("only")).await.unwrap();
            let page = store.list_page(10, 20).await.unwrap();
            assert_eq!(page.total, 1);
            assert!(page.items.is_empty());
        }
    }

    #[tokio::test]
    async fn test_backends_create_increments_count() {
        for store in backends() {
            assert_eq!(store.count().await.unwrap(), 0);
            let created = store.create(new_task("A")).await.unwrap();
            assert_eq!(created.name, "A");
            assert_eq!(store.count().await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn test_create_task_store_memory() {
        let mut config = Config::new(std::path::PathBuf::from("unused.db"));
        config.store_type = TaskStoreType::Memory;
        let store = create_task_store(&config).await.unwrap();
        assert!(!store.is_persistent());
    }

    #[tokio::test]
    async fn test_create_task_store_sqlite_in_memory() {
        let config = Config::new(std::path::PathBuf::from(MEMORY_PATH));
        let store = create_task_store(&config).await.unwrap();
        assert!(store.is_persistent());
        store.create(new_task("A")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(!std::path::Path::new(MEMORY_PATH).exists());
    }
}
