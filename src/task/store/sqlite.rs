//! SQLite-based task store.

use async_trait::async_trait;
use rusqlite::params;

use super::{TaskPage, TaskStore};
use crate::db::{Database, StoreError};
use crate::task::{NewTask, Task};

pub struct SqliteTaskStore {
    db: Database,
}

impl SqliteTaskStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// SQLite integers are signed; clamp rather than wrap.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    fn is_persistent(&self) -> bool {
        true
    }

    async fn list_page(&self, offset: u64, limit: u64) -> Result<TaskPage, StoreError> {
        self.db
            .call(move |conn| {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;

                let mut stmt = conn.prepare(
                    "SELECT id, name, description
                     FROM tasks
                     ORDER BY id ASC
                     LIMIT ?1 OFFSET ?2",
                )?;
                let items = stmt
                    .query_map(params![to_sql_int(limit), to_sql_int(offset)], |row| {
                        Ok(Task {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            description: row.get(2)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(TaskPage {
                    total: total.max(0) as u64,
                    items,
                })
            })
            .await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.db
            .call(|conn| {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
                Ok(total.max(0) as u64)
            })
            .await
    }

    async fn create(&self, task: NewTask) -> Result<Task, StoreError> {
        self.db
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO tasks (name, description) VALUES (?1, ?2)",
                    params![task.name(), task.description()],
                )?;
                Ok(task.into_task(conn.last_insert_rowid()))
            })
            .await
    }
}
