//! SQLite-backed TaskRepository implementation.
//!
//! One table, created on open if absent. Every trait operation is a single
//! statement; per-operation atomicity comes from the storage engine, no
//! cross-operation transactions are used.

use async_trait::async_trait;
use nudge_core::error::{NudgeError, Result};
use nudge_core::task::{StoreStats, Task, TaskEntry, TaskRepository};
use rusqlite::{Connection, params};
use std::path::Path;
use tokio::sync::Mutex;

const SCHEMA_VERSION: i64 = 1;

/// SQLite task repository.
///
/// The connection sits behind an async mutex: callers from different owners
/// may invoke operations concurrently, and each statement runs alone on the
/// connection.
pub struct SqliteTaskRepository {
    conn: Mutex<Connection>,
}

impl SqliteTaskRepository {
    /// Opens (or creates) the database file and applies the schema.
    ///
    /// Parent directories are created when missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| NudgeError::data_access(format!("Failed to open task store: {e}")))?;
        Self::migrate(&conn)?;
        tracing::info!("task store opened at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory store (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| NudgeError::data_access(format!("Failed to open task store: {e}")))?;
        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let current: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(map_sqlite_err)?;

        if current < SCHEMA_VERSION {
            conn.execute_batch(include_str!("../migrations/0001_tasks.sql"))
                .map_err(map_sqlite_err)?;
            conn.execute("PRAGMA user_version = 1", [])
                .map_err(map_sqlite_err)?;
        }

        Ok(())
    }
}

fn map_sqlite_err(err: rusqlite::Error) -> NudgeError {
    NudgeError::data_access(err.to_string())
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn append(&self, owner: i64, description: &str, time_phrase: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tasks (owner_id, description, time_phrase) VALUES (?1, ?2, ?3)",
            params![owner, description.trim(), time_phrase.trim()],
        )
        .map_err(map_sqlite_err)?;
        Ok(())
    }

    async fn list(&self, owner: i64) -> Result<Vec<TaskEntry>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT description, time_phrase FROM tasks
                 WHERE owner_id = ?1 ORDER BY created_at ASC, id ASC",
            )
            .map_err(map_sqlite_err)?;

        let rows = stmt
            .query_map(params![owner], |row| {
                Ok(TaskEntry {
                    description: row.get(0)?,
                    time_phrase: row.get(1)?,
                })
            })
            .map_err(map_sqlite_err)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_sqlite_err)
    }

    async fn list_with_id(&self, owner: i64) -> Result<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, owner_id, description, time_phrase, created_at FROM tasks
                 WHERE owner_id = ?1 ORDER BY created_at ASC, id ASC",
            )
            .map_err(map_sqlite_err)?;

        let rows = stmt
            .query_map(params![owner], |row| {
                Ok(Task {
                    id: row.get(0)?,
                    owner: row.get(1)?,
                    description: row.get(2)?,
                    time_phrase: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .map_err(map_sqlite_err)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(map_sqlite_err)
    }

    async fn count(&self, owner: i64) -> Result<u64> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM tasks WHERE owner_id = ?1",
                params![owner],
                |row| row.get(0),
            )
            .map_err(map_sqlite_err)?;
        Ok(count as u64)
    }

    async fn clear(&self, owner: i64) -> Result<u64> {
        let conn = self.conn.lock().await;
        let deleted = conn
            .execute("DELETE FROM tasks WHERE owner_id = ?1", params![owner])
            .map_err(map_sqlite_err)?;
        Ok(deleted as u64)
    }

    async fn delete_one(&self, owner: i64, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let deleted = conn
            .execute(
                "DELETE FROM tasks WHERE owner_id = ?1 AND id = ?2",
                params![owner, id],
            )
            .map_err(map_sqlite_err)?;
        Ok(deleted > 0)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT owner_id) FROM tasks",
            [],
            |row| {
                Ok(StoreStats {
                    total_tasks: row.get::<_, i64>(0)? as u64,
                    unique_owners: row.get::<_, i64>(1)? as u64,
                })
            },
        )
        .map_err(map_sqlite_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repository() -> SqliteTaskRepository {
        SqliteTaskRepository::open_in_memory().unwrap()
    }

    #[tokio::test]
    async fn test_append_and_list_round_trip() {
        let repo = create_test_repository();

        repo.append(7, "Buy milk", "evening").await.unwrap();

        let tasks = repo.list(7).await.unwrap();
        assert_eq!(tasks, vec![TaskEntry::new("Buy milk", "evening")]);
    }

    #[tokio::test]
    async fn test_clear_returns_deleted_count_and_empties_list() {
        let repo = create_test_repository();

        repo.append(7, "Buy milk", "evening").await.unwrap();
        assert_eq!(repo.clear(7).await.unwrap(), 1);
        assert!(repo.list(7).await.unwrap().is_empty());
        assert_eq!(repo.clear(7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_preserves_append_order() {
        let repo = create_test_repository();

        repo.append(1, "first", "today").await.unwrap();
        repo.append(1, "second", "tomorrow").await.unwrap();
        repo.append(1, "third", "unspecified").await.unwrap();

        let descriptions: Vec<String> = repo
            .list(1)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_owner_isolation() {
        let repo = create_test_repository();

        repo.append(1, "mine", "today").await.unwrap();
        repo.append(2, "theirs", "tomorrow").await.unwrap();

        assert_eq!(repo.count(1).await.unwrap(), 1);
        assert_eq!(repo.count(2).await.unwrap(), 1);
        assert_eq!(repo.list(1).await.unwrap()[0].description, "mine");
        assert_eq!(repo.clear(1).await.unwrap(), 1);
        assert_eq!(repo.count(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_with_id_has_increasing_ids() {
        let repo = create_test_repository();

        repo.append(1, "first", "today").await.unwrap();
        repo.append(1, "second", "tomorrow").await.unwrap();

        let tasks = repo.list_with_id(1).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].id < tasks[1].id);
        assert!(tasks.iter().all(|t| t.owner == 1));
        assert!(tasks.iter().all(|t| !t.created_at.is_empty()));
    }

    #[tokio::test]
    async fn test_delete_one_respects_owner() {
        let repo = create_test_repository();

        repo.append(1, "mine", "today").await.unwrap();
        let id = repo.list_with_id(1).await.unwrap()[0].id;

        // Another owner cannot delete it.
        assert!(!repo.delete_one(2, id).await.unwrap());
        assert_eq!(repo.count(1).await.unwrap(), 1);

        assert!(repo.delete_one(1, id).await.unwrap());
        assert_eq!(repo.count(1).await.unwrap(), 0);
        assert!(!repo.delete_one(1, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_append_trims_fields() {
        let repo = create_test_repository();

        repo.append(1, "  Buy milk  ", " evening ").await.unwrap();

        let tasks = repo.list(1).await.unwrap();
        assert_eq!(tasks[0], TaskEntry::new("Buy milk", "evening"));
    }

    #[tokio::test]
    async fn test_stats_across_owners() {
        let repo = create_test_repository();

        repo.append(1, "a", "today").await.unwrap();
        repo.append(1, "b", "today").await.unwrap();
        repo.append(2, "c", "today").await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.unique_owners, 2);
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tasks.db");

        let repo = SqliteTaskRepository::open(&path).unwrap();
        repo.append(1, "persisted", "today").await.unwrap();

        drop(repo);
        let reopened = SqliteTaskRepository::open(&path).unwrap();
        assert_eq!(reopened.count(1).await.unwrap(), 1);
    }
}
