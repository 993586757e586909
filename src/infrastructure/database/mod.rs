//! SQLite-backed user store

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::User;
use crate::domain::traits::UserStore;

/// Format of SQLite's `datetime('now')`
const SQLITE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let conn = Mutex::new(conn);
        init_tables(&*lock(&conn)?)?;
        Ok(Self { conn: Arc::new(conn) })
    }

    /// Run a statement on tokio's blocking pool
    async fn run<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || op(&*lock(&conn)?))
            .await
            .map_err(|e| StorageError::Unavailable(format!("database task failed: {}", e)))?
    }

    fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, StorageError> {
        NaiveDateTime::parse_from_str(raw, SQLITE_DATETIME)
            .map(|naive| naive.and_utc())
            .map_err(|e| StorageError::Serialization(format!("created_at {:?}: {}", raw, e)))
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StorageError> {
    conn.lock()
        .map_err(|_| StorageError::Unavailable("connection lock poisoned".to_string()))
}

fn init_tables(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            city TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;
    Ok(())
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get_city(&self, user_id: i64) -> Result<String, StorageError> {
        let city = self
            .run(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT COALESCE(city, '') FROM users WHERE id = ?1",
                        [user_id],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?)
            })
            .await?;

        city.ok_or_else(|| StorageError::NotFound(format!("user {}", user_id)))
    }

    async fn create_user(&self, user_id: i64) -> Result<(), StorageError> {
        self.run(move |conn| {
            conn.execute("INSERT INTO users (id) VALUES (?1)", [user_id])?;
            Ok(())
        })
        .await
    }

    async fn update_city(&self, user_id: i64, city: &str) -> Result<(), StorageError> {
        let city = city.to_string();
        self.run(move |conn| {
            conn.execute(
                "UPDATE users SET city = ?1 WHERE id = ?2",
                rusqlite::params![city, user_id],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, StorageError> {
        let row = self
            .run(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, city, created_at FROM users WHERE id = ?1",
                        [user_id],
                        |row| {
                            Ok((
                                row.get::<_, i64>(0)?,
                                row.get::<_, Option<String>>(1)?,
                                row.get::<_, String>(2)?,
                            ))
                        },
                    )
                    .optional()?)
            })
            .await?;

        let Some((id, city, created_at)) = row else {
            return Ok(None);
        };

        Ok(Some(User {
            id,
            city,
            created_at: Self::parse_created_at(&created_at)?,
        }))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.run(|conn| {
            conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteUserStore {
        SqliteUserStore::open_in_memory().expect("in-memory store")
    }

    #[tokio::test]
    async fn test_get_user_absent_is_none() {
        let store = store();
        assert!(store.get_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_then_get_user() {
        let store = store();
        store.create_user(42).await.unwrap();

        let user = store.get_user(42).await.unwrap().unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.city, None);
        assert!(user.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_existing_user_fails() {
        let store = store();
        store.create_user(42).await.unwrap();

        let err = store.create_user(42).await.unwrap_err();
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[tokio::test]
    async fn test_city_round_trip() {
        let store = store();
        store.create_user(7).await.unwrap();
        assert_eq!(store.get_city(7).await.unwrap(), "");

        store.update_city(7, "Paris").await.unwrap();
        assert_eq!(store.get_city(7).await.unwrap(), "Paris");

        store.update_city(7, "").await.unwrap();
        assert_eq!(store.get_city(7).await.unwrap(), "");
        assert_eq!(store.get_user(7).await.unwrap().unwrap().city.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_get_city_of_missing_user_fails() {
        let store = store();
        let err = store.get_city(404).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_ping() {
        store().ping().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_calls_share_connection() {
        let store = Arc::new(store());
        let tasks: Vec<_> = (1..=8)
            .map(|id| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.create_user(id).await?;
                    store.update_city(id, &format!("city-{}", id)).await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        for id in 1..=8 {
            assert_eq!(store.get_city(id).await.unwrap(), format!("city-{}", id));
        }
    }

    #[test]
    fn test_parse_created_at() {
        let parsed = SqliteUserStore::parse_created_at("2024-01-29 12:00:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-29T12:00:00+00:00");
        assert!(SqliteUserStore::parse_created_at("yesterday").is_err());
    }
}
