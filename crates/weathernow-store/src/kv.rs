//! SQLite-backed key-value table.
//!
//! String keys, string values, synchronous get/set, no expiry. Every `set`
//! is committed before it returns.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use weathernow_core::{RusqliteErrorExt, StorageError};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Well-known keys.
pub mod keys {
    pub const UNIT: &str = "weatherUnit";
    pub const THEME: &str = "weatherTheme";
    pub const FAVORITES: &str = "weatherFavorites";
    pub const SNAPSHOT: &str = "lastWeatherData";
}

/// Shared handle to the key-value table.
///
/// Cloning is cheap; all clones see the same connection.
#[derive(Clone)]
pub struct KvStore {
    conn: Arc<Mutex<Connection>>,
}

impl KvStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|e| e.into_storage_error())?;
        Self::with_connection(conn)
    }

    /// Create an in-memory store (tests, or when the config dir is unusable).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| e.into_storage_error())?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| e.into_storage_error())?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .lock()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| e.into_storage_error())
    }

    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| e.into_storage_error())?;
        Ok(())
    }
}
