/// Durable local storage
///
/// The app keeps two small pieces of durable state: the favorites list
/// and the "is authenticated" flag. Both are JSON strings under fixed
/// keys, so storage is a plain key/value port. Stores receive the port
/// by injection; nothing in the app touches storage ambiently.

use std::collections::HashMap;
use std::path::PathBuf;

use rusqlite::{Connection, OptionalExtension, Result as SqlResult};
use tracing::info;

/// Fixed key for the favorites list (JSON array of dog ids)
pub const FAVORITES_KEY: &str = "favorites";
/// Fixed key for the login flag (JSON bool)
pub const SESSION_KEY: &str = "isAuthenticated";

/// Key/value persistence behind the state stores
pub trait StoragePort {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> SqlResult<()>;
    /// Delete the value under `key`; deleting a missing key is fine
    fn remove(&mut self, key: &str) -> SqlResult<()>;
}

/// SQLite-backed storage in the per-user data directory.
///
/// The database file lives at:
/// - Linux: ~/.local/share/shelter-match/shelter_match.db
/// - macOS: ~/Library/Application Support/shelter-match/shelter_match.db
/// - Windows: %APPDATA%\shelter-match\shelter_match.db
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the storage database at the default location.
    pub fn open_default() -> SqlResult<Self> {
        let db_path = Self::default_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::ToSqlConversionFailure(Box::new(e))
            })?;
        }

        let conn = Connection::open(&db_path)?;
        info!("storage initialized at {}", db_path.display());

        let storage = SqliteStorage { conn };
        storage.init_schema()?;
        Ok(storage)
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("shelter-match");
        path.push("shelter_match.db");
        path
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    #[cfg(test)]
    fn open_in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = SqliteStorage { conn };
        storage.init_schema()?;
        Ok(storage)
    }
}

impl StoragePort for SqliteStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .ok()
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SqlResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage, as if a previous run had written `values`.
    #[cfg(test)]
    pub fn with_values(values: HashMap<String, String>) -> Self {
        MemoryStorage { values }
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> SqlResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SqlResult<()> {
        self.values.remove(key);
        Ok(())
    }
}
