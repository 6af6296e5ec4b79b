pub mod memory;
pub mod migrations;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

pub use memory::MemoryStore;

/// Durable string-keyed store holding one JSON document per key.
///
/// Implementations must replace a key's value atomically: a reader never
/// observes a half-written document.
pub trait LocalStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    fn put_raw(&self, key: &str, value: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Read and decode the value under `key`.
///
/// Missing, undecodable or unreadable data yields `default`; none of these is
/// an error for the caller.
pub fn read_or<T: DeserializeOwned>(store: &dyn LocalStore, key: &str, default: T) -> T {
    let raw = match store.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            warn!("Local read of {} failed, using default: {:#}", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Corrupt local value under {}, using default: {}", key, e);
            default
        }
    }
}

/// Encode `value` and store it under `key`, replacing any previous value.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn LocalStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.put_raw(key, &raw)
}

/// SQLite-backed local store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Committed collection writes survive a crash
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "FULL")?;

        migrations::run(&conn)?;

        info!("Local store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Flush and release the underlying connection.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}

impl LocalStore for Database {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.put_value(key, value)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        self.has_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edunexus_types::{Quiz, User, seed};

    #[test]
    fn missing_key_yields_default() {
        let db = Database::open_in_memory().unwrap();
        let users: Vec<User> = read_or(&db, "edunexus_users", vec![]);
        assert!(users.is_empty());
    }

    #[test]
    fn corrupt_value_yields_default() {
        let db = Database::open_in_memory().unwrap();
        db.put_raw("edunexus_quizzes", "{not json").unwrap();

        let fallback = seed::quizzes(Utc::now());
        let quizzes: Vec<Quiz> = read_or(&db, "edunexus_quizzes", fallback.clone());
        assert_eq!(quizzes, fallback);
    }

    #[test]
    fn wrong_shape_yields_default() {
        let db = Database::open_in_memory().unwrap();
        db.put_raw("edunexus_users", r#"{"id":"u1"}"#).unwrap();

        let users: Vec<User> = read_or(&db, "edunexus_users", vec![]);
        assert!(users.is_empty());
    }

    #[test]
    fn write_replaces_previous_value() {
        let db = Database::open_in_memory().unwrap();
        let users = seed::users(Utc::now());

        write_json(&db, "edunexus_users", &users).unwrap();
        write_json(&db, "edunexus_users", &users[..1]).unwrap();

        let stored: Vec<User> = read_or(&db, "edunexus_users", vec![]);
        assert_eq!(stored, users[..1].to_vec());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.db");
        let users = seed::users(Utc::now());

        let db = Database::open(&path).unwrap();
        write_json(&db, "edunexus_users", &users).unwrap();
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        assert!(db.contains("edunexus_users").unwrap());
        assert!(!db.contains("edunexus_quizzes").unwrap());
        let stored: Vec<User> = read_or(&db, "edunexus_users", vec![]);
        assert_eq!(stored, users);
    }
}
