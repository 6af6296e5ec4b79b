use crate::Database;
use anyhow::Result;
use rusqlite::OptionalExtension;

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row("SELECT value FROM collections WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    /// Single-statement upsert, so the whole collection is replaced atomically.
    pub fn put_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO collections (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                (key, value),
            )?;
            Ok(())
        })
    }

    pub fn has_key(&self, key: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM collections WHERE key = ?1)",
                [key],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// Every stored key, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM collections ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(keys)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn upsert_and_list_keys() {
        let db = Database::open_in_memory().unwrap();
        db.put_value("b", "[]").unwrap();
        db.put_value("a", "[1]").unwrap();
        db.put_value("a", "[2]").unwrap();

        assert_eq!(db.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(db.get_value("a").unwrap().as_deref(), Some("[2]"));
        assert!(db.has_key("b").unwrap());
        assert!(!db.has_key("c").unwrap());
    }
}
