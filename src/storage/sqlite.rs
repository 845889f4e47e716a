use rusqlite::{params, Connection, OptionalExtension};

use std::path::Path;

use crate::internal_error::InternalResult;

use super::KeyValueStorage;

pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    pub fn open(path: impl AsRef<Path>) -> InternalResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> InternalResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> InternalResult<Self> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS storage (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            params![],
        )?;

        Ok(Self { connection })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> InternalResult<Option<String>> {
        let value = self
            .connection
            .query_row(
                "SELECT value FROM storage WHERE key = (?1)",
                params![key],
                |row| row.get::<usize, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> InternalResult<()> {
        self.connection.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();

        assert_eq!(storage.get("goals").unwrap(), None);

        storage.set("goals", "[]").unwrap();
        storage.set("goals", "[1]").unwrap();

        assert_eq!(storage.get("goals").unwrap(), Some("[1]".to_string()));
        assert_eq!(storage.get("categories").unwrap(), None);
    }
}
