//! SQLite-backed `KvStore` over the `kv_entries` table.

use super::{KvStore, StoreResult};
use log::error;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store borrowing a migrated SQLite connection.
#[derive(Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map_err(|err| {
                error!("event=kv_write module=store status=error backend=sqlite key={key} error={err}");
                err
            })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteKvStore;
    use crate::db::open_db_in_memory;
    use crate::store::KvStore;

    #[test]
    fn set_get_overwrite_and_remove() {
        let conn = open_db_in_memory().expect("in-memory db");
        let kv = SqliteKvStore::new(&conn);

        assert_eq!(kv.get("a").expect("get"), None);
        kv.set("a", "1").expect("first set");
        kv.set("a", "2").expect("overwrite");
        assert_eq!(kv.get("a").expect("get").as_deref(), Some("2"));
        assert_eq!(kv.keys().expect("keys"), vec!["a".to_string()]);

        kv.remove("a").expect("remove");
        kv.remove("a").expect("remove is idempotent");
        assert_eq!(kv.get("a").expect("get"), None);
    }
}
