//! SQLite backend for the migration engine

use log::warn;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use super::store::{Database, Executor, Result};
use crate::error::MigrateError;

/// Open (or create) a file-backed database
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(MigrateError::backend)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(MigrateError::backend)?;
    Ok(conn)
}

/// Open a private in-memory database
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(MigrateError::backend)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(MigrateError::backend)?;
    Ok(conn)
}

impl Executor for Connection {
    fn execute(&self, sql: &str) -> Result<()> {
        self.execute_batch(sql)
            .map_err(|e| MigrateError::statement(sql, e))
    }

    fn query_u32(&self, sql: &str) -> Result<Option<u32>> {
        self.query_row(sql, [], |row| row.get::<_, u32>(0))
            .optional()
            .map_err(|e| MigrateError::statement(sql, e))
    }

    fn has_table(&self, name: &str) -> Result<bool> {
        const SQL: &str = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";
        self.query_row(SQL, [name], |row| row.get::<_, i64>(0))
            .map(|count| count > 0)
            .map_err(|e| MigrateError::statement(SQL, e))
    }
}

impl Database for Connection {
    fn in_transaction(&mut self, work: &mut dyn FnMut(&dyn Executor) -> Result<()>) -> Result<()> {
        let tx = self.transaction().map_err(MigrateError::backend)?;

        match work(&*tx) {
            Ok(()) => tx.commit().map_err(MigrateError::backend),
            Err(e) => {
                if let Err(rollback) = tx.rollback() {
                    warn!("Rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_table() {
        let conn = open_in_memory().unwrap();
        assert!(!conn.has_table("players").unwrap());
        Executor::execute(&conn, "CREATE TABLE players (id INTEGER)").unwrap();
        assert!(conn.has_table("players").unwrap());
    }

    #[test]
    fn test_query_u32_without_rows() {
        let conn = open_in_memory().unwrap();
        Executor::execute(&conn, "CREATE TABLE numbers (n INTEGER)").unwrap();
        assert_eq!(conn.query_u32("SELECT n FROM numbers").unwrap(), None);
        Executor::execute(&conn, "INSERT INTO numbers VALUES (7)").unwrap();
        assert_eq!(conn.query_u32("SELECT n FROM numbers").unwrap(), Some(7));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut conn = open_in_memory().unwrap();
        Executor::execute(&conn, "CREATE TABLE numbers (n INTEGER)").unwrap();

        let result = conn.in_transaction(&mut |tx: &dyn Executor| {
            tx.execute("INSERT INTO numbers VALUES (1)")?;
            tx.execute("INSERT INTO missing VALUES (2)")
        });

        assert!(matches!(result, Err(MigrateError::Statement { .. })));
        assert_eq!(conn.query_u32("SELECT COUNT(*) FROM numbers").unwrap(), Some(0));
    }

    #[test]
    fn test_transaction_commits() {
        let mut conn = open_in_memory().unwrap();
        Executor::execute(&conn, "CREATE TABLE numbers (n INTEGER)").unwrap();

        conn.in_transaction(&mut |tx: &dyn Executor| tx.execute("INSERT INTO numbers VALUES (1)"))
            .unwrap();

        assert_eq!(conn.query_u32("SELECT COUNT(*) FROM numbers").unwrap(), Some(1));
    }
}
