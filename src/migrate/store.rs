//! SQL capabilities the migration engine relies on, and the schema version row

use crate::error::MigrateError;

pub type Result<T> = std::result::Result<T, MigrateError>;

/// Table holding the single schema version row
pub const VERSION_TABLE: &str = "dbVersion";

pub(crate) const CREATE_VERSION_TABLE: &str = r#"
		CREATE TABLE "dbVersion" (
			"version" integer NOT NULL
		)
	"#;

pub(crate) const INSERT_VERSION_1: &str = "INSERT INTO dbVersion VALUES (1)";

/// Statement execution against a database or an open transaction
pub trait Executor {
    /// Execute one statement, discarding any rows
    fn execute(&self, sql: &str) -> Result<()>;

    /// First column of the first row as an integer, `None` when there is no row
    fn query_u32(&self, sql: &str) -> Result<Option<u32>>;

    fn has_table(&self, name: &str) -> Result<bool>;
}

/// A database that can group statements into a transaction
pub trait Database: Executor {
    /// Run `work` inside a transaction. Commits when it returns `Ok`,
    /// rolls back and hands the error back otherwise.
    fn in_transaction(&mut self, work: &mut dyn FnMut(&dyn Executor) -> Result<()>) -> Result<()>;
}

/// Current schema version; 0 for a database without the version table
pub fn get_version<E: Executor + ?Sized>(db: &E) -> Result<u32> {
    if !db.has_table(VERSION_TABLE)? {
        return Ok(0);
    }

    // the table exists but the row is gone: don't assume anything
    db.query_u32("SELECT version FROM dbVersion")?
        .ok_or(MigrateError::VersionMissing)
}

pub(crate) fn set_version<E: Executor + ?Sized>(tx: &E, version: u32) -> Result<()> {
    tx.execute(&format!("UPDATE dbVersion SET version={}", version))
}
