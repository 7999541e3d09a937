//! Versioned schema migrations.
//!
//! The schema version is the number of applied migrations and lives in a
//! one-row table. Each pending migration runs in its own transaction together
//! with the version update, so the stored version never reflects a partially
//! applied batch. Callers must make sure only one `migrate` runs against a
//! database at a time.

pub mod schema;
pub mod sqlite;
pub mod store;

use log::{debug, info, warn};

use crate::error::MigrateError;
pub use store::{get_version, Database, Executor, Result, VERSION_TABLE};
use store::{set_version, CREATE_VERSION_TABLE, INSERT_VERSION_1};

/// SQL entries of one migration; an entry may hold several `;`-separated statements.
/// Its position in the migration list + 1 is the version it upgrades to.
pub type Migration<'a> = &'a [&'a str];

/// Tables whose rows [`reset`] deletes for one version
pub type TableNames<'a> = &'a [&'a str];

/// Apply all pending `migrations` and return the resulting version.
///
/// Stops at the first failing migration; everything before it stays committed.
pub fn migrate<D: Database + ?Sized>(db: &mut D, migrations: &[Migration]) -> Result<u32> {
    let current = get_version(&*db)?;
    let newest = migrations.len() as u32;

    if current > newest {
        return Err(MigrateError::UnknownVersion { current, newest });
    }

    if current == newest {
        debug!("Schema is up to date at v{}", current);
        return Ok(current);
    }

    for (index, migration) in migrations.iter().enumerate().skip(current as usize) {
        let version = index as u32 + 1;
        info!("Applying migration v{}", version);

        db.in_transaction(&mut |tx: &dyn Executor| apply(tx, migration, version))
            .inspect_err(|e| warn!("Migration v{} failed, rolled back: {}", version, e))?;
    }

    Ok(newest)
}

/// Delete all rows from the tables registered for the current version
pub fn reset<E: Executor + ?Sized>(db: &E, resets: &[TableNames]) -> Result<()> {
    let version = get_version(db)?;

    if version == 0 {
        return Ok(());
    }

    let tables = resets
        .get(version as usize - 1)
        .ok_or(MigrateError::NoResetSet(version))?;

    for table in tables.iter() {
        debug!("Deleting all rows from {}", table);
        db.execute(&format!("DELETE FROM {}", table))?;
    }

    Ok(())
}

/// Apply the bundled SQLite schema
pub fn all<D: Database + ?Sized>(db: &mut D) -> Result<u32> {
    migrate(db, schema::MIGRATIONS)
}

/// Empty the bundled schema's tables
pub fn reset_all<E: Executor + ?Sized>(db: &E) -> Result<()> {
    reset(db, schema::RESETS)
}

fn apply(tx: &dyn Executor, migration: &[&str], version: u32) -> Result<()> {
    for entry in migration {
        for statement in split_statements(entry) {
            debug!("v{}: {}", version, statement);
            tx.execute(statement)?;
        }
    }

    if version == 1 {
        tx.execute(CREATE_VERSION_TABLE)?;
        tx.execute(INSERT_VERSION_1)?;
    }

    set_version(tx, version)
}

/// Split an entry into single statements on `;`.
///
/// Semicolons inside quoted literals, quoted or bracketed identifiers, `--`
/// and `/* */` comments do not split. Blank fragments are dropped. A `;`
/// inside a trigger body still splits, so triggers need their own migration
/// entry written without one.
pub fn split_statements(sql: &str) -> Vec<&str> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Quoted(char),
        LineComment,
        BlockComment,
    }

    let mut statements = Vec::new();
    let mut state = State::Code;
    let mut start = 0;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        state = match state {
            State::Code => match c {
                '\'' | '"' | '`' => State::Quoted(c),
                '[' => State::Quoted(']'),
                '-' if next == Some('-') => State::LineComment,
                '/' if next == Some('*') => {
                    chars.next();
                    State::BlockComment
                }
                ';' => {
                    statements.push(&sql[start..i]);
                    start = i + 1;
                    State::Code
                }
                _ => State::Code,
            },
            State::Quoted(close) if c == close => State::Code,
            State::LineComment if c == '\n' => State::Code,
            State::BlockComment if c == '*' && next == Some('/') => {
                chars.next();
                State::Code
            }
            other => other,
        };
    }
    statements.push(&sql[start..]);

    statements
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
