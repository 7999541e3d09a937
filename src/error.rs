use thiserror::Error;

use crate::html::PageKind;

/// Boxed backend error, so the migration engine does not depend on a specific SQL driver
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page structure itself is missing; nothing can be extracted
    #[error("Parse error ({kind}): {reason}")]
    Parse { kind: PageKind, reason: String },

    /// A single field could not be converted to its typed form
    #[error("Invalid value for field '{field}': {value:?}")]
    Field { field: &'static str, value: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn parse(kind: PageKind, reason: impl Into<String>) -> Self {
        ScrapeError::Parse {
            kind,
            reason: reason.into(),
        }
    }

    pub fn field(field: &'static str, value: impl Into<String>) -> Self {
        ScrapeError::Field {
            field,
            value: value.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Unknown version number: database is at v{current}, newest migration is v{newest}")]
    UnknownVersion { current: u32, newest: u32 },

    #[error("DB version missing")]
    VersionMissing,

    #[error("No reset set registered for v{0}")]
    NoResetSet(u32),

    #[error("Statement failed: {source} ({sql})")]
    Statement {
        sql: String,
        #[source]
        source: BoxError,
    },

    #[error("Database error: {0}")]
    Backend(#[source] BoxError),
}

impl MigrateError {
    pub fn statement(sql: &str, source: impl Into<BoxError>) -> Self {
        MigrateError::Statement {
            sql: sql.trim().to_string(),
            source: source.into(),
        }
    }

    pub fn backend(source: impl Into<BoxError>) -> Self {
        MigrateError::Backend(source.into())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
