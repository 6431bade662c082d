//! SQLite storage bootstrap and schema lifecycle entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the cheese board store.
//! - Apply schema migrations in deterministic order.
//! - Provide whole-process `sync`/`drop_all` lifecycle operations.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Entity data must not be read or written before migrations succeed.

pub mod migrations;
mod open;
mod schema;

pub use open::{open_db, open_db_in_memory, open_db_with_timeout};
pub use schema::{drop_all, sync, table_exists, SyncOptions, MANAGED_TABLES};

pub type DbResult<T> = Result<T, DbError>;

/// Storage backend failure.
///
/// Covers both an unreachable/broken database and constraint violations
/// reported by SQLite (foreign keys, `NOT NULL`).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether SQLite rejected the statement on a constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
