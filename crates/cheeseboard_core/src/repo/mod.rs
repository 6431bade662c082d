//! Repository layer: the CRUD façade over SQLite.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQL details from association and store orchestration.
//!
//! # Invariants
//! - Write paths validate change sets before any SQL mutation.
//! - Storage errors propagate unchanged; nothing here retries.
//! - Lookups that find nothing return `None`, not an error.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{table_exists, DbError};
use crate::model::validate::ValidationError;
use rusqlite::Connection;

pub mod entity_repo;
pub mod link_repo;

pub use entity_repo::{
    BoardRepository, CheeseRepository, Repository, SqliteRepository, UserRepository,
};
pub use link_repo::LinkRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence, queries and associations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Backend unreachable or a constraint (foreign key, not null) violated.
    #[error(transparent)]
    Storage(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("unknown association `{0}`")]
    UnknownAssociation(&'static str),
    #[error("connection schema version {actual_version} does not match expected {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Rejects connections that were not bootstrapped through `db::open_db*`
/// or whose tables were dropped.
pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(*table));
        }
    }

    Ok(())
}

pub(crate) fn count_to_u64(value: i64) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| RepoError::InvalidData(format!("negative row count {value}")))
}
