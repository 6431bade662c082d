//! Core data layer for the cheese board domain.
//!
//! Users own boards; cheeses and boards are linked many-to-many through
//! `Cheese_Board`. Everything persists in SQLite.

pub mod assoc;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use assoc::{CheeseBoards, Ownership};
pub use config::{ConfigError, CoreConfig};
pub use db::{DbError, SyncOptions};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardField, BoardId, NewBoard};
pub use model::cheese::{Cheese, CheeseField, CheeseId, NewCheese};
pub use model::link::{CheeseBoardLink, LinkOptions, LinkSpec, CHEESE_BOARD};
pub use model::query::{Changes, Filter};
pub use model::schema::{Entity, EntityField, FieldSpec, FieldType, FieldValue};
pub use model::user::{NewUser, User, UserField, UserId};
pub use model::validate::ValidationError;
pub use repo::{
    BoardRepository, CheeseRepository, LinkRepository, RepoError, RepoResult, Repository,
    SqliteRepository, UserRepository,
};
pub use store::Store;

/// Minimal health-check API for smoke integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
