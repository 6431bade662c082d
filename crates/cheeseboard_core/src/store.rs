//! Explicit initialization handle for the cheese board store.
//!
//! # Responsibility
//! - Own the SQLite connection for the lifetime of the process.
//! - Hand out repositories and association runtimes bound to it.
//!
//! # Invariants
//! - `sync`/`drop_all` take `&mut self`, so no repository borrowed from the
//!   store can be alive while the schema changes.

use crate::assoc::{CheeseBoards, Ownership};
use crate::config::CoreConfig;
use crate::db::{self, SyncOptions};
use crate::repo::{BoardRepository, CheeseRepository, LinkRepository, RepoResult, UserRepository};
use log::info;
use rusqlite::Connection;
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) a database file with the schema applied.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self {
            conn: db::open_db(path)?,
        })
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: db::open_db_in_memory()?,
        })
    }

    pub fn from_config(config: &CoreConfig) -> RepoResult<Self> {
        let conn = match config.db_path.as_deref() {
            Some(path) => db::open_db_with_timeout(path, config.busy_timeout)?,
            None => db::open_db_in_memory()?,
        };
        Ok(Self { conn })
    }

    /// Wraps a connection that was opened through `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn sync(&mut self, options: SyncOptions) -> RepoResult<()> {
        db::sync(&mut self.conn, options)?;
        Ok(())
    }

    pub fn drop_all(&mut self) -> RepoResult<()> {
        db::drop_all(&mut self.conn)?;
        Ok(())
    }

    pub fn users(&self) -> RepoResult<UserRepository<'_>> {
        UserRepository::try_new(&self.conn)
    }

    pub fn cheeses(&self) -> RepoResult<CheeseRepository<'_>> {
        CheeseRepository::try_new(&self.conn)
    }

    pub fn boards(&self) -> RepoResult<BoardRepository<'_>> {
        BoardRepository::try_new(&self.conn)
    }

    pub fn links(&self) -> RepoResult<LinkRepository<'_>> {
        LinkRepository::try_new(&self.conn)
    }

    pub fn ownership(&self) -> RepoResult<Ownership<'_>> {
        Ownership::try_new(&self.conn)
    }

    pub fn cheese_boards(&self) -> RepoResult<CheeseBoards<'_>> {
        CheeseBoards::try_new(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the underlying connection, surfacing any close error.
    pub fn close(self) -> RepoResult<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        info!("event=store_close module=store status=ok");
        Ok(())
    }
}
