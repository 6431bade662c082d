//! Whole-process schema lifecycle: `sync` and `drop_all`.
//!
//! Both operations are expected to run before/after all entity traffic,
//! never concurrently with it.

use super::migrations::{apply_migrations, replay_applied};
use super::DbResult;
use log::info;
use rusqlite::Connection;

/// Tables owned by this crate, in foreign-key dependency order (children first).
pub const MANAGED_TABLES: &[&str] = &["cheese_boards", "boards", "cheeses", "users"];

/// Options for [`sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Drop every managed table before recreating the schema.
    pub force: bool,
}

impl SyncOptions {
    pub fn force() -> Self {
        Self { force: true }
    }
}

/// Creates all managed tables if absent.
///
/// Tables dropped behind the schema version's back are recreated empty.
///
/// With `force`, existing tables and their rows are dropped first, so
/// identifiers restart from 1.
pub fn sync(conn: &mut Connection, options: SyncOptions) -> DbResult<()> {
    if options.force {
        drop_all(conn)?;
    }
    apply_migrations(conn)?;

    let mut missing = 0;
    for table in MANAGED_TABLES {
        if !table_exists(conn, table)? {
            missing += 1;
        }
    }
    if missing > 0 {
        replay_applied(conn)?;
    }

    info!(
        "event=db_sync module=db status=ok force={} recreated={missing}",
        options.force
    );
    Ok(())
}

/// Drops every managed table and resets the schema version to 0.
pub fn drop_all(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    for table in MANAGED_TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.execute_batch("PRAGMA user_version = 0;")?;
    tx.commit()?;
    info!("event=db_drop module=db status=ok tables={}", MANAGED_TABLES.len());
    Ok(())
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
