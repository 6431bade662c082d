//! Cheese/Board link table persistence.
//!
//! # Invariants
//! - A `(cheese_id, board_id)` pair is stored at most once (composite key).
//! - Inserting an existing pair is a no-op reported as `false`.
//! - Replacing a cheese's board set happens in one transaction.

use super::{count_to_u64, ensure_connection_ready, RepoResult};
use crate::model::board::{Board, BoardId};
use crate::model::cheese::{Cheese, CheeseId};
use crate::model::link::{CheeseBoardLink, LinkSpec, CHEESE_BOARD};
use crate::model::schema::Entity;
use log::info;
use rusqlite::{params, Connection};

/// SQLite-backed repository for the `Cheese_Board` through table.
pub struct LinkRepository<'conn> {
    conn: &'conn Connection,
    spec: &'static LinkSpec,
}

impl<'conn> LinkRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[CHEESE_BOARD.table, Cheese::TABLE, Board::TABLE])?;
        Ok(Self {
            conn,
            spec: &CHEESE_BOARD,
        })
    }

    pub fn spec(&self) -> &'static LinkSpec {
        self.spec
    }

    /// Inserts one pair. Returns `false` when the pair already existed.
    pub fn insert(&self, cheese_id: CheeseId, board_id: BoardId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2);",
                self.spec.table, self.spec.cheese_column, self.spec.board_column
            ),
            params![cheese_id, board_id],
        )?;

        info!(
            "event=link_add module=repo status=ok link={} cheese_id={cheese_id} board_id={board_id} inserted={}",
            self.spec.name,
            changed > 0
        );
        Ok(changed > 0)
    }

    /// Deletes one pair. Returns `false` when the pair did not exist.
    pub fn delete(&self, cheese_id: CheeseId, board_id: BoardId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1 AND {} = ?2;",
                self.spec.table, self.spec.cheese_column, self.spec.board_column
            ),
            params![cheese_id, board_id],
        )?;

        info!(
            "event=link_remove module=repo status=ok link={} cheese_id={cheese_id} board_id={board_id} removed={}",
            self.spec.name,
            changed > 0
        );
        Ok(changed > 0)
    }

    pub fn exists(&self, cheese_id: CheeseId, board_id: BoardId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1 AND {} = ?2);",
                self.spec.table, self.spec.cheese_column, self.spec.board_column
            ),
            params![cheese_id, board_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    /// Boards linked to one cheese, ordered by board id.
    pub fn boards_for_cheese(&self, cheese_id: CheeseId) -> RepoResult<Vec<Board>> {
        self.related::<Board>(self.spec.board_column, self.spec.cheese_column, cheese_id)
    }

    /// Cheeses linked to one board, ordered by cheese id.
    pub fn cheeses_for_board(&self, board_id: BoardId) -> RepoResult<Vec<Cheese>> {
        self.related::<Cheese>(self.spec.cheese_column, self.spec.board_column, board_id)
    }

    /// All link rows ordered by `(cheese_id, board_id)`.
    pub fn list(&self) -> RepoResult<Vec<CheeseBoardLink>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {cheese} AS cheese_id, {board} AS board_id
             FROM {table}
             ORDER BY {cheese} ASC, {board} ASC;",
            cheese = self.spec.cheese_column,
            board = self.spec.board_column,
            table = self.spec.table
        ))?;
        let mut rows = stmt.query([])?;
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            links.push(CheeseBoardLink {
                cheese_id: row.get("cheese_id")?,
                board_id: row.get("board_id")?,
            });
        }
        Ok(links)
    }

    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", self.spec.table),
            [],
            |row| row.get(0),
        )?;
        count_to_u64(count)
    }

    /// Replaces the full board set of one cheese in a single transaction.
    pub fn replace_boards_for_cheese(
        &self,
        cheese_id: CheeseId,
        board_ids: &[BoardId],
    ) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                self.spec.table, self.spec.cheese_column
            ),
            [cheese_id],
        )?;
        for board_id in board_ids {
            tx.execute(
                &format!(
                    "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2);",
                    self.spec.table, self.spec.cheese_column, self.spec.board_column
                ),
                params![cheese_id, board_id],
            )?;
        }
        tx.commit()?;

        info!(
            "event=link_replace module=repo status=ok link={} cheese_id={cheese_id} boards={}",
            self.spec.name,
            board_ids.len()
        );
        Ok(())
    }

    fn related<E: Entity>(
        &self,
        target_column: &str,
        source_column: &str,
        source_id: i64,
    ) -> RepoResult<Vec<E>> {
        let columns = E::fields()
            .iter()
            .map(|spec| spec.column)
            .chain(["created_at", "updated_at"])
            .map(|column| format!("e.{column} AS {column}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {columns}
             FROM {entity} e
             INNER JOIN {link} l ON l.{target_column} = e.id
             WHERE l.{source_column} = ?1
             ORDER BY e.id ASC;",
            entity = E::TABLE,
            link = self.spec.table,
        ))?;
        let mut rows = stmt.query([source_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(E::from_row(row)?);
        }
        Ok(items)
    }
}
