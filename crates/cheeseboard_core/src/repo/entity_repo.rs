//! Generic entity repository and its SQLite implementation.
//!
//! # Responsibility
//! - Provide create/find/update/destroy/count for every `Entity`.
//! - Translate typed change sets and filters into parameterized SQL.
//!
//! # Invariants
//! - `id` is assigned by SQLite (`AUTOINCREMENT`) and never reused.
//! - `find_one` and `find_all` order by `id ASC`, so the lowest id wins.
//! - `update` never touches `id` and always bumps `updated_at`.

use super::{count_to_u64, ensure_connection_ready, RepoError, RepoResult};
use crate::model::board::Board;
use crate::model::cheese::Cheese;
use crate::model::query::{Changes, Filter};
use crate::model::schema::{select_sql, Entity, EntityField};
use crate::model::user::User;
use crate::model::validate::{validate_changes, validate_filter, WriteMode};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::marker::PhantomData;

pub type UserRepository<'conn> = SqliteRepository<'conn, User>;
pub type CheeseRepository<'conn> = SqliteRepository<'conn, Cheese>;
pub type BoardRepository<'conn> = SqliteRepository<'conn, Board>;

/// CRUD contract shared by all entities.
pub trait Repository<E: Entity> {
    /// Validates and inserts one row; returns it with its new identifier.
    fn create(&self, values: impl Into<Changes<E::Field>>) -> RepoResult<E>;
    fn find_by_id(&self, id: i64) -> RepoResult<Option<E>>;
    /// First row (lowest id) matching every filter term.
    fn find_one(&self, filter: &Filter<E::Field>) -> RepoResult<Option<E>>;
    fn find_all(&self, filter: &Filter<E::Field>) -> RepoResult<Vec<E>>;
    /// Replaces only the named fields and returns the persisted row.
    fn update(&self, instance: &E, changes: impl Into<Changes<E::Field>>) -> RepoResult<E>;
    fn destroy(&self, instance: &E) -> RepoResult<()>;
    /// Removes every matching row and returns how many were removed.
    fn destroy_where(&self, filter: &Filter<E::Field>) -> RepoResult<usize>;
    fn count(&self) -> RepoResult<u64>;
    fn count_where(&self, filter: &Filter<E::Field>) -> RepoResult<u64>;
}

/// SQLite-backed repository for entity `E`.
pub struct SqliteRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[E::TABLE])?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn query_rows(&self, filter: &Filter<E::Field>, limit: Option<u32>) -> RepoResult<Vec<E>> {
        validate_filter::<E>(filter)?;

        let (where_clause, mut bind_values) = filter.to_where_clause();
        let mut sql = format!("{}{where_clause} ORDER BY id ASC", select_sql::<E>());
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(E::from_row(row)?);
        }
        Ok(items)
    }

    fn require_by_id(&self, id: i64) -> RepoResult<E> {
        self.find_by_id(id)?
            .ok_or_else(|| RepoError::not_found(E::NAME, id))
    }
}

impl<E: Entity> Repository<E> for SqliteRepository<'_, E> {
    fn create(&self, values: impl Into<Changes<E::Field>>) -> RepoResult<E> {
        let changes: Changes<E::Field> = values.into();
        if let Err(err) = validate_changes::<E>(&changes, WriteMode::Create) {
            warn!(
                "event=entity_create module=repo status=rejected entity={} error={err}",
                E::NAME
            );
            return Err(err.into());
        }

        let columns = changes
            .entries()
            .iter()
            .map(|(field, _)| field.spec().column)
            .collect::<Vec<_>>();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let bind_values = changes
            .entries()
            .iter()
            .map(|(_, value)| value.to_sql_value())
            .collect::<Vec<_>>();

        self.conn.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES ({placeholders});",
                E::TABLE,
                columns.join(", ")
            ),
            params_from_iter(bind_values),
        )?;

        let id = self.conn.last_insert_rowid();
        info!(
            "event=entity_create module=repo status=ok entity={} id={id}",
            E::NAME
        );
        self.find_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("{} {id} vanished right after insert", E::NAME))
        })
    }

    fn find_by_id(&self, id: i64) -> RepoResult<Option<E>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", select_sql::<E>()))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(E::from_row(row)?));
        }
        Ok(None)
    }

    fn find_one(&self, filter: &Filter<E::Field>) -> RepoResult<Option<E>> {
        Ok(self.query_rows(filter, Some(1))?.into_iter().next())
    }

    fn find_all(&self, filter: &Filter<E::Field>) -> RepoResult<Vec<E>> {
        self.query_rows(filter, None)
    }

    fn update(&self, instance: &E, changes: impl Into<Changes<E::Field>>) -> RepoResult<E> {
        let changes: Changes<E::Field> = changes.into();
        let id = instance.id();
        if let Err(err) = validate_changes::<E>(&changes, WriteMode::Update) {
            warn!(
                "event=entity_update module=repo status=rejected entity={} id={id} error={err}",
                E::NAME
            );
            return Err(err.into());
        }

        let mut assignments = changes
            .entries()
            .iter()
            .map(|(field, _)| format!("{} = ?", field.spec().column))
            .collect::<Vec<_>>();
        assignments.push("updated_at = (strftime('%s', 'now') * 1000)".to_string());
        let mut bind_values = changes
            .entries()
            .iter()
            .map(|(_, value)| value.to_sql_value())
            .collect::<Vec<_>>();
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {} WHERE id = ?;",
                E::TABLE,
                assignments.join(", ")
            ),
            params_from_iter(bind_values),
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(E::NAME, id));
        }

        info!(
            "event=entity_update module=repo status=ok entity={} id={id} fields={}",
            E::NAME,
            changes.len()
        );
        self.require_by_id(id)
    }

    fn destroy(&self, instance: &E) -> RepoResult<()> {
        let id = instance.id();
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", E::TABLE), [id])?;
        if changed == 0 {
            return Err(RepoError::not_found(E::NAME, id));
        }

        info!(
            "event=entity_destroy module=repo status=ok entity={} id={id}",
            E::NAME
        );
        Ok(())
    }

    fn destroy_where(&self, filter: &Filter<E::Field>) -> RepoResult<usize> {
        validate_filter::<E>(filter)?;

        let (where_clause, bind_values) = filter.to_where_clause();
        let removed = self.conn.execute(
            &format!("DELETE FROM {}{where_clause};", E::TABLE),
            params_from_iter(bind_values),
        )?;

        info!(
            "event=entity_destroy_where module=repo status=ok entity={} terms={} removed={removed}",
            E::NAME,
            filter.terms().len()
        );
        Ok(removed)
    }

    fn count(&self) -> RepoResult<u64> {
        self.count_where(&Filter::all())
    }

    fn count_where(&self, filter: &Filter<E::Field>) -> RepoResult<u64> {
        validate_filter::<E>(filter)?;

        let (where_clause, bind_values) = filter.to_where_clause();
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}{where_clause};", E::TABLE),
            params_from_iter(bind_values),
            |row| row.get(0),
        )?;
        count_to_u64(count)
    }
}
