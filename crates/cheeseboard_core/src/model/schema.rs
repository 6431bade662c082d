//! Field declarations shared by all entities.

use rusqlite::types::Value;
use rusqlite::Row;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// Semantic type of one entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// Declaration of one entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (`userId`, `type`, ...).
    pub name: &'static str,
    /// Storage column name.
    pub column: &'static str,
    pub ty: FieldType,
    /// Must be supplied on create.
    pub required: bool,
    /// Accepts `FieldValue::Null`.
    pub nullable: bool,
    /// Assigned by storage; never writable.
    pub generated: bool,
}

impl FieldSpec {
    pub(crate) const fn id() -> Self {
        Self {
            name: "id",
            column: "id",
            ty: FieldType::Integer,
            required: false,
            nullable: false,
            generated: true,
        }
    }

    pub(crate) const fn required_text(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            ty: FieldType::Text,
            required: true,
            nullable: false,
            generated: false,
        }
    }
}

/// Dynamically typed value bound to one field in a change set or filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Semantic type carried by this value, `None` for `Null`.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            Self::Integer(_) => Some(FieldType::Integer),
            Self::Text(_) => Some(FieldType::Text),
            Self::Null => None,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Null => "null",
        }
    }

    pub(crate) fn to_sql_value(&self) -> Value {
        match self {
            Self::Integer(value) => Value::Integer(*value),
            Self::Text(value) => Value::Text(value.clone()),
            Self::Null => Value::Null,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Typed identifier of one field of a specific entity.
pub trait EntityField: Copy + Debug + Eq + Hash {
    fn spec(self) -> &'static FieldSpec;
}

/// A persisted record type with a system-generated integer identifier.
pub trait Entity: Sized {
    type Field: EntityField;

    /// Singular entity name used in errors and log events.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;

    /// Ordered field declarations, `id` first.
    fn fields() -> &'static [FieldSpec];

    fn id(&self) -> i64;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// `SELECT` prefix listing every declared column plus timestamps.
pub(crate) fn select_sql<E: Entity>() -> String {
    let columns = E::fields()
        .iter()
        .map(|spec| spec.column)
        .chain(["created_at", "updated_at"])
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {columns} FROM {}", E::TABLE)
}
