//! User entity.
//!
//! A user owns zero or more boards (`boards.user_id`).

use super::query::Changes;
use super::schema::{Entity, EntityField, FieldSpec};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

static USER_FIELDS: [FieldSpec; 3] = [
    FieldSpec::id(),
    FieldSpec::required_text("name", "name"),
    FieldSpec::required_text("email", "email"),
];

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Alternate lookup key. Not unique; lookups return the lowest id.
    pub email: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Email,
}

impl EntityField for UserField {
    fn spec(self) -> &'static FieldSpec {
        match self {
            Self::Id => &USER_FIELDS[0],
            Self::Name => &USER_FIELDS[1],
            Self::Email => &USER_FIELDS[2],
        }
    }
}

impl Entity for User {
    type Field = UserField;

    const NAME: &'static str = "user";
    const TABLE: &'static str = "users";

    fn fields() -> &'static [FieldSpec] {
        &USER_FIELDS
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Create payload for [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl From<NewUser> for Changes<UserField> {
    fn from(value: NewUser) -> Self {
        Changes::new()
            .set(UserField::Name, value.name)
            .set(UserField::Email, value.email)
    }
}

impl Changes<UserField> {
    pub fn name(self, name: impl Into<String>) -> Self {
        self.set(UserField::Name, name.into())
    }

    pub fn email(self, email: impl Into<String>) -> Self {
        self.set(UserField::Email, email.into())
    }
}
