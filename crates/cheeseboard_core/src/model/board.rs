//! Board entity.
//!
//! # Invariants
//! - `user_id` is the owning user's foreign key and stays `None` until set.
//! - `kind` is stored in column `type` and serialized as `type`.

use super::query::Changes;
use super::schema::{Entity, EntityField, FieldSpec, FieldType};
use super::user::UserId;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub type BoardId = i64;

static BOARD_FIELDS: [FieldSpec; 5] = [
    FieldSpec::id(),
    FieldSpec::required_text("type", "type"),
    FieldSpec::required_text("description", "description"),
    FieldSpec {
        name: "rating",
        column: "rating",
        ty: FieldType::Integer,
        required: true,
        nullable: false,
        generated: false,
    },
    FieldSpec {
        name: "userId",
        column: "user_id",
        ty: FieldType::Integer,
        required: false,
        nullable: true,
        generated: false,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub rating: i64,
    /// Owning user, serialized as `userId`.
    pub user_id: Option<UserId>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardField {
    Id,
    Type,
    Description,
    Rating,
    UserId,
}

impl EntityField for BoardField {
    fn spec(self) -> &'static FieldSpec {
        match self {
            Self::Id => &BOARD_FIELDS[0],
            Self::Type => &BOARD_FIELDS[1],
            Self::Description => &BOARD_FIELDS[2],
            Self::Rating => &BOARD_FIELDS[3],
            Self::UserId => &BOARD_FIELDS[4],
        }
    }
}

impl Entity for Board {
    type Field = BoardField;

    const NAME: &'static str = "board";
    const TABLE: &'static str = "boards";

    fn fields() -> &'static [FieldSpec] {
        &BOARD_FIELDS
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            kind: row.get("type")?,
            description: row.get("description")?,
            rating: row.get("rating")?,
            user_id: row.get("user_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Create payload for [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoard {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub rating: i64,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
}

impl NewBoard {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, rating: i64) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            rating,
            user_id: None,
        }
    }

    /// Sets the owning user at creation time.
    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl From<NewBoard> for Changes<BoardField> {
    fn from(value: NewBoard) -> Self {
        let changes = Changes::new()
            .set(BoardField::Type, value.kind)
            .set(BoardField::Description, value.description)
            .set(BoardField::Rating, value.rating);
        match value.user_id {
            Some(user_id) => changes.set(BoardField::UserId, user_id),
            None => changes,
        }
    }
}

impl Changes<BoardField> {
    pub fn kind(self, kind: impl Into<String>) -> Self {
        self.set(BoardField::Type, kind.into())
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.set(BoardField::Description, description.into())
    }

    pub fn rating(self, rating: i64) -> Self {
        self.set(BoardField::Rating, rating)
    }

    /// `None` clears the owner.
    pub fn user_id(self, user_id: Option<UserId>) -> Self {
        self.set(BoardField::UserId, user_id)
    }
}
