//! Cheese entity.
//!
//! Related to boards many-to-many through the `Cheese_Board` link.

use super::query::Changes;
use super::schema::{Entity, EntityField, FieldSpec};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub type CheeseId = i64;

static CHEESE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::id(),
    FieldSpec::required_text("title", "title"),
    FieldSpec::required_text("description", "description"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cheese {
    pub id: CheeseId,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheeseField {
    Id,
    Title,
    Description,
}

impl EntityField for CheeseField {
    fn spec(self) -> &'static FieldSpec {
        match self {
            Self::Id => &CHEESE_FIELDS[0],
            Self::Title => &CHEESE_FIELDS[1],
            Self::Description => &CHEESE_FIELDS[2],
        }
    }
}

impl Entity for Cheese {
    type Field = CheeseField;

    const NAME: &'static str = "cheese";
    const TABLE: &'static str = "cheeses";

    fn fields() -> &'static [FieldSpec] {
        &CHEESE_FIELDS
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheese {
    pub title: String,
    pub description: String,
}

impl NewCheese {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<NewCheese> for Changes<CheeseField> {
    fn from(value: NewCheese) -> Self {
        Changes::new()
            .set(CheeseField::Title, value.title)
            .set(CheeseField::Description, value.description)
    }
}

impl Changes<CheeseField> {
    pub fn title(self, title: impl Into<String>) -> Self {
        self.set(CheeseField::Title, title.into())
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.set(CheeseField::Description, description.into())
    }
}
