//! Cheese/Board many-to-many link.
//!
//! A link row is only a `(cheese_id, board_id)` pair. It is never addressed
//! by its own identifier.

use super::board::BoardId;
use super::cheese::CheeseId;
use serde::{Deserialize, Serialize};

/// Declaration of a many-to-many through table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpec {
    /// Association name as declared by callers (`Cheese_Board`).
    pub name: &'static str,
    pub table: &'static str,
    pub cheese_column: &'static str,
    pub board_column: &'static str,
}

/// The only through table in this schema.
pub static CHEESE_BOARD: LinkSpec = LinkSpec {
    name: "Cheese_Board",
    table: "cheese_boards",
    cheese_column: "cheese_id",
    board_column: "board_id",
};

/// One persisted link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheeseBoardLink {
    pub cheese_id: CheeseId,
    pub board_id: BoardId,
}

/// Options for link creation.
///
/// `through: None` uses the declared association; naming `CHEESE_BOARD`
/// explicitly is equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkOptions {
    pub through: Option<&'static LinkSpec>,
}

impl LinkOptions {
    pub fn through(spec: &'static LinkSpec) -> Self {
        Self {
            through: Some(spec),
        }
    }
}
