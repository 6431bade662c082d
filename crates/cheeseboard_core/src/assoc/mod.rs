//! Association runtime.
//!
//! # Responsibility
//! - `Ownership`: User has many Boards, Board belongs to one User
//!   (foreign key `boards.user_id`).
//! - `CheeseBoards`: Cheese and Board belong to many of each other through
//!   the `Cheese_Board` link table.
//!
//! # Invariants
//! - Association calls on a missing endpoint fail with `RepoError::NotFound`.
//! - A traversal right after a link returns exactly the linked rows.

pub mod cheese_boards;
pub mod ownership;

pub use cheese_boards::CheeseBoards;
pub use ownership::Ownership;
