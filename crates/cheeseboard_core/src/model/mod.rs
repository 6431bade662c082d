//! Cheese board domain model.
//!
//! # Responsibility
//! - Declare the field set and semantic types of every entity.
//! - Provide typed change sets and filters consumed by the repository layer.
//! - Validate writes before they reach storage.
//!
//! # Invariants
//! - Every entity row is identified by a system-generated integer `id`.
//! - `id` is never part of a write; it is assigned once and never reassigned.

pub mod board;
pub mod cheese;
pub mod link;
pub mod query;
pub mod schema;
pub mod user;
pub mod validate;
