//! Typed change sets and equality filters.
//!
//! Both are ordered lists of `(field, value)` pairs keyed by an entity's
//! field enum, so a `Filter<UserField>` can never be applied to boards.

use super::schema::{EntityField, FieldValue};

/// Field assignments for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changes<F> {
    entries: Vec<(F, FieldValue)>,
}

impl<F> Default for Changes<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: EntityField> Changes<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one assignment. Duplicates are rejected at validation time.
    pub fn set(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.entries.push((field, value.into()));
        self
    }

    pub fn get(&self, field: F) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(current, _)| *current == field)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> &[(F, FieldValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Conjunctive equality predicate over one entity's fields.
///
/// An empty filter matches every row. `FieldValue::Null` matches `IS NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<F> {
    terms: Vec<(F, FieldValue)>,
}

impl<F> Default for Filter<F> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<F: EntityField> Filter<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches every row (`where: {}`).
    pub fn all() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.terms.push((field, value.into()));
        self
    }

    pub fn terms(&self) -> &[(F, FieldValue)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Renders the `WHERE` clause and its bind values.
    ///
    /// Returns an empty clause for an empty filter.
    pub(crate) fn to_where_clause(&self) -> (String, Vec<rusqlite::types::Value>) {
        if self.terms.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut predicates = Vec::with_capacity(self.terms.len());
        let mut bind_values = Vec::new();
        for (field, value) in &self.terms {
            let column = field.spec().column;
            if matches!(value, FieldValue::Null) {
                predicates.push(format!("{column} IS NULL"));
            } else {
                predicates.push(format!("{column} = ?"));
                bind_values.push(value.to_sql_value());
            }
        }

        (format!(" WHERE {}", predicates.join(" AND ")), bind_values)
    }
}
