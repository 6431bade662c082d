//! Write/filter validation against entity field declarations.
//!
//! # Invariants
//! - A failed validation has no storage side effect.
//! - Generated fields (`id`) are never accepted in a change set.

use super::query::{Changes, Filter};
use super::schema::{Entity, EntityField, FieldSpec, FieldType, FieldValue};
use std::collections::HashSet;

/// Which write path a change set is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every required field must be present.
    Create,
    /// Only the supplied fields are checked.
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity}.{field} is required")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}.{field} expects {expected}, got {actual}")]
    TypeMismatch {
        entity: &'static str,
        field: &'static str,
        expected: FieldType,
        actual: &'static str,
    },
    #[error("{entity}.{field} cannot be null")]
    NullNotAllowed {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}.{field} is generated and cannot be written")]
    GeneratedField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}.{field} is assigned more than once")]
    DuplicateField {
        entity: &'static str,
        field: &'static str,
    },
}

/// Validates a change set for `E` under the given write mode.
pub fn validate_changes<E: Entity>(
    changes: &Changes<E::Field>,
    mode: WriteMode,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (field, value) in changes.entries() {
        let spec = field.spec();
        if !seen.insert(*field) {
            return Err(ValidationError::DuplicateField {
                entity: E::NAME,
                field: spec.name,
            });
        }
        if spec.generated {
            return Err(ValidationError::GeneratedField {
                entity: E::NAME,
                field: spec.name,
            });
        }
        check_value::<E>(spec, value)?;
    }

    if mode == WriteMode::Create {
        let missing = E::fields()
            .iter()
            .filter(|spec| spec.required && !spec.generated)
            .find(|spec| {
                !changes
                    .entries()
                    .iter()
                    .any(|(field, _)| field.spec().column == spec.column)
            });
        if let Some(spec) = missing {
            return Err(ValidationError::MissingField {
                entity: E::NAME,
                field: spec.name,
            });
        }
    }

    Ok(())
}

/// Validates that every filter term carries a value of the field's type.
pub fn validate_filter<E: Entity>(filter: &Filter<E::Field>) -> Result<(), ValidationError> {
    for (field, value) in filter.terms() {
        let spec = field.spec();
        if let Some(actual) = value.field_type() {
            if actual != spec.ty {
                return Err(type_mismatch::<E>(spec, value));
            }
        }
    }
    Ok(())
}

fn check_value<E: Entity>(spec: &FieldSpec, value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Null if !spec.nullable => Err(ValidationError::NullNotAllowed {
            entity: E::NAME,
            field: spec.name,
        }),
        FieldValue::Null => Ok(()),
        other if other.field_type() != Some(spec.ty) => Err(type_mismatch::<E>(spec, other)),
        _ => Ok(()),
    }
}

fn type_mismatch<E: Entity>(spec: &FieldSpec, value: &FieldValue) -> ValidationError {
    ValidationError::TypeMismatch {
        entity: E::NAME,
        field: spec.name,
        expected: spec.ty,
        actual: value.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_changes, validate_filter, ValidationError, WriteMode};
    use crate::model::board::{Board, BoardField, NewBoard};
    use crate::model::query::{Changes, Filter};
    use crate::model::schema::{FieldType, FieldValue};
    use crate::model::user::{NewUser, User, UserField};

    #[test]
    fn create_accepts_complete_payload() {
        let changes: Changes<UserField> = NewUser::new("John Doe", "johndoe@example.com").into();
        assert!(validate_changes::<User>(&changes, WriteMode::Create).is_ok());
    }

    #[test]
    fn create_reports_first_missing_required_field() {
        let changes = Changes::new().set(UserField::Name, "John Doe");
        assert_eq!(
            validate_changes::<User>(&changes, WriteMode::Create),
            Err(ValidationError::MissingField {
                entity: "user",
                field: "email"
            })
        );
        assert!(validate_changes::<User>(&changes, WriteMode::Update).is_ok());
    }

    #[test]
    fn wrong_semantic_type_is_rejected() {
        let changes = Changes::new().set(BoardField::Rating, "five");
        assert_eq!(
            validate_changes::<Board>(&changes, WriteMode::Update),
            Err(ValidationError::TypeMismatch {
                entity: "board",
                field: "rating",
                expected: FieldType::Integer,
                actual: "text"
            })
        );
    }

    #[test]
    fn identifier_cannot_be_written() {
        let changes = Changes::new().set(UserField::Id, 7);
        assert!(matches!(
            validate_changes::<User>(&changes, WriteMode::Update),
            Err(ValidationError::GeneratedField { field: "id", .. })
        ));
    }

    #[test]
    fn empty_text_is_valid_but_null_is_rejected_for_required_fields() {
        let empty = Changes::new().set(UserField::Name, "");
        assert!(validate_changes::<User>(&empty, WriteMode::Update).is_ok());

        let null = Changes::new().set(UserField::Email, FieldValue::Null);
        assert!(matches!(
            validate_changes::<User>(&null, WriteMode::Update),
            Err(ValidationError::NullNotAllowed { field: "email", .. })
        ));
    }

    #[test]
    fn owner_foreign_key_accepts_null() {
        let changes: Changes<BoardField> = NewBoard::new("Cheese Board", "wood", 4).into();
        assert!(validate_changes::<Board>(&changes, WriteMode::Create).is_ok());

        let cleared = Changes::<BoardField>::new().user_id(None);
        assert!(validate_changes::<Board>(&cleared, WriteMode::Update).is_ok());
    }

    #[test]
    fn duplicate_assignment_is_rejected() {
        let changes = Changes::new()
            .set(UserField::Name, "a")
            .set(UserField::Name, "b");
        assert!(matches!(
            validate_changes::<User>(&changes, WriteMode::Update),
            Err(ValidationError::DuplicateField { field: "name", .. })
        ));
    }

    #[test]
    fn filter_type_mismatch_is_rejected() {
        let filter = Filter::new().where_eq(BoardField::Type, 3);
        assert!(matches!(
            validate_filter::<Board>(&filter),
            Err(ValidationError::TypeMismatch { field: "type", .. })
        ));
        assert!(validate_filter::<Board>(&Filter::new().where_eq(BoardField::UserId, FieldValue::Null)).is_ok());
    }
}
