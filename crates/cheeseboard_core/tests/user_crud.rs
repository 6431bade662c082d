use cheeseboard_core::{
    Changes, Filter, NewUser, RepoError, Repository, Store, User, UserField, ValidationError,
};

fn john() -> NewUser {
    NewUser::new("John Doe", "johndoe@example.com")
}

#[test]
fn create_assigns_first_identifier_and_persists_fields() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();

    let user = users.create(john()).unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "John Doe");
    assert_eq!(user.email, "johndoe@example.com");
}

#[test]
fn find_one_by_email_returns_created_user() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let created = users.create(john()).unwrap();

    let found = users
        .find_one(&Filter::new().where_eq(UserField::Email, "johndoe@example.com"))
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "John Doe");
    assert_eq!(found, created);
}

#[test]
fn find_one_with_full_field_filter_matches_created_row() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let created = users.create(john()).unwrap();

    let filter = Filter::new()
        .where_eq(UserField::Id, created.id)
        .where_eq(UserField::Name, "John Doe")
        .where_eq(UserField::Email, "johndoe@example.com");
    assert_eq!(users.find_one(&filter).unwrap(), Some(created));
}

#[test]
fn find_one_without_match_returns_none() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    users.create(john()).unwrap();

    let missing = users
        .find_one(&Filter::new().where_eq(UserField::Email, "nobody@example.com"))
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn find_one_prefers_lowest_identifier_when_several_rows_match() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let first = users.create(john()).unwrap();
    users
        .create(NewUser::new("Johnny Doe", "johndoe@example.com"))
        .unwrap();

    let found = users
        .find_one(&Filter::new().where_eq(UserField::Email, "johndoe@example.com"))
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);
    assert_eq!(found.name, "John Doe");

    let all = users
        .find_all(&Filter::new().where_eq(UserField::Email, "johndoe@example.com"))
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].id < all[1].id);
}

#[test]
fn update_changes_only_the_named_field() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let user = users.create(john()).unwrap();

    let updated = users
        .update(&user, Changes::<UserField>::new().name("Jane Doe"))
        .unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.name, "Jane Doe");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.created_at, user.created_at);

    let reloaded = users.find_by_id(user.id).unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[test]
fn destroy_removes_row_and_restores_count() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    assert_eq!(users.count().unwrap(), 0);

    let user = users.create(john()).unwrap();
    assert_eq!(users.count().unwrap(), 1);

    users.destroy(&user).unwrap();
    assert_eq!(users.count().unwrap(), 0);
    assert!(users.find_by_id(user.id).unwrap().is_none());
}

#[test]
fn destroying_missing_row_returns_not_found() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let user = users.create(john()).unwrap();
    users.destroy(&user).unwrap();

    let err = users.destroy(&user).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "user", id } if id == user.id
    ));

    let err = users
        .update(&user, Changes::<UserField>::new().name("Ghost"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn identifiers_are_not_reused_after_destroy() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();

    let first = users.create(john()).unwrap();
    users.destroy_where(&Filter::all()).unwrap();
    let second = users.create(john()).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn create_with_missing_field_has_no_effect() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();

    let err = users
        .create(Changes::<UserField>::new().name("No Email"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField {
            entity: "user",
            field: "email"
        })
    ));
    assert_eq!(users.count().unwrap(), 0);
}

#[test]
fn empty_name_is_a_valid_text_value() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();

    let user = users.create(NewUser::new("", "x@example.com")).unwrap();
    assert_eq!(user.name, "");
    assert_eq!(users.find_by_id(user.id).unwrap(), Some(user));
}

#[test]
fn update_with_wrong_type_leaves_row_untouched() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let user = users.create(john()).unwrap();

    let err = users
        .update(&user, Changes::new().set(UserField::Name, 42))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::TypeMismatch { field: "name", .. })
    ));

    let err = users
        .update(&user, Changes::new().set(UserField::Id, 99))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::GeneratedField { field: "id", .. })
    ));

    assert_eq!(users.find_by_id(user.id).unwrap(), Some(user));
}

#[test]
fn user_serializes_with_camel_case_wire_shape() {
    let store = Store::open_in_memory().unwrap();
    let users = store.users().unwrap();
    let user = users.create(john()).unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "John Doe");
    assert_eq!(json["email"], "johndoe@example.com");
    assert!(json.get("createdAt").is_some());

    let back: User = serde_json::from_value(json).unwrap();
    assert_eq!(back, user);
}
