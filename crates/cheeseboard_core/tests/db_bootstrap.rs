use cheeseboard_core::db::migrations::latest_version;
use cheeseboard_core::db::{open_db, open_db_in_memory, table_exists, DbError, MANAGED_TABLES};
use cheeseboard_core::{
    CoreConfig, LinkOptions, NewBoard, NewCheese, NewUser, RepoError, Repository, Store,
    SyncOptions, UserRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in MANAGED_TABLES {
        assert!(table_exists(&conn, table).unwrap(), "table {table} does not exist");
    }
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cheeseboard.db");

    let store = Store::open(&path).unwrap();
    store
        .users()
        .unwrap()
        .create(NewUser::new("John Doe", "johndoe@example.com"))
        .unwrap();
    store.close().unwrap();

    let reopened = Store::open(&path).unwrap();
    assert_eq!(reopened.users().unwrap().count().unwrap(), 1);
    assert_eq!(schema_version(reopened.connection()), latest_version());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match UserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_users_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        UserRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("users"))
    ));
}

#[test]
fn drop_all_removes_tables_until_next_sync() {
    let mut store = Store::open_in_memory().unwrap();
    store.drop_all().unwrap();

    for table in MANAGED_TABLES {
        assert!(!table_exists(store.connection(), table).unwrap());
    }
    assert!(matches!(
        store.users(),
        Err(RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));

    store.sync(SyncOptions::default()).unwrap();
    let user = store
        .users()
        .unwrap()
        .create(NewUser::new("John Doe", "johndoe@example.com"))
        .unwrap();
    assert_eq!(user.id, 1);
}

#[test]
fn sync_without_force_keeps_rows_and_force_restarts_identifiers() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .users()
        .unwrap()
        .create(NewUser::new("John Doe", "johndoe@example.com"))
        .unwrap();

    store.sync(SyncOptions::default()).unwrap();
    assert_eq!(store.users().unwrap().count().unwrap(), 1);

    store.sync(SyncOptions::force()).unwrap();
    let users = store.users().unwrap();
    assert_eq!(users.count().unwrap(), 0);
    let user = users
        .create(NewUser::new("Jane Doe", "janedoe@example.com"))
        .unwrap();
    assert_eq!(user.id, 1);
}

#[test]
fn sync_recreates_tables_dropped_outside_the_store() {
    let mut store = Store::open_in_memory().unwrap();
    let user = store
        .users()
        .unwrap()
        .create(NewUser::new("John Doe", "johndoe@example.com"))
        .unwrap();
    store
        .connection()
        .execute_batch("DROP TABLE cheese_boards; DROP TABLE boards;")
        .unwrap();
    assert!(matches!(
        store.boards(),
        Err(RepoError::MissingRequiredTable("boards"))
    ));

    store.sync(SyncOptions::default()).unwrap();
    for table in MANAGED_TABLES {
        assert!(table_exists(store.connection(), table).unwrap());
    }
    assert_eq!(store.users().unwrap().find_by_id(user.id).unwrap(), Some(user));

    let board = store
        .boards()
        .unwrap()
        .create(NewBoard::new("Slate", "Dark slate board", 3))
        .unwrap();
    let brie = store
        .cheeses()
        .unwrap()
        .create(NewCheese::new("Brie", "Soft cow's milk cheese"))
        .unwrap();
    assert!(store
        .cheese_boards()
        .unwrap()
        .add_board_to_cheese(&brie, &board, LinkOptions::default())
        .unwrap());
}

#[test]
fn link_table_carries_timestamps() {
    let store = Store::open_in_memory().unwrap();
    let mut stmt = store
        .connection()
        .prepare("SELECT name FROM pragma_table_info('cheese_boards') ORDER BY cid;")
        .unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        columns,
        vec!["cheese_id", "board_id", "created_at", "updated_at"]
    );
}

#[test]
fn store_from_config_opens_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = CoreConfig {
        db_path: Some(dir.path().join("configured.db")),
        ..CoreConfig::default()
    };

    let store = Store::from_config(&config).unwrap();
    assert_eq!(store.boards().unwrap().count().unwrap(), 0);
    store.close().unwrap();
    assert!(dir.path().join("configured.db").exists());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
