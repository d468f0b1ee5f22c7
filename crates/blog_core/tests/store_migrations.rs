use blog_core::db::migrations::{current_user_version, latest_version};
use blog_core::db::{open_store, open_store_in_memory, DbError, StoreOptions};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn open_store_in_memory_applies_all_migrations() {
    let store = open_store_in_memory().unwrap();
    assert_eq!(store.location(), ":memory:");
    assert_eq!(store.collection("blog").count().unwrap(), 0);
}

#[test]
fn opening_same_store_twice_is_idempotent_and_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blogdb.sqlite3");

    let first = open_store(&path, &StoreOptions::default()).unwrap();
    first
        .collection("blog")
        .insert_one(&serde_json::json!({ "title": "kept" }))
        .unwrap();
    first.close().unwrap();

    let conn = Connection::open(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "documents");
    drop(conn);

    let second = open_store(&path, &StoreOptions::default()).unwrap();
    assert_eq!(second.collection("blog").count().unwrap(), 1);
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path, &StoreOptions::default()).unwrap_err();
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
fn memory_path_opens_private_store_with_custom_options() {
    let options = StoreOptions {
        busy_timeout: Duration::from_millis(250),
    };
    let store = open_store(":memory:", &options).unwrap();
    assert_eq!(store.location(), ":memory:");
    store.close().unwrap();
}

#[test]
fn collections_are_isolated() {
    let store = open_store_in_memory().unwrap();
    let id = store
        .collection("blog")
        .insert_one(&serde_json::json!({ "title": "a" }))
        .unwrap();

    let other: Option<serde_json::Value> = store.collection("drafts").find_one_by_id(&id).unwrap();
    assert!(other.is_none());

    let found: Option<serde_json::Value> = store.collection("blog").find_one_by_id(&id).unwrap();
    assert_eq!(found.unwrap()["title"], "a");
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
