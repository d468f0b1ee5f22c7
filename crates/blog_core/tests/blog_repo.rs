use blog_core::db::{open_store, open_store_in_memory, ObjectIdError, StoreOptions};
use blog_core::{BlogFields, BlogRepository, DbError, RepoError, SqliteBlogRepository};
use rusqlite::Connection;
use std::sync::Arc;

fn repo() -> SqliteBlogRepository {
    SqliteBlogRepository::new(Arc::new(open_store_in_memory().unwrap()))
}

#[test]
fn insert_and_find_roundtrip() {
    let repo = repo();
    let fields = BlogFields::new("a1", "T", "C");

    let id = repo.insert_blog(&fields).unwrap();
    let (found_id, found) = repo.find_blog(&id.to_hex()).unwrap();

    assert_eq!(found_id, id);
    assert_eq!(found, fields);
}

#[test]
fn find_accepts_uppercase_hex() {
    let repo = repo();
    let id = repo.insert_blog(&BlogFields::new("a", "b", "c")).unwrap();

    let (found_id, _) = repo.find_blog(&id.to_hex().to_uppercase()).unwrap();
    assert_eq!(found_id, id);
}

#[test]
fn identical_inserts_get_distinct_ids() {
    let repo = repo();
    let fields = BlogFields::new("same", "same", "same");

    let first = repo.insert_blog(&fields).unwrap();
    let second = repo.insert_blog(&fields).unwrap();
    assert_ne!(first, second);
}

#[test]
fn unassigned_id_returns_not_found() {
    let repo = repo();
    let err = repo.find_blog("ffffffffffffffffffffffff").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id.to_hex() == "ffffffffffffffffffffffff"));
}

#[test]
fn malformed_ids_return_malformed_id() {
    let repo = repo();

    for input in ["not-an-id", "", "ffff", "gggggggggggggggggggggggg", "ffffffffffffffffffffffff0"] {
        let err = repo.find_blog(input).unwrap_err();
        assert!(
            matches!(err, RepoError::MalformedId(_)),
            "expected malformed id for `{input}`, got {err}"
        );
    }

    let err = repo.find_blog("abc").unwrap_err();
    assert!(matches!(
        err,
        RepoError::MalformedId(ObjectIdError::InvalidLength { length: 3, .. })
    ));
}

#[test]
fn malformed_id_is_rejected_before_store_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sqlite3");
    let store = Arc::new(open_store(&path, &StoreOptions::default()).unwrap());
    let repo = SqliteBlogRepository::new(store);

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("DROP TABLE documents;").unwrap();
    drop(conn);

    let err = repo.find_blog("not-an-id").unwrap_err();
    assert!(matches!(err, RepoError::MalformedId(_)));

    let err = repo.find_blog("ffffffffffffffffffffffff").unwrap_err();
    assert!(matches!(err, RepoError::Storage(DbError::Sqlite(_))));
}

#[test]
fn insert_into_broken_store_returns_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sqlite3");
    let store = Arc::new(open_store(&path, &StoreOptions::default()).unwrap());
    let repo = SqliteBlogRepository::new(store);

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("DROP TABLE documents;").unwrap();
    drop(conn);

    let err = repo.insert_blog(&BlogFields::new("a", "b", "c")).unwrap_err();
    assert!(matches!(err, RepoError::Storage(_)));
}

#[test]
fn undecodable_document_returns_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.sqlite3");
    let store = Arc::new(open_store(&path, &StoreOptions::default()).unwrap());
    let repo = SqliteBlogRepository::new(store);
    let id = repo.insert_blog(&BlogFields::new("a", "b", "c")).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE documents SET body = '{\"title\": 42}' WHERE id = ?1;",
        [id.bytes().as_slice()],
    )
    .unwrap();
    drop(conn);

    let err = repo.find_blog(&id.to_hex()).unwrap_err();
    assert!(matches!(err, RepoError::Storage(DbError::Document(_))));
}

#[test]
fn custom_collection_is_isolated_from_default() {
    let store = Arc::new(open_store_in_memory().unwrap());
    let default_repo = SqliteBlogRepository::new(Arc::clone(&store));
    let archive_repo = SqliteBlogRepository::with_collection(store, "archive");
    assert_eq!(archive_repo.collection_name(), "archive");

    let id = archive_repo
        .insert_blog(&BlogFields::new("a", "b", "c"))
        .unwrap();

    assert!(archive_repo.find_blog(&id.to_hex()).is_ok());
    assert!(matches!(
        default_repo.find_blog(&id.to_hex()).unwrap_err(),
        RepoError::NotFound(_)
    ));
}
