use chrono::Utc;
use msgbook_core::{
    MessageRepository, MessageValidationError, NewMessage, SqliteMessageStore, StorageError,
    StoreConfig,
};
use std::collections::HashSet;

fn temp_store() -> (tempfile::TempDir, SqliteMessageStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteMessageStore::new(StoreConfig::new(dir.path().join("database.db")));
    store.initialize().unwrap();
    (dir, store)
}

#[test]
fn fresh_store_lists_empty() {
    let (_dir, store) = temp_store();
    assert!(store.list_messages().unwrap().is_empty());
}

#[test]
fn initialize_twice_is_harmless() {
    let (_dir, store) = temp_store();
    store
        .create_message(&NewMessage::new("first", "ada"))
        .unwrap();

    store.initialize().unwrap();
    store.initialize().unwrap();

    assert_eq!(store.list_messages().unwrap().len(), 1);
}

#[test]
fn create_assigns_id_and_todays_date() {
    let (_dir, store) = temp_store();
    let before = Utc::now().date_naive();

    let id = store
        .create_message(&NewMessage::new("hello", "ada"))
        .unwrap();

    let after = Utc::now().date_naive();
    let messages = store.list_messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, id);
    assert_eq!(messages[0].content, "hello");
    assert_eq!(messages[0].author, "ada");
    assert!(messages[0].created == before || messages[0].created == after);
}

#[test]
fn list_keeps_insertion_order_with_distinct_ids() {
    let (_dir, store) = temp_store();
    let created: Vec<_> = (0..5)
        .map(|i| {
            store
                .create_message(&NewMessage::new(format!("message {i}"), "ada"))
                .unwrap()
        })
        .collect();

    let messages = store.list_messages().unwrap();
    let ids: Vec<_> = messages.iter().map(|message| message.id).collect();
    assert_eq!(ids, created);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
    assert_eq!(messages[4].content, "message 4");
}

#[test]
fn quoted_sql_is_stored_literally() {
    let (_dir, store) = temp_store();
    store
        .create_message(&NewMessage::new("before", "ada"))
        .unwrap();

    let payload = "x'); DROP TABLE message;--";
    store
        .create_message(&NewMessage::new(payload, "a"))
        .unwrap();

    let messages = store.list_messages().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, payload);
    assert_eq!(messages[1].author, "a");
}

#[test]
fn store_rejects_empty_fields_defensively() {
    let (_dir, store) = temp_store();

    let err = store
        .create_message(&NewMessage::new("content", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Validation(MessageValidationError::EmptyAuthor)
    ));
    assert!(store.list_messages().unwrap().is_empty());
}

#[test]
fn failed_insert_leaves_no_row_behind() {
    let (dir, store) = temp_store();
    store.create_message(&NewMessage::new("one", "ada")).unwrap();

    let conn = rusqlite::Connection::open(dir.path().join("database.db")).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_insert BEFORE INSERT ON message
         BEGIN
             SELECT RAISE(ABORT, 'locked');
         END;",
    )
    .unwrap();
    drop(conn);

    let err = store
        .create_message(&NewMessage::new("two", "ada"))
        .unwrap_err();
    assert!(matches!(err, StorageError::Db(_)));
    assert!(err.to_string().contains("locked"));

    let messages = store.list_messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "one");
}

#[test]
fn ids_are_not_reused_after_external_delete() {
    let (dir, store) = temp_store();
    let first = store.create_message(&NewMessage::new("one", "ada")).unwrap();

    let conn = rusqlite::Connection::open(dir.path().join("database.db")).unwrap();
    conn.execute("DELETE FROM message;", []).unwrap();
    drop(conn);

    let second = store.create_message(&NewMessage::new("two", "ada")).unwrap();
    assert!(second > first);
}

#[test]
fn unopenable_path_reports_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteMessageStore::new(StoreConfig::new(
        dir.path().join("missing").join("nested").join("database.db"),
    ));

    assert!(matches!(
        store.initialize(),
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        store.list_messages(),
        Err(StorageError::Unavailable(_))
    ));
}
