use super::*;

#[tokio::test]
async fn roundtrips_values_through_sqlite() {
    let store = SqliteKeyValueStore::open("sqlite::memory:").await.expect("db");
    store.put("auth_token", "tok-123").await.expect("put");
    assert_eq!(
        store.get("auth_token").await.expect("get"),
        Some("tok-123".to_string())
    );
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let store = SqliteKeyValueStore::open("sqlite::memory:").await.expect("db");
    assert_eq!(store.get("absent").await.expect("get"), None);
}

#[tokio::test]
async fn put_overwrites_existing_value() {
    let store = SqliteKeyValueStore::open("sqlite::memory:").await.expect("db");
    store.put("auth_token", "old").await.expect("put");
    store.put("auth_token", "new").await.expect("put");
    assert_eq!(
        store.get("auth_token").await.expect("get"),
        Some("new".to_string())
    );
}

#[tokio::test]
async fn remove_deletes_entry_and_tolerates_missing_key() {
    let store = SqliteKeyValueStore::open("sqlite::memory:").await.expect("db");
    store.put("auth_user", "{}").await.expect("put");
    store.remove("auth_user").await.expect("remove");
    assert_eq!(store.get("auth_user").await.expect("get"), None);
    store.remove("auth_user").await.expect("second remove");
}

#[tokio::test]
async fn values_survive_reopening_the_same_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db_path = temp.path().join("session.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let store = SqliteKeyValueStore::open(&database_url).await.expect("db");
        store.put("auth_token", "persisted").await.expect("put");
        store.pool().close().await;
    }

    let reopened = SqliteKeyValueStore::open(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.get("auth_token").await.expect("get"),
        Some("persisted".to_string())
    );
}

#[tokio::test]
async fn creates_parent_dir_when_missing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let db_path = temp.path().join("nested").join("session.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let store = SqliteKeyValueStore::open(&database_url).await.expect("db");
    store.health_check().await.expect("health check");
    assert!(db_path.exists(), "database file should exist: {}", db_path.display());
}

#[tokio::test]
async fn memory_store_roundtrip_and_remove() {
    let store = MemoryKeyValueStore::new();
    store.put("auth_token", "tok").await.expect("put");
    assert_eq!(
        store.get("auth_token").await.expect("get"),
        Some("tok".to_string())
    );
    store.remove("auth_token").await.expect("remove");
    assert_eq!(store.get("auth_token").await.expect("get"), None);
}
