use super::*;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use storage::MemoryKeyValueStore;

struct FailingKeyValueStore {
    fail_reads: bool,
    fail_writes: bool,
    fail_removes: bool,
}

impl FailingKeyValueStore {
    fn writes() -> Self {
        Self {
            fail_reads: false,
            fail_writes: true,
            fail_removes: false,
        }
    }

    fn removes() -> Self {
        Self {
            fail_reads: false,
            fail_writes: false,
            fail_removes: true,
        }
    }

    fn reads() -> Self {
        Self {
            fail_reads: true,
            fail_writes: false,
            fail_removes: false,
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(anyhow!("disk unavailable"));
        }
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("disk full"));
        }
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        if self.fail_removes {
            return Err(anyhow!("disk unavailable"));
        }
        Ok(())
    }
}

fn sample_driver() -> Driver {
    Driver {
        id: "drv-1".to_string(),
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9999900000".to_string(),
        address: "12 MG Road".to_string(),
    }
}

#[tokio::test]
async fn initialize_without_persisted_data_is_unauthenticated() {
    let manager = SessionManager::new(Arc::new(MemoryKeyValueStore::new()));
    let session = manager.initialize().await;
    assert!(!session.is_authenticated());
    assert!(!session.is_loading);
    assert_eq!(session.token, None);
    assert_eq!(session.driver, None);
}

#[tokio::test]
async fn login_then_fresh_initialize_restores_the_session() {
    let store = Arc::new(MemoryKeyValueStore::new());

    let manager = SessionManager::new(store.clone());
    manager.initialize().await;
    manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect("login");

    // Simulated process restart: new manager over the same store.
    let restarted = SessionManager::new(store);
    let session = restarted.initialize().await;
    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("tok-abc"));
    assert_eq!(session.driver, Some(sample_driver()));
}

#[tokio::test]
async fn logout_then_initialize_is_unauthenticated() {
    let store = Arc::new(MemoryKeyValueStore::new());

    let manager = SessionManager::new(store.clone());
    manager.initialize().await;
    manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect("login");
    manager.logout().await.expect("logout");

    let restarted = SessionManager::new(store);
    let session = restarted.initialize().await;
    assert!(!session.is_authenticated());
    assert_eq!(session.token, None);
    assert_eq!(session.driver, None);
}

#[tokio::test]
async fn failed_login_persistence_leaves_state_unauthenticated() {
    let manager = SessionManager::new(Arc::new(FailingKeyValueStore::writes()));
    manager.initialize().await;

    let err = manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect_err("login must fail");
    assert!(matches!(err, ClientError::Persistence(_)));
    assert!(!manager.session().await.is_authenticated());
    assert_eq!(manager.token().await, None);
}

#[tokio::test]
async fn failed_logout_removal_leaves_session_intact() {
    let manager = SessionManager::new(Arc::new(FailingKeyValueStore::removes()));
    manager.initialize().await;
    manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect("login");

    let err = manager.logout().await.expect_err("logout must fail");
    assert!(matches!(err, ClientError::Persistence(_)));

    let session = manager.session().await;
    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("tok-abc"));
}

#[tokio::test]
async fn storage_read_failure_degrades_to_unauthenticated() {
    let manager = SessionManager::new(Arc::new(FailingKeyValueStore::reads()));
    let session = manager.initialize().await;
    assert!(!session.is_authenticated());
    assert!(!session.is_loading);
}

#[tokio::test]
async fn corrupt_persisted_profile_is_treated_as_absent() {
    let store = Arc::new(MemoryKeyValueStore::new());
    store.put(AUTH_TOKEN_KEY, "tok-abc").await.expect("put");
    store.put(AUTH_USER_KEY, "not-json").await.expect("put");

    let manager = SessionManager::new(store);
    let session = manager.initialize().await;
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn repeat_initialize_is_a_no_op() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let manager = SessionManager::new(store);
    manager.initialize().await;
    manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect("login");

    let session = manager.initialize().await;
    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("tok-abc"));
}

#[tokio::test]
async fn update_driver_preserves_token_and_auth_flag() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let manager = SessionManager::new(store.clone());
    manager.initialize().await;
    manager
        .login("tok-abc".to_string(), sample_driver())
        .await
        .expect("login");

    let mut updated = sample_driver();
    updated.address = "44 Park Street".to_string();
    let session = manager.update_driver(updated.clone()).await.expect("update");

    assert!(session.is_authenticated());
    assert_eq!(session.token.as_deref(), Some("tok-abc"));
    assert_eq!(session.driver, Some(updated.clone()));

    // The replacement profile is what a restart restores.
    let restarted = SessionManager::new(store);
    let restored = restarted.initialize().await;
    assert_eq!(restored.driver, Some(updated));
}
