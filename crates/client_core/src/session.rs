use std::sync::Arc;

use shared::{domain::Driver, error::ClientError};
use storage::KeyValueStore;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const AUTH_USER_KEY: &str = "auth_user";

/// Point-in-time view of the authentication state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub driver: Option<Driver>,
    pub is_loading: bool,
}

impl Session {
    /// True iff token and profile are present and loading has completed.
    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.token.is_some() && self.driver.is_some()
    }
}

struct SessionState {
    token: Option<String>,
    driver: Option<Driver>,
    is_loading: bool,
    initialized: bool,
}

impl SessionState {
    fn snapshot(&self) -> Session {
        Session {
            token: self.token.clone(),
            driver: self.driver.clone(),
            is_loading: self.is_loading,
        }
    }
}

/// Owns the auth token and driver profile, backed by an injected
/// key-value store. One instance per running process; constructed
/// explicitly and handed to consumers rather than reached through a
/// global.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState {
                token: None,
                driver: None,
                is_loading: true,
                initialized: false,
            }),
        }
    }

    /// Restores a persisted session, if any. Meant to run once at startup;
    /// repeat calls are no-ops. Read failures degrade to an unauthenticated
    /// session rather than blocking startup.
    pub async fn initialize(&self) -> Session {
        {
            let state = self.state.read().await;
            if state.initialized {
                warn!("session manager already initialized; ignoring repeat call");
                return state.snapshot();
            }
        }

        let restored = self.read_persisted().await;

        let mut state = self.state.write().await;
        state.initialized = true;
        state.is_loading = false;
        match restored {
            Some((token, driver)) => {
                info!("restored persisted session");
                state.token = Some(token);
                state.driver = Some(driver);
            }
            None => {
                state.token = None;
                state.driver = None;
            }
        }
        state.snapshot()
    }

    async fn read_persisted(&self) -> Option<(String, Driver)> {
        let token = match self.store.get(AUTH_TOKEN_KEY).await {
            Ok(value) => value?,
            Err(err) => {
                error!(error = %err, "failed to read persisted auth token");
                return None;
            }
        };
        let user_json = match self.store.get(AUTH_USER_KEY).await {
            Ok(value) => value?,
            Err(err) => {
                error!(error = %err, "failed to read persisted driver profile");
                return None;
            }
        };
        match serde_json::from_str::<Driver>(&user_json) {
            Ok(driver) => Some((token, driver)),
            Err(err) => {
                error!(error = %err, "persisted driver profile is corrupt");
                None
            }
        }
    }

    /// Persists the credentials first; in-memory state only flips to
    /// authenticated once both writes succeeded.
    pub async fn login(&self, token: String, driver: Driver) -> Result<Session, ClientError> {
        let user_json = serde_json::to_string(&driver)
            .map_err(|err| ClientError::Persistence(err.into()))?;
        self.store
            .put(AUTH_TOKEN_KEY, &token)
            .await
            .map_err(ClientError::Persistence)?;
        self.store
            .put(AUTH_USER_KEY, &user_json)
            .await
            .map_err(ClientError::Persistence)?;

        let mut state = self.state.write().await;
        state.token = Some(token);
        state.driver = Some(driver);
        state.is_loading = false;
        state.initialized = true;
        info!("session established");
        Ok(state.snapshot())
    }

    /// Strict logout: both persisted entries must be removed before the
    /// in-memory session is cleared. A removal failure surfaces to the
    /// caller and leaves the session intact.
    pub async fn logout(&self) -> Result<Session, ClientError> {
        self.store
            .remove(AUTH_TOKEN_KEY)
            .await
            .map_err(ClientError::Persistence)?;
        self.store
            .remove(AUTH_USER_KEY)
            .await
            .map_err(ClientError::Persistence)?;

        let mut state = self.state.write().await;
        state.token = None;
        state.driver = None;
        state.is_loading = false;
        info!("session cleared");
        Ok(state.snapshot())
    }

    /// Replaces only the driver profile, preserving the token and the
    /// authenticated flag.
    pub async fn update_driver(&self, driver: Driver) -> Result<Session, ClientError> {
        let user_json = serde_json::to_string(&driver)
            .map_err(|err| ClientError::Persistence(err.into()))?;
        self.store
            .put(AUTH_USER_KEY, &user_json)
            .await
            .map_err(ClientError::Persistence)?;

        let mut state = self.state.write().await;
        state.driver = Some(driver);
        Ok(state.snapshot())
    }

    pub async fn session(&self) -> Session {
        self.state.read().await.snapshot()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
