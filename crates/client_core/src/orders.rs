use std::collections::HashMap;

use chrono::Local;
use shared::{
    domain::{Order, OrderAction, OrderTab},
    error::ClientError,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    api::ApiClient,
    metrics::{self, EarningsSummary},
};

/// Fetches the driver's orders, keeps one cached list per session token,
/// and issues status-transition commands. Cache consistency is
/// invalidate-then-refetch: a successful mutation drops the entry and the
/// refetch is issued strictly after the mutation's success response. No
/// optimistic local mutation, ever.
pub struct OrdersViewModel {
    api: ApiClient,
    cache: Mutex<HashMap<String, Vec<Order>>>,
}

impl OrdersViewModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Cached list when present, otherwise a network fetch. A failed fetch
    /// leaves any previously cached list untouched.
    pub async fn orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation("missing auth token".to_string()));
        }
        if let Some(cached) = self.cache.lock().await.get(token) {
            return Ok(cached.clone());
        }
        self.refresh(token).await
    }

    /// Unconditional fetch; replaces the cache entry only on success.
    pub async fn refresh(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation("missing auth token".to_string()));
        }
        let orders = self.api.fetch_orders(token).await?;
        self.cache
            .lock()
            .await
            .insert(token.to_string(), orders.clone());
        Ok(orders)
    }

    pub async fn invalidate(&self, token: &str) {
        self.cache.lock().await.remove(token);
    }

    /// Currently cached list, if any. Derived views read through
    /// [`Self::orders`]; this exists for callers that must not trigger a
    /// fetch.
    pub async fn cached(&self, token: &str) -> Option<Vec<Order>> {
        self.cache.lock().await.get(token).cloned()
    }

    /// Runs one transition command, then invalidates and refetches so the
    /// returned list reflects the server's new truth. On failure the cached
    /// list is left as it was.
    pub async fn run_action(
        &self,
        token: &str,
        order_id: &str,
        action: OrderAction,
    ) -> Result<Vec<Order>, ClientError> {
        self.api.run_action(token, order_id, action).await?;
        info!(order_id, action = action.path_segment(), "order action applied");
        self.invalidate(token).await;
        self.refresh(token).await
    }

    pub async fn accept(&self, token: &str, order_id: &str) -> Result<Vec<Order>, ClientError> {
        self.run_action(token, order_id, OrderAction::Accept).await
    }

    pub async fn pickup(&self, token: &str, order_id: &str) -> Result<Vec<Order>, ClientError> {
        self.run_action(token, order_id, OrderAction::Pickup).await
    }

    pub async fn deliver(&self, token: &str, order_id: &str) -> Result<Vec<Order>, ClientError> {
        self.run_action(token, order_id, OrderAction::Deliver).await
    }

    pub async fn reject(&self, token: &str, order_id: &str) -> Result<Vec<Order>, ClientError> {
        self.run_action(token, order_id, OrderAction::Reject).await
    }

    pub async fn filtered(&self, token: &str, tab: OrderTab) -> Result<Vec<Order>, ClientError> {
        Ok(metrics::filter_by_tab(&self.orders(token).await?, tab))
    }

    pub async fn earnings(&self, token: &str) -> Result<EarningsSummary, ClientError> {
        Ok(metrics::earnings_summary(
            &self.orders(token).await?,
            Local::now(),
        ))
    }
}
