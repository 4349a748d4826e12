use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Order, OrderAction},
    error::{ClientError, DEFAULT_API_ERROR_MESSAGE},
    protocol::{ActionResponse, AuthResponse, ErrorBody, LoginRequest, OrdersResponse, SignupRequest},
};
use tracing::warn;

/// Stateless REST client for the delivery API. Input validation happens
/// here, before anything goes on the wire; everything after that is the
/// server's call.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        let all_present = [
            &request.name,
            &request.email,
            &request.phone,
            &request.password,
            &request.address,
        ]
        .iter()
        .all(|field| !field.trim().is_empty());
        if !all_present {
            return Err(ClientError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let response = self
            .http
            .post(format!("{}/delivery/auth/signup", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(transport_failure)?;
        decode(response).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        if request.phone.trim().is_empty() || request.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let response = self
            .http
            .post(format!("{}/delivery/auth/login", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(transport_failure)?;
        decode(response).await
    }

    pub async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation("missing auth token".to_string()));
        }

        let response = self
            .http
            .get(format!("{}/delivery/me/orders", self.base_url))
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(transport_failure)?;
        let body: OrdersResponse = decode(response).await?;
        Ok(body.orders)
    }

    /// Single PATCH against the action endpoint for one order. The server
    /// validates the transition; a failure here changes nothing locally.
    pub async fn run_action(
        &self,
        token: &str,
        order_id: &str,
        action: OrderAction,
    ) -> Result<ActionResponse, ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation("missing auth token".to_string()));
        }

        let response = self
            .http
            .patch(format!(
                "{}/delivery/me/orders/{}/{}",
                self.base_url,
                order_id,
                action.path_segment()
            ))
            .header(AUTHORIZATION, token)
            .send()
            .await
            .map_err(transport_failure)?;
        decode(response).await
    }
}

fn transport_failure(err: reqwest::Error) -> ClientError {
    warn!(error = %err, "request could not complete");
    ClientError::network()
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport_failure);
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: body
            .message
            .unwrap_or_else(|| DEFAULT_API_ERROR_MESSAGE.to_string()),
    })
}
