//! Low-level HTTP client — `OceanmarkHttp`.
//!
//! One method per API endpoint, returning the wire types from
//! [`crate::domain`]. The high-level sub-clients in [`crate::client`] wrap
//! this; views never construct it directly.

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::account::{CreateSessionRequest, CreateUserRequest, Session, User};
use crate::domain::market::{Book, Ticker, Trade};
use crate::domain::order::{CreateOrderRequest, Order};
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

/// Low-level client for the Oceanmark REST API.
pub struct OceanmarkHttp {
    base_url: String,
    client: Client,
    /// Session token injected as `Authorization: Bearer`. Never exposed.
    session_token: Arc<RwLock<Option<String>>>,
}

impl OceanmarkHttp {
    pub fn new(base_url: &str) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(4);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            session_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn set_session_token(&self, token: Option<String>) {
        *self.session_token.write().await = token;
    }

    pub(crate) async fn has_session_token(&self) -> bool {
        self.session_token.read().await.is_some()
    }

    // ── Markets ──────────────────────────────────────────────────────────

    /// `GET /markets/:id/ticker` — `None` for a market that never traded
    /// (the backend answers with an empty object).
    pub async fn get_ticker(&self, market: &str) -> Result<Option<Ticker>, HttpError> {
        let url = format!("{}/markets/{}/ticker", self.base_url, market);
        let value: serde_json::Value = self.get(&url, RetryPolicy::Idempotent).await?;
        if value.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// `GET /markets/:id/book`
    pub async fn get_book(&self, market: &str) -> Result<Book, HttpError> {
        let url = format!("{}/markets/{}/book", self.base_url, market);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    /// `GET /markets/:id/trades`
    pub async fn get_trades(&self, market: &str) -> Result<Vec<Trade>, HttpError> {
        let url = format!("{}/markets/{}/trades", self.base_url, market);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    /// `GET /orders?market=&state=&limit=&offset=` (requires a session)
    pub async fn get_orders(
        &self,
        market: Option<&str>,
        state: Option<&str>,
        limit: Option<u32>,
        offset: Option<&str>,
    ) -> Result<Vec<Order>, HttpError> {
        let mut params = Vec::new();
        if let Some(m) = market {
            params.push(format!("market={}", urlencoding::encode(m)));
        }
        if let Some(s) = state {
            params.push(format!("state={}", urlencoding::encode(s)));
        }
        if let Some(l) = limit {
            params.push(format!("limit={}", l));
        }
        if let Some(o) = offset {
            params.push(format!("offset={}", urlencoding::encode(o)));
        }
        let mut url = format!("{}/orders", self.base_url);
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.get(&url, RetryPolicy::Idempotent).await
    }

    /// `POST /orders` — never retried: a replay could double the order.
    pub async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}/orders", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    /// `POST /orders/:id/cancel`
    pub async fn cancel_order(&self, order_id: &str) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}/orders/{}/cancel", self.base_url, order_id);
        self.post(&url, &serde_json::json!({}), RetryPolicy::None)
            .await
    }

    // ── Users & sessions ─────────────────────────────────────────────────

    /// `POST /users`
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, HttpError> {
        let url = format!("{}/users", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    /// `POST /sessions`
    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<Session, HttpError> {
        let url = format!("{}/sessions", self.base_url);
        self.post(&url, request, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry {
            RetryPolicy::None => return self.do_request(&method, url, body).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.session_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for OceanmarkHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            session_token: self.session_token.clone(),
        }
    }
}
