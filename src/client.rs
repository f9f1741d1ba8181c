//! High-level client — `OceanmarkClient` with nested sub-client accessors.
//!
//! The router hands a clone of this client to every view handler unchanged;
//! views reach their domain through `client.markets()`, `client.orders()`,
//! `client.accounts()`.

use crate::domain::account::{CreateSessionRequest, CreateUserRequest, Session, User};
use crate::domain::market::{Book, Ticker, Trade};
use crate::domain::order::{CreateOrderRequest, Order};
use crate::error::WebError;
use crate::http::OceanmarkHttp;
use crate::network;

/// The primary API entry point for views.
#[derive(Clone)]
pub struct OceanmarkClient {
    pub(crate) http: OceanmarkHttp,
    pub(crate) events_url: String,
}

impl OceanmarkClient {
    pub fn builder() -> OceanmarkClientBuilder {
        OceanmarkClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    /// WebSocket endpoint for market events.
    ///
    /// The events connection is not owned here — its lifetime belongs to
    /// the view that subscribes, the same split the router keeps between
    /// navigation and handler-started async work.
    pub fn events_url(&self) -> &str {
        &self.events_url
    }
}

// ─── Sub-clients ─────────────────────────────────────────────────────────────

/// Market data queries.
pub struct Markets<'a> {
    pub(crate) client: &'a OceanmarkClient,
}

impl<'a> Markets<'a> {
    /// Best-price snapshot; `None` for a market that has never traded.
    pub async fn ticker(&self, market: &str) -> Result<Option<Ticker>, WebError> {
        Ok(self.client.http.get_ticker(market).await?)
    }

    pub async fn book(&self, market: &str) -> Result<Book, WebError> {
        Ok(self.client.http.get_book(market).await?)
    }

    pub async fn trades(&self, market: &str) -> Result<Vec<Trade>, WebError> {
        Ok(self.client.http.get_trades(market).await?)
    }
}

/// Order management (requires a signed-in session).
pub struct Orders<'a> {
    pub(crate) client: &'a OceanmarkClient,
}

impl<'a> Orders<'a> {
    pub async fn list(
        &self,
        market: Option<&str>,
        state: Option<&str>,
        limit: Option<u32>,
        offset: Option<&str>,
    ) -> Result<Vec<Order>, WebError> {
        Ok(self
            .client
            .http
            .get_orders(market, state, limit, offset)
            .await?)
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> Result<serde_json::Value, WebError> {
        Ok(self.client.http.create_order(request).await?)
    }

    pub async fn cancel(&self, order_id: &str) -> Result<serde_json::Value, WebError> {
        Ok(self.client.http.cancel_order(order_id).await?)
    }
}

/// Sign-up, sign-in, and session state.
pub struct Accounts<'a> {
    pub(crate) client: &'a OceanmarkClient,
}

impl<'a> Accounts<'a> {
    pub async fn sign_up(&self, request: &CreateUserRequest) -> Result<User, WebError> {
        Ok(self.client.http.create_user(request).await?)
    }

    /// Sign in and remember the session token for subsequent requests.
    pub async fn sign_in(&self, request: &CreateSessionRequest) -> Result<Session, WebError> {
        let session = self.client.http.create_session(request).await?;
        self.client
            .http
            .set_session_token(Some(session.token.clone()))
            .await;
        Ok(session)
    }

    /// Drop the session token. The sign-out nav item triggers this before
    /// bouncing to `/`.
    pub async fn clear(&self) {
        self.client.http.set_session_token(None).await;
    }

    pub async fn is_signed_in(&self) -> bool {
        self.client.http.has_session_token().await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct OceanmarkClientBuilder {
    api_url: String,
    events_url: String,
}

impl Default for OceanmarkClientBuilder {
    fn default() -> Self {
        Self {
            api_url: network::DEFAULT_API_URL.to_string(),
            events_url: network::DEFAULT_EVENTS_URL.to_string(),
        }
    }
}

impl OceanmarkClientBuilder {
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    pub fn events_url(mut self, url: &str) -> Self {
        self.events_url = url.to_string();
        self
    }

    pub fn build(self) -> Result<OceanmarkClient, WebError> {
        Ok(OceanmarkClient {
            http: OceanmarkHttp::new(&self.api_url),
            events_url: self.events_url,
        })
    }
}
