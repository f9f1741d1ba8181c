//! # Oceanmark Web
//!
//! Toolkit for the Oceanmark exchange demo single-page client, supporting
//! both native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Routing** — hash-based SPA router: pattern table, before/after
//!    hooks, pause/replace semantics, page-link rewriting (WASM-safe core,
//!    browser glue behind the `dom` feature)
//! 2. **Domain** — wire types for markets, orders, and accounts
//! 3. **HTTP API** — `OceanmarkHttp` with per-endpoint retry policies
//! 4. **Localization** — embedded catalogs with `%{name}` interpolation
//! 5. **High-Level Client** — `OceanmarkClient` with nested sub-clients,
//!    passed unchanged into every view handler
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oceanmark_web::prelude::*;
//!
//! let api = OceanmarkClient::builder().build()?;
//! let router = Router::builder().root(DEFAULT_WEB_ROOT).build();
//!
//! let view = api.clone();
//! router.register("/trade/:market", move |params| {
//!     market_view(&view, &params["market"]);
//! })?;
//! router.register_not_found(|_| render_404());
//! router.on_after({
//!     let router = router.clone();
//!     move |_| router.update_page_links()
//! });
//!
//! router.resolve("/");
//! ```

// ── Layer 1: Routing ─────────────────────────────────────────────────────────

/// Hash-based SPA router and history backends.
pub mod routing;

/// Unified toolkit error types.
pub mod error;

/// Deployment constants (API root, web root, hash marker, app name).
pub mod network;

// ── Layer 2: Domain ──────────────────────────────────────────────────────────

/// Wire types for markets, orders, and accounts.
pub mod domain;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Localization ────────────────────────────────────────────────────

/// Translation catalogs and locale selection.
pub mod locale;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `OceanmarkClient` — the API entry point views receive.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Routing
    pub use crate::routing::{
        Done, History, MemoryHistory, Params, RoutePattern, Router, RouterBuilder,
    };

    #[cfg(feature = "dom")]
    pub use crate::routing::dom::{BrowserHistory, install_link_rewriter, listen_hash_change};

    // Domain types
    pub use crate::domain::account::{Asset, Session, User};
    pub use crate::domain::market::{Book, BookEntry, Ticker, Trade};
    pub use crate::domain::order::{CreateOrderRequest, Order, OrderState, OrderType};
    pub use crate::domain::Side;

    // Errors
    pub use crate::error::{RouteError, WebError};

    // Localization
    pub use crate::locale::{Locale, DEFAULT_LOCALE};

    // Network
    pub use crate::network::{APP_NAME, DEFAULT_API_URL, DEFAULT_EVENTS_URL, DEFAULT_WEB_ROOT};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{Accounts, Markets, OceanmarkClient, OceanmarkClientBuilder, Orders};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
