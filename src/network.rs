//! Deployment constants for the Oceanmark web client.
//!
//! The original bundler injected these at compile time; here they are plain
//! constants used as builder defaults, overridable per environment.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.oceanmark.one";

/// Default market-events WebSocket URL.
pub const DEFAULT_EVENTS_URL: &str = "wss://events.oceanmark.one";

/// Default web root the router strips from incoming URLs.
pub const DEFAULT_WEB_ROOT: &str = "https://trade.oceanmark.one";

/// Hash marker preceding the client-side path (`…/#!/trade/BTC-USDT`).
pub const HASH_MARKER: &str = "#!";

/// Application display name, used for page titles.
pub const APP_NAME: &str = "Oceanmark Demo";
