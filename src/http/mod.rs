//! HTTP client layer — `OceanmarkHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::OceanmarkHttp;
pub use retry::{RetryConfig, RetryPolicy};
