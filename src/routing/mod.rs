//! Client-side routing: route table, navigation lifecycle, history glue.
//!
//! The router maps URL patterns to view callbacks, wraps every navigation
//! in optional before/after hooks, and falls back to a not-found handler.
//! It is deliberately host-agnostic: history lives behind the [`History`]
//! trait and DOM link rewriting behind an injectable rewriter, so the whole
//! lifecycle is exercised natively in tests. The `dom` feature supplies the
//! browser-backed implementations.

mod history;
mod pattern;
mod router;

#[cfg(feature = "dom")]
pub mod dom;

pub use history::{History, MemoryHistory};
pub use pattern::{Params, RoutePattern};
pub use router::{Done, Router, RouterBuilder};
