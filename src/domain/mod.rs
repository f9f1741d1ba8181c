//! Domain wire types shared between the REST client and the views.
//!
//! Prices and amounts travel as decimal strings on the wire and are
//! modeled with `rust_decimal`; timestamps are RFC 3339.

pub mod account;
pub mod market;
pub mod order;

use serde::{Deserialize, Serialize};

/// Order side as the backend spells it (`"BID"` / `"ASK"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Bid,
    Ask,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "Buy"),
            Side::Ask => write!(f, "Sell"),
        }
    }
}
