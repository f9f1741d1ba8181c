//! Market data wire types: ticker, order book, trade history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Side;

/// Best-price snapshot for a market.
///
/// The backend answers `{}` for a market that has never traded; the client
/// surfaces that as `None` rather than leaking an empty object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticker {
    pub trade_id: String,
    pub price: Decimal,
    pub amount: Decimal,
    /// Best ask, `0` when the ask side is empty.
    pub ask: Decimal,
    /// Best bid, `0` when the bid side is empty.
    pub bid: Decimal,
    pub sequence: i64,
    pub timestamp: i64,
}

/// Order book snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub sequence: i64,
    pub timestamp: i64,
    pub data: BookData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookData {
    pub asks: Vec<BookEntry>,
    pub bids: Vec<BookEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookEntry {
    pub price: Decimal,
    pub amount: Decimal,
}

/// A finished trade in a market's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub trade_id: String,
    pub base: String,
    pub quote: String,
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
