//! Order wire types and requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderState {
    Pending,
    Done,
}

/// An order as returned by `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub order_type: OrderType,
    pub base: String,
    pub quote: String,
    pub side: Side,
    pub price: Decimal,
    pub remaining_amount: Decimal,
    pub filled_amount: Decimal,
    pub remaining_funds: Decimal,
    pub filled_funds: Decimal,
    pub state: OrderState,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /orders`.
///
/// `price` is required for limit orders and ignored for market orders,
/// which is validated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateOrderRequest {
    pub market: String,
    pub side: Side,
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parses_full_shape() {
        let json = r#"{
            "order_id": "9c2e",
            "order_type": "LIMIT",
            "base": "c6d0c728-2624-429b-8e0d-d9d19b6592fa",
            "quote": "815b0b1a-2764-3736-8faa-42d694fa620a",
            "side": "BID",
            "price": "6400",
            "remaining_amount": "0.5",
            "filled_amount": "0.5",
            "remaining_funds": "3200",
            "filled_funds": "3200",
            "state": "PENDING",
            "created_at": "2018-08-24T08:07:42Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.state, OrderState::Pending);
        assert_eq!(order.side, Side::Bid);
    }

    #[test]
    fn test_market_order_request_omits_price() {
        let req = CreateOrderRequest {
            market: "BTC-USDT".into(),
            side: Side::Bid,
            order_type: OrderType::Market,
            price: None,
            amount: "100".parse().unwrap(),
        };
        let json = serde_json::to_string(&req).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("price").is_none());
        assert_eq!(value["order_type"], "MARKET");
    }
}
