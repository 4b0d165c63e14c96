//! Kalshi WebSocket message types
//!
//! Every server push shares one envelope, `{type, sid, seq, msg}`:
//! - orderbook_snapshot: full book, YES and NO bid ladders
//! - orderbook_delta: single price-level change
//! - fill: one of our orders traded (no `seq`)

use serde::Deserialize;

/// Outer envelope; `msg` is decoded once `type` is known
#[derive(Debug, Clone, Deserialize)]
pub struct WsEnvelope {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub sid: u64,
    #[serde(default)]
    pub seq: Option<u64>,
    pub msg: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookSnapshotMsg {
    pub market_ticker: String,
    /// [price_cents, contracts] pairs; absent when the side is empty
    #[serde(default)]
    pub yes: Vec<(i64, i64)>,
    #[serde(default)]
    pub no: Vec<(i64, i64)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookDeltaMsg {
    pub market_ticker: String,
    pub price: i64,
    pub delta: i64,
    pub side: WsSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillMsg {
    pub trade_id: String,
    pub order_id: String,
    pub market_ticker: String,
    pub is_taker: bool,
    pub side: WsSide,
    pub yes_price: i64,
    pub count: i64,
    pub action: WsAction,
    /// Unix seconds
    pub ts: i64,
    pub post_position: i64,
    /// Side the contracts actually landed on; falls back to `side`
    #[serde(default)]
    pub purchased_side: Option<WsSide>,
    #[serde(default)]
    pub client_order_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WsSide {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WsAction {
    Buy,
    Sell,
}

pub mod msg_type {
    pub const ORDERBOOK_SNAPSHOT: &str = "orderbook_snapshot";
    pub const ORDERBOOK_DELTA: &str = "orderbook_delta";
    pub const FILL: &str = "fill";
}
