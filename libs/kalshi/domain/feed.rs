//! Normalized feed events
//!
//! Wire-format independent shapes that the core consumes. Adapters map
//! exchange messages into these before anything reaches the engine.

use serde::{Deserialize, Serialize};

/// Venue a ledger or feed belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Kalshi,
}

impl Exchange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Kalshi => "kalshi",
        }
    }
}

/// Contract side of a binary market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Yes,
    No,
}

impl BookSide {
    /// The complementary side (`Yes` <-> `No`)
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            BookSide::Yes => BookSide::No,
            BookSide::No => BookSide::Yes,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookSide::Yes => "yes",
            BookSide::No => "no",
        }
    }
}

/// Direction of a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    /// +1 for buys, -1 for sells
    #[inline]
    pub fn sign(&self) -> i64 {
        match self {
            Action::Buy => 1,
            Action::Sell => -1,
        }
    }
}

/// Full order book replacement for one instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEvent {
    pub subscription_id: u64,
    pub ticker: String,
    /// (price_cents, volume) resting bids on the YES side
    pub yes_levels: Vec<(i64, i64)>,
    /// (price_cents, volume) resting bids on the NO side
    pub no_levels: Vec<(i64, i64)>,
    pub seq: u64,
}

/// Incremental change to a single price level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEvent {
    pub subscription_id: u64,
    pub ticker: String,
    pub side: BookSide,
    pub price_cents: i64,
    pub delta_volume: i64,
    pub seq: u64,
}

/// One of our own trades
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEvent {
    pub ticker: String,
    /// Contract side that was bought or sold
    pub side: BookSide,
    pub action: Action,
    /// Execution price expressed on the YES side, in cents
    pub yes_price_cents: i64,
    pub quantity: i64,
    /// Net position (yes - no) reported by the exchange after this fill
    pub post_position: i64,
    pub trade_id: String,
    /// Unix seconds
    pub timestamp: i64,
}

/// Normalized event consumed by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    Snapshot(SnapshotEvent),
    Delta(DeltaEvent),
    Fill(FillEvent),
}

impl FeedEvent {
    /// Instrument this event refers to
    pub fn ticker(&self) -> &str {
        match self {
            FeedEvent::Snapshot(s) => &s.ticker,
            FeedEvent::Delta(d) => &d.ticker,
            FeedEvent::Fill(f) => &f.ticker,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEvent::Snapshot(_) => "snapshot",
            FeedEvent::Delta(_) => "delta",
            FeedEvent::Fill(_) => "fill",
        }
    }
}
