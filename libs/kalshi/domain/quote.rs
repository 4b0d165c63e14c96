//! Quote domain entities

use serde::{Deserialize, Serialize};

use super::feed::BookSide;

/// Lowest quotable price in cents
pub const MIN_QUOTE_CENTS: i64 = 1;
/// Highest quotable price in cents
pub const MAX_QUOTE_CENTS: i64 = 99;

/// Two-sided quote for one contract side, both prices in [1, 99]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub bid_price_cents: i64,
    pub ask_price_cents: i64,
}

impl Quote {
    /// Builds a quote, clamping each price independently
    pub fn clamped(bid_price_cents: i64, ask_price_cents: i64) -> Self {
        Self {
            bid_price_cents: bid_price_cents.clamp(MIN_QUOTE_CENTS, MAX_QUOTE_CENTS),
            ask_price_cents: ask_price_cents.clamp(MIN_QUOTE_CENTS, MAX_QUOTE_CENTS),
        }
    }

    /// Ask minus bid; negative when heavy inventory skew inverts the quote
    pub fn width(&self) -> i64 {
        self.ask_price_cents - self.bid_price_cents
    }
}

/// Latest quotes for both sides of one market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuotes {
    pub yes: Quote,
    pub no: Quote,
}

impl MarketQuotes {
    pub fn side(&self, side: BookSide) -> Quote {
        match side {
            BookSide::Yes => self.yes,
            BookSide::No => self.no,
        }
    }
}
