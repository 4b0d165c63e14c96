//! Orderbook domain entities
//!
//! Binary-market book in integer cents. Only bids are stored, one ladder per
//! contract side; asks are derived from the opposite side's bids through the
//! complement rule `ask(S) = 100 - best_bid(opposite(S))`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::feed::BookSide;

/// Payout of a winning contract, in cents
pub const CONTRACT_PAYOUT_CENTS: i64 = 100;

// =============================================================================
// Price Level - Basic unit of orderbook
// =============================================================================

/// Price level in cents with resting volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: i64,
    pub volume: i64,
}

impl PriceLevel {
    /// Sentinel reported when a side has no liquidity
    pub const EMPTY: PriceLevel = PriceLevel { price: 0, volume: 0 };

    pub fn new(price: i64, volume: i64) -> Self {
        Self { price, volume }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.price == 0 && self.volume == 0
    }
}

// =============================================================================
// BidLadder - One side of the orderbook
// =============================================================================

/// Sparse price -> volume map; the best bid is the highest key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidLadder {
    levels: BTreeMap<i64, i64>,
}

impl BidLadder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ladder with snapshot data, skipping non-positive volume
    pub fn replace(&mut self, levels: &[(i64, i64)]) {
        self.levels.clear();
        for &(price, volume) in levels {
            if volume > 0 {
                self.levels.insert(price, volume);
            }
        }
    }

    /// Add `delta` at `price`; the level is evicted once it drops to zero or below
    pub fn apply_delta(&mut self, price: i64, delta: i64) {
        let volume = self.levels.entry(price).or_insert(0);
        *volume += delta;
        if *volume <= 0 {
            self.levels.remove(&price);
        }
    }

    #[inline]
    pub fn best(&self) -> Option<PriceLevel> {
        self.levels
            .iter()
            .next_back()
            .map(|(&price, &volume)| PriceLevel::new(price, volume))
    }

    #[inline]
    pub fn volume_at(&self, price: i64) -> i64 {
        self.levels.get(&price).copied().unwrap_or(0)
    }

    /// Levels from best (highest) to worst
    pub fn levels(&self) -> impl Iterator<Item = PriceLevel> + '_ {
        self.levels
            .iter()
            .rev()
            .map(|(&price, &volume)| PriceLevel::new(price, volume))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn total_volume(&self) -> i64 {
        self.levels.values().sum()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// =============================================================================
// PriceLevelBook - Two-sided book for one binary market
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevelBook {
    ticker: String,
    yes_bids: BidLadder,
    no_bids: BidLadder,
}

impl PriceLevelBook {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            yes_bids: BidLadder::new(),
            no_bids: BidLadder::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn ladder(&self, side: BookSide) -> &BidLadder {
        match side {
            BookSide::Yes => &self.yes_bids,
            BookSide::No => &self.no_bids,
        }
    }

    fn ladder_mut(&mut self, side: BookSide) -> &mut BidLadder {
        match side {
            BookSide::Yes => &mut self.yes_bids,
            BookSide::No => &mut self.no_bids,
        }
    }

    /// Replace both sides entirely
    pub fn set_snapshot(&mut self, yes_levels: &[(i64, i64)], no_levels: &[(i64, i64)]) {
        self.yes_bids.replace(yes_levels);
        self.no_bids.replace(no_levels);
    }

    pub fn update_delta(&mut self, price: i64, delta: i64, side: BookSide) {
        self.ladder_mut(side).apply_delta(price, delta);
    }

    /// Highest bid on `side`, or [`PriceLevel::EMPTY`]
    pub fn best_bid(&self, side: BookSide) -> PriceLevel {
        self.ladder(side).best().unwrap_or(PriceLevel::EMPTY)
    }

    /// Ask on `side`, derived from the opposite side's best bid
    ///
    /// Selling a YES contract at `p` is the same order as buying NO at `100 - p`,
    /// so the volume carried is the opposite bid's volume.
    pub fn best_ask(&self, side: BookSide) -> PriceLevel {
        match self.ladder(side.opposite()).best() {
            Some(bid) => PriceLevel::new(CONTRACT_PAYOUT_CENTS - bid.price, bid.volume),
            None => PriceLevel::EMPTY,
        }
    }

    pub fn spread(&self, side: BookSide) -> i64 {
        self.best_ask(side).price - self.best_bid(side).price
    }

    pub fn midpoint(&self, side: BookSide) -> f64 {
        (self.best_ask(side).price + self.best_bid(side).price) as f64 / 2.0
    }

    /// True when `side` has both a bid and a derived ask
    pub fn is_two_sided(&self, side: BookSide) -> bool {
        !self.ladder(side).is_empty() && !self.ladder(side.opposite()).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.yes_bids.is_empty() && self.no_bids.is_empty()
    }

    pub fn clear(&mut self) {
        self.yes_bids.clear();
        self.no_bids.clear();
    }

    /// Format top of book for logging
    pub fn format_summary(&self, side: BookSide) -> String {
        let fmt_level = |level: PriceLevel| {
            if level.is_empty() {
                "N/A".to_string()
            } else {
                format!("{}c ({})", level.price, level.volume)
            }
        };

        format!(
            "{} {} | Bid: {} | Ask: {} | Spread: {}",
            self.ticker,
            side.as_str().to_uppercase(),
            fmt_level(self.best_bid(side)),
            fmt_level(self.best_ask(side)),
            if self.is_two_sided(side) {
                format!("{}c", self.spread(side))
            } else {
                "N/A".to_string()
            }
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> PriceLevelBook {
        let mut book = PriceLevelBook::new("KXBTC-24DEC31");
        book.set_snapshot(&[(40, 100), (42, 50), (38, 10)], &[(55, 20), (53, 70)]);
        book
    }

    #[test]
    fn test_best_bid_is_highest_price() {
        let book = sample_book();
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(42, 50));
        assert_eq!(book.best_bid(BookSide::No), PriceLevel::new(55, 20));
    }

    #[test]
    fn test_ask_derived_from_opposite_bid() {
        let book = sample_book();
        assert_eq!(book.best_ask(BookSide::Yes), PriceLevel::new(45, 20));
        assert_eq!(book.best_ask(BookSide::No), PriceLevel::new(58, 50));
        assert_eq!(book.spread(BookSide::Yes), 3);
        assert_eq!(book.spread(BookSide::No), 3);
        assert!((book.midpoint(BookSide::Yes) - 43.5).abs() < 1e-9);
        assert!((book.midpoint(BookSide::No) - 56.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_side_reports_sentinel() {
        let mut book = PriceLevelBook::new("T");
        book.set_snapshot(&[(40, 100)], &[]);

        assert_eq!(book.best_bid(BookSide::No), PriceLevel::EMPTY);
        assert_eq!(book.best_ask(BookSide::Yes), PriceLevel::EMPTY);
        assert_eq!(book.best_ask(BookSide::No), PriceLevel::new(60, 100));
        assert!(!book.is_two_sided(BookSide::Yes));
        assert!(!book.is_two_sided(BookSide::No));
    }

    #[test]
    fn test_delta_adds_and_evicts() {
        let mut book = sample_book();

        book.update_delta(42, 25, BookSide::Yes);
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(42, 75));

        book.update_delta(44, 5, BookSide::Yes);
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(44, 5));

        // Exactly zero evicts
        book.update_delta(44, -5, BookSide::Yes);
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(42, 75));

        // Overshooting below zero evicts too
        book.update_delta(42, -500, BookSide::Yes);
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(40, 100));
        assert_eq!(book.ladder(BookSide::Yes).volume_at(42), 0);
    }

    #[test]
    fn test_negative_delta_on_missing_level_is_not_stored() {
        let mut book = PriceLevelBook::new("T");
        book.update_delta(30, -10, BookSide::No);
        assert!(book.ladder(BookSide::No).is_empty());
    }

    #[test]
    fn test_snapshot_replaces_and_skips_non_positive() {
        let mut book = sample_book();
        book.set_snapshot(&[(10, 0), (11, -3), (12, 4)], &[]);

        assert_eq!(book.ladder(BookSide::Yes).len(), 1);
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::new(12, 4));
        assert!(book.ladder(BookSide::No).is_empty());
    }

    #[test]
    fn test_levels_iterate_best_first() {
        let book = sample_book();
        let prices: Vec<i64> = book.ladder(BookSide::Yes).levels().map(|l| l.price).collect();
        assert_eq!(prices, vec![42, 40, 38]);
        assert_eq!(book.ladder(BookSide::Yes).total_volume(), 160);
    }

    #[test]
    fn test_clear() {
        let mut book = sample_book();
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.best_bid(BookSide::Yes), PriceLevel::EMPTY);
    }

    #[test]
    fn test_format_summary() {
        let book = sample_book();
        assert_eq!(
            book.format_summary(BookSide::Yes),
            "KXBTC-24DEC31 YES | Bid: 42c (50) | Ask: 45c (20) | Spread: 3c"
        );
    }
}
