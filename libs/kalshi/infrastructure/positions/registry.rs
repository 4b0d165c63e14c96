//! Ledger Registry
//!
//! One [`PositionLedger`] per (exchange, ticker). Ledgers are created up front
//! for the configured tickers; fills for anything else are dropped.

use std::collections::HashMap;

use tracing::debug;

use super::ledger::{FillOutcome, PositionLedger};
use crate::domain::{Exchange, FillEvent, PnlSnapshot};

#[derive(Debug, Clone)]
pub struct LedgerRegistry {
    exchange: Exchange,
    ledgers: HashMap<(Exchange, String), PositionLedger>,
}

impl LedgerRegistry {
    pub fn new<I, S>(exchange: Exchange, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            exchange,
            ledgers: HashMap::new(),
        };
        for ticker in tickers {
            registry.add_ticker(ticker);
        }
        registry
    }

    pub fn exchange(&self) -> Exchange {
        self.exchange
    }

    /// Create a flat ledger for `ticker`; existing ledgers are left alone
    pub fn add_ticker(&mut self, ticker: impl Into<String>) {
        let ticker = ticker.into();
        self.ledgers
            .entry((self.exchange, ticker.clone()))
            .or_insert_with(|| PositionLedger::new(ticker));
    }

    /// Route a fill to its ledger; `None` when the ticker is not tracked
    pub fn record_fill(&mut self, fill: &FillEvent) -> Option<FillOutcome> {
        match self.ledgers.get_mut(&(self.exchange, fill.ticker.clone())) {
            Some(ledger) => Some(ledger.record_fill(fill)),
            None => {
                debug!(
                    "[LedgerRegistry] dropping fill for untracked ticker {} (trade_id={})",
                    fill.ticker, fill.trade_id
                );
                None
            }
        }
    }

    pub fn ledger(&self, ticker: &str) -> Option<&PositionLedger> {
        self.ledgers.get(&(self.exchange, ticker.to_string()))
    }

    pub fn ledger_mut(&mut self, ticker: &str) -> Option<&mut PositionLedger> {
        self.ledgers.get_mut(&(self.exchange, ticker.to_string()))
    }

    pub fn snapshot(&self, ticker: &str) -> Option<PnlSnapshot> {
        self.ledger(ticker).map(PositionLedger::snapshot)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.ledgers.keys().map(|(_, ticker)| ticker.as_str())
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, BookSide};

    fn fill(ticker: &str, qty: i64) -> FillEvent {
        FillEvent {
            ticker: ticker.to_string(),
            side: BookSide::Yes,
            action: Action::Buy,
            yes_price_cents: 60,
            quantity: qty,
            post_position: qty,
            trade_id: "T1".to_string(),
            timestamp: 1,
        }
    }

    #[test]
    fn test_new_creates_flat_ledgers() {
        let registry = LedgerRegistry::new(Exchange::Kalshi, ["A", "B"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.snapshot("A"), Some(PnlSnapshot::default()));
        assert!(registry.ledger("C").is_none());
    }

    #[test]
    fn test_fill_routed_by_ticker() {
        let mut registry = LedgerRegistry::new(Exchange::Kalshi, ["A", "B"]);
        let outcome = registry.record_fill(&fill("A", 10));

        assert!(outcome.map(|o| o.is_applied()).unwrap_or(false));
        assert_eq!(registry.snapshot("A").map(|s| s.yes_position), Some(10));
        assert_eq!(registry.snapshot("B"), Some(PnlSnapshot::default()));
    }

    #[test]
    fn test_unknown_ticker_is_ignored() {
        let mut registry = LedgerRegistry::new(Exchange::Kalshi, ["A"]);
        registry.record_fill(&fill("A", 10));
        let before = registry.snapshot("A");

        assert_eq!(registry.record_fill(&fill("ZZZ", 5)), None);
        assert_eq!(registry.snapshot("A"), before);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_ticker_keeps_existing_ledger() {
        let mut registry = LedgerRegistry::new(Exchange::Kalshi, ["A"]);
        registry.record_fill(&fill("A", 3));
        registry.add_ticker("A");
        registry.add_ticker("B");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.snapshot("A").map(|s| s.yes_position), Some(3));
    }

    #[test]
    fn test_ledger_mut_sets_marks() {
        let mut registry = LedgerRegistry::new(Exchange::Kalshi, ["A"]);
        registry.record_fill(&fill("A", 10));
        if let Some(ledger) = registry.ledger_mut("A") {
            ledger.set_marks(70, 30);
        }
        assert_eq!(registry.snapshot("A").map(|s| s.unrealized_pnl_cents), Some(100));
    }
}
