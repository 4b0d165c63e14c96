//! Book Registry
//!
//! Owns one [`SequencedBook`] per ticker and binds each book to the
//! subscription generation currently feeding it. When a ticker shows up under a
//! new subscription id (reconnect, resubscribe) the book is reset, since the new
//! generation's sequence numbers are unrelated to the old ones.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::domain::{ApplyResult, DeltaEvent, SequencedBook, SnapshotEvent};

#[derive(Debug, Default)]
pub struct BookRegistry {
    books: HashMap<String, SequencedBook>,
    /// subscription id -> tickers it currently feeds
    subscriptions: HashMap<u64, BTreeSet<String>>,
}

impl BookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create unbound books for the given tickers
    pub fn with_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for ticker in tickers {
            registry.add_ticker(ticker);
        }
        registry
    }

    /// Create an unbound, uninitialized book if the ticker is unknown
    pub fn add_ticker(&mut self, ticker: impl Into<String>) {
        let ticker = ticker.into();
        self.books
            .entry(ticker.clone())
            .or_insert_with(|| SequencedBook::new(ticker));
    }

    /// Get the book for `ticker`, creating it lazily and rebinding it to
    /// `subscription_id` if it was fed by a different subscription
    pub fn get_or_create(&mut self, ticker: &str, subscription_id: u64) -> &mut SequencedBook {
        let book = self
            .books
            .entry(ticker.to_string())
            .or_insert_with(|| SequencedBook::new(ticker));

        match book.subscription_id() {
            Some(current) if current == subscription_id => {}
            previous => {
                if let Some(old_id) = previous {
                    info!(
                        "[BookRegistry] {} rebound from subscription {} to {}, resetting book",
                        ticker, old_id, subscription_id
                    );
                    if let Some(tickers) = self.subscriptions.get_mut(&old_id) {
                        tickers.remove(ticker);
                        if tickers.is_empty() {
                            self.subscriptions.remove(&old_id);
                        }
                    }
                } else {
                    debug!("[BookRegistry] {} bound to subscription {}", ticker, subscription_id);
                }
                book.reset();
                book.set_subscription_id(subscription_id);
                self.subscriptions
                    .entry(subscription_id)
                    .or_default()
                    .insert(ticker.to_string());
            }
        }

        book
    }

    pub fn lookup(&self, ticker: &str) -> Option<&SequencedBook> {
        self.books.get(ticker)
    }

    pub fn apply_snapshot(&mut self, snap: &SnapshotEvent) -> ApplyResult {
        let result = self
            .get_or_create(&snap.ticker, snap.subscription_id)
            .apply_snapshot_event(snap);

        if result == ApplyResult::StaleSnapshot {
            debug!("[BookRegistry] {} stale snapshot seq={}", snap.ticker, snap.seq);
        }
        result
    }

    pub fn apply_delta(&mut self, delta: &DeltaEvent) -> ApplyResult {
        let book = self.get_or_create(&delta.ticker, delta.subscription_id);
        let last_applied = book.last_applied_seq();
        let result = book.apply_delta_event(delta);

        match result {
            ApplyResult::SequenceGap => warn!(
                "[BookRegistry] {} sequence gap: last applied {}, received {}",
                delta.ticker, last_applied, delta.seq
            ),
            ApplyResult::StaleDelta => debug!(
                "[BookRegistry] {} stale delta seq={} (last applied {})",
                delta.ticker, delta.seq, last_applied
            ),
            ApplyResult::AwaitingSnapshot => debug!(
                "[BookRegistry] {} delta seq={} before snapshot",
                delta.ticker, delta.seq
            ),
            _ => {}
        }
        result
    }

    /// Tickers currently fed by `subscription_id`
    pub fn tickers_for_subscription(&self, subscription_id: u64) -> Vec<String> {
        self.subscriptions
            .get(&subscription_id)
            .map(|tickers| tickers.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookSide, BookState, PriceLevel};

    fn snapshot(sid: u64, ticker: &str, seq: u64) -> SnapshotEvent {
        SnapshotEvent {
            subscription_id: sid,
            ticker: ticker.to_string(),
            yes_levels: vec![(40, 100)],
            no_levels: vec![(55, 80)],
            seq,
        }
    }

    fn delta(sid: u64, ticker: &str, seq: u64) -> DeltaEvent {
        DeltaEvent {
            subscription_id: sid,
            ticker: ticker.to_string(),
            side: BookSide::Yes,
            price_cents: 41,
            delta_volume: 10,
            seq,
        }
    }

    #[test]
    fn test_lazy_creation() {
        let mut registry = BookRegistry::new();
        assert!(registry.lookup("A").is_none());

        let book = registry.get_or_create("A", 1);
        assert_eq!(book.state(), BookState::Uninitialized);
        assert_eq!(book.subscription_id(), Some(1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.tickers_for_subscription(1), vec!["A".to_string()]);
    }

    #[test]
    fn test_same_subscription_keeps_state() {
        let mut registry = BookRegistry::new();
        assert_eq!(registry.apply_snapshot(&snapshot(1, "A", 5)), ApplyResult::Applied);

        let book = registry.get_or_create("A", 1);
        assert_eq!(book.state(), BookState::Synced { last_applied_seq: 5 });
        assert_eq!(registry.apply_delta(&delta(1, "A", 6)), ApplyResult::Applied);
    }

    #[test]
    fn test_rebind_resets_live_book() {
        let mut registry = BookRegistry::new();
        registry.apply_snapshot(&snapshot(1, "A", 5));
        assert_eq!(
            registry.lookup("A").map(|b| b.book().best_bid(BookSide::Yes)),
            Some(PriceLevel::new(40, 100))
        );

        let book = registry.get_or_create("A", 2);
        assert_eq!(book.state(), BookState::Uninitialized);
        assert!(book.book().is_empty());
        assert_eq!(book.subscription_id(), Some(2));

        assert!(registry.tickers_for_subscription(1).is_empty());
        assert_eq!(registry.tickers_for_subscription(2), vec!["A".to_string()]);

        // Old generation's sequence space no longer matters
        assert_eq!(registry.apply_delta(&delta(2, "A", 6)), ApplyResult::AwaitingSnapshot);
        assert_eq!(registry.apply_snapshot(&snapshot(2, "A", 1)), ApplyResult::Applied);
    }

    #[test]
    fn test_rebind_only_touches_that_ticker() {
        let mut registry = BookRegistry::new();
        registry.apply_snapshot(&snapshot(1, "A", 5));
        registry.apply_snapshot(&snapshot(1, "B", 6));
        assert_eq!(registry.tickers_for_subscription(1).len(), 2);

        registry.get_or_create("A", 9);
        assert_eq!(registry.tickers_for_subscription(1), vec!["B".to_string()]);
        assert!(registry.lookup("B").map(|b| b.has_snapshot()).unwrap_or(false));
    }

    #[test]
    fn test_preregistered_ticker_binds_on_first_event() {
        let mut registry = BookRegistry::with_tickers(["A"]);
        assert_eq!(registry.lookup("A").and_then(|b| b.subscription_id()), None);

        assert_eq!(registry.apply_snapshot(&snapshot(3, "A", 1)), ApplyResult::Applied);
        assert_eq!(registry.lookup("A").and_then(|b| b.subscription_id()), Some(3));
    }

    #[test]
    fn test_lookup_does_not_create() {
        let registry = BookRegistry::new();
        assert!(registry.lookup("missing").is_none());
        assert!(registry.is_empty());
    }
}
