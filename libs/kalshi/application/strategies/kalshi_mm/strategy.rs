//! Kalshi market-making orchestrator
//!
//! Routes book events into the [`BookRegistry`] and fills into the
//! [`LedgerRegistry`], then re-marks the instrument's ledger at the book
//! midpoints and recomputes YES/NO quotes with the Avellaneda-Stoikov model.
//!
//! Quotes are only computed; nothing here sends orders.

use std::collections::{HashMap, HashSet};

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::application::strategies::avellaneda_stoikov::{AsParams, AvellanedaStoikov};
use crate::application::strategies::traits::Strategy;
use crate::domain::{
    ApplyResult, BookSide, BookState, DeltaEvent, Exchange, FeedEvent, MarketQuotes, PnlSnapshot,
    PriceLevel, SnapshotEvent,
};
use crate::infrastructure::config::MarketMakerConfig;
use crate::infrastructure::{BookRegistry, LedgerRegistry};

/// Asks the transport to re-subscribe `ticker` and deliver a fresh snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResyncRequest {
    pub ticker: String,
    pub subscription_id: u64,
    pub last_applied_seq: u64,
    pub received_seq: u64,
}

pub struct KalshiMarketMaker {
    books: BookRegistry,
    ledgers: LedgerRegistry,
    quoter: AvellanedaStoikov,
    quotes: HashMap<String, MarketQuotes>,
    resync_tx: Option<Sender<ResyncRequest>>,
    /// Tickers with an outstanding resync request, cleared by the next snapshot
    resync_pending: HashSet<String>,
}

impl KalshiMarketMaker {
    pub fn new(tickers: &[String], params: AsParams) -> Self {
        Self {
            books: BookRegistry::with_tickers(tickers.iter().cloned()),
            ledgers: LedgerRegistry::new(Exchange::Kalshi, tickers.iter().cloned()),
            quoter: AvellanedaStoikov::new(params),
            quotes: HashMap::new(),
            resync_tx: None,
            resync_pending: HashSet::new(),
        }
    }

    pub fn from_config(config: &MarketMakerConfig) -> Self {
        Self::new(&config.tickers, AsParams::from(&config.quote_model))
    }

    /// Deliver sequence-gap resync requests to `tx`
    pub fn with_resync_sender(mut self, tx: Sender<ResyncRequest>) -> Self {
        self.resync_tx = Some(tx);
        self
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    fn on_snapshot(&mut self, snap: &SnapshotEvent) {
        if self.books.apply_snapshot(snap).is_applied() {
            debug!(
                "[KalshiMM] {} snapshot applied seq={} ({} yes / {} no levels)",
                snap.ticker,
                snap.seq,
                snap.yes_levels.len(),
                snap.no_levels.len()
            );
            self.resync_pending.remove(&snap.ticker);
        }
    }

    fn on_delta(&mut self, delta: &DeltaEvent) {
        if self.books.apply_delta(delta) == ApplyResult::SequenceGap {
            let last_applied_seq = self
                .books
                .lookup(&delta.ticker)
                .map(|b| b.last_applied_seq())
                .unwrap_or(0);
            self.request_resync(delta, last_applied_seq);
        }
    }

    /// One request per gap episode; later gaps wait for the snapshot
    fn request_resync(&mut self, delta: &DeltaEvent, last_applied_seq: u64) {
        if !self.resync_pending.insert(delta.ticker.clone()) {
            return;
        }

        let request = ResyncRequest {
            ticker: delta.ticker.clone(),
            subscription_id: delta.subscription_id,
            last_applied_seq,
            received_seq: delta.seq,
        };

        match &self.resync_tx {
            Some(tx) => {
                if tx.send(request).is_err() {
                    warn!("[KalshiMM] {} resync receiver dropped", delta.ticker);
                }
            }
            None => debug!("[KalshiMM] {} needs resync but no listener is attached", delta.ticker),
        }
    }

    /// Re-mark the ledger and recompute quotes for `ticker`
    fn refresh(&mut self, ticker: &str) {
        let Some(sequenced) = self.books.lookup(ticker) else {
            return;
        };
        if !sequenced.has_snapshot() {
            return;
        }

        let book = sequenced.book();
        if !book.is_two_sided(BookSide::Yes) {
            debug!("[KalshiMM] {} book one-sided, keeping previous quotes", ticker);
            return;
        }
        let yes_mid = book.midpoint(BookSide::Yes);
        let no_mid = book.midpoint(BookSide::No);

        let Some(ledger) = self.ledgers.ledger_mut(ticker) else {
            return;
        };
        ledger.set_marks(yes_mid.round() as i64, no_mid.round() as i64);
        let snapshot = ledger.snapshot();

        let quotes = MarketQuotes {
            yes: self.quoter.compute(yes_mid, snapshot.yes_position),
            no: self.quoter.compute(no_mid, snapshot.no_position),
        };

        if self.quotes.get(ticker) != Some(&quotes) {
            debug!(
                "[KalshiMM] {} quotes YES {}/{} NO {}/{} (inv yes={} no={})",
                ticker,
                quotes.yes.bid_price_cents,
                quotes.yes.ask_price_cents,
                quotes.no.bid_price_cents,
                quotes.no.ask_price_cents,
                snapshot.yes_position,
                snapshot.no_position
            );
            self.quotes.insert(ticker.to_string(), quotes);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn best_bid(&self, ticker: &str, side: BookSide) -> Option<PriceLevel> {
        self.books.lookup(ticker).map(|b| b.book().best_bid(side))
    }

    pub fn best_ask(&self, ticker: &str, side: BookSide) -> Option<PriceLevel> {
        self.books.lookup(ticker).map(|b| b.book().best_ask(side))
    }

    /// `None` unless the side has both a bid and an ask
    pub fn spread(&self, ticker: &str, side: BookSide) -> Option<i64> {
        self.books
            .lookup(ticker)
            .filter(|b| b.book().is_two_sided(side))
            .map(|b| b.book().spread(side))
    }

    /// `None` unless the side has both a bid and an ask
    pub fn midpoint(&self, ticker: &str, side: BookSide) -> Option<f64> {
        self.books
            .lookup(ticker)
            .filter(|b| b.book().is_two_sided(side))
            .map(|b| b.book().midpoint(side))
    }

    pub fn book_state(&self, ticker: &str) -> Option<BookState> {
        self.books.lookup(ticker).map(|b| b.state())
    }

    pub fn pnl_snapshot(&self, ticker: &str) -> Option<PnlSnapshot> {
        self.ledgers.snapshot(ticker)
    }

    pub fn quotes(&self, ticker: &str) -> Option<MarketQuotes> {
        self.quotes.get(ticker).copied()
    }

    pub fn books(&self) -> &BookRegistry {
        &self.books
    }

    pub fn ledgers(&self) -> &LedgerRegistry {
        &self.ledgers
    }

    pub fn is_resync_pending(&self, ticker: &str) -> bool {
        self.resync_pending.contains(ticker)
    }

    /// Tracked tickers, sorted
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.ledgers.tickers().map(str::to_string).collect();
        tickers.sort();
        tickers
    }
}

impl Strategy for KalshiMarketMaker {
    fn name(&self) -> &str {
        "kalshi_mm"
    }

    fn description(&self) -> &str {
        "Avellaneda-Stoikov market making on Kalshi binary markets"
    }

    fn handle_feed_event(&mut self, event: FeedEvent) {
        match &event {
            FeedEvent::Snapshot(snap) => self.on_snapshot(snap),
            FeedEvent::Delta(delta) => self.on_delta(delta),
            FeedEvent::Fill(fill) => {
                self.ledgers.record_fill(fill);
            }
        }
        self.refresh(event.ticker());
    }

    fn on_start(&mut self) {
        info!("[KalshiMM] Tracking {} tickers", self.ledgers.len());
    }
}
