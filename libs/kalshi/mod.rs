//! Kalshi Market Maker
//!
//! Sequenced order books, position ledgers and Avellaneda-Stoikov quoting for
//! Kalshi binary markets, driven by a single-consumer event engine.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod utils;

// Re-export commonly used items
pub use application::{
    AsParams, AvellanedaStoikov, Engine, EngineError, EngineStats, EventSender, KalshiMarketMaker,
    ResyncRequest, Strategy,
};
pub use domain::{
    Action, ApplyResult, BookSide, BookState, DeltaEvent, Exchange, FeedEvent, FillEvent,
    MarketQuotes, PnlSnapshot, PriceLevel, PriceLevelBook, Quote, SequencedBook, SnapshotEvent,
    MAX_QUOTE_CENTS, MIN_QUOTE_CENTS,
};
pub use infrastructure::{
    init_tracing, BookRegistry, ConfigError, FeedAdapter, FillOutcome, KalshiFeedAdapter,
    LedgerRegistry, MarketMakerConfig, PositionLedger, ShutdownPolicy,
};
pub use utils::{Heartbeat, ShutdownManager};
