//! Infrastructure layer
//!
//! Stateful registries, accounting, configuration and wire adapters.

pub mod book_registry;
pub mod client;
pub mod config;
pub mod logging;
pub mod positions;

pub use book_registry::BookRegistry;
pub use client::{FeedAdapter, KalshiFeedAdapter};
pub use config::{
    ConfigError, EngineConfig, MarketMakerConfig, QuoteModelConfig, ShutdownPolicy,
};
pub use logging::init_tracing;
pub use positions::{FillOutcome, LedgerRegistry, PositionLedger, PositionMismatch};
