//! Kalshi WebSocket wire format

pub mod adapter;
pub mod ws_types;

pub use adapter::{FeedAdapter, KalshiFeedAdapter};
