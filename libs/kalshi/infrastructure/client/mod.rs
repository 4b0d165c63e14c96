//! Exchange clients

pub mod kalshi;

pub use kalshi::{FeedAdapter, KalshiFeedAdapter};
