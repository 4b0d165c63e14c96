//! Kalshi market-making strategy

mod strategy;

pub use strategy::{KalshiMarketMaker, ResyncRequest};
