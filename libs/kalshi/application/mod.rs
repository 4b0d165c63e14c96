//! Application Layer
//!
//! Event dispatch and trading strategies.
//! This layer depends on domain and infrastructure layers.

pub mod engine;
pub mod strategies;

pub use engine::{Engine, EngineError, EngineStats, EventSender};
pub use strategies::{AsParams, AvellanedaStoikov, KalshiMarketMaker, ResyncRequest, Strategy};
