//! Trading strategies

pub mod avellaneda_stoikov;
pub mod kalshi_mm;
pub mod traits;

pub use avellaneda_stoikov::{AsParams, AvellanedaStoikov};
pub use kalshi_mm::{KalshiMarketMaker, ResyncRequest};
pub use traits::Strategy;
