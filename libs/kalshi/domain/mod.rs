//! Domain Layer
//!
//! Contains pure business entities and domain models.
//! This layer has no dependencies on infrastructure or application layers.

pub mod feed;
pub mod orderbook;
pub mod pnl;
pub mod quote;
pub mod sequenced_book;

pub use feed::{Action, BookSide, DeltaEvent, Exchange, FeedEvent, FillEvent, SnapshotEvent};
pub use orderbook::{BidLadder, PriceLevel, PriceLevelBook, CONTRACT_PAYOUT_CENTS};
pub use pnl::PnlSnapshot;
pub use quote::{MarketQuotes, Quote, MAX_QUOTE_CENTS, MIN_QUOTE_CENTS};
pub use sequenced_book::{ApplyResult, BookState, SequencedBook};
