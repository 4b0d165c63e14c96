//! Position tracking
//!
//! Per-instrument ledgers and the registry that routes fills to them.

pub mod ledger;
pub mod registry;

pub use ledger::{FillOutcome, PositionLedger, PositionMismatch};
pub use registry::LedgerRegistry;
