//! Kalshi Market Maker - Main Library
//!
//! This crate provides the main library for the Kalshi market maker,
//! following Clean Architecture principles.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **kalshi**: Core books, ledgers, quoting and engine (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use kalshi_mm_bot::bin_common::{load_config_from_env, ConfigType};
//! use kalshi_mm_bot::kalshi::KalshiMarketMaker;
//! ```

// Re-export workspace libraries for convenience
pub use kalshi;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables
    //!
    //! Provides shared functionality for the presentation layer (binaries)
    //! following Clean Architecture principles.

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType, FeedInput};
    pub use runner::{BinaryRunner, RunConfig};
}
