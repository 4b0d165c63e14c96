//! Common utilities for the market maker binaries

mod heartbeat;
mod shutdown;

pub use heartbeat::Heartbeat;
pub use shutdown::ShutdownManager;
