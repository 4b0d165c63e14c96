//! Strategy trait definition
//!
//! The engine's single consumer thread drives one strategy. Every event is
//! delivered through `&mut self`, so implementations keep their state in plain
//! (unsynchronized) collections.

use crate::domain::FeedEvent;

pub trait Strategy: Send + Sync + 'static {
    /// Get the strategy name for logging and identification
    fn name(&self) -> &str;

    /// Get a description of what this strategy does
    fn description(&self) -> &str {
        ""
    }

    /// Handle one normalized event; called in enqueue order
    fn handle_feed_event(&mut self, event: FeedEvent);

    /// Called on the consumer thread before the first event
    fn on_start(&mut self) {}

    /// Called on the consumer thread after the last processed event
    fn on_stop(&mut self) {}
}
