//! Messages carried by the engine's event channel

use crate::domain::FeedEvent;

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Normalized event for the strategy
    Event(FeedEvent),
    /// Stop the consumer loop
    Shutdown,
}

impl EngineCommand {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, EngineCommand::Shutdown)
    }

    /// Get description for logging
    pub fn description(&self) -> &'static str {
        match self {
            EngineCommand::Event(event) => event.kind(),
            EngineCommand::Shutdown => "shutdown",
        }
    }
}

/// Counters reported when the consumer exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Events handed to the strategy
    pub processed: u64,
    /// Events left in the queue at shutdown
    pub discarded: u64,
}

impl EngineStats {
    pub fn total(&self) -> u64 {
        self.processed + self.discarded
    }
}
