//! Engine - event dispatch onto a single consumer thread

mod commands;
mod engine;

pub use commands::{EngineCommand, EngineStats};
pub use engine::{Engine, EngineError, EventSender};
