//! Engine - single consumer thread feeding one strategy
//!
//! Producers push [`FeedEvent`]s into an unbounded FIFO channel without
//! blocking. One named thread drains it and calls the strategy, so book,
//! ledger and quote state is only ever mutated from that thread. Queries take
//! a read lock on the shared strategy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, error, info};

use super::commands::{EngineCommand, EngineStats};
use crate::application::strategies::Strategy;
use crate::domain::FeedEvent;
use crate::infrastructure::config::{EngineConfig, ShutdownPolicy};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine already started")]
    AlreadyStarted,

    #[error("Engine is not running")]
    NotRunning,

    #[error("Engine event channel closed")]
    ChannelClosed,

    #[error("Engine consumer thread panicked")]
    ThreadPanic,

    #[error("Failed to spawn engine thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Clone-able producer handle; safe to move to other threads
#[derive(Clone)]
pub struct EventSender {
    event_tx: Sender<EngineCommand>,
}

impl EventSender {
    /// Non-blocking enqueue
    pub fn push(&self, event: FeedEvent) -> Result<()> {
        self.event_tx
            .send(EngineCommand::Event(event))
            .map_err(|_| EngineError::ChannelClosed)
    }
}

pub struct Engine<S: Strategy> {
    strategy: Arc<RwLock<S>>,
    config: EngineConfig,
    event_tx: Sender<EngineCommand>,
    /// Held until `start` moves it into the consumer thread
    event_rx: Option<Receiver<EngineCommand>>,
    stop_now: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<EngineStats>>,
    stopped: bool,
}

impl<S: Strategy> Engine<S> {
    pub fn new(strategy: S, config: EngineConfig) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            strategy: Arc::new(RwLock::new(strategy)),
            config,
            event_tx,
            event_rx: Some(event_rx),
            stop_now: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
            stopped: false,
        }
    }

    /// Spawn the consumer thread; events pushed earlier are processed first
    pub fn start(&mut self) -> Result<()> {
        let event_rx = self.event_rx.take().ok_or(EngineError::AlreadyStarted)?;

        let consumer = Consumer {
            strategy: Arc::clone(&self.strategy),
            event_rx,
            stop_now: Arc::clone(&self.stop_now),
        };

        let handle = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || consumer.run())?;

        info!(
            "[Engine] Started '{}' on thread '{}' ({:?} shutdown)",
            self.strategy.read().name(),
            self.config.thread_name,
            self.config.shutdown_policy
        );
        self.thread_handle = Some(handle);
        Ok(())
    }

    /// Non-blocking enqueue
    pub fn push(&self, event: FeedEvent) -> Result<()> {
        if self.stopped {
            return Err(EngineError::ChannelClosed);
        }
        self.event_tx
            .send(EngineCommand::Event(event))
            .map_err(|_| EngineError::ChannelClosed)
    }

    /// Producer handle for other threads
    pub fn sender(&self) -> EventSender {
        EventSender {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Stop the consumer according to the configured [`ShutdownPolicy`]
    pub fn stop(&mut self) -> Result<EngineStats> {
        let handle = self.thread_handle.take().ok_or(EngineError::NotRunning)?;
        self.stopped = true;

        if self.config.shutdown_policy == ShutdownPolicy::Immediate {
            self.stop_now.store(true, Ordering::Release);
        }
        // Wakes the consumer; under Drain it is queued behind pending events
        let _ = self.event_tx.send(EngineCommand::Shutdown);

        let stats = handle.join().map_err(|_| {
            error!("[Engine] Consumer thread panicked");
            EngineError::ThreadPanic
        })?;

        info!(
            "[Engine] Stopped: processed={}, discarded={}",
            stats.processed, stats.discarded
        );
        Ok(stats)
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Events waiting in the queue
    pub fn pending(&self) -> usize {
        self.event_tx.len()
    }

    /// Run a read-only query against the strategy
    pub fn with_strategy<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.strategy.read())
    }

    pub fn strategy(&self) -> Arc<RwLock<S>> {
        Arc::clone(&self.strategy)
    }
}

impl<S: Strategy> Drop for Engine<S> {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            let _ = self.stop();
        }
    }
}

// =============================================================================
// Consumer
// =============================================================================

struct Consumer<S: Strategy> {
    strategy: Arc<RwLock<S>>,
    event_rx: Receiver<EngineCommand>,
    stop_now: Arc<AtomicBool>,
}

impl<S: Strategy> Consumer<S> {
    fn run(self) -> EngineStats {
        let mut stats = EngineStats::default();
        self.strategy.write().on_start();

        loop {
            match self.event_rx.recv() {
                Ok(EngineCommand::Event(event)) => {
                    if self.stop_now.load(Ordering::Acquire) {
                        stats.discarded += 1;
                        break;
                    }
                    debug!("[Engine] {} event for {}", event.kind(), event.ticker());
                    self.strategy.write().handle_feed_event(event);
                    stats.processed += 1;
                }
                Ok(command) => {
                    debug!("[Engine] Received command: {}", command.description());
                    break;
                }
                Err(_) => {
                    info!("[Engine] Channel closed, shutting down");
                    break;
                }
            }
        }

        // Anything still queued will never be handled
        stats.discarded += self
            .event_rx
            .try_iter()
            .filter(|command| !command.is_shutdown())
            .count() as u64;

        self.strategy.write().on_stop();
        stats
    }
}
