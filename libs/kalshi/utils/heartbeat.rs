//! Heartbeat logging for long-running processes

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Tracks heartbeat intervals for periodic status logging
pub struct Heartbeat {
    interval: Duration,
    last_beat: DateTime<Utc>,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_beat: Utc::now(),
        }
    }

    pub fn from_secs(interval_secs: u64) -> Self {
        Self::new(Duration::from_secs(interval_secs))
    }

    /// Check if enough time has passed since the last beat
    pub fn should_beat(&self) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.last_beat);
        elapsed.to_std().unwrap_or_default() >= self.interval
    }

    pub fn beat(&mut self) {
        self.last_beat = Utc::now();
    }

    /// Beat and return true if the interval has elapsed
    pub fn tick(&mut self) -> bool {
        if self.should_beat() {
            self.beat();
            true
        } else {
            false
        }
    }

    pub fn last_beat(&self) -> DateTime<Utc> {
        self.last_beat
    }
}
