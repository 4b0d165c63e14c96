//! Sequence-gated order book
//!
//! Wraps a [`PriceLevelBook`] with the snapshot/delta consistency protocol:
//! no delta is applied before a snapshot, and once synced only the next
//! contiguous sequence number is accepted. Sequence numbers are scoped to a
//! subscription, so the book also remembers which subscription fed it.

use super::feed::{BookSide, DeltaEvent, SnapshotEvent};
use super::orderbook::PriceLevelBook;

/// Outcome of applying a snapshot or delta
///
/// None of these are errors: every variant leaves the book consistent and the
/// caller decides on follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// Snapshot not newer than what is already applied
    StaleSnapshot,
    /// Duplicate or late delta
    StaleDelta,
    /// At least one delta was lost; a fresh snapshot is required
    SequenceGap,
    /// Delta arrived before any snapshot
    AwaitingSnapshot,
}

impl ApplyResult {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyResult::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    Uninitialized,
    Synced { last_applied_seq: u64 },
}

#[derive(Debug, Clone)]
pub struct SequencedBook {
    book: PriceLevelBook,
    last_applied_seq: u64,
    has_snapshot: bool,
    subscription_id: Option<u64>,
}

impl SequencedBook {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            book: PriceLevelBook::new(ticker),
            last_applied_seq: 0,
            has_snapshot: false,
            subscription_id: None,
        }
    }

    pub fn ticker(&self) -> &str {
        self.book.ticker()
    }

    pub fn book(&self) -> &PriceLevelBook {
        &self.book
    }

    pub fn state(&self) -> BookState {
        if self.has_snapshot {
            BookState::Synced {
                last_applied_seq: self.last_applied_seq,
            }
        } else {
            BookState::Uninitialized
        }
    }

    #[inline]
    pub fn has_snapshot(&self) -> bool {
        self.has_snapshot
    }

    #[inline]
    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    #[inline]
    pub fn subscription_id(&self) -> Option<u64> {
        self.subscription_id
    }

    pub(crate) fn set_subscription_id(&mut self, subscription_id: u64) {
        self.subscription_id = Some(subscription_id);
    }

    /// Drop all levels and sequence state; a new snapshot is required afterwards
    pub fn reset(&mut self) {
        self.book.clear();
        self.last_applied_seq = 0;
        self.has_snapshot = false;
    }

    pub fn apply_snapshot(
        &mut self,
        seq: u64,
        yes_levels: &[(i64, i64)],
        no_levels: &[(i64, i64)],
    ) -> ApplyResult {
        if self.has_snapshot && seq <= self.last_applied_seq {
            return ApplyResult::StaleSnapshot;
        }
        self.book.set_snapshot(yes_levels, no_levels);
        self.last_applied_seq = seq;
        self.has_snapshot = true;
        ApplyResult::Applied
    }

    pub fn apply_delta(&mut self, seq: u64, price: i64, delta: i64, side: BookSide) -> ApplyResult {
        if !self.has_snapshot {
            return ApplyResult::AwaitingSnapshot;
        }
        if seq <= self.last_applied_seq {
            return ApplyResult::StaleDelta;
        }
        if seq > self.last_applied_seq + 1 {
            return ApplyResult::SequenceGap;
        }
        self.book.update_delta(price, delta, side);
        self.last_applied_seq = seq;
        ApplyResult::Applied
    }

    pub fn apply_snapshot_event(&mut self, snap: &SnapshotEvent) -> ApplyResult {
        self.apply_snapshot(snap.seq, &snap.yes_levels, &snap.no_levels)
    }

    pub fn apply_delta_event(&mut self, delta: &DeltaEvent) -> ApplyResult {
        self.apply_delta(delta.seq, delta.price_cents, delta.delta_volume, delta.side)
    }
}
