//! Position Ledger - per-instrument inventory and PnL accounting
//!
//! Tracks YES and NO inventory independently (either may be long or short),
//! with a cost basis per side, a shared cash balance, and realized PnL.
//!
//! Accounting rules:
//! - Buying debits `price * qty` from cash, selling credits it.
//! - Realized PnL accrues only on the portion of a fill that reduces an
//!   existing position, measured against the pre-fill VWAP.
//! - VWAP is re-averaged only when the position grows on the same sign,
//!   resets to the fill price when the position flips, and to 0 when flat.

use tracing::warn;

use crate::domain::{Action, BookSide, FillEvent, PnlSnapshot, CONTRACT_PAYOUT_CENTS};

/// Local vs exchange-reported net position after a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMismatch {
    pub local: i64,
    pub exchange: i64,
}

/// What the ledger did with a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Position and cash updated; carries the reconciliation result
    Applied {
        position_mismatch: Option<PositionMismatch>,
    },
    /// Zero or negative quantity, or a fill too large to book without
    /// overflowing; only the timestamp advanced
    IgnoredQuantity,
}

impl FillOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FillOutcome::Applied { .. })
    }
}

/// Inventory held on one contract side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SideInventory {
    position: i64,
    vwap_cents: i64,
}

impl SideInventory {
    /// Apply a fill on this side; returns the PnL realized by the closing portion.
    /// `None` on i64 overflow, in which case nothing is changed.
    fn apply(&mut self, action: Action, qty: i64, price_cents: i64) -> Option<i64> {
        let old_pos = self.position;
        let new_pos = old_pos.checked_add(action.sign().checked_mul(qty)?)?;
        let abs_old = old_pos.checked_abs()?;
        let abs_new = new_pos.checked_abs()?;

        let realized = match action {
            Action::Sell if old_pos > 0 => (price_cents - self.vwap_cents).checked_mul(abs_old.min(qty))?,
            Action::Buy if old_pos < 0 => (self.vwap_cents - price_cents).checked_mul(abs_old.min(qty))?,
            _ => 0,
        };

        let vwap_cents = if new_pos == 0 {
            0
        } else if (old_pos >= 0 && new_pos > 0) || (old_pos <= 0 && new_pos < 0) {
            if abs_new > abs_old {
                let old_notional = abs_old.checked_mul(self.vwap_cents)?;
                let add_notional = (abs_new - abs_old).checked_mul(price_cents)?;
                old_notional.checked_add(add_notional)? / abs_new
            } else {
                self.vwap_cents
            }
        } else {
            // Flipped through zero: the remainder was opened at this fill's price
            price_cents
        };

        self.position = new_pos;
        self.vwap_cents = vwap_cents;
        Some(realized)
    }

    fn unrealized(&self, mark_cents: Option<i64>) -> i64 {
        match mark_cents {
            Some(mark) if self.position != 0 => self.position.saturating_mul(mark - self.vwap_cents),
            _ => 0,
        }
    }

    fn reported_vwap(&self) -> i64 {
        if self.position != 0 {
            self.vwap_cents
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct PositionLedger {
    ticker: String,
    yes: SideInventory,
    no: SideInventory,
    cash_cents: i64,
    realized_pnl_cents: i64,
    yes_mark_cents: Option<i64>,
    no_mark_cents: Option<i64>,
    fill_count: u64,
    last_fill_timestamp: i64,
}

impl PositionLedger {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            yes: SideInventory::default(),
            no: SideInventory::default(),
            cash_cents: 0,
            realized_pnl_cents: 0,
            yes_mark_cents: None,
            no_mark_cents: None,
            fill_count: 0,
            last_fill_timestamp: 0,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Store fair-price marks used for unrealized PnL only
    pub fn set_marks(&mut self, yes_mark_cents: i64, no_mark_cents: i64) {
        self.yes_mark_cents = Some(yes_mark_cents);
        self.no_mark_cents = Some(no_mark_cents);
    }

    pub fn marks(&self) -> (Option<i64>, Option<i64>) {
        (self.yes_mark_cents, self.no_mark_cents)
    }

    pub fn position(&self, side: BookSide) -> i64 {
        match side {
            BookSide::Yes => self.yes.position,
            BookSide::No => self.no.position,
        }
    }

    pub fn record_fill(&mut self, fill: &FillEvent) -> FillOutcome {
        if fill.quantity <= 0 {
            warn!(
                "[Ledger] {} ignoring fill with non-positive quantity {} (trade_id={})",
                self.ticker, fill.quantity, fill.trade_id
            );
            self.last_fill_timestamp = fill.timestamp;
            return FillOutcome::IgnoredQuantity;
        }

        let yes_price = fill.yes_price_cents.clamp(0, CONTRACT_PAYOUT_CENTS);
        let price = match fill.side {
            BookSide::Yes => yes_price,
            BookSide::No => CONTRACT_PAYOUT_CENTS - yes_price,
        };

        let Some((inventory, cash_cents, realized_pnl_cents)) = self.book(fill, price) else {
            warn!(
                "[Ledger] {} ignoring fill: quantity {} at {}c overflows the ledger (trade_id={})",
                self.ticker, fill.quantity, price, fill.trade_id
            );
            self.last_fill_timestamp = fill.timestamp;
            return FillOutcome::IgnoredQuantity;
        };

        match fill.side {
            BookSide::Yes => self.yes = inventory,
            BookSide::No => self.no = inventory,
        }
        self.cash_cents = cash_cents;
        self.realized_pnl_cents = realized_pnl_cents;

        self.fill_count += 1;
        self.last_fill_timestamp = fill.timestamp;

        let local = self.yes.position.saturating_sub(self.no.position);
        let position_mismatch = if local != fill.post_position {
            warn!(
                "[Ledger] post_position mismatch: exchange={} local={} ticker={} trade_id={}",
                fill.post_position, local, self.ticker, fill.trade_id
            );
            Some(PositionMismatch {
                local,
                exchange: fill.post_position,
            })
        } else {
            None
        };

        FillOutcome::Applied { position_mismatch }
    }

    /// Post-fill (inventory, cash, realized) for one side, or `None` on overflow
    fn book(&self, fill: &FillEvent, price_cents: i64) -> Option<(SideInventory, i64, i64)> {
        let mut inventory = match fill.side {
            BookSide::Yes => self.yes,
            BookSide::No => self.no,
        };
        let notional = price_cents.checked_mul(fill.quantity)?;
        let cash_cents = match fill.action {
            Action::Buy => self.cash_cents.checked_sub(notional)?,
            Action::Sell => self.cash_cents.checked_add(notional)?,
        };
        let realized = inventory.apply(fill.action, fill.quantity, price_cents)?;
        let realized_pnl_cents = self.realized_pnl_cents.checked_add(realized)?;
        Some((inventory, cash_cents, realized_pnl_cents))
    }

    pub fn snapshot(&self) -> PnlSnapshot {
        let unrealized = self
            .yes
            .unrealized(self.yes_mark_cents)
            .saturating_add(self.no.unrealized(self.no_mark_cents));

        PnlSnapshot {
            yes_position: self.yes.position,
            no_position: self.no.position,
            cash_cents: self.cash_cents,
            realized_pnl_cents: self.realized_pnl_cents,
            unrealized_pnl_cents: unrealized,
            equity_cents: self
                .cash_cents
                .saturating_add(self.realized_pnl_cents)
                .saturating_add(unrealized),
            yes_vwap_cents: self.yes.reported_vwap(),
            no_vwap_cents: self.no.reported_vwap(),
            fill_count: self.fill_count,
            last_fill_timestamp: self.last_fill_timestamp,
        }
    }
}
