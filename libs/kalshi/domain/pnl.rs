//! Position and PnL snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of one instrument's ledger, all money in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlSnapshot {
    pub yes_position: i64,
    pub no_position: i64,
    /// Running cash balance (negative after net buying)
    pub cash_cents: i64,
    pub realized_pnl_cents: i64,
    pub unrealized_pnl_cents: i64,
    /// cash + realized + unrealized
    pub equity_cents: i64,
    /// Average cost of the open YES position, 0 when flat
    pub yes_vwap_cents: i64,
    /// Average cost of the open NO position, 0 when flat
    pub no_vwap_cents: i64,
    pub fill_count: u64,
    /// Unix seconds of the last fill seen (including ignored ones)
    pub last_fill_timestamp: i64,
}

impl PnlSnapshot {
    /// Net exposure as the exchange reports it (yes - no)
    pub fn net_position(&self) -> i64 {
        self.yes_position.saturating_sub(self.no_position)
    }

    pub fn is_flat(&self) -> bool {
        self.yes_position == 0 && self.no_position == 0
    }

    pub fn last_fill_time(&self) -> Option<DateTime<Utc>> {
        if self.last_fill_timestamp == 0 {
            return None;
        }
        DateTime::from_timestamp(self.last_fill_timestamp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_position_and_flat() {
        let snap = PnlSnapshot {
            yes_position: 10,
            no_position: 4,
            ..Default::default()
        };
        assert_eq!(snap.net_position(), 6);
        assert!(!snap.is_flat());
        assert!(PnlSnapshot::default().is_flat());
    }

    #[test]
    fn test_last_fill_time() {
        assert!(PnlSnapshot::default().last_fill_time().is_none());

        let snap = PnlSnapshot {
            last_fill_timestamp: 1_700_000_000,
            ..Default::default()
        };
        assert_eq!(snap.last_fill_time().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
