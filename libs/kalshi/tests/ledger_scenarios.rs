//! Ledger scenarios
//!
//! Multi-fill accounting walks through the registry, including the
//! reconciliation and untracked-ticker paths.

mod common;

use common::fixtures::fill;
use common::TICKER;
use kalshi::{Action, BookSide, Exchange, FillOutcome, LedgerRegistry, PnlSnapshot};

fn registry() -> LedgerRegistry {
    LedgerRegistry::new(Exchange::Kalshi, [TICKER, "KXETH-24DEC31"])
}

#[test]
fn test_open_then_partial_close() {
    let mut ledgers = registry();

    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 60, 10, 10));
    let snap = ledgers.snapshot(TICKER).unwrap();
    assert_eq!(snap.yes_position, 10);
    assert_eq!(snap.cash_cents, -600);
    assert_eq!(snap.realized_pnl_cents, 0);
    assert_eq!(snap.yes_vwap_cents, 60);

    ledgers.record_fill(&fill(BookSide::Yes, Action::Sell, 70, 4, 6));
    let snap = ledgers.snapshot(TICKER).unwrap();
    assert_eq!(snap.yes_position, 6);
    assert_eq!(snap.cash_cents, -320);
    assert_eq!(snap.realized_pnl_cents, 40);
    assert_eq!(snap.yes_vwap_cents, 60);
}

#[test]
fn test_round_trip_goes_flat() {
    let mut ledgers = registry();
    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 60, 10, 10));
    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 50, 10, 20));
    ledgers.record_fill(&fill(BookSide::Yes, Action::Sell, 90, 20, 0));

    let snap = ledgers.snapshot(TICKER).unwrap();
    assert!(snap.is_flat());
    assert_eq!(snap.yes_vwap_cents, 0);
    // bought 20 at avg 55, sold at 90
    assert_eq!(snap.realized_pnl_cents, 700);
    assert_eq!(snap.fill_count, 3);
}

#[test]
fn test_short_closed_at_a_loss() {
    let mut ledgers = registry();
    ledgers.record_fill(&fill(BookSide::Yes, Action::Sell, 40, 10, -10));
    let snap = ledgers.snapshot(TICKER).unwrap();
    assert_eq!(snap.yes_position, -10);
    assert_eq!(snap.yes_vwap_cents, 40);
    assert_eq!(snap.cash_cents, 400);

    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 55, 10, 0));
    let snap = ledgers.snapshot(TICKER).unwrap();
    assert!(snap.is_flat());
    assert_eq!(snap.yes_vwap_cents, 0);
    // sold at 40, bought back at 55
    assert_eq!(snap.realized_pnl_cents, -150);
    assert_eq!(snap.cash_cents, -150);
    assert_eq!(snap.fill_count, 2);
}

#[test]
fn test_hedged_inventory_on_both_sides() {
    let mut ledgers = registry();
    // Buy YES at 40, buy NO at 100 - 45 = 55
    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 40, 10, 10));
    ledgers.record_fill(&fill(BookSide::No, Action::Buy, 45, 10, 0));

    if let Some(ledger) = ledgers.ledger_mut(TICKER) {
        ledger.set_marks(42, 58);
    }
    let snap = ledgers.snapshot(TICKER).unwrap();
    assert_eq!(snap.net_position(), 0);
    assert_eq!(snap.cash_cents, -950);
    // 10 * (42 - 40) + 10 * (58 - 55)
    assert_eq!(snap.unrealized_pnl_cents, 50);
    assert_eq!(snap.equity_cents, -900);
}

#[test]
fn test_mismatch_reported_and_local_state_kept() {
    let mut ledgers = registry();
    let outcome = ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 60, 10, 7));

    match outcome {
        Some(FillOutcome::Applied {
            position_mismatch: Some(mismatch),
        }) => {
            assert_eq!(mismatch.local, 10);
            assert_eq!(mismatch.exchange, 7);
        }
        other => panic!("expected mismatch, got {:?}", other),
    }
    assert_eq!(ledgers.snapshot(TICKER).map(|s| s.yes_position), Some(10));
}

#[test]
fn test_untracked_ticker_leaves_others_untouched() {
    let mut ledgers = registry();
    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 60, 10, 10));
    let before: Vec<Option<PnlSnapshot>> = [TICKER, "KXETH-24DEC31"]
        .iter()
        .map(|t| ledgers.snapshot(t))
        .collect();

    let mut stray = fill(BookSide::No, Action::Sell, 30, 99, 0);
    stray.ticker = "UNKNOWN".to_string();
    assert_eq!(ledgers.record_fill(&stray), None);

    let after: Vec<Option<PnlSnapshot>> = [TICKER, "KXETH-24DEC31"]
        .iter()
        .map(|t| ledgers.snapshot(t))
        .collect();
    assert_eq!(before, after);
    assert!(ledgers.ledger("UNKNOWN").is_none());
}

#[test]
fn test_last_fill_time() {
    let mut ledgers = registry();
    assert_eq!(ledgers.snapshot(TICKER).and_then(|s| s.last_fill_time()), None);

    ledgers.record_fill(&fill(BookSide::Yes, Action::Buy, 60, 1, 1));
    let time = ledgers.snapshot(TICKER).and_then(|s| s.last_fill_time()).unwrap();
    assert_eq!(time.timestamp(), 1_700_000_000);
}
