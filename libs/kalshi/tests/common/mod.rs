//! Common test utilities for Kalshi integration tests
//!
//! Shared fixtures for feed events, books and strategies.

#![allow(dead_code)]

use kalshi::{
    Action, AsParams, BookSide, DeltaEvent, FeedEvent, FillEvent, KalshiMarketMaker, SnapshotEvent,
};

pub const TICKER: &str = "KXBTC-24DEC31";

pub mod fixtures {
    //! Test fixtures for feed events

    use super::*;

    pub fn snapshot(ticker: &str, sid: u64, seq: u64, yes: &[(i64, i64)], no: &[(i64, i64)]) -> SnapshotEvent {
        SnapshotEvent {
            subscription_id: sid,
            ticker: ticker.to_string(),
            yes_levels: yes.to_vec(),
            no_levels: no.to_vec(),
            seq,
        }
    }

    /// YES 42 bid / 45 ask, NO 55 bid / 58 ask
    pub fn balanced_snapshot(sid: u64, seq: u64) -> FeedEvent {
        FeedEvent::Snapshot(snapshot(TICKER, sid, seq, &[(40, 100), (42, 50)], &[(53, 70), (55, 20)]))
    }

    pub fn delta(sid: u64, seq: u64, side: BookSide, price: i64, volume: i64) -> FeedEvent {
        FeedEvent::Delta(DeltaEvent {
            subscription_id: sid,
            ticker: TICKER.to_string(),
            side,
            price_cents: price,
            delta_volume: volume,
            seq,
        })
    }

    pub fn fill(side: BookSide, action: Action, yes_price: i64, qty: i64, post_position: i64) -> FillEvent {
        FillEvent {
            ticker: TICKER.to_string(),
            side,
            action,
            yes_price_cents: yes_price,
            quantity: qty,
            post_position,
            trade_id: format!("trade-{}-{}", yes_price, qty),
            timestamp: 1_700_000_000,
        }
    }

    pub fn default_params() -> AsParams {
        AsParams {
            gamma: 0.1,
            k: 0.5,
            sigma: 2.0,
            horizon_secs: 1.0,
        }
    }

    pub fn market_maker() -> KalshiMarketMaker {
        KalshiMarketMaker::new(&[TICKER.to_string()], default_params())
    }
}
