//! Kalshi feed adapter
//!
//! Maps raw WebSocket text frames into normalized [`FeedEvent`]s. Anything
//! malformed, unknown, or missing a required field is dropped here so the
//! engine only ever sees well-formed events.

use tracing::{debug, trace};

use super::ws_types::{
    msg_type, FillMsg, OrderbookDeltaMsg, OrderbookSnapshotMsg, WsAction, WsEnvelope, WsSide,
};
use crate::domain::{Action, BookSide, DeltaEvent, FeedEvent, FillEvent, SnapshotEvent};

/// Wire format to [`FeedEvent`] translation
pub trait FeedAdapter: Send + Sync {
    /// `None` for anything that should not reach the engine
    fn parse(&self, raw: &str) -> Option<FeedEvent>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KalshiFeedAdapter;

impl KalshiFeedAdapter {
    pub fn new() -> Self {
        Self
    }

    fn snapshot(envelope: WsEnvelope) -> Option<FeedEvent> {
        let seq = envelope.seq?;
        let msg: OrderbookSnapshotMsg = serde_json::from_value(envelope.msg).ok()?;
        Some(FeedEvent::Snapshot(SnapshotEvent {
            subscription_id: envelope.sid,
            ticker: msg.market_ticker,
            yes_levels: msg.yes,
            no_levels: msg.no,
            seq,
        }))
    }

    fn delta(envelope: WsEnvelope) -> Option<FeedEvent> {
        let seq = envelope.seq?;
        let msg: OrderbookDeltaMsg = serde_json::from_value(envelope.msg).ok()?;
        Some(FeedEvent::Delta(DeltaEvent {
            subscription_id: envelope.sid,
            ticker: msg.market_ticker,
            side: msg.side.into(),
            price_cents: msg.price,
            delta_volume: msg.delta,
            seq,
        }))
    }

    fn fill(envelope: WsEnvelope) -> Option<FeedEvent> {
        let msg: FillMsg = serde_json::from_value(envelope.msg).ok()?;
        trace!(
            "[KalshiAdapter] fill order_id={} taker={} client_order_id={:?}",
            msg.order_id,
            msg.is_taker,
            msg.client_order_id
        );
        Some(FeedEvent::Fill(FillEvent {
            ticker: msg.market_ticker,
            side: msg.purchased_side.unwrap_or(msg.side).into(),
            action: msg.action.into(),
            yes_price_cents: msg.yes_price,
            quantity: msg.count,
            post_position: msg.post_position,
            trade_id: msg.trade_id,
            timestamp: msg.ts,
        }))
    }
}

impl FeedAdapter for KalshiFeedAdapter {
    fn parse(&self, raw: &str) -> Option<FeedEvent> {
        let envelope: WsEnvelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!("[KalshiAdapter] dropping unparseable frame: {}", e);
                return None;
            }
        };

        let kind = envelope.msg_type.clone();
        let event = match kind.as_str() {
            msg_type::ORDERBOOK_SNAPSHOT => Self::snapshot(envelope),
            msg_type::ORDERBOOK_DELTA => Self::delta(envelope),
            msg_type::FILL => Self::fill(envelope),
            other => {
                trace!("[KalshiAdapter] ignoring message type {}", other);
                return None;
            }
        };

        if event.is_none() {
            debug!("[KalshiAdapter] dropping malformed {} message", kind);
        }
        event
    }
}

impl From<WsSide> for BookSide {
    fn from(side: WsSide) -> Self {
        match side {
            WsSide::Yes => BookSide::Yes,
            WsSide::No => BookSide::No,
        }
    }
}

impl From<WsAction> for Action {
    fn from(action: WsAction) -> Self {
        match action {
            WsAction::Buy => Action::Buy,
            WsAction::Sell => Action::Sell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<FeedEvent> {
        KalshiFeedAdapter::new().parse(raw)
    }

    #[test]
    fn test_parse_snapshot() {
        let raw = r#"{"type":"orderbook_snapshot","sid":2,"seq":1,
            "msg":{"market_ticker":"FED-23DEC-T3.00","yes":[[8,300],[22,333]],"no":[[54,20],[56,146]]}}"#;

        match parse(raw) {
            Some(FeedEvent::Snapshot(snap)) => {
                assert_eq!(snap.subscription_id, 2);
                assert_eq!(snap.seq, 1);
                assert_eq!(snap.ticker, "FED-23DEC-T3.00");
                assert_eq!(snap.yes_levels, vec![(8, 300), (22, 333)]);
                assert_eq!(snap.no_levels, vec![(54, 20), (56, 146)]);
            }
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_snapshot_with_missing_side() {
        let raw = r#"{"type":"orderbook_snapshot","sid":2,"seq":4,"msg":{"market_ticker":"T","yes":[[10,1]]}}"#;
        match parse(raw) {
            Some(FeedEvent::Snapshot(snap)) => assert!(snap.no_levels.is_empty()),
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_delta() {
        let raw = r#"{"type":"orderbook_delta","sid":2,"seq":3,
            "msg":{"market_ticker":"FED-23DEC-T3.00","price":96,"delta":-54,"side":"yes"}}"#;

        assert_eq!(
            parse(raw),
            Some(FeedEvent::Delta(DeltaEvent {
                subscription_id: 2,
                ticker: "FED-23DEC-T3.00".to_string(),
                side: BookSide::Yes,
                price_cents: 96,
                delta_volume: -54,
                seq: 3,
            }))
        );
    }

    #[test]
    fn test_parse_fill_uses_purchased_side() {
        let raw = r#"{"type":"fill","sid":13,"msg":{
            "trade_id":"d91bc706","order_id":"ee587a1c","market_ticker":"HIGHNY-22DEC23-B53.5",
            "is_taker":true,"side":"yes","purchased_side":"no","yes_price":75,"count":278,
            "action":"buy","ts":1671899397,"post_position":-278,"client_order_id":null}}"#;

        match parse(raw) {
            Some(FeedEvent::Fill(fill)) => {
                assert_eq!(fill.side, BookSide::No);
                assert_eq!(fill.action, Action::Buy);
                assert_eq!(fill.yes_price_cents, 75);
                assert_eq!(fill.quantity, 278);
                assert_eq!(fill.post_position, -278);
                assert_eq!(fill.timestamp, 1671899397);
                assert_eq!(fill.trade_id, "d91bc706");
            }
            other => panic!("expected fill, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fill_without_purchased_side() {
        let raw = r#"{"type":"fill","sid":13,"msg":{
            "trade_id":"t","order_id":"o","market_ticker":"M","is_taker":false,"side":"yes",
            "yes_price":40,"count":5,"action":"sell","ts":1,"post_position":-5}}"#;

        match parse(raw) {
            Some(FeedEvent::Fill(fill)) => {
                assert_eq!(fill.side, BookSide::Yes);
                assert_eq!(fill.action, Action::Sell);
            }
            other => panic!("expected fill, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_messages_dropped() {
        // Not JSON
        assert!(parse("not json").is_none());
        // Missing envelope fields
        assert!(parse(r#"{"type":"orderbook_delta","msg":{}}"#).is_none());
        // Delta without seq
        assert!(parse(
            r#"{"type":"orderbook_delta","sid":1,"msg":{"market_ticker":"T","price":1,"delta":1,"side":"yes"}}"#
        )
        .is_none());
        // Bad side value
        assert!(parse(
            r#"{"type":"orderbook_delta","sid":1,"seq":2,"msg":{"market_ticker":"T","price":1,"delta":1,"side":"maybe"}}"#
        )
        .is_none());
        // Unhandled type
        assert!(parse(r#"{"type":"subscribed","sid":1,"msg":{"channel":"orderbook_delta"}}"#).is_none());
    }
}
