//! Avellaneda-Stoikov quote model
//!
//! Closed-form inventory-aware quoting for a single contract side:
//!
//! ```text
//! reservation = fair - q * gamma * sigma^2 * tau
//! half_spread = 1/k + 0.5 * gamma * sigma^2 * tau
//! bid, ask    = round(reservation -/+ half_spread), each clamped to [1, 99]
//! ```
//!
//! Bid and ask are clamped independently, so at extreme inventory they may
//! collapse onto the same price or even cross.

use crate::domain::{Quote, MAX_QUOTE_CENTS, MIN_QUOTE_CENTS};
use crate::infrastructure::config::QuoteModelConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsParams {
    /// Risk aversion
    pub gamma: f64,
    /// Order arrival decay
    pub k: f64,
    /// Volatility per second, in cents
    pub sigma: f64,
    /// Time horizon in seconds
    pub horizon_secs: f64,
}

impl From<&QuoteModelConfig> for AsParams {
    fn from(config: &QuoteModelConfig) -> Self {
        Self {
            gamma: config.gamma,
            k: config.k,
            sigma: config.sigma,
            horizon_secs: config.horizon_secs,
        }
    }
}

/// Stateless quoter; `compute` is a pure function of params and inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvellanedaStoikov {
    params: AsParams,
}

impl AvellanedaStoikov {
    pub fn new(params: AsParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AsParams {
        &self.params
    }

    #[inline]
    fn risk_term(&self) -> f64 {
        let p = &self.params;
        p.gamma * p.sigma * p.sigma * p.horizon_secs
    }

    /// Inventory-adjusted center price
    pub fn reservation_price(&self, fair_price_cents: f64, inventory: i64) -> f64 {
        fair_price_cents - inventory as f64 * self.risk_term()
    }

    pub fn half_spread(&self) -> f64 {
        1.0 / self.params.k + 0.5 * self.risk_term()
    }

    pub fn compute(&self, fair_price_cents: f64, inventory: i64) -> Quote {
        let reservation = self.reservation_price(fair_price_cents, inventory);
        let half_spread = self.half_spread();

        Quote::clamped(
            round_cents(reservation - half_spread),
            round_cents(reservation + half_spread),
        )
    }
}

/// Round half away from zero; `as` saturates far outside the quote range
#[inline]
fn round_cents(price: f64) -> i64 {
    price.round() as i64
}
