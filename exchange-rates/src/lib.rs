//! Rate Resolution Strategies
//!
//! Pure arithmetic for turning stored exchange rates into a conversion rate.
//! Nothing in this crate touches storage: a caller asks a [`Strategy`] which
//! currency pairs ("legs") it needs, looks them up however it likes, and hands
//! the found rates back to [`Strategy::combine`].
//!
//! Strategies are tried in [`Strategy::ORDER`]; the first one whose legs are
//! all present wins.
//!
//! # Example
//! ```
//! use exchange_rates::{Strategy, convert_amount};
//!
//! // Only (USD, RUB) and (USD, EUR) are stored.
//! let legs = Strategy::Cross.legs("RUB", "EUR");
//! assert_eq!(legs[0].base, "USD");
//! assert_eq!(legs[1].target, "EUR");
//!
//! let rate = Strategy::Cross.combine(&[90.0, 0.93]).unwrap();
//! assert_eq!(convert_amount(1000.0, rate), 10.33);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reference currency used for cross rates.
///
/// Fixed: there is no fallback anchor when rates against it are missing.
pub const ANCHOR_CURRENCY: &str = "USD";

/// Decimal places a converted amount is rounded to.
pub const AMOUNT_DECIMAL_PLACES: i32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("{strategy} strategy needs {expected} rate(s), got {got}")]
    LegCountMismatch {
        strategy: Strategy,
        expected: usize,
        got: usize,
    },

    #[error("Rate must be a positive finite number, got {0}")]
    InvalidRate(f64),
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy
// ─────────────────────────────────────────────────────────────────────────────

/// One stored rate a strategy depends on: `target` units per 1 `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    pub base: &'a str,
    pub target: &'a str,
}

/// How a conversion rate was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Stored `(base, target)` rate as is.
    Direct,
    /// Reciprocal of the stored `(target, base)` rate.
    Inverse,
    /// `(ANCHOR, target) / (ANCHOR, base)`.
    Cross,
}

impl Strategy {
    /// Evaluation order of the fallback chain.
    pub const ORDER: [Strategy; 3] = [Strategy::Direct, Strategy::Inverse, Strategy::Cross];

    /// Stored rates this strategy needs, in the order [`Strategy::combine`] expects them.
    pub fn legs<'a>(&self, base: &'a str, target: &'a str) -> Vec<Leg<'a>> {
        match self {
            Strategy::Direct => vec![Leg { base, target }],
            Strategy::Inverse => vec![Leg {
                base: target,
                target: base,
            }],
            Strategy::Cross => vec![
                Leg {
                    base: ANCHOR_CURRENCY,
                    target: base,
                },
                Leg {
                    base: ANCHOR_CURRENCY,
                    target,
                },
            ],
        }
    }

    /// Number of legs this strategy looks up.
    pub fn leg_count(&self) -> usize {
        match self {
            Strategy::Direct | Strategy::Inverse => 1,
            Strategy::Cross => 2,
        }
    }

    /// Derives the conversion rate from the rates found for [`Strategy::legs`].
    pub fn combine(&self, rates: &[f64]) -> Result<f64, RateError> {
        if rates.len() != self.leg_count() {
            return Err(RateError::LegCountMismatch {
                strategy: *self,
                expected: self.leg_count(),
                got: rates.len(),
            });
        }

        match (self, rates) {
            (Strategy::Direct, [rate]) => direct(*rate),
            (Strategy::Inverse, [rate]) => inverse(*rate),
            (Strategy::Cross, [anchor_to_base, anchor_to_target]) => {
                cross(*anchor_to_base, *anchor_to_target)
            }
            _ => unreachable!("leg count checked above"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Direct => "DIRECT",
            Strategy::Inverse => "INVERSE",
            Strategy::Cross => "CROSS",
        };
        f.write_str(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate arithmetic
// ─────────────────────────────────────────────────────────────────────────────

fn checked(rate: f64) -> Result<f64, RateError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(RateError::InvalidRate(rate))
    }
}

pub fn direct(rate: f64) -> Result<f64, RateError> {
    checked(rate)
}

pub fn inverse(rate: f64) -> Result<f64, RateError> {
    checked(1.0 / checked(rate)?)
}

pub fn cross(anchor_to_base: f64, anchor_to_target: f64) -> Result<f64, RateError> {
    checked(checked(anchor_to_target)? / checked(anchor_to_base)?)
}

/// Rounds half away from zero to `places` decimal places.
pub fn round_half_away_from_zero(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    // Too large to carry a fractional part.
    if !scaled.is_finite() {
        return value;
    }
    // f64::round already rounds ties away from zero.
    scaled.round() / factor
}

/// `amount * rate`, rounded to [`AMOUNT_DECIMAL_PLACES`].
///
/// Overflows to infinity for amounts the rate pushes past `f64::MAX`;
/// callers reject a non-finite result.
pub fn convert_amount(amount: f64, rate: f64) -> f64 {
    round_half_away_from_zero(amount * rate, AMOUNT_DECIMAL_PLACES)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
