//! # Discount Engine
//!
//! Ordered, stacking percentage discounts on a cart subtotal.
//!
//! ## Rules (default policy)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  running = subtotal                                                     │
//! │                                                                         │
//! │  1. SENIOR   age > 65          → running × 0.80  "20% senior discount"  │
//! │                                                                         │
//! │  2. BULK     running > 150.00  → running × 0.90  "10% bulk discount"    │
//! │              (tested AFTER rule 1, on the already-discounted value)     │
//! │                                                                         │
//! │  total = round_half_up(running)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stacking is multiplicative: R$200.00 for a 70 year old is
//! 200 × 0.8 = 160, then 160 > 150 so × 0.9 = R$144.00.
//!
//! ## Exact Arithmetic
//! The running total is kept as an exact fraction of cents. Nothing is
//! rounded until [`DiscountOutcome::total`] is materialized, so the bulk
//! threshold comparison never sees a rounded intermediate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

/// One hundred percent, in basis points.
const FULL_BPS: i128 = 10_000;

// =============================================================================
// Policy
// =============================================================================

/// Tunable discount parameters.
///
/// `Default` is the pharmacy's standing policy; the CLI can override it
/// from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountPolicy {
    /// Customers strictly older than this get the senior discount.
    pub senior_age_threshold: i64,
    /// Senior discount rate in basis points (2000 = 20%).
    pub senior_rate_bps: u32,
    /// Running totals strictly above this get the bulk discount.
    pub bulk_threshold: Money,
    /// Bulk discount rate in basis points (1000 = 10%).
    pub bulk_rate_bps: u32,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy {
            senior_age_threshold: 65,
            senior_rate_bps: 2000,
            bulk_threshold: Money::from_cents(15_000),
            bulk_rate_bps: 1000,
        }
    }
}

impl DiscountPolicy {
    /// Applies the rules, in order, to `subtotal` for a customer aged
    /// `customer_age` whole years.
    pub fn apply(&self, subtotal: Money, customer_age: i64) -> DiscountOutcome {
        let mut running = RunningTotal::new(subtotal);
        let mut applied = Vec::new();

        if customer_age > self.senior_age_threshold {
            running.discount(self.senior_rate_bps);
            applied.push(AppliedDiscount {
                kind: DiscountKind::Senior,
                rate_bps: self.senior_rate_bps,
            });
        }

        if running.exceeds(self.bulk_threshold) {
            running.discount(self.bulk_rate_bps);
            applied.push(AppliedDiscount {
                kind: DiscountKind::Bulk,
                rate_bps: self.bulk_rate_bps,
            });
        }

        DiscountOutcome {
            subtotal,
            total: running.round_half_up(),
            applied,
        }
    }
}

/// Applies the default policy.
///
/// ## Example
/// ```rust
/// use drogaria_core::discount::apply_discounts;
/// use drogaria_core::money::Money;
///
/// let outcome = apply_discounts(Money::from_cents(20_000), 70);
/// assert_eq!(outcome.total, Money::from_cents(14_400));
/// assert_eq!(outcome.labels(), vec!["20% senior discount", "10% bulk discount"]);
/// ```
pub fn apply_discounts(subtotal: Money, customer_age: i64) -> DiscountOutcome {
    DiscountPolicy::default().apply(subtotal, customer_age)
}

// =============================================================================
// Outcome
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Senior,
    Bulk,
}

/// A discount that was granted on a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub rate_bps: u32,
}

impl AppliedDiscount {
    /// Human label, e.g. `"20% senior discount"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AppliedDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiscountKind::Senior => "senior",
            DiscountKind::Bulk => "bulk",
        };
        write!(f, "{} {} discount", format_percentage(self.rate_bps), kind)
    }
}

/// Result of running the discount rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOutcome {
    /// Input subtotal.
    pub subtotal: Money,
    /// Final total, rounded half-up to cents.
    pub total: Money,
    /// Discounts in application order; empty if none applied.
    pub applied: Vec<AppliedDiscount>,
}

impl DiscountOutcome {
    pub fn labels(&self) -> Vec<String> {
        self.applied.iter().map(AppliedDiscount::label).collect()
    }
}

// =============================================================================
// Exact running total
// =============================================================================

/// `numerator / denominator` cents. The denominator is a power of 10_000.
#[derive(Debug, Clone, Copy)]
struct RunningTotal {
    numerator: i128,
    denominator: i128,
}

impl RunningTotal {
    fn new(amount: Money) -> Self {
        RunningTotal {
            numerator: amount.cents() as i128,
            denominator: 1,
        }
    }

    fn discount(&mut self, rate_bps: u32) {
        let keep = FULL_BPS - (rate_bps as i128).min(FULL_BPS);
        self.numerator *= keep;
        self.denominator *= FULL_BPS;
    }

    fn exceeds(&self, threshold: Money) -> bool {
        self.numerator > threshold.cents() as i128 * self.denominator
    }

    fn round_half_up(&self) -> Money {
        let twice_den = 2 * self.denominator;
        let cents = if self.numerator >= 0 {
            (2 * self.numerator + self.denominator) / twice_den
        } else {
            -((-2 * self.numerator + self.denominator) / twice_den)
        };
        Money::from_cents(cents as i64)
    }
}

/// `2000` → `"20%"`, `1250` → `"12.5%"`.
fn format_percentage(bps: u32) -> String {
    if bps % 100 == 0 {
        format!("{}%", bps / 100)
    } else {
        let text = format!("{}.{:02}", bps / 100, bps % 100);
        format!("{}%", text.trim_end_matches('0'))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
