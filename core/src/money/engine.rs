//! Sale money arithmetic
//!
//! Forward computation (subtotal → fee → buyer total) and the inverse
//! computations that recover the producer payout, the platform fee, and the
//! original catalog subtotal from a recorded buyer total.
//!
//! # Fee directions
//!
//! - Normal mode: the fee is added on top of the subtotal and charged to the
//!   buyer. The producer receives the subtotal minus any discount (the
//!   discount is borne by the producer, not the platform).
//! - Absorb mode: the buyer pays no fee; the producer pays the fee out of the
//!   ticket price instead.
//!
//! # Rounding
//!
//! All money is i64 cents. Rates multiply/divide in f64 and each named
//! quantity is rounded half-away-from-zero to the cent. The platform fee is
//! always the residual `total_paid - producer_amount`, so rounding drift can
//! never break reconciliation.
//!
//! CRITICAL: All money values are i64 (cents)

use crate::fees::ResolvedFee;
use crate::models::MoneyBreakdown;

/// Round a fractional cent amount to the nearest cent, half away from zero
fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Fee/discount arithmetic for one sale
///
/// Holds the resolved fee decision and the discount already granted by the
/// coupon layer. The discount must be non-negative and is expected to be
/// clamped to the subtotal upstream.
///
/// # Example
/// ```
/// use ticket_pricing_core::fees::ResolvedFee;
/// use ticket_pricing_core::money::MoneyEngine;
///
/// let engine = MoneyEngine::new(ResolvedFee { rate: 0.10, absorb: false }, 0);
/// assert_eq!(engine.fee(100_000), 10_000);
/// assert_eq!(engine.total(100_000), 110_000);
/// assert_eq!(engine.producer_amount(110_000), 100_000);
/// assert_eq!(engine.platform_fee(110_000), 10_000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoneyEngine {
    resolved: ResolvedFee,
    discount_amount: i64,
}

impl MoneyEngine {
    /// Create an engine for one sale
    ///
    /// # Panics
    /// Panics if the rate is outside [0, 1] or the discount is negative.
    /// Both indicate a caller bug, not a business condition.
    pub fn new(resolved: ResolvedFee, discount_amount: i64) -> Self {
        assert!(
            (0.0..=1.0).contains(&resolved.rate),
            "rate must be in [0, 1]"
        );
        assert!(discount_amount >= 0, "discount must be non-negative");

        Self {
            resolved,
            discount_amount,
        }
    }

    /// Buyer-visible platform fee for a catalog subtotal
    ///
    /// Zero in absorb mode regardless of the resolved rate.
    ///
    /// # Panics
    /// Panics if `subtotal` is negative
    pub fn fee(&self, subtotal: i64) -> i64 {
        assert!(subtotal >= 0, "subtotal must be non-negative");

        if self.resolved.absorb {
            0
        } else {
            round_cents(subtotal as f64 * self.resolved.rate)
        }
    }

    /// Amount the buyer is charged: subtotal + fee - discount
    ///
    /// # Panics
    /// Panics if `subtotal` is negative
    pub fn total(&self, subtotal: i64) -> i64 {
        subtotal + self.fee(subtotal) - self.discount_amount
    }

    /// Producer payout recovered from a recorded buyer total
    ///
    /// - Absorb mode: the buyer was never charged a fee, so the pre-discount
    ///   ticket price is `total_paid + discount`; the producer receives it
    ///   minus the platform's cut.
    /// - Normal mode: the producer receives the pre-fee subtotal minus the
    ///   discount. The discount is borne entirely by the producer.
    ///
    /// # Panics
    /// Panics if `total_paid` is negative
    pub fn producer_amount(&self, total_paid: i64) -> i64 {
        assert!(total_paid >= 0, "total_paid must be non-negative");

        let original = total_paid + self.discount_amount;
        if self.resolved.absorb {
            original - round_cents(original as f64 * self.resolved.rate)
        } else {
            round_cents(original as f64 / (1.0 + self.resolved.rate)) - self.discount_amount
        }
    }

    /// Platform's take, always the residual `total_paid - producer_amount`
    ///
    /// Never computed independently, so `total_paid == producer + platform`
    /// holds exactly in cents under every configuration.
    pub fn platform_fee(&self, total_paid: i64) -> i64 {
        total_paid - self.producer_amount(total_paid)
    }

    /// Pre-fee catalog subtotal recovered from a recorded buyer total
    ///
    /// Ignores the producer/discount split. Round-trips with [`total`]
    /// exactly when the discount is zero and fees are not absorbed.
    ///
    /// [`total`]: MoneyEngine::total
    pub fn original_amount(&self, total_paid: i64) -> i64 {
        assert!(total_paid >= 0, "total_paid must be non-negative");

        round_cents((total_paid + self.discount_amount) as f64 / (1.0 + self.resolved.rate))
    }

    /// Full money split for a catalog subtotal
    ///
    /// # Panics
    /// Panics if `subtotal` is negative or smaller than the discount
    pub fn breakdown(&self, subtotal: i64) -> MoneyBreakdown {
        assert!(
            self.discount_amount <= subtotal,
            "discount exceeds subtotal; coupon layer must clamp"
        );

        let fee = self.fee(subtotal);
        let total_paid = self.total(subtotal);
        let producer_amount = self.producer_amount(total_paid);

        MoneyBreakdown {
            fee,
            total_paid,
            producer_amount,
            platform_fee: total_paid - producer_amount,
            original_amount: self.original_amount(total_paid),
        }
    }
}
