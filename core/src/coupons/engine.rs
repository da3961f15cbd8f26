//! Coupon validation and discount computation
//!
//! Validation is a guard-clause pipeline: each eligibility check
//! short-circuits with its specific [`ValidationError`], then the discount is
//! computed by the coupon's policy and clamped to the purchase amount.
//!
//! # Pipeline
//!
//! 1. Active flag
//! 2. Validity window (inclusive on both ends)
//! 3. Usage cap
//! 4. Minimum purchase amount
//! 5. Applicable ticket types (non-empty set must intersect the selection)
//! 6. Discount policy: custom promotion first, then standard percentage/fixed
//!
//! Coupon lookup (the `NotFound` case) happens at the orchestration layer,
//! which owns the storage collaborator.
//!
//! CRITICAL: All money values are i64 (cents)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coupons::error::ValidationError;
use crate::models::{Coupon, DiscountType, PromotionRules, PromotionType, TicketSelection};

/// Round a fractional cent amount to the nearest cent, half away from zero
fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Successful validation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDiscount {
    /// Discount granted, in [0, purchase_amount]
    pub discount_amount: i64,

    /// Purchase amount after the discount, never negative
    pub final_amount: i64,
}

/// Query-style view of a validation outcome, for API consumers
///
/// # Example
/// ```
/// use ticket_pricing_core::coupons::{CouponCheck, ValidationError};
///
/// let check = CouponCheck::from(Err::<_, _>(ValidationError::Exhausted));
/// assert!(!check.valid);
/// assert_eq!(check.error_code.as_deref(), Some("exhausted"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponCheck {
    /// Whether the coupon can be applied
    pub valid: bool,

    /// Machine-readable failure reason when invalid
    pub error_code: Option<String>,

    /// Discount granted when valid
    pub discount_amount: Option<i64>,

    /// Purchase amount after the discount when valid
    pub final_amount: Option<i64>,
}

impl From<Result<CouponDiscount, ValidationError>> for CouponCheck {
    fn from(result: Result<CouponDiscount, ValidationError>) -> Self {
        match result {
            Ok(discount) => Self {
                valid: true,
                error_code: None,
                discount_amount: Some(discount.discount_amount),
                final_amount: Some(discount.final_amount),
            },
            Err(error) => Self {
                valid: false,
                error_code: Some(error.error_code().to_string()),
                discount_amount: None,
                final_amount: None,
            },
        }
    }
}

/// Validate a coupon against a purchase and compute its discount
///
/// Runs the eligibility pipeline, then the discount policy. The returned
/// discount is clamped to `[0, purchase_amount]`, so `final_amount` can never
/// go negative.
///
/// # Arguments
/// * `coupon` - Coupon already looked up for the event
/// * `purchase_amount` - Catalog subtotal of the selection, in cents
/// * `selections` - Ticket lines in the cart
/// * `now` - Caller-supplied clock reading (the core never reads a clock)
///
/// # Panics
/// Panics if `purchase_amount` is negative
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use ticket_pricing_core::coupons::validate;
/// use ticket_pricing_core::models::{Coupon, DiscountType, TicketSelection};
///
/// let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let until = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
/// let coupon = Coupon::new("TEN", "ev", DiscountType::Percentage, 10.0, from, until);
/// let cart = [TicketSelection::new("vip", 2)];
///
/// let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
/// let discount = validate(&coupon, 50_000, &cart, now).unwrap();
/// assert_eq!(discount.discount_amount, 5_000);
/// assert_eq!(discount.final_amount, 45_000);
/// ```
pub fn validate(
    coupon: &Coupon,
    purchase_amount: i64,
    selections: &[TicketSelection],
    now: DateTime<Utc>,
) -> Result<CouponDiscount, ValidationError> {
    assert!(purchase_amount >= 0, "purchase_amount must be non-negative");

    if !coupon.is_active {
        return Err(ValidationError::Inactive);
    }

    if !coupon.is_within_window(now) {
        return Err(ValidationError::OutOfWindow);
    }

    if coupon.is_exhausted() {
        return Err(ValidationError::Exhausted);
    }

    if let Some(min) = coupon.min_purchase_amount {
        if purchase_amount < min {
            return Err(ValidationError::BelowMinimum);
        }
    }

    if let Some(types) = coupon.applicable_ticket_types.as_ref().filter(|t| !t.is_empty()) {
        let any_applicable = selections
            .iter()
            .any(|selection| types.contains(&selection.ticket_type_id));
        if !any_applicable {
            return Err(ValidationError::NotApplicable);
        }
    }

    let raw = compute_discount(coupon, purchase_amount, selections)?;
    let discount_amount = raw.clamp(0, purchase_amount);

    Ok(CouponDiscount {
        discount_amount,
        final_amount: purchase_amount - discount_amount,
    })
}

/// Discount policy dispatch: custom promotion takes priority over standard
fn compute_discount(
    coupon: &Coupon,
    purchase_amount: i64,
    selections: &[TicketSelection],
) -> Result<i64, ValidationError> {
    match coupon.discount_type {
        DiscountType::Custom => {
            // A custom coupon without a complete promotion declaration is a
            // configuration error, never silently treated as percentage/fixed
            match (coupon.promotion_type, coupon.promotion_rules.as_ref()) {
                (Some(promotion), Some(rules)) => {
                    promotion_discount(promotion, rules, purchase_amount, selections)
                }
                _ => Err(ValidationError::InvalidPromotionConfig),
            }
        }
        DiscountType::Percentage => {
            Ok(round_cents(purchase_amount as f64 * coupon.discount_value / 100.0))
        }
        DiscountType::Fixed => Ok(round_cents(coupon.discount_value).min(purchase_amount)),
    }
}

/// Compute the discount for a custom promotion
///
/// Each promotion type declares its required rule fields; missing fields are
/// [`ValidationError::InvalidPromotionConfig`]. Selections that do not
/// satisfy the promotion are [`ValidationError::InvalidSelection`].
fn promotion_discount(
    promotion: PromotionType,
    rules: &PromotionRules,
    purchase_amount: i64,
    selections: &[TicketSelection],
) -> Result<i64, ValidationError> {
    match promotion {
        PromotionType::BuyXGetY => {
            let (min, target) = match (rules.min_quantity, rules.target_quantity) {
                (Some(min), Some(target)) if target > 0 => (min, target),
                _ => return Err(ValidationError::InvalidPromotionConfig),
            };

            if rules.same_ticket_type.unwrap_or(false) {
                // All bundled tickets must come from a single line
                if !selections.iter().any(|s| s.quantity == target) {
                    return Err(ValidationError::InvalidSelection);
                }
            } else if total_quantity(selections) < target {
                return Err(ValidationError::InvalidSelection);
            }

            // Buyer pays for `min` of every `target` tickets
            let free_share = f64::from(target - target.min(min)) / f64::from(target);
            Ok(round_cents(purchase_amount as f64 * free_share))
        }

        PromotionType::MinQuantity => {
            let (min, percentage) = match (rules.min_quantity, rules.discount_percentage) {
                (Some(min), Some(pct)) => (min, pct),
                _ => return Err(ValidationError::InvalidPromotionConfig),
            };

            if total_quantity(selections) < min {
                return Err(ValidationError::InvalidSelection);
            }

            Ok(round_cents(purchase_amount as f64 * percentage / 100.0))
        }

        PromotionType::FixedBundle => {
            let (quantity, percentage) = match (rules.quantity, rules.discount_percentage) {
                (Some(qty), Some(pct)) => (qty, pct),
                _ => return Err(ValidationError::InvalidPromotionConfig),
            };

            // Legacy LEVE4 semantics: exactly `quantity` tickets on one line
            if !selections.iter().any(|s| s.quantity == quantity) {
                return Err(ValidationError::InvalidSelection);
            }

            Ok(round_cents(purchase_amount as f64 * percentage / 100.0))
        }
    }
}

fn total_quantity(selections: &[TicketSelection]) -> u32 {
    selections.iter().map(|s| s.quantity).sum()
}
