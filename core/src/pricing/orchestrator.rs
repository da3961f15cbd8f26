//! Checkout pricing orchestration
//!
//! The only component with direct external callers. Composes the coupon
//! engine (discount), the fee resolver (rate), and the money engine
//! (amounts) into one result record per sale.
//!
//! Usage accounting is deliberately NOT part of checkout: the caller commits
//! the coupon use through `CouponStore::record_use` only after the payment is
//! captured, so abandoned checkouts never consume the cap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coupons::{self, ValidationError};
use crate::fees::{DefaultRates, FeeResolver};
use crate::models::{
    FeeSettings, MoneyBreakdown, PaymentMethod, TicketSelection, TransactionMetadata,
};
use crate::money::MoneyEngine;
use crate::storage::CouponStore;

/// One checkout to be priced
#[derive(Debug, Clone)]
pub struct CheckoutRequest<'a> {
    /// Event being purchased
    pub event_id: &'a str,

    /// Coupon code typed by the buyer, if any
    pub coupon_code: Option<&'a str>,

    /// Catalog subtotal of the selection, in cents
    pub subtotal: i64,

    /// Payment channel chosen by the buyer
    pub method: PaymentMethod,

    /// Per-event fee settings, if configured
    pub settings: Option<&'a FeeSettings>,

    /// Frozen per-transaction fee overrides (historical recomputation)
    pub metadata: Option<&'a TransactionMetadata>,

    /// Ticket lines in the cart
    pub selections: &'a [TicketSelection],

    /// Caller-supplied clock reading
    pub now: DateTime<Utc>,
}

/// Priced checkout, ready for the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPricing {
    /// Full money split of the sale
    pub breakdown: MoneyBreakdown,

    /// Discount granted by the coupon (0 when no coupon applied)
    pub discount_amount: i64,

    /// Id of the applied coupon; the caller records its use after payment
    /// capture
    pub coupon_id: Option<String>,
}

/// Composes discount, rate, and money math for external callers
///
/// # Example
/// ```
/// use ticket_pricing_core::fees::DefaultRates;
/// use ticket_pricing_core::models::PaymentMethod;
/// use ticket_pricing_core::pricing::PricingOrchestrator;
///
/// let pricing = PricingOrchestrator::new(DefaultRates::default());
/// let breakdown = pricing.price_sale(100_000, PaymentMethod::Pix, None, None, 0);
///
/// assert_eq!(breakdown.fee, 10_000);
/// assert_eq!(breakdown.total_paid, 110_000);
/// assert_eq!(breakdown.producer_amount, 100_000);
/// assert_eq!(breakdown.platform_fee, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct PricingOrchestrator {
    resolver: FeeResolver,
}

impl PricingOrchestrator {
    /// Create an orchestrator with the given platform default rates
    pub fn new(defaults: DefaultRates) -> Self {
        Self {
            resolver: FeeResolver::new(defaults),
        }
    }

    /// The fee resolver driving rate decisions
    pub fn resolver(&self) -> &FeeResolver {
        &self.resolver
    }

    /// Price one sale with an already-granted discount
    ///
    /// # Panics
    /// Panics if `subtotal` is negative, `discount_amount` is negative, or
    /// the discount exceeds the subtotal (caller bug; the coupon engine
    /// clamps its discounts)
    pub fn price_sale(
        &self,
        subtotal: i64,
        method: PaymentMethod,
        settings: Option<&FeeSettings>,
        metadata: Option<&TransactionMetadata>,
        discount_amount: i64,
    ) -> MoneyBreakdown {
        let resolved = self.resolver.resolve(method, settings, metadata);
        MoneyEngine::new(resolved, discount_amount).breakdown(subtotal)
    }

    /// Price a full checkout, applying an optional coupon code
    ///
    /// Looks the coupon up through the storage collaborator, validates it
    /// against the purchase, and prices the sale with the resulting
    /// discount. Does NOT record coupon usage.
    pub fn checkout(
        &self,
        store: &dyn CouponStore,
        request: &CheckoutRequest<'_>,
    ) -> Result<CheckoutPricing, ValidationError> {
        let (discount_amount, coupon_id) = match request.coupon_code {
            Some(code) => {
                let coupon = store
                    .find(request.event_id, code)
                    .ok_or(ValidationError::NotFound)?;
                let discount = coupons::validate(
                    &coupon,
                    request.subtotal,
                    request.selections,
                    request.now,
                )?;
                (discount.discount_amount, Some(coupon.id))
            }
            None => (0, None),
        };

        let breakdown = self.price_sale(
            request.subtotal,
            request.method,
            request.settings,
            request.metadata,
            discount_amount,
        );

        Ok(CheckoutPricing {
            breakdown,
            discount_amount,
            coupon_id,
        })
    }
}

impl Default for PricingOrchestrator {
    fn default() -> Self {
        Self::new(DefaultRates::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coupon, DiscountType};
    use crate::storage::InMemoryCouponStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn seeded_store(coupon: Coupon) -> InMemoryCouponStore {
        InMemoryCouponStore::new(vec![coupon])
    }

    fn percent_coupon(event_id: &str, code: &str, value: f64) -> Coupon {
        Coupon::new(
            code,
            event_id,
            DiscountType::Percentage,
            value,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap(),
        )
    }

    fn request<'a>(
        coupon_code: Option<&'a str>,
        selections: &'a [TicketSelection],
    ) -> CheckoutRequest<'a> {
        CheckoutRequest {
            event_id: "ev",
            coupon_code,
            subtotal: 100_000,
            method: PaymentMethod::Pix,
            settings: None,
            metadata: None,
            selections,
            now: now(),
        }
    }

    #[test]
    fn test_checkout_without_coupon() {
        let store = InMemoryCouponStore::default();
        let selections = [TicketSelection::new("std", 1)];
        let pricing = PricingOrchestrator::default()
            .checkout(&store, &request(None, &selections))
            .unwrap();

        assert_eq!(pricing.discount_amount, 0);
        assert_eq!(pricing.coupon_id, None);
        assert_eq!(pricing.breakdown.total_paid, 110_000);
    }

    #[test]
    fn test_checkout_unknown_code_is_not_found() {
        let store = InMemoryCouponStore::default();
        let selections = [TicketSelection::new("std", 1)];
        let result =
            PricingOrchestrator::default().checkout(&store, &request(Some("NOPE"), &selections));

        assert_eq!(result, Err(ValidationError::NotFound));
    }

    #[test]
    fn test_checkout_applies_coupon_discount() {
        let coupon = percent_coupon("ev", "TEN", 10.0);
        let coupon_id = coupon.id.clone();
        let store = seeded_store(coupon);
        let selections = [TicketSelection::new("std", 2)];

        let pricing = PricingOrchestrator::default()
            .checkout(&store, &request(Some("TEN"), &selections))
            .unwrap();

        assert_eq!(pricing.discount_amount, 10_000);
        assert_eq!(pricing.coupon_id, Some(coupon_id));
        // subtotal 100_000 + fee 10_000 - discount 10_000
        assert_eq!(pricing.breakdown.total_paid, 100_000);
        assert!(pricing.breakdown.is_reconciled());
    }

    #[test]
    fn test_checkout_propagates_validation_failure() {
        let coupon = percent_coupon("ev", "TEN", 10.0).with_max_uses(1).with_current_uses(1);
        let store = seeded_store(coupon);
        let selections = [TicketSelection::new("std", 1)];

        let result =
            PricingOrchestrator::default().checkout(&store, &request(Some("TEN"), &selections));
        assert_eq!(result, Err(ValidationError::Exhausted));
    }

    #[test]
    fn test_checkout_does_not_consume_usage() {
        let coupon = percent_coupon("ev", "TEN", 10.0).with_max_uses(5);
        let coupon_id = coupon.id.clone();
        let store = seeded_store(coupon);
        let selections = [TicketSelection::new("std", 1)];

        PricingOrchestrator::default()
            .checkout(&store, &request(Some("TEN"), &selections))
            .unwrap();

        // Usage is committed by the caller after payment capture, not here
        assert_eq!(store.current_uses(&coupon_id), Some(0));
    }
}
