//! Money Engine Invariant Tests
//!
//! The reference pricing scenarios plus property-based checks of the
//! reconciliation invariants over the full configuration space.

use proptest::prelude::*;
use ticket_pricing_core::fees::ResolvedFee;
use ticket_pricing_core::money::MoneyEngine;

// ============================================================================
// Test Helpers
// ============================================================================

fn engine(rate: f64, absorb: bool, discount: i64) -> MoneyEngine {
    MoneyEngine::new(ResolvedFee { rate, absorb }, discount)
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_scenario_pix_default_no_discount() {
    // Subtotal R$1000.00, PIX at the 10% default
    let e = engine(0.10, false, 0);
    let b = e.breakdown(100_000);

    assert_eq!(b.fee, 10_000);
    assert_eq!(b.total_paid, 110_000);
    assert_eq!(b.producer_amount, 100_000);
    assert_eq!(b.platform_fee, 10_000);
}

#[test]
fn test_scenario_absorbed_fees() {
    // Same sale, producer absorbs: buyer pays face value, producer funds the fee
    let e = engine(0.10, true, 0);
    let b = e.breakdown(100_000);

    assert_eq!(b.fee, 0, "buyer-visible fee must be zero when absorbed");
    assert_eq!(b.total_paid, 100_000);
    assert_eq!(b.producer_amount, 90_000);
    assert_eq!(b.platform_fee, 10_000, "platform take is unchanged by absorb");
}

#[test]
fn test_scenario_custom_card_rate_with_discount() {
    // Card at a custom 8%, R$50.00 coupon discount
    let e = engine(0.08, false, 5_000);
    let b = e.breakdown(100_000);

    assert_eq!(b.fee, 8_000);
    assert_eq!(b.total_paid, 103_000);
    // (103_000 + 5_000) / 1.08 - 5_000
    assert_eq!(b.producer_amount, 95_000);
    assert_eq!(b.platform_fee, 8_000);
}

#[test]
fn test_discount_is_funded_by_producer_not_platform() {
    let with_discount = engine(0.10, false, 10_000).breakdown(100_000);
    let without = engine(0.10, false, 0).breakdown(100_000);

    // Platform fee identical; the producer payout shrinks by the discount
    assert_eq!(with_discount.platform_fee, without.platform_fee);
    assert_eq!(
        with_discount.producer_amount,
        without.producer_amount - 10_000
    );
}

#[test]
fn test_recorded_total_recovers_catalog_price() {
    // A historical total of R$1100.00 at 10% recovers the R$1000.00 subtotal
    let e = engine(0.10, false, 0);
    assert_eq!(e.original_amount(110_000), 100_000);
    assert_eq!(e.producer_amount(110_000), 100_000);
    assert_eq!(e.platform_fee(110_000), 10_000);
}

// ============================================================================
// Property-Based Invariants
// ============================================================================

proptest! {
    /// total_paid == producer_amount + platform_fee, exact to the cent,
    /// for every rate/absorb/discount/subtotal combination
    #[test]
    fn prop_reconciliation_is_exact(
        subtotal in 0i64..100_000_000,
        rate_bps in 0u32..=10_000,
        discount_ratio in 0.0f64..=1.0,
        absorb in any::<bool>(),
    ) {
        let rate = f64::from(rate_bps) / 10_000.0;
        let discount = (subtotal as f64 * discount_ratio) as i64;
        let b = engine(rate, absorb, discount).breakdown(subtotal);

        prop_assert!(b.is_reconciled());
        prop_assert_eq!(b.total_paid, b.producer_amount + b.platform_fee);
    }

    /// With no discount and no absorb, original_amount round-trips total()
    #[test]
    fn prop_round_trip_without_discount(
        subtotal in 0i64..100_000_000,
        rate_bps in 0u32..=10_000,
    ) {
        let rate = f64::from(rate_bps) / 10_000.0;
        let e = engine(rate, false, 0);

        prop_assert_eq!(e.original_amount(e.total(subtotal)), subtotal);
    }

    /// The platform never pays out more than it took in
    #[test]
    fn prop_platform_fee_non_negative(
        subtotal in 0i64..100_000_000,
        rate_bps in 0u32..=10_000,
        discount_ratio in 0.0f64..=1.0,
    ) {
        let rate = f64::from(rate_bps) / 10_000.0;
        let discount = (subtotal as f64 * discount_ratio) as i64;
        let b = engine(rate, false, discount).breakdown(subtotal);

        prop_assert!(b.platform_fee >= 0);
    }

    /// The buyer-visible fee is exactly zero whenever fees are absorbed
    #[test]
    fn prop_absorb_zeroes_buyer_fee(
        subtotal in 0i64..100_000_000,
        rate_bps in 0u32..=10_000,
    ) {
        let rate = f64::from(rate_bps) / 10_000.0;
        let b = engine(rate, true, 0).breakdown(subtotal);

        prop_assert_eq!(b.fee, 0);
        prop_assert_eq!(b.total_paid, subtotal);
    }
}
