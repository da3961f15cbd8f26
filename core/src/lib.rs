//! Ticket Pricing Core - Fee & Discount Engine
//!
//! Deterministic pricing computation for a ticketing platform: given a sale
//! and a payment channel, derives the platform fee, the amount the buyer
//! pays, the producer payout, and any coupon discount.
//!
//! # Architecture
//!
//! - **models**: Domain types (payment channels, fee settings, coupons)
//! - **fees**: Effective fee-rate resolution (defaults, overrides, absorb)
//! - **money**: Forward and inverse money arithmetic
//! - **coupons**: Coupon validation and promotion policies
//! - **pricing**: Checkout orchestration and revenue attribution
//! - **storage**: Coupon store collaborator contract + in-memory reference
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (cents); rates are f64 fractions in [0, 1]
//! 2. The computation core is pure: no I/O, no clock reads, no shared state
//! 3. `total_paid == producer_amount + platform_fee`, exact to the cent
//! 4. Coupon usage caps are enforced by the store's atomic
//!    check-cap-and-increment, never by re-validation in the core

// Module declarations
pub mod coupons;
pub mod fees;
pub mod models;
pub mod money;
pub mod pricing;
pub mod storage;

// Re-exports for convenience
pub use coupons::{validate, CouponCheck, CouponDiscount, ValidationError};
pub use fees::{DefaultRates, FeeResolver, ResolvedFee};
pub use models::{
    Coupon, DiscountType, FeeSettings, FeeSnapshot, MoneyBreakdown, PaymentMethod,
    PromotionRules, PromotionType, TicketSelection, TransactionMetadata,
};
pub use money::MoneyEngine;
pub use pricing::{
    CheckoutPricing, CheckoutRequest, PricingOrchestrator, RevenueLedger, SaleOrigin,
};
pub use storage::{CouponStore, InMemoryCouponStore, UsageError};
