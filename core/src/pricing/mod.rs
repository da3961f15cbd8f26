//! Pricing Orchestration Module
//!
//! External entry point of the core. Composes:
//! - `coupons`: discount validation and computation
//! - `fees`: effective rate resolution
//! - `money`: forward/inverse amount arithmetic
//!
//! and accumulates priced sales into the per-origin revenue ledger.
//!
//! # Critical Invariants
//!
//! 1. **Reconciliation**: every returned breakdown satisfies
//!    `total_paid == producer_amount + platform_fee`
//! 2. **No usage mutation**: checkout never records coupon usage; the caller
//!    commits it through `storage::CouponStore::record_use` after payment
//!    capture

pub mod attribution;
pub mod orchestrator;

// Re-export public API
pub use attribution::{OriginTotals, RevenueLedger, SaleOrigin};
pub use orchestrator::{CheckoutPricing, CheckoutRequest, PricingOrchestrator};
