//! Coupon Engine Module
//!
//! Validates a coupon against a purchase context and computes its discount:
//! - Eligibility pipeline with a specific error per failed check
//! - Standard discounts (percentage, fixed amount)
//! - Data-driven promotions (buy-X-get-Y, minimum quantity, fixed bundle)
//!
//! # Critical Invariants
//!
//! 1. **Query-style results**: validation failures are returned values, never
//!    panics; each carries a stable error code
//! 2. **Clamped discounts**: the discount is always in `[0, purchase_amount]`
//!    and `final_amount` is never negative
//! 3. **No mutation**: the engine never touches `current_uses`; usage is
//!    committed through `storage::CouponStore::record_use`

pub mod engine;
pub mod error;

// Re-export public API
pub use engine::{validate, CouponCheck, CouponDiscount};
pub use error::ValidationError;
