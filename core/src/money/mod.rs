//! Money Engine Module
//!
//! Pure fee/discount arithmetic over i64 cents:
//! - Forward: subtotal → buyer-visible fee → buyer total
//! - Inverse: buyer total → producer payout, platform fee, original subtotal
//!
//! # Critical Invariants
//!
//! 1. **Reconciliation**: `total_paid == producer_amount + platform_fee`,
//!    exact to the cent, under every rate/absorb/discount combination
//! 2. **Residual fee**: the platform fee is always derived as
//!    `total_paid - producer_amount`, never computed independently
//! 3. **Round trip**: with no discount and no absorb,
//!    `original_amount(total(s)) == s`

pub mod engine;

// Re-export public API
pub use engine::MoneyEngine;
