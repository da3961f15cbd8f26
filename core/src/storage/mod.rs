//! Coupon Storage Collaborator
//!
//! The pricing core never owns coupon state. Lookup and usage accounting are
//! delegated to the hosting storage layer through [`CouponStore`], and the
//! in-memory implementation here is the reference model of that contract for
//! tests.
//!
//! # Critical Invariants
//!
//! 1. **Atomic cap check**: `record_use` must check `current_uses < max_uses`
//!    and increment in one atomic step. Validation and increment are two
//!    separate calls, so without this guard two concurrent checkouts could
//!    both validate and collectively exceed the cap.
//! 2. **No re-validation**: the core trusts the store's answer and never
//!    re-validates after incrementing.

pub mod memory;

use thiserror::Error;

use crate::models::Coupon;

/// Errors from the usage-accounting side of the store
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Coupon usage cap reached")]
    CapReached,

    #[error("No coupon with id {0}")]
    UnknownCoupon(String),
}

/// Storage collaborator owning coupon records and their usage counters
///
/// Implemented by the hosting storage layer (a database with conditional
/// updates in production, [`memory::InMemoryCouponStore`] in tests).
pub trait CouponStore {
    /// Look up a coupon by event and code
    ///
    /// Codes are matched case-insensitively, the way buyers type them.
    fn find(&self, event_id: &str, code: &str) -> Option<Coupon>;

    /// Atomically increment a coupon's usage count, guarded by its cap
    ///
    /// Returns the new usage count, or [`UsageError::CapReached`] if the
    /// increment would exceed `max_uses`. The check and the increment MUST
    /// happen as one atomic step.
    fn record_use(&self, coupon_id: &str) -> Result<u32, UsageError>;
}

// Re-export public API
pub use memory::InMemoryCouponStore;
