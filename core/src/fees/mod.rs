//! Fee Resolution Module
//!
//! Selects the effective platform fee rate for a sale, combining:
//! - The injected platform default-rate table
//! - Optional per-event custom settings
//! - Optional per-transaction legacy overrides (frozen at sale time)
//!
//! # Critical Invariants
//!
//! 1. **Determinism**: same inputs always resolve to the same rate
//! 2. **Reproducibility**: transaction metadata beats live settings, so
//!    recomputing a historical sale yields the fee actually charged
//! 3. **Absorb scope**: the absorb flag zeroes only the buyer-visible fee,
//!    never the producer-side rate

pub mod resolver;

// Re-export public API
pub use resolver::{resolve_absorb, DefaultRates, FeeResolver, ResolvedFee};
