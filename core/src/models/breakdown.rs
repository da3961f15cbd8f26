//! Money breakdown of a priced sale
//!
//! Computed by the pricing layer, never persisted. All values are i64 cents.

use serde::{Deserialize, Serialize};

/// Full money split of one sale
///
/// # Reconciliation Invariant
///
/// `total_paid == producer_amount + platform_fee`, exact to the cent. The
/// pricing layer guarantees this by always deriving `platform_fee` as the
/// residual `total_paid - producer_amount`, never computing it independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyBreakdown {
    /// Buyer-visible platform fee (0 when the producer absorbs fees)
    pub fee: i64,

    /// Amount the buyer is charged
    pub total_paid: i64,

    /// Amount paid out to the producer
    pub producer_amount: i64,

    /// Platform's take, defined as `total_paid - producer_amount`
    pub platform_fee: i64,

    /// Pre-fee catalog subtotal recovered from the total
    pub original_amount: i64,
}

impl MoneyBreakdown {
    /// Check the reconciliation invariant
    pub fn is_reconciled(&self) -> bool {
        self.total_paid == self.producer_amount + self.platform_fee
    }
}
