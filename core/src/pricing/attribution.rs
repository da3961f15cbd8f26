//! Revenue attribution ledger
//!
//! Producer dashboards group sale totals by where the sale came from: a
//! promoter's tracked code or the event page itself. The ledger keys those
//! groups with an explicit sum type instead of free-form strings, so a typo
//! can never silently open a new bucket.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::MoneyBreakdown;

/// Where a sale was originated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "code")]
pub enum SaleOrigin {
    /// Sold through the event page with no tracked code
    Direct,

    /// Sold through a promoter's tracked code
    PromoterCode(String),
}

/// Accumulated totals for one origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginTotals {
    /// Number of sales recorded
    pub sales: u32,

    /// Sum of buyer totals
    pub gross: i64,

    /// Sum of producer payouts
    pub producer: i64,

    /// Sum of platform fees
    pub platform: i64,

    /// Sum of granted discounts
    pub discount: i64,
}

impl OriginTotals {
    fn record(&mut self, breakdown: &MoneyBreakdown, discount_amount: i64) {
        self.sales += 1;
        self.gross += breakdown.total_paid;
        self.producer += breakdown.producer_amount;
        self.platform += breakdown.platform_fee;
        self.discount += discount_amount;
    }
}

/// Typed accumulator of sale totals per [`SaleOrigin`]
///
/// # Example
/// ```
/// use ticket_pricing_core::fees::DefaultRates;
/// use ticket_pricing_core::models::PaymentMethod;
/// use ticket_pricing_core::pricing::{PricingOrchestrator, RevenueLedger, SaleOrigin};
///
/// let pricing = PricingOrchestrator::new(DefaultRates::default());
/// let breakdown = pricing.price_sale(100_000, PaymentMethod::Pix, None, None, 0);
///
/// let mut ledger = RevenueLedger::new();
/// ledger.record(SaleOrigin::Direct, &breakdown, 0);
/// ledger.record(SaleOrigin::PromoterCode("ana".into()), &breakdown, 0);
///
/// assert_eq!(ledger.overall().sales, 2);
/// assert_eq!(ledger.totals(&SaleOrigin::Direct).unwrap().gross, 110_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueLedger {
    totals: HashMap<SaleOrigin, OriginTotals>,
}

impl RevenueLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one priced sale under an origin
    pub fn record(&mut self, origin: SaleOrigin, breakdown: &MoneyBreakdown, discount_amount: i64) {
        self.totals
            .entry(origin)
            .or_default()
            .record(breakdown, discount_amount);
    }

    /// Totals accumulated for one origin
    pub fn totals(&self, origin: &SaleOrigin) -> Option<&OriginTotals> {
        self.totals.get(origin)
    }

    /// Iterate over all origins with their totals
    pub fn iter(&self) -> impl Iterator<Item = (&SaleOrigin, &OriginTotals)> {
        self.totals.iter()
    }

    /// Grand totals across every origin
    pub fn overall(&self) -> OriginTotals {
        self.totals
            .values()
            .fold(OriginTotals::default(), |mut acc, totals| {
                acc.sales += totals.sales;
                acc.gross += totals.gross;
                acc.producer += totals.producer;
                acc.platform += totals.platform;
                acc.discount += totals.discount;
                acc
            })
    }
}
