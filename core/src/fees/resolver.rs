//! Fee rate resolution
//!
//! Selects the effective fee rate and absorb mode for one sale. The decision
//! walks a fixed precedence chain, highest first:
//!
//! 1. Absorb flag: transaction snapshot, then transaction flag, then event
//!    settings (first explicit `true` wins)
//! 2. Offline sales: literal per-transaction rate override (legacy data)
//! 3. Event custom fees, falling back to the platform default per method
//! 4. Platform default per method
//!
//! The default-rate table is injected configuration, not a hidden constant,
//! so tests and per-environment deployments control it explicitly.

use serde::{Deserialize, Serialize};

use crate::models::{FeeSettings, PaymentMethod, TransactionMetadata};

/// Platform default fee rates per payment method
///
/// All rates are fractions in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultRates {
    /// Default PIX fee rate
    pub pix: f64,

    /// Default card fee rate
    pub card: f64,

    /// Default offline-sale fee rate
    pub offline: f64,
}

impl Default for DefaultRates {
    fn default() -> Self {
        Self {
            pix: 0.10,     // 10%
            card: 0.10,    // 10%
            offline: 0.05, // 5%
        }
    }
}

impl DefaultRates {
    /// Default rate for a payment method
    pub fn for_method(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::Pix => self.pix,
            PaymentMethod::Card => self.card,
            PaymentMethod::Offline => self.offline,
        }
    }
}

/// Outcome of fee resolution for one sale
///
/// `absorb` zeroes only the buyer-visible fee; the rate still applies on the
/// producer side (the producer pays the fee out of the ticket price).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFee {
    /// Effective fee rate, fraction in [0, 1]
    pub rate: f64,

    /// Producer absorbs the fee (buyer pays no fee)
    pub absorb: bool,
}

/// Resolves effective fee rates from settings, metadata, and defaults
///
/// # Example
/// ```
/// use ticket_pricing_core::fees::{DefaultRates, FeeResolver};
/// use ticket_pricing_core::models::{FeeSettings, PaymentMethod};
///
/// let resolver = FeeResolver::new(DefaultRates::default());
/// let settings = FeeSettings::custom().with_card_fee(0.08);
///
/// let resolved = resolver.resolve(PaymentMethod::Card, Some(&settings), None);
/// assert_eq!(resolved.rate, 0.08);
/// assert!(!resolved.absorb);
/// ```
#[derive(Debug, Clone)]
pub struct FeeResolver {
    defaults: DefaultRates,
}

impl FeeResolver {
    /// Create a resolver with the given default-rate table
    pub fn new(defaults: DefaultRates) -> Self {
        Self { defaults }
    }

    /// The injected default-rate table
    pub fn defaults(&self) -> &DefaultRates {
        &self.defaults
    }

    /// Resolve the effective rate and absorb mode for one sale
    pub fn resolve(
        &self,
        method: PaymentMethod,
        settings: Option<&FeeSettings>,
        metadata: Option<&TransactionMetadata>,
    ) -> ResolvedFee {
        ResolvedFee {
            rate: self.resolve_rate(method, settings, metadata),
            absorb: resolve_absorb(settings, metadata),
        }
    }

    fn resolve_rate(
        &self,
        method: PaymentMethod,
        settings: Option<&FeeSettings>,
        metadata: Option<&TransactionMetadata>,
    ) -> f64 {
        // Legacy per-transaction override, offline sales only
        if method == PaymentMethod::Offline {
            if let Some(rate) = metadata.and_then(|m| m.offline_fee.or(m.fee_rate)) {
                return rate;
            }
        }

        // Event custom fees, each method falling back to its default
        if let Some(settings) = settings.filter(|s| s.use_custom_fees) {
            let custom = match method {
                PaymentMethod::Pix => settings.pix_fee_percentage,
                PaymentMethod::Card => settings.card_fee_percentage,
                PaymentMethod::Offline => settings.offline_fee,
            };
            return custom.unwrap_or_else(|| self.defaults.for_method(method));
        }

        self.defaults.for_method(method)
    }
}

/// Evaluate the absorb-fees flag as an explicit, ordered precedence list
///
/// Sources, highest first:
/// 1. `metadata.fee_snapshot.absorb_fees` (frozen at sale time)
/// 2. `metadata.absorb_fees` (older transaction format)
/// 3. `settings.absorb_fees` (live event configuration)
///
/// The first source that is `Some(true)` wins; absent sources are skipped.
pub fn resolve_absorb(
    settings: Option<&FeeSettings>,
    metadata: Option<&TransactionMetadata>,
) -> bool {
    let sources = [
        metadata.and_then(|m| m.fee_snapshot.as_ref()).and_then(|s| s.absorb_fees),
        metadata.and_then(|m| m.absorb_fees),
        settings.and_then(|s| s.absorb_fees),
    ];

    sources.into_iter().flatten().any(|absorb| absorb)
}
