//! Payment channel and fee configuration models
//!
//! A sale is charged through one of three payment channels (PIX, card, or
//! offline/cash). The platform fee applied to the sale depends on:
//! - The payment method
//! - Optional per-event fee settings configured by the producer
//! - Optional per-transaction metadata frozen at sale time (legacy overrides)
//!
//! CRITICAL: All money values are i64 (cents). Rates are f64 fractions in [0, 1].

use serde::{Deserialize, Serialize};

/// Payment channel chosen by the buyer at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Brazilian instant-payment rail
    Pix,

    /// Credit/debit card
    Card,

    /// Offline sale recorded by the producer (cash, bank transfer, courtesy)
    Offline,
}

/// Per-event fee configuration, set by the platform for a producer
///
/// All rate fields are fractions in [0, 1] (0.10 = 10%). A `None` rate means
/// "use the platform default for that method" even when `use_custom_fees` is
/// enabled.
///
/// # Example
/// ```
/// use ticket_pricing_core::models::FeeSettings;
///
/// let settings = FeeSettings::custom()
///     .with_card_fee(0.08)
///     .with_absorb_fees(true);
///
/// assert!(settings.use_custom_fees);
/// assert_eq!(settings.card_fee_percentage, Some(0.08));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSettings {
    /// When false, all custom rate fields are ignored
    pub use_custom_fees: bool,

    /// Custom PIX fee rate
    pub pix_fee_percentage: Option<f64>,

    /// Custom card fee rate
    pub card_fee_percentage: Option<f64>,

    /// Custom offline-sale fee rate
    pub offline_fee: Option<f64>,

    /// Producer absorbs the platform fee (buyer pays no fee)
    pub absorb_fees: Option<bool>,
}

impl FeeSettings {
    /// Settings with custom fees enabled and no rates set yet
    pub fn custom() -> Self {
        Self {
            use_custom_fees: true,
            ..Self::default()
        }
    }

    /// Set the custom PIX rate (builder pattern)
    ///
    /// # Panics
    /// Panics if `rate` is outside [0, 1]
    pub fn with_pix_fee(mut self, rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "rate must be in [0, 1]");
        self.pix_fee_percentage = Some(rate);
        self
    }

    /// Set the custom card rate (builder pattern)
    ///
    /// # Panics
    /// Panics if `rate` is outside [0, 1]
    pub fn with_card_fee(mut self, rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "rate must be in [0, 1]");
        self.card_fee_percentage = Some(rate);
        self
    }

    /// Set the custom offline-sale rate (builder pattern)
    ///
    /// # Panics
    /// Panics if `rate` is outside [0, 1]
    pub fn with_offline_fee(mut self, rate: f64) -> Self {
        assert!((0.0..=1.0).contains(&rate), "rate must be in [0, 1]");
        self.offline_fee = Some(rate);
        self
    }

    /// Set the absorb-fees flag (builder pattern)
    pub fn with_absorb_fees(mut self, absorb: bool) -> Self {
        self.absorb_fees = Some(absorb);
        self
    }
}

/// Fee decision frozen when a historical sale was recorded
///
/// Snapshots exist so that recomputing an old transaction reproduces the fee
/// that was actually charged, regardless of how the event's live settings
/// have changed since.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    /// Absorb-fees flag at sale time
    pub absorb_fees: Option<bool>,
}

/// Per-transaction metadata carrying legacy/manual fee overrides
///
/// Attached to historical transactions. Overrides live [`FeeSettings`] so
/// past sales stay reproducible. `offline_fee` and `fee_rate` are literal
/// rates entered manually for offline sales before per-event settings
/// existed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetadata {
    /// Fee decision captured at sale time
    pub fee_snapshot: Option<FeeSnapshot>,

    /// Absorb-fees flag recorded directly on the transaction (older format)
    pub absorb_fees: Option<bool>,

    /// Manual offline-sale rate override
    pub offline_fee: Option<f64>,

    /// Manual rate override (oldest format)
    pub fee_rate: Option<f64>,
}

impl TransactionMetadata {
    /// Metadata carrying only a frozen absorb-fees decision
    pub fn with_snapshot(absorb_fees: bool) -> Self {
        Self {
            fee_snapshot: Some(FeeSnapshot {
                absorb_fees: Some(absorb_fees),
            }),
            ..Self::default()
        }
    }
}
