//! Coupon and promotion models
//!
//! A coupon is a code applied at checkout that reduces the purchase amount
//! under eligibility rules (validity window, usage cap, minimum purchase,
//! applicable ticket types). The discount policy is either standard
//! (percentage or fixed amount) or a custom promotion driven by
//! [`PromotionRules`] data.
//!
//! CRITICAL: All money values are i64 (cents).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ticket type identifier (as issued by the event catalog)
pub type TicketTypeId = String;

/// How the coupon's discount is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the purchase amount (0-100)
    Percentage,

    /// `discount_value` is a fixed amount in cents, capped at the purchase amount
    Fixed,

    /// Discount comes from a data-driven promotion (see [`PromotionType`])
    Custom,
}

/// Named promotion policy attached to a custom coupon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromotionType {
    /// Pay for `min_quantity` tickets, take `target_quantity`
    BuyXGetY,

    /// Percentage discount unlocked by a minimum total quantity
    MinQuantity,

    /// Percentage discount for buying exactly `quantity` tickets of one type
    ///
    /// Data-driven replacement for the retired hardcoded "LEVE4" code
    /// (quantity 4, 25% off). Existing LEVE4 coupons are migrated to
    /// `FixedBundle` rules via [`Coupon::legacy_leve4`].
    FixedBundle,
}

/// Rule parameters for custom promotions
///
/// All fields are optional at the data level; each [`PromotionType`] declares
/// which fields it requires. Missing required fields are a configuration
/// error surfaced at validation time, never silently defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromotionRules {
    /// Quantity the buyer pays for (BuyXGetY)
    pub min_quantity: Option<u32>,

    /// Quantity the buyer receives (BuyXGetY)
    pub target_quantity: Option<u32>,

    /// BuyXGetY: all tickets must come from a single selection line
    pub same_ticket_type: Option<bool>,

    /// Ticket types eligible for the discounted portion
    pub discounted_items: Option<Vec<TicketTypeId>>,

    /// Percentage applied by MinQuantity / FixedBundle promotions (0-100)
    pub discount_percentage: Option<f64>,

    /// Exact quantity required by FixedBundle promotions
    pub quantity: Option<u32>,
}

/// One line of a purchase: a ticket type and how many of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSelection {
    /// Ticket type being bought
    pub ticket_type_id: TicketTypeId,

    /// Number of tickets of this type (always > 0)
    pub quantity: u32,
}

impl TicketSelection {
    /// Create a selection line
    ///
    /// # Panics
    /// Panics if `quantity` is zero
    pub fn new(ticket_type_id: impl Into<TicketTypeId>, quantity: u32) -> Self {
        assert!(quantity > 0, "quantity must be positive");
        Self {
            ticket_type_id: ticket_type_id.into(),
            quantity,
        }
    }
}

/// A discount code scoped to one event
///
/// # Invariants
///
/// 1. `valid_from <= valid_until`
/// 2. `current_uses <= max_uses` whenever `max_uses` is set
///
/// Both are asserted at construction. The core never mutates `current_uses`;
/// incrementing usage is owned by the storage collaborator (see
/// `storage::CouponStore`).
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use ticket_pricing_core::models::{Coupon, DiscountType};
///
/// let coupon = Coupon::new(
///     "EARLYBIRD",
///     "event-1",
///     DiscountType::Percentage,
///     10.0,
///     Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
/// );
/// assert!(coupon.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique coupon identifier (UUID)
    pub id: String,

    /// Code the buyer types at checkout (unique per event)
    pub code: String,

    /// Event this coupon belongs to
    pub event_id: String,

    /// Discount policy family
    pub discount_type: DiscountType,

    /// Percentage (0-100) or fixed amount in cents, per `discount_type`
    pub discount_value: f64,

    /// Usage cap; `None` means unlimited
    pub max_uses: Option<u32>,

    /// Times this coupon has been redeemed
    pub current_uses: u32,

    /// Start of the validity window (inclusive)
    pub valid_from: DateTime<Utc>,

    /// End of the validity window (inclusive)
    pub valid_until: DateTime<Utc>,

    /// Administratively enabled
    pub is_active: bool,

    /// Minimum purchase amount in cents for the coupon to apply
    pub min_purchase_amount: Option<i64>,

    /// When non-empty, at least one selection must match one of these types
    pub applicable_ticket_types: Option<HashSet<TicketTypeId>>,

    /// Custom promotion policy (only meaningful with `DiscountType::Custom`)
    pub promotion_type: Option<PromotionType>,

    /// Rule parameters for the custom promotion
    pub promotion_rules: Option<PromotionRules>,
}

impl Coupon {
    /// Create an active standard coupon with no cap or minimum
    ///
    /// # Panics
    /// Panics if `valid_from > valid_until`
    pub fn new(
        code: impl Into<String>,
        event_id: impl Into<String>,
        discount_type: DiscountType,
        discount_value: f64,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        assert!(valid_from <= valid_until, "validity window is inverted");

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code: code.into(),
            event_id: event_id.into(),
            discount_type,
            discount_value,
            max_uses: None,
            current_uses: 0,
            valid_from,
            valid_until,
            is_active: true,
            min_purchase_amount: None,
            applicable_ticket_types: None,
            promotion_type: None,
            promotion_rules: None,
        }
    }

    /// Migration shape of the retired hardcoded "LEVE4" coupon
    ///
    /// Reproduces the legacy behavior exactly: requires one selection with
    /// quantity exactly 4 and discounts 25% of the purchase amount.
    pub fn legacy_leve4(
        event_id: impl Into<String>,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self::new(
            "LEVE4",
            event_id,
            DiscountType::Custom,
            0.0,
            valid_from,
            valid_until,
        )
        .with_promotion(
            PromotionType::FixedBundle,
            PromotionRules {
                quantity: Some(4),
                discount_percentage: Some(25.0),
                ..PromotionRules::default()
            },
        )
    }

    /// Set a usage cap (builder pattern)
    ///
    /// # Panics
    /// Panics if `current_uses` already exceeds the cap
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        assert!(
            self.current_uses <= max_uses,
            "current_uses exceeds max_uses"
        );
        self.max_uses = Some(max_uses);
        self
    }

    /// Set the recorded usage count (builder pattern, for fixtures/snapshots)
    ///
    /// # Panics
    /// Panics if the count exceeds a configured cap
    pub fn with_current_uses(mut self, current_uses: u32) -> Self {
        if let Some(max) = self.max_uses {
            assert!(current_uses <= max, "current_uses exceeds max_uses");
        }
        self.current_uses = current_uses;
        self
    }

    /// Set a minimum purchase amount in cents (builder pattern)
    pub fn with_min_purchase(mut self, min_purchase_amount: i64) -> Self {
        self.min_purchase_amount = Some(min_purchase_amount);
        self
    }

    /// Restrict the coupon to specific ticket types (builder pattern)
    pub fn with_applicable_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TicketTypeId>,
    {
        self.applicable_ticket_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a custom promotion policy (builder pattern)
    pub fn with_promotion(mut self, promotion_type: PromotionType, rules: PromotionRules) -> Self {
        self.promotion_type = Some(promotion_type);
        self.promotion_rules = Some(rules);
        self
    }

    /// Administratively disable the coupon (builder pattern, for fixtures)
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check whether the usage cap has been reached
    pub fn is_exhausted(&self) -> bool {
        matches!(self.max_uses, Some(max) if self.current_uses >= max)
    }

    /// Check whether `now` falls inside the validity window (inclusive)
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }
}
