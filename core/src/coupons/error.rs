//! Coupon validation errors
//!
//! Every variant is an expected business outcome, returned as a value so the
//! caller can show the buyer a specific reason. Nothing here is ever panicked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a coupon fails validation at checkout
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("No coupon with this code exists for the event")]
    NotFound,

    #[error("Coupon is not active")]
    Inactive,

    #[error("Coupon is outside its validity window")]
    OutOfWindow,

    #[error("Coupon has reached its usage limit")]
    Exhausted,

    #[error("Purchase amount is below the coupon minimum")]
    BelowMinimum,

    #[error("Coupon does not apply to the selected ticket types")]
    NotApplicable,

    #[error("Ticket selection does not satisfy the promotion")]
    InvalidSelection,

    #[error("Promotion rules are missing required fields")]
    InvalidPromotionConfig,
}

impl ValidationError {
    /// Stable machine-readable code for API consumers
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::NotFound => "not_found",
            ValidationError::Inactive => "inactive",
            ValidationError::OutOfWindow => "out_of_window",
            ValidationError::Exhausted => "exhausted",
            ValidationError::BelowMinimum => "below_minimum",
            ValidationError::NotApplicable => "not_applicable",
            ValidationError::InvalidSelection => "invalid_selection",
            ValidationError::InvalidPromotionConfig => "invalid_promotion_config",
        }
    }
}
