//! Domain models for the pricing core

pub mod breakdown;
pub mod coupon;
pub mod payment;

// Re-exports
pub use breakdown::MoneyBreakdown;
pub use coupon::{
    Coupon, DiscountType, PromotionRules, PromotionType, TicketSelection, TicketTypeId,
};
pub use payment::{FeeSettings, FeeSnapshot, PaymentMethod, TransactionMetadata};
