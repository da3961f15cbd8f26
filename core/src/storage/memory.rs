//! In-memory reference implementation of [`CouponStore`]
//!
//! Backs the check-cap-and-increment contract with a single mutex: holding
//! the lock across the cap check and the increment is what makes the pair
//! atomic. A production store provides the same guarantee with a conditional
//! update (`... SET current_uses = current_uses + 1 WHERE current_uses <
//! max_uses`).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::Coupon;
use crate::storage::{CouponStore, UsageError};

/// Mutex-guarded coupon map keyed by coupon id
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use ticket_pricing_core::models::{Coupon, DiscountType};
/// use ticket_pricing_core::storage::{CouponStore, InMemoryCouponStore};
///
/// let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// let until = Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap();
/// let coupon = Coupon::new("VIP10", "ev-1", DiscountType::Percentage, 10.0, from, until);
///
/// let store = InMemoryCouponStore::new(vec![coupon]);
/// assert!(store.find("ev-1", "vip10").is_some());
/// assert!(store.find("ev-2", "VIP10").is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCouponStore {
    coupons: Mutex<HashMap<String, Coupon>>,
}

impl InMemoryCouponStore {
    /// Create a store seeded with the given coupons
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self {
            coupons: Mutex::new(
                coupons
                    .into_iter()
                    .map(|coupon| (coupon.id.clone(), coupon))
                    .collect(),
            ),
        }
    }

    /// Insert or replace a coupon
    pub fn insert(&self, coupon: Coupon) {
        self.coupons
            .lock()
            .expect("coupon store lock poisoned")
            .insert(coupon.id.clone(), coupon);
    }

    /// Current usage count of a coupon, if it exists
    pub fn current_uses(&self, coupon_id: &str) -> Option<u32> {
        self.coupons
            .lock()
            .expect("coupon store lock poisoned")
            .get(coupon_id)
            .map(|coupon| coupon.current_uses)
    }
}

impl CouponStore for InMemoryCouponStore {
    fn find(&self, event_id: &str, code: &str) -> Option<Coupon> {
        self.coupons
            .lock()
            .expect("coupon store lock poisoned")
            .values()
            .find(|coupon| {
                coupon.event_id == event_id && coupon.code.eq_ignore_ascii_case(code)
            })
            .cloned()
    }

    fn record_use(&self, coupon_id: &str) -> Result<u32, UsageError> {
        let mut coupons = self.coupons.lock().expect("coupon store lock poisoned");
        let coupon = coupons
            .get_mut(coupon_id)
            .ok_or_else(|| UsageError::UnknownCoupon(coupon_id.to_string()))?;

        // Cap check and increment under one lock: this is the atomicity the
        // trait contract requires
        if matches!(coupon.max_uses, Some(max) if coupon.current_uses >= max) {
            return Err(UsageError::CapReached);
        }

        coupon.current_uses += 1;
        Ok(coupon.current_uses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountType;
    use chrono::TimeZone;

    fn coupon(code: &str, max_uses: Option<u32>) -> Coupon {
        let from = chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let until = chrono::Utc
            .with_ymd_and_hms(2026, 12, 31, 23, 59, 59)
            .unwrap();
        let coupon = Coupon::new(code, "ev", DiscountType::Percentage, 10.0, from, until);
        match max_uses {
            Some(max) => coupon.with_max_uses(max),
            None => coupon,
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let store = InMemoryCouponStore::new(vec![coupon("EarlyBird", None)]);
        assert!(store.find("ev", "EARLYBIRD").is_some());
        assert!(store.find("ev", "earlybird").is_some());
        assert!(store.find("other-ev", "EarlyBird").is_none());
    }

    #[test]
    fn test_record_use_increments_until_cap() {
        let c = coupon("CAP2", Some(2));
        let id = c.id.clone();
        let store = InMemoryCouponStore::new(vec![c]);

        assert_eq!(store.record_use(&id), Ok(1));
        assert_eq!(store.record_use(&id), Ok(2));
        assert_eq!(store.record_use(&id), Err(UsageError::CapReached));
        assert_eq!(store.current_uses(&id), Some(2));
    }

    #[test]
    fn test_record_use_unlimited_without_cap() {
        let c = coupon("OPEN", None);
        let id = c.id.clone();
        let store = InMemoryCouponStore::new(vec![c]);

        for expected in 1..=50 {
            assert_eq!(store.record_use(&id), Ok(expected));
        }
    }

    #[test]
    fn test_record_use_unknown_coupon() {
        let store = InMemoryCouponStore::default();
        assert_eq!(
            store.record_use("missing"),
            Err(UsageError::UnknownCoupon("missing".to_string()))
        );
    }
}
