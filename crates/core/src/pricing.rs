//! Pricing
//!
//! Percentage math over minor units. Rounding is half-away-from-zero so a
//! 12.5 centime discount becomes 13, matching how the hosted store rounds
//! displayed prices.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{
    menu::MenuItem,
    promotions::{Promotion, applicable_promotion},
};

/// Discount amount in minor units for `percent` of `minor`.
///
/// `percent` is a whole percentage (20 means 20%). Values above 100 are a
/// contract violation by the caller; the result then saturates at
/// `u64::MAX` rather than panicking.
#[must_use]
pub fn percent_of_minor(percent: u8, minor: u64) -> u64 {
    let amount = Decimal::from(minor) * Decimal::from(percent) / Decimal::from(100_u8);

    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Effective unit price of `item` under the supplied active promotions.
///
/// The first promotion covering the item's category (or the wildcard) wins,
/// in supplied order; with no match the base price is returned unchanged.
/// Pure: consulting the evaluator never mutates anything, and the result is
/// what callers capture into the cart at add time.
#[must_use]
pub fn effective_price_minor(item: &MenuItem, active_promotions: &[Promotion]) -> u64 {
    match applicable_promotion(item, active_promotions) {
        Some(promotion) => item
            .price_minor
            .saturating_sub(percent_of_minor(promotion.discount_percentage, item.price_minor)),
        None => item.price_minor,
    }
}
