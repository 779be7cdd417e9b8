//! Preparation estimates
//!
//! A display estimate, not a scheduling commitment. The receipt shown
//! right after checkout and the tracking page both recompute it from the
//! same constants here, so the two can never disagree.

use std::time::Duration;

use crate::cart::LineItem;

/// Fixed kitchen overhead in minutes.
pub const PREP_BASE_MINUTES: u64 = 5;

/// Additional minutes per unit ordered.
pub const PREP_PER_ITEM_MINUTES: u64 = 2;

/// Estimated preparation time in minutes: base plus per-item time across
/// all units (quantities summed, not lines counted).
#[must_use]
pub fn estimated_prep_minutes(items: &[LineItem]) -> u64 {
    let total_units = items
        .iter()
        .fold(0_u64, |sum, line| sum.saturating_add(u64::from(line.quantity())));

    PREP_BASE_MINUTES.saturating_add(PREP_PER_ITEM_MINUTES.saturating_mul(total_units))
}

/// Same estimate as a [`Duration`], for human-readable formatting.
#[must_use]
pub fn estimated_prep_duration(items: &[LineItem]) -> Duration {
    Duration::from_secs(estimated_prep_minutes(items).saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use crate::{
        cart::{Cart, CartAction},
        fixtures,
    };

    use super::*;

    #[test]
    fn two_lines_with_three_units_take_eleven_minutes() {
        let menu = fixtures::sample_menu();
        let mut cart = Cart::new();

        for (index, quantity) in [(0_usize, 2_i64), (1, 1)] {
            if let Some(item) = menu.get(index) {
                cart.apply(CartAction::AddItem {
                    item: item.clone(),
                    price_minor: item.price_minor,
                });
                cart.apply(CartAction::UpdateQuantity {
                    id: item.id,
                    quantity,
                });
            }
        }

        // 5 + 2 × (2 + 1)
        assert_eq!(estimated_prep_minutes(cart.items()), 11);
    }

    #[test]
    fn empty_order_still_has_the_base_overhead() {
        assert_eq!(estimated_prep_minutes(&[]), PREP_BASE_MINUTES);
    }

    #[test]
    fn duration_matches_the_minute_estimate() {
        assert_eq!(
            estimated_prep_duration(&[]),
            Duration::from_secs(PREP_BASE_MINUTES * 60)
        );
    }
}
