//! Promotions
//!
//! Promotions are owned by the hosted store; the core only reads them.
//! Selection is deliberately naive: the first active promotion whose scope
//! covers the item's category wins, in the order the promotions were
//! supplied. There is no stacking and no priority field.

use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    menu::{Category, MenuItem},
};

/// Identifier of a promotion, assigned by the hosted store.
pub type PromotionId = TypedId<Promotion>;

/// Which categories a promotion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionScope {
    /// Wildcard: every category.
    All,

    /// A single category.
    #[serde(untagged)]
    Category(Category),
}

impl PromotionScope {
    /// Whether the scope covers the given category.
    #[must_use]
    pub fn covers(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Category(scoped) => scoped == category,
        }
    }
}

/// A percentage discount over one category or the whole menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Store-assigned identifier.
    pub id: PromotionId,

    /// Display name (e.g. "Weekend Burger Fest").
    pub name: String,

    /// Customer-facing description.
    pub description: String,

    /// Percentage taken off the base price. Valid domain is 1–100; the
    /// admin write path enforces it, the pricing evaluator does not.
    pub discount_percentage: u8,

    /// Categories the promotion applies to.
    pub applicable_category: PromotionScope,

    /// Whether the promotion currently runs.
    pub is_active: bool,
}

impl Promotion {
    /// Whether this promotion applies to an item in `category`.
    #[must_use]
    pub fn applies_to(&self, category: Category) -> bool {
        self.applicable_category.covers(category)
    }
}

/// Keeps only the promotions flagged active, preserving supplied order.
pub fn active_promotions(promotions: &[Promotion]) -> impl Iterator<Item = &Promotion> {
    promotions.iter().filter(|promotion| promotion.is_active)
}

/// First promotion in supplied order whose scope covers the item's
/// category, or the wildcard. Callers pass active promotions only; this
/// function does not re-check the flag.
#[must_use]
pub fn applicable_promotion<'a>(
    item: &MenuItem,
    promotions: &'a [Promotion],
) -> Option<&'a Promotion> {
    promotions
        .iter()
        .find(|promotion| promotion.applies_to(item.category))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::fixtures;

    use super::*;

    fn percent_off(id: u64, percent: u8, scope: PromotionScope) -> Promotion {
        Promotion {
            id: PromotionId::from_raw(id),
            name: format!("promo-{id}"),
            description: String::new(),
            discount_percentage: percent,
            applicable_category: scope,
            is_active: true,
        }
    }

    #[test]
    fn wildcard_scope_covers_every_category() {
        for category in Category::ALL {
            assert!(
                PromotionScope::All.covers(category),
                "wildcard must cover {category}"
            );
        }
    }

    #[test]
    fn category_scope_covers_only_itself() {
        let scope = PromotionScope::Category(Category::Burgers);

        assert!(scope.covers(Category::Burgers), "burgers covers burgers");
        assert!(!scope.covers(Category::Drinks), "burgers must not cover drinks");
    }

    #[test]
    fn first_matching_promotion_wins() {
        let menu = fixtures::sample_menu();
        let burger = menu
            .iter()
            .find(|item| item.category == Category::Burgers);

        let promotions = [
            percent_off(1, 10, PromotionScope::Category(Category::Drinks)),
            percent_off(2, 20, PromotionScope::Category(Category::Burgers)),
            percent_off(3, 50, PromotionScope::All),
        ];

        let winner = burger.and_then(|item| applicable_promotion(item, &promotions));

        // The 50% wildcard loses: supplied order decides, not discount size.
        assert_eq!(
            winner.map(|promotion| promotion.id),
            Some(PromotionId::from_raw(2))
        );
    }

    #[test]
    fn no_match_yields_none() {
        let menu = fixtures::sample_menu();
        let dessert = menu
            .iter()
            .find(|item| item.category == Category::Desserts);

        let promotions = [percent_off(1, 20, PromotionScope::Category(Category::Burgers))];

        assert!(
            dessert
                .and_then(|item| applicable_promotion(item, &promotions))
                .is_none(),
            "a burgers-only promotion must not reach desserts"
        );
    }

    #[test]
    fn active_filter_preserves_order() {
        let promotions = vec![
            Promotion {
                is_active: false,
                ..percent_off(1, 10, PromotionScope::All)
            },
            percent_off(2, 15, PromotionScope::All),
            percent_off(3, 20, PromotionScope::All),
        ];

        let active: Vec<_> = active_promotions(&promotions)
            .map(|promotion| promotion.id.into_raw())
            .collect();

        assert_eq!(active, vec![2, 3]);
    }

    #[test]
    fn scope_round_trips_through_wire_strings() -> TestResult {
        let wildcard: PromotionScope = serde_json::from_str(r#""all""#)?;
        let burgers: PromotionScope = serde_json::from_str(r#""burgers""#)?;

        assert_eq!(wildcard, PromotionScope::All);
        assert_eq!(burgers, PromotionScope::Category(Category::Burgers));
        assert_eq!(serde_json::to_string(&wildcard)?, r#""all""#);
        assert_eq!(serde_json::to_string(&burgers)?, r#""burgers""#);

        Ok(())
    }
}
