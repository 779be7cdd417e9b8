//! Fixtures
//!
//! A small but realistic menu and promotion set, shared by tests across
//! the workspace and by the CLI demo. Prices are DZD minor units.

use crate::{
    ids::TypedId,
    menu::{Category, MenuItem},
    promotions::{Promotion, PromotionScope},
};

fn item(
    id: u64,
    name: &str,
    description: &str,
    price_minor: u64,
    category: Category,
    promotion: Option<&str>,
) -> MenuItem {
    MenuItem {
        id: TypedId::from_raw(id),
        name: name.to_string(),
        description: description.to_string(),
        price_minor,
        category,
        image_url: format!("https://images.example/menu/{id}.jpg"),
        promotion: promotion.map(str::to_string),
    }
}

/// The sample catalog: two items per category, ordered by id.
#[must_use]
pub fn sample_menu() -> Vec<MenuItem> {
    vec![
        item(
            1,
            "Classic Burger",
            "Beef patty, cheddar, pickles, house sauce",
            45_000,
            Category::Burgers,
            None,
        ),
        item(
            2,
            "Double Smash",
            "Two smashed patties, caramelised onions",
            65_000,
            Category::Burgers,
            Some("New!"),
        ),
        item(
            3,
            "Crispy Fries",
            "Golden and salted",
            18_000,
            Category::Sides,
            None,
        ),
        item(
            4,
            "Onion Rings",
            "Thick-cut, panko crumb",
            20_000,
            Category::Sides,
            None,
        ),
        item(
            5,
            "Cola",
            "33cl, ice cold",
            15_000,
            Category::Drinks,
            None,
        ),
        item(
            6,
            "Citronnade",
            "Fresh lemon, mint",
            16_000,
            Category::Drinks,
            Some("2 for 1"),
        ),
        item(
            7,
            "Chocolate Sundae",
            "Soft serve, hot fudge",
            22_000,
            Category::Desserts,
            None,
        ),
        item(
            8,
            "Churros",
            "Cinnamon sugar, chocolate dip",
            24_000,
            Category::Desserts,
            None,
        ),
    ]
}

/// The sample promotions: one category promotion, one wildcard, and one
/// switched off.
#[must_use]
pub fn sample_promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: TypedId::from_raw(1),
            name: "Weekend Burger Fest".to_string(),
            description: "20% off all burgers this weekend".to_string(),
            discount_percentage: 20,
            applicable_category: PromotionScope::Category(Category::Burgers),
            is_active: true,
        },
        Promotion {
            id: TypedId::from_raw(2),
            name: "Grand Opening".to_string(),
            description: "10% off everything".to_string(),
            discount_percentage: 10,
            applicable_category: PromotionScope::All,
            is_active: true,
        },
        Promotion {
            id: TypedId::from_raw(3),
            name: "Ramadan Special".to_string(),
            description: "15% off desserts after iftar".to_string(),
            discount_percentage: 15,
            applicable_category: PromotionScope::Category(Category::Desserts),
            is_active: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ids_are_unique_and_ascending() {
        let menu = sample_menu();
        let ids: Vec<u64> = menu.iter().map(|item| item.id.into_raw()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();

        assert_eq!(ids, sorted, "fixture ids must be unique and ascending");
    }

    #[test]
    fn every_category_is_represented() {
        let menu = sample_menu();

        for category in Category::ALL {
            assert!(
                menu.iter().any(|item| item.category == category),
                "fixture menu must cover {category}"
            );
        }
    }
}
