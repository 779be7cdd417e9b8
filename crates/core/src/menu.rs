//! Menu catalog
//!
//! Catalog items are owned by the hosted store and read-only to this crate.
//! Prices are minor units (DZD centimes).

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// Identifier of a catalog item, assigned by the hosted store.
pub type ItemId = TypedId<MenuItem>;

/// Fixed menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Burgers and other mains.
    Burgers,

    /// Fries, onion rings and friends.
    Sides,

    /// Cold and hot drinks.
    Drinks,

    /// Desserts.
    Desserts,
}

impl Category {
    /// Every category, in menu display order.
    pub const ALL: [Self; 4] = [Self::Burgers, Self::Sides, Self::Drinks, Self::Desserts];

    /// Lowercase wire/display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Burgers => "burgers",
            Self::Sides => "sides",
            Self::Drinks => "drinks",
            Self::Desserts => "desserts",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "burgers" => Ok(Self::Burgers),
            "sides" => Ok(Self::Sides),
            "drinks" => Ok(Self::Drinks),
            "desserts" => Ok(Self::Desserts),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// A catalog item as served by the hosted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Store-assigned identifier; stable across reads.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Short description shown on the menu card.
    pub description: String,

    /// Base price in minor units, before any promotion.
    pub price_minor: u64,

    /// Menu category.
    pub category: Category,

    /// Image reference.
    pub image_url: String,

    /// Optional free-text promotion label (e.g. "2 for 1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

/// Filters a catalog down to one category, preserving order.
pub fn items_in_category(
    items: &[MenuItem],
    category: Category,
) -> impl Iterator<Item = &MenuItem> {
    items.iter().filter(move |item| item.category == category)
}
