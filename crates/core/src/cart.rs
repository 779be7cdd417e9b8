//! Cart store
//!
//! A reducer over the session's cart: a tagged action enum and a single
//! transition function. The cart is an ordered sequence of line items keyed
//! by catalog item id; insertion order is display order, and at most one
//! line item exists per id. Dispatches are synchronous and never fail;
//! every transition leaves quantities at 1 or more.

use serde::{Deserialize, Serialize};

use crate::menu::{Category, ItemId, MenuItem};

/// One line of the cart: the catalog item's fields plus the quantity and
/// the unit price actually charged.
///
/// The charged price is captured when the item is first added and is never
/// recomputed, even if the catalog price or the promotions change while
/// the item sits in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: ItemId,
    name: String,
    description: String,
    category: Category,
    image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    promotion: Option<String>,
    price_minor: u64,
    quantity: u32,
}

impl LineItem {
    /// Builds the initial line for an item entering the cart, quantity 1,
    /// at the promotion-adjusted unit price supplied by the caller.
    #[must_use]
    pub fn first(item: &MenuItem, charged_price_minor: u64) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category,
            image_url: item.image_url.clone(),
            promotion: item.promotion.clone(),
            price_minor: charged_price_minor,
            quantity: 1,
        }
    }

    /// Catalog item identifier; the line's identity within the cart.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Menu category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Charged unit price in minor units.
    #[must_use]
    pub fn price_minor(&self) -> u64 {
        self.price_minor
    }

    /// Units of this item in the cart; always 1 or more.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Charged price times quantity, in minor units.
    #[must_use]
    pub fn line_total_minor(&self) -> u64 {
        self.price_minor.saturating_mul(u64::from(self.quantity))
    }
}

/// Cart transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of `item`. The caller consults the pricing evaluator
    /// first and passes the effective unit price; if the item is already
    /// in the cart its quantity goes up by one and the price it was first
    /// added at is retained.
    AddItem {
        /// The catalog item being added.
        item: MenuItem,

        /// Effective unit price at the moment of adding.
        price_minor: u64,
    },

    /// Remove the line with this id entirely; no-op when absent.
    RemoveItem(ItemId),

    /// Set a line's quantity to an absolute value. Zero or negative
    /// removes the line; no-op when the id is absent.
    UpdateQuantity {
        /// Line identity.
        id: ItemId,

        /// New absolute quantity.
        quantity: i64,
    },

    /// Empty the cart.
    Clear,
}

/// The session's cart: an insertion-ordered sequence of line items with
/// unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart, as at session start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one transition.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem { item, price_minor } => {
                if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
                    existing.quantity = existing.quantity.saturating_add(1);
                } else {
                    self.items.push(LineItem::first(&item, price_minor));
                }
            }
            CartAction::RemoveItem(id) => {
                self.items.retain(|line| line.id != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|line| line.id != id);
                } else if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
                    line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::Clear => self.items.clear(),
        }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum over lines of charged price times quantity. Always derived,
    /// never stored, so it cannot drift from the lines.
    #[must_use]
    pub fn subtotal_minor(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.line_total_minor()))
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |sum, line| sum.saturating_add(u64::from(line.quantity)))
    }
}
