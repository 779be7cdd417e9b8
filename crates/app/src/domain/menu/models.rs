//! Menu domain models.
//!
//! The catalog item itself lives in the core crate; these are the write
//! shapes the admin surface sends to the hosted store.

use comptoir::menu::{Category, MenuItem};
use serde::{Deserialize, Serialize};

/// A catalog item about to be created; the store assigns the id.
///
/// Also serves as the update body: the id never travels in a write
/// payload, it is addressed through the row filter instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price_minor: u64,
    pub category: Category,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl From<&MenuItem> for NewMenuItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price_minor: item.price_minor,
            category: item.category,
            image_url: item.image_url.clone(),
            promotion: item.promotion.clone(),
        }
    }
}
