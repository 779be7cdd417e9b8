//! Promotions domain models.
//!
//! The promotion itself lives in the core crate; these are the write
//! shapes the admin surface sends to the hosted store.

use comptoir::promotions::{Promotion, PromotionScope};
use serde::{Deserialize, Serialize};

/// A promotion about to be created. The store assigns the id and new
/// promotions always start active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPromotion {
    pub name: String,
    pub description: String,
    pub discount_percentage: u8,
    pub applicable_category: PromotionScope,
}

/// Insert row: the new promotion plus the active flag it starts with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionInsert<'a> {
    #[serde(flatten)]
    pub(crate) promotion: &'a NewPromotion,
    pub(crate) is_active: bool,
}

/// Update body; the id is addressed through the row filter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromotionPatch<'a> {
    pub(crate) name: &'a str,
    pub(crate) description: &'a str,
    pub(crate) discount_percentage: u8,
    pub(crate) applicable_category: PromotionScope,
    pub(crate) is_active: bool,
}

impl<'a> From<&'a Promotion> for PromotionPatch<'a> {
    fn from(promotion: &'a Promotion) -> Self {
        Self {
            name: &promotion.name,
            description: &promotion.description,
            discount_percentage: promotion.discount_percentage,
            applicable_category: promotion.applicable_category,
            is_active: promotion.is_active,
        }
    }
}
