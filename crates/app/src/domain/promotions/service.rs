//! Promotions service.

use async_trait::async_trait;
use comptoir::promotions::{Promotion, PromotionId};
use mockall::automock;
use tracing::{info, warn};

use crate::rest::{RestClient, RestError};

use super::{
    PromotionsServiceError,
    models::{NewPromotion, PromotionInsert, PromotionPatch},
};

/// Rejects percentages the pricing evaluator would misprice. The evaluator
/// itself never clamps, so the write path is where the 1–100 domain is
/// enforced.
fn ensure_valid_discount(percent: u8) -> Result<(), PromotionsServiceError> {
    if (1..=100).contains(&percent) {
        Ok(())
    } else {
        Err(PromotionsServiceError::InvalidDiscount { got: percent })
    }
}

#[derive(Debug, Clone)]
pub struct HttpPromotionsService {
    rest: RestClient,
}

impl HttpPromotionsService {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl PromotionsService for HttpPromotionsService {
    #[tracing::instrument(name = "promotions.service.list_promotions", skip(self), err)]
    async fn list_promotions(&self) -> Result<Vec<Promotion>, PromotionsServiceError> {
        match self.rest.select("promotions", "select=*").await {
            Ok(promotions) => Ok(promotions),
            Err(RestError::MissingTable) => {
                warn!("promotions table not found; continuing without promotions");

                Ok(Vec::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(name = "promotions.service.create_promotion", skip(self, promotion), err)]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError> {
        ensure_valid_discount(promotion.discount_percentage)?;

        let row = PromotionInsert {
            promotion: &promotion,
            is_active: true,
        };

        let created: Promotion = self.rest.insert("promotions", &row).await?;

        info!(promotion_id = %created.id, "created promotion");

        Ok(created)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, promotion),
        fields(promotion_id = %promotion.id),
        err
    )]
    async fn update_promotion(
        &self,
        promotion: Promotion,
    ) -> Result<Promotion, PromotionsServiceError> {
        ensure_valid_discount(promotion.discount_percentage)?;

        let body = PromotionPatch::from(&promotion);

        Ok(self
            .rest
            .update("promotions", &format!("id=eq.{}", promotion.id), &body)
            .await?)
    }

    #[tracing::instrument(name = "promotions.service.delete_promotion", skip(self), err)]
    async fn delete_promotion(&self, id: PromotionId) -> Result<(), PromotionsServiceError> {
        Ok(self.rest.delete("promotions", &format!("id=eq.{id}")).await?)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// All promotions, active or not. A missing backing table is a
    /// non-fatal empty result so a partially provisioned store still
    /// serves the menu at base prices.
    async fn list_promotions(&self) -> Result<Vec<Promotion>, PromotionsServiceError>;

    /// Creates a promotion; new promotions start active.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Overwrites a promotion's fields, including the active flag.
    async fn update_promotion(
        &self,
        promotion: Promotion,
    ) -> Result<Promotion, PromotionsServiceError>;

    /// Deletes a promotion; idempotent.
    async fn delete_promotion(&self, id: PromotionId) -> Result<(), PromotionsServiceError>;
}
