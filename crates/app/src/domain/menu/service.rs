//! Menu service.

use async_trait::async_trait;
use comptoir::menu::{ItemId, MenuItem};
use mockall::automock;
use tracing::info;

use crate::rest::RestClient;

use super::{MenuServiceError, models::NewMenuItem};

#[derive(Debug, Clone)]
pub struct HttpMenuService {
    rest: RestClient,
}

impl HttpMenuService {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl MenuService for HttpMenuService {
    #[tracing::instrument(name = "menu.service.list_items", skip(self), err)]
    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuServiceError> {
        Ok(self
            .rest
            .select("menu_items", "select=*&order=id.asc")
            .await?)
    }

    #[tracing::instrument(name = "menu.service.create_item", skip(self, item), err)]
    async fn create_item(&self, item: NewMenuItem) -> Result<MenuItem, MenuServiceError> {
        let created: MenuItem = self.rest.insert("menu_items", &item).await?;

        info!(item_id = %created.id, "created menu item");

        Ok(created)
    }

    #[tracing::instrument(
        name = "menu.service.update_item",
        skip(self, item),
        fields(item_id = %item.id),
        err
    )]
    async fn update_item(&self, item: MenuItem) -> Result<MenuItem, MenuServiceError> {
        let body = NewMenuItem::from(&item);

        Ok(self
            .rest
            .update("menu_items", &format!("id=eq.{}", item.id), &body)
            .await?)
    }

    #[tracing::instrument(name = "menu.service.delete_item", skip(self), err)]
    async fn delete_item(&self, id: ItemId) -> Result<(), MenuServiceError> {
        Ok(self.rest.delete("menu_items", &format!("id=eq.{id}")).await?)
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// The full catalog, ordered by identifier.
    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuServiceError>;

    /// Creates a catalog item; the store assigns the identifier.
    async fn create_item(&self, item: NewMenuItem) -> Result<MenuItem, MenuServiceError>;

    /// Overwrites a catalog item's fields.
    async fn update_item(&self, item: MenuItem) -> Result<MenuItem, MenuServiceError>;

    /// Deletes a catalog item; idempotent.
    async fn delete_item(&self, id: ItemId) -> Result<(), MenuServiceError>;
}
