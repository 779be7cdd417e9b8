//! Orders service.

use async_trait::async_trait;
use comptoir::{
    cart::LineItem,
    orders::{OrderStatus, PaymentMethod, order_total_minor},
};
use mockall::automock;
use serde::Serialize;
use tracing::{info, warn};

use crate::rest::{RestClient, RestError};

use super::{
    OrdersServiceError,
    models::{NewOrder, Order, OrderId},
};

/// Insert row for a submitted order. The client computes the total and
/// writes the initial `pending` status; the store assigns id and
/// timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderInsert<'a> {
    items: &'a [LineItem],
    customer_name: &'a str,
    customer_phone: &'a str,
    payment_method: PaymentMethod,
    #[serde(rename = "total")]
    total_minor: u64,
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    rest: RestClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(name = "orders.service.submit_order", skip(self, order), err)]
    async fn submit_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let total_minor = order_total_minor(&order.items);

        let row = OrderInsert {
            items: &order.items,
            customer_name: &order.customer_name,
            customer_phone: &order.customer_phone,
            payment_method: order.payment_method,
            total_minor,
            status: OrderStatus::Pending,
        };

        let created: Order = self.rest.insert("orders", &row).await?;

        info!(order_id = %created.id, total_minor, "submitted order");

        Ok(created)
    }

    #[tracing::instrument(name = "orders.service.fetch_order", skip(self), err)]
    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, OrdersServiceError> {
        match self
            .rest
            .select_single("orders", &format!("id=eq.{id}&select=*"))
            .await
        {
            Ok(order) => Ok(Some(order)),
            Err(RestError::NoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(name = "orders.service.fetch_live_orders", skip(self), err)]
    async fn fetch_live_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        match self
            .rest
            .select("orders", "select=*&order=created_at.desc")
            .await
        {
            Ok(orders) => Ok(orders),
            Err(RestError::MissingTable) => {
                warn!("orders table not found; dashboard will show no orders");

                Ok(Vec::new())
            }
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(name = "orders.service.set_status", skip(self), err)]
    async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let updated: Order = self
            .rest
            .update("orders", &format!("id=eq.{id}"), &StatusPatch { status })
            .await?;

        info!(order_id = %updated.id, %status, "updated order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submits the cart snapshot. The store assigns id, `pending` status
    /// and the creation timestamp; the returned order carries them.
    async fn submit_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Fresh read of one order. `Ok(None)` is the normal miss outcome,
    /// not an error.
    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, OrdersServiceError>;

    /// All orders, newest first. A missing backing table is a non-fatal
    /// empty list.
    async fn fetch_live_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Administrator-only status transition.
    async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
