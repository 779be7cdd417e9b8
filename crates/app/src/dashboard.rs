//! Admin dashboard.
//!
//! The administrator-facing aggregate view: a read-only snapshot of every
//! order, newest first, refreshed on a fixed interval while mounted. A
//! refresh only replaces the snapshot, so it needs no mutual exclusion
//! against whatever manual action is in flight.

use std::time::Duration;

use comptoir::orders::OrderStatus;
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;

use crate::{
    context::AppContext,
    domain::orders::{
        OrdersServiceError,
        models::{Order, OrderId},
    },
};

/// How often the mounted dashboard refreshes its snapshot.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("order not found")]
    UnknownOrder,

    #[error("an order cannot move from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}

/// The live-orders projection.
#[derive(Debug, Default)]
pub struct AdminDashboard {
    snapshot: Vec<Order>,
}

impl AdminDashboard {
    /// An empty dashboard; refresh to populate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, newest order first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.snapshot
    }

    /// Replaces the snapshot with a fresh read. A store with no orders
    /// table yields an empty dashboard, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`DashboardError`] when the store call fails; the
    /// previous snapshot is kept so the view does not go blank on a
    /// transient outage.
    pub async fn refresh(&mut self, ctx: &AppContext) -> Result<(), DashboardError> {
        self.snapshot = ctx.orders.fetch_live_orders().await?;

        Ok(())
    }

    /// Moves an order to `next` after checking the transition against the
    /// order's *current* stored status (a fresh read, not the snapshot:
    /// another administrator may have moved it since the last refresh).
    /// Terminal orders are never pushed further.
    ///
    /// # Errors
    ///
    /// Returns a [`DashboardError`] when the order is gone, the
    /// transition is not allowed, or the store call fails.
    pub async fn set_status(
        &mut self,
        ctx: &AppContext,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, DashboardError> {
        let current = ctx
            .orders
            .fetch_order(id)
            .await?
            .ok_or(DashboardError::UnknownOrder)?;

        if !current.status.can_transition_to(next) {
            return Err(DashboardError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        let updated = ctx.orders.set_status(id, next).await?;

        self.refresh(ctx).await?;

        Ok(updated)
    }

    /// Runs the mounted dashboard: refresh on a fixed interval (first
    /// tick immediately) and publish each snapshot. Returns when every
    /// receiver is gone, i.e. the view unmounted. A failed refresh keeps
    /// the last good snapshot and stays mounted.
    pub async fn run(mut self, ctx: AppContext, updates: watch::Sender<Vec<Order>>) {
        let mut ticker = tokio::time::interval(REFRESH_INTERVAL);

        loop {
            ticker.tick().await;

            if let Err(error) = self.refresh(&ctx).await {
                warn!(%error, "live orders refresh failed");
            }

            if updates.send(self.snapshot.clone()).is_err() {
                break;
            }
        }
    }
}
