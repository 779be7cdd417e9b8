//! App context.

use std::sync::Arc;

use crate::{
    domain::{
        menu::{HttpMenuService, MenuService},
        orders::{HttpOrdersService, OrdersService},
        promotions::{HttpPromotionsService, PromotionsService},
    },
    rest::RestClient,
};

/// The collaborator services a storefront session talks to. Cloning is
/// cheap; the services behind the `Arc`s are shared.
#[derive(Clone)]
pub struct AppContext {
    pub menu: Arc<dyn MenuService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Wires every service to the hosted store behind `rest`.
    #[must_use]
    pub fn from_rest(rest: RestClient) -> Self {
        Self {
            menu: Arc::new(HttpMenuService::new(rest.clone())),
            promotions: Arc::new(HttpPromotionsService::new(rest.clone())),
            orders: Arc::new(HttpOrdersService::new(rest)),
        }
    }

    /// Wires explicit service implementations; used by tests to inject
    /// fakes.
    #[must_use]
    pub fn new(
        menu: Arc<dyn MenuService>,
        promotions: Arc<dyn PromotionsService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            menu,
            promotions,
            orders,
        }
    }
}
