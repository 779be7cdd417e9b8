//! Storefront session.
//!
//! One browsing session's state: a catalog snapshot, the active
//! promotions, and the cart. The cart lives only in memory and only for
//! the session; it is mutated exclusively through dispatches, in the order
//! they are issued, and there are no concurrent writers. Only collaborator
//! round trips are asynchronous; every cart dispatch is synchronous.

use comptoir::{
    cart::{Cart, CartAction},
    menu::{ItemId, MenuItem},
    orders::PaymentMethod,
    pricing::effective_price_minor,
    promotions::{Promotion, active_promotions},
};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

use crate::{
    context::AppContext,
    domain::{
        menu::MenuServiceError,
        orders::{OrdersServiceError, models::NewOrder},
        promotions::PromotionsServiceError,
    },
    receipt::Receipt,
};

/// Failure loading the catalog and promotions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to load the menu")]
    Menu(#[from] MenuServiceError),

    #[error("failed to load promotions")]
    Promotions(#[from] PromotionsServiceError),
}

/// The requested item is not in the loaded catalog.
#[derive(Debug, Error)]
#[error("unknown menu item: {0}")]
pub struct UnknownItemError(pub ItemId);

/// Failure submitting the checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("customer name is required")]
    MissingName,

    #[error("customer phone is required")]
    MissingPhone,

    #[error("failed to submit the order")]
    Submit(#[from] OrdersServiceError),
}

/// Customer details collected on the checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
}

/// A browsing session against a loaded catalog.
#[derive(Default)]
pub struct StorefrontSession {
    menu: Vec<MenuItem>,
    menu_index: FxHashMap<ItemId, usize>,
    promotions: Vec<Promotion>,
    cart: Cart,
}

impl StorefrontSession {
    /// An empty session; call [`load`](Self::load) before browsing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog and promotions concurrently and replaces the
    /// session's snapshots. The cart is left untouched: reloading the
    /// menu must not empty a half-built order.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when either fetch fails. A missing
    /// promotions table is not a failure; the service folds it into an
    /// empty list.
    pub async fn load(&mut self, ctx: &AppContext) -> Result<(), SessionError> {
        let (menu, promotions) = tokio::try_join!(
            async { ctx.menu.list_items().await.map_err(SessionError::from) },
            async {
                ctx.promotions
                    .list_promotions()
                    .await
                    .map_err(SessionError::from)
            },
        )?;

        self.menu_index = menu
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id, index))
            .collect();
        self.promotions = active_promotions(&promotions).cloned().collect();
        self.menu = menu;

        info!(
            items = self.menu.len(),
            promotions = self.promotions.len(),
            "loaded storefront data"
        );

        Ok(())
    }

    /// The loaded catalog, in store order.
    #[must_use]
    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// The active promotions, in store order.
    #[must_use]
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// The session's cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The price a menu card displays for `item`: the base price run
    /// through the active promotions.
    #[must_use]
    pub fn display_price_minor(&self, item: &MenuItem) -> u64 {
        effective_price_minor(item, &self.promotions)
    }

    /// Adds one unit of the item with `id` to the cart, charged at the
    /// effective price ruling right now. Re-adding an item keeps the
    /// price it was first added at.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownItemError`] when `id` is not in the loaded
    /// catalog.
    pub fn add_to_cart(&mut self, id: ItemId) -> Result<(), UnknownItemError> {
        let item = self
            .menu_index
            .get(&id)
            .and_then(|index| self.menu.get(*index))
            .ok_or(UnknownItemError(id))?;

        let price_minor = effective_price_minor(item, &self.promotions);

        self.cart.apply(CartAction::AddItem {
            item: item.clone(),
            price_minor,
        });

        Ok(())
    }

    /// Removes the line with `id`; no-op when absent.
    pub fn remove_from_cart(&mut self, id: ItemId) {
        self.cart.apply(CartAction::RemoveItem(id));
    }

    /// Sets a line's quantity; zero or negative removes the line.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) {
        self.cart.apply(CartAction::UpdateQuantity { id, quantity });
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.apply(CartAction::Clear);
    }

    /// Submits the cart as an order. On success the cart is cleared and
    /// the receipt for the stored order is returned; on failure the cart
    /// is left intact so the customer can retry.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the form is incomplete, the cart
    /// is empty, or the collaborator rejects the submission.
    pub async fn checkout(
        &mut self,
        ctx: &AppContext,
        details: CheckoutDetails,
    ) -> Result<Receipt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if details.customer_name.trim().is_empty() {
            return Err(CheckoutError::MissingName);
        }

        if details.customer_phone.trim().is_empty() {
            return Err(CheckoutError::MissingPhone);
        }

        let order = ctx
            .orders
            .submit_order(NewOrder {
                items: self.cart.items().to_vec(),
                customer_name: details.customer_name,
                customer_phone: details.customer_phone,
                payment_method: details.payment_method,
            })
            .await?;

        self.cart.apply(CartAction::Clear);

        Ok(Receipt::new(order))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use comptoir::{fixtures, orders::OrderStatus};
    use jiff::Timestamp;

    use crate::{
        domain::{
            menu::MockMenuService,
            orders::{MockOrdersService, models::{Order, OrderId}},
            promotions::MockPromotionsService,
        },
        rest::RestError,
    };

    use super::*;

    fn loaded_context() -> AppContext {
        let mut menu = MockMenuService::new();
        menu.expect_list_items()
            .returning(|| Ok(fixtures::sample_menu()));

        let mut promotions = MockPromotionsService::new();
        promotions
            .expect_list_promotions()
            .returning(|| Ok(fixtures::sample_promotions()));

        AppContext::new(
            Arc::new(menu),
            Arc::new(promotions),
            Arc::new(MockOrdersService::new()),
        )
    }

    async fn loaded_session(ctx: &AppContext) -> StorefrontSession {
        let mut session = StorefrontSession::new();

        session.load(ctx).await.expect("load should succeed");

        session
    }

    fn first_burger_id(session: &StorefrontSession) -> ItemId {
        session
            .menu()
            .first()
            .map(|item| item.id)
            .expect("fixture menu is not empty")
    }

    #[tokio::test]
    async fn load_keeps_only_active_promotions() {
        let ctx = loaded_context();
        let session = loaded_session(&ctx).await;

        assert_eq!(session.menu().len(), fixtures::sample_menu().len());
        assert!(session.promotions().iter().all(|promotion| promotion.is_active));
        assert!(session.promotions().len() < fixtures::sample_promotions().len());
    }

    #[tokio::test]
    async fn add_to_cart_charges_the_effective_price() {
        let ctx = loaded_context();
        let mut session = loaded_session(&ctx).await;
        let id = first_burger_id(&session);

        session.add_to_cart(id).expect("item exists");

        // Classic Burger 45 000 under the 20% burger promotion.
        assert_eq!(session.cart().subtotal_minor(), 36_000);
    }

    #[tokio::test]
    async fn add_to_cart_rejects_unknown_items() {
        let ctx = loaded_context();
        let mut session = loaded_session(&ctx).await;

        let result = session.add_to_cart(ItemId::from_raw(9_999));

        assert!(result.is_err(), "unknown id must be rejected");
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn checkout_rejects_an_empty_cart_without_calling_the_store() {
        let ctx = loaded_context();
        let mut session = loaded_session(&ctx).await;

        let result = session
            .checkout(
                &ctx,
                CheckoutDetails {
                    customer_name: "Amina".to_string(),
                    customer_phone: "0555".to_string(),
                    payment_method: PaymentMethod::Card,
                },
            )
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn checkout_rejects_blank_customer_details() {
        let ctx = loaded_context();
        let mut session = loaded_session(&ctx).await;
        let id = first_burger_id(&session);

        session.add_to_cart(id).expect("item exists");

        let result = session
            .checkout(
                &ctx,
                CheckoutDetails {
                    customer_name: "   ".to_string(),
                    customer_phone: "0555".to_string(),
                    payment_method: PaymentMethod::Card,
                },
            )
            .await;

        assert!(matches!(result, Err(CheckoutError::MissingName)));
        assert!(!session.cart().is_empty(), "cart survives a rejected form");
    }

    #[tokio::test]
    async fn successful_checkout_clears_the_cart_and_builds_a_receipt() {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().returning(|new_order| {
            let total_minor = comptoir::orders::order_total_minor(&new_order.items);

            Ok(Order {
                id: OrderId::from_raw(31),
                items: new_order.items,
                total_minor,
                status: OrderStatus::Pending,
                customer_name: new_order.customer_name,
                customer_phone: new_order.customer_phone,
                payment_method: new_order.payment_method,
                created_at: Timestamp::UNIX_EPOCH,
            })
        });

        let mut menu = MockMenuService::new();
        menu.expect_list_items()
            .returning(|| Ok(fixtures::sample_menu()));

        let mut promotions = MockPromotionsService::new();
        promotions
            .expect_list_promotions()
            .returning(|| Ok(fixtures::sample_promotions()));

        let ctx = AppContext::new(Arc::new(menu), Arc::new(promotions), Arc::new(orders));
        let mut session = loaded_session(&ctx).await;
        let id = first_burger_id(&session);

        session.add_to_cart(id).expect("item exists");
        session.add_to_cart(id).expect("item exists");

        let receipt = session
            .checkout(
                &ctx,
                CheckoutDetails {
                    customer_name: "Amina".to_string(),
                    customer_phone: "05 55 12 34 56".to_string(),
                    payment_method: PaymentMethod::Cash,
                },
            )
            .await
            .expect("checkout should succeed");

        assert!(session.cart().is_empty(), "checkout clears the cart");
        assert_eq!(receipt.order.id, OrderId::from_raw(31));
        assert_eq!(receipt.order.total_minor, 72_000);
        // One line, two units: 5 + 2 × 2.
        assert_eq!(receipt.estimated_prep_minutes, 9);
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_cart() {
        let mut orders = MockOrdersService::new();
        orders.expect_submit_order().returning(|_| {
            Err(OrdersServiceError::Unavailable(RestError::Unavailable {
                status: 503,
            }))
        });

        let mut menu = MockMenuService::new();
        menu.expect_list_items()
            .returning(|| Ok(fixtures::sample_menu()));

        let mut promotions = MockPromotionsService::new();
        promotions
            .expect_list_promotions()
            .returning(|| Ok(Vec::new()));

        let ctx = AppContext::new(Arc::new(menu), Arc::new(promotions), Arc::new(orders));
        let mut session = loaded_session(&ctx).await;
        let id = first_burger_id(&session);

        session.add_to_cart(id).expect("item exists");

        let result = session
            .checkout(
                &ctx,
                CheckoutDetails {
                    customer_name: "Amina".to_string(),
                    customer_phone: "0555".to_string(),
                    payment_method: PaymentMethod::Card,
                },
            )
            .await;

        assert!(matches!(result, Err(CheckoutError::Submit(_))));
        assert_eq!(session.cart().len(), 1, "cart survives a failed submit");
    }
}
