//! Order models.

use comptoir::{
    cart::LineItem,
    ids::TypedId,
    orders::{OrderStatus, PaymentMethod},
};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Identifier of an order, assigned by the hosted store at submission.
pub type OrderId = TypedId<Order>;

/// An order as stored by the hosted store. Created once at checkout;
/// afterwards only its status moves, and only an administrator moves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned identifier.
    pub id: OrderId,

    /// Snapshot of the cart at submission time.
    pub items: Vec<LineItem>,

    /// Total charged, in minor units.
    #[serde(rename = "total")]
    pub total_minor: u64,

    /// Lifecycle position.
    pub status: OrderStatus,

    /// Customer name given at checkout.
    pub customer_name: String,

    /// Customer phone given at checkout.
    pub customer_phone: String,

    /// How the customer pays.
    pub payment_method: PaymentMethod,

    /// Store-assigned creation timestamp.
    #[serde(rename = "created_at")]
    pub created_at: Timestamp,
}

/// Checkout submission. The store assigns the id, the initial `pending`
/// status and the creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<LineItem>,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
}
