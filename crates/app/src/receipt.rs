//! Receipt projection.
//!
//! What the customer sees right after checkout: the stored order plus the
//! client-side preparation estimate. The estimate is recomputed from the
//! same constants the tracking page uses, so the two always agree.

use comptoir::estimates::{estimated_prep_duration, estimated_prep_minutes};
use humanize_duration::{Truncate, prelude::DurationExt};
use rusty_money::{Money, iso};
use tabled::{Table, Tabled, settings::Style};

use crate::domain::orders::models::Order;

/// A submitted order together with its preparation estimate.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub order: Order,
    pub estimated_prep_minutes: u64,
}

impl Receipt {
    /// Builds the receipt for a stored order, computing the estimate from
    /// the order's line items.
    #[must_use]
    pub fn new(order: Order) -> Self {
        let estimated_prep_minutes = estimated_prep_minutes(&order.items);

        Self {
            order,
            estimated_prep_minutes,
        }
    }

    /// Renders the receipt as printable text.
    #[must_use]
    pub fn render(&self) -> String {
        let order = &self.order;

        let rows: Vec<ReceiptRow> = order
            .items
            .iter()
            .map(|line| ReceiptRow {
                item: line.name().to_string(),
                quantity: line.quantity(),
                unit: format_dzd(line.price_minor()),
                total: format_dzd(line.line_total_minor()),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::sharp());

        let prep = estimated_prep_duration(&order.items).human(Truncate::Minute);

        format!(
            "Order #{id}  ({status})\n\
             Customer: {name}  ({phone})\n\
             Payment: {payment}\n\
             Placed: {placed}\n\
             {table}\n\
             Total: {total}\n\
             Estimated preparation time: ~ {prep}\n",
            id = order.id,
            status = order.status,
            name = order.customer_name,
            phone = order.customer_phone,
            payment = order.payment_method,
            placed = order.created_at,
            total = format_dzd(order.total_minor),
        )
    }
}

/// One printed line of the receipt.
#[derive(Debug, Tabled)]
struct ReceiptRow {
    #[tabled(rename = "Item")]
    item: String,

    #[tabled(rename = "Qty")]
    quantity: u32,

    #[tabled(rename = "Unit")]
    unit: String,

    #[tabled(rename = "Total")]
    total: String,
}

/// Formats minor units as dinars.
#[must_use]
pub fn format_dzd(minor: u64) -> String {
    let minor = i64::try_from(minor).unwrap_or(i64::MAX);

    Money::from_minor(minor, iso::DZD).to_string()
}

#[cfg(test)]
mod tests {
    use comptoir::{
        cart::{Cart, CartAction},
        fixtures,
        orders::{OrderStatus, PaymentMethod, order_total_minor},
    };
    use jiff::Timestamp;

    use crate::domain::orders::models::OrderId;

    use super::*;

    fn sample_order() -> Order {
        let menu = fixtures::sample_menu();
        let mut cart = Cart::new();

        for item in menu.iter().take(2) {
            cart.apply(CartAction::AddItem {
                item: item.clone(),
                price_minor: item.price_minor,
            });
        }

        let items = cart.items().to_vec();
        let total_minor = order_total_minor(&items);

        Order {
            id: OrderId::from_raw(7),
            items,
            total_minor,
            status: OrderStatus::Pending,
            customer_name: "Amina".to_string(),
            customer_phone: "05 55 12 34 56".to_string(),
            payment_method: PaymentMethod::Card,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn receipt_estimate_matches_the_core_constants() {
        let receipt = Receipt::new(sample_order());

        // Two lines, one unit each: 5 + 2 × 2.
        assert_eq!(receipt.estimated_prep_minutes, 9);
    }

    #[test]
    fn rendered_receipt_names_every_line_and_the_total() {
        let receipt = Receipt::new(sample_order());
        let rendered = receipt.render();

        assert!(rendered.contains("Order #7"));
        assert!(rendered.contains("Classic Burger"));
        assert!(rendered.contains("Amina"));
        assert!(rendered.contains("Estimated preparation time"));
    }
}
