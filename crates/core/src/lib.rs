//! Comptoir
//!
//! Comptoir is the in-memory ordering core of a restaurant storefront: a
//! reducer-driven cart, a promotion pricing rule and an order status
//! machine. It performs no I/O; catalog, promotions and orders are owned
//! by external collaborators and only their snapshots pass through here.

pub mod cart;
pub mod estimates;
pub mod fixtures;
pub mod ids;
pub mod menu;
pub mod orders;
pub mod pricing;
pub mod promotions;
