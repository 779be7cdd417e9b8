//! Storefront conformance tests
//!
//! End-to-end properties of the cart, pricing and status machinery,
//! exercised together the way a browsing session drives them.

use comptoir::{
    cart::{Cart, CartAction, LineItem},
    estimates::estimated_prep_minutes,
    fixtures,
    menu::{Category, MenuItem},
    orders::{OrderStatus, order_total_minor},
    pricing::effective_price_minor,
    promotions::active_promotions,
};

fn add_at_effective_price(cart: &mut Cart, item: &MenuItem) {
    let promotions: Vec<_> = active_promotions(&fixtures::sample_promotions())
        .cloned()
        .collect();
    let price_minor = effective_price_minor(item, &promotions);

    cart.apply(CartAction::AddItem {
        item: item.clone(),
        price_minor,
    });
}

#[test]
fn cart_length_tracks_distinct_identifiers() {
    let menu = fixtures::sample_menu();
    let mut cart = Cart::new();

    for item in &menu {
        add_at_effective_price(&mut cart, item);
    }

    // Add every item a second time; length must not move.
    for item in &menu {
        add_at_effective_price(&mut cart, item);
    }

    assert_eq!(cart.len(), menu.len());
    assert!(cart.items().iter().all(|line| line.quantity() == 2));
}

#[test]
fn subtotal_matches_an_independent_running_total() {
    let menu = fixtures::sample_menu();
    let promotions: Vec<_> = active_promotions(&fixtures::sample_promotions())
        .cloned()
        .collect();

    let mut cart = Cart::new();
    let mut oracle: u64 = 0;

    // A mixed session: add everything once, some items twice, then trim.
    for item in &menu {
        let price = effective_price_minor(item, &promotions);

        cart.apply(CartAction::AddItem {
            item: item.clone(),
            price_minor: price,
        });
        oracle += price;
    }

    for item in menu.iter().take(3) {
        let price = effective_price_minor(item, &promotions);

        cart.apply(CartAction::AddItem {
            item: item.clone(),
            price_minor: price,
        });
        oracle += price;
    }

    if let Some(dropped) = menu.last() {
        cart.apply(CartAction::RemoveItem(dropped.id));
        oracle -= effective_price_minor(dropped, &promotions);
    }

    assert_eq!(cart.subtotal_minor(), oracle);
    assert_eq!(order_total_minor(cart.items()), oracle);
}

#[test]
fn burger_fest_prices_burgers_down_and_leaves_drinks_alone() {
    let promotions = fixtures::sample_promotions();
    let active: Vec<_> = active_promotions(&promotions).cloned().collect();

    let burger = MenuItem {
        price_minor: 10_00,
        ..fixture_item(Category::Burgers)
    };
    let drink = MenuItem {
        price_minor: 5_00,
        ..fixture_item(Category::Drinks)
    };

    // 20% off burgers: 10.00 becomes 8.00.
    assert_eq!(effective_price_minor(&burger, &active), 8_00);

    // The drink is caught by the wildcard "Grand Opening" 10%: 5.00 to 4.50.
    assert_eq!(effective_price_minor(&drink, &active), 4_50);

    // With only the burgers promotion supplied, the drink is untouched.
    let burgers_only: Vec<_> = active
        .iter()
        .filter(|promotion| promotion.name == "Weekend Burger Fest")
        .cloned()
        .collect();

    assert_eq!(effective_price_minor(&drink, &burgers_only), 5_00);
}

#[test]
fn mixed_cart_scenario_totals_twenty_five() {
    let a = MenuItem {
        price_minor: 10_00,
        ..fixture_item(Category::Burgers)
    };
    let b = MenuItem {
        id: comptoir::ids::TypedId::from_raw(99),
        price_minor: 5_00,
        ..fixture_item(Category::Drinks)
    };

    let mut cart = Cart::new();

    cart.apply(CartAction::AddItem {
        item: a.clone(),
        price_minor: a.price_minor,
    });
    cart.apply(CartAction::AddItem {
        item: a.clone(),
        price_minor: a.price_minor,
    });
    cart.apply(CartAction::AddItem {
        item: b.clone(),
        price_minor: b.price_minor,
    });

    assert_eq!(cart.subtotal_minor(), 25_00);
}

#[test]
fn prep_time_counts_units_not_lines() {
    let a = MenuItem {
        price_minor: 10_00,
        ..fixture_item(Category::Burgers)
    };
    let b = MenuItem {
        id: comptoir::ids::TypedId::from_raw(99),
        price_minor: 5_00,
        ..fixture_item(Category::Drinks)
    };

    let mut cart = Cart::new();

    cart.apply(CartAction::AddItem {
        item: a.clone(),
        price_minor: a.price_minor,
    });
    cart.apply(CartAction::UpdateQuantity {
        id: a.id,
        quantity: 2,
    });
    cart.apply(CartAction::AddItem {
        item: b.clone(),
        price_minor: b.price_minor,
    });

    // 5 + 2 × (2 + 1) = 11 minutes, identically wherever it is shown.
    assert_eq!(estimated_prep_minutes(cart.items()), 11);
}

#[test]
fn checkout_snapshot_survives_cart_clearing() {
    let menu = fixtures::sample_menu();
    let mut cart = Cart::new();

    for item in menu.iter().take(2) {
        add_at_effective_price(&mut cart, item);
    }

    // Checkout reads the cart, then clears it; the submitted snapshot is
    // an independent copy.
    let snapshot: Vec<LineItem> = cart.items().to_vec();
    let total = order_total_minor(&snapshot);

    cart.apply(CartAction::Clear);

    assert!(cart.is_empty());
    assert_eq!(order_total_minor(&snapshot), total);
    assert!(total > 0);
}

#[test]
fn delivered_and_cancelled_orders_are_frozen() {
    for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
        assert!(terminal.is_terminal());

        for next in OrderStatus::FORWARD_SEQUENCE {
            assert!(!terminal.can_transition_to(next));
        }

        assert!(!terminal.can_transition_to(OrderStatus::Cancelled));
    }
}

fn fixture_item(category: Category) -> MenuItem {
    MenuItem {
        id: comptoir::ids::TypedId::from_raw(42),
        name: "conformance item".to_string(),
        description: String::new(),
        price_minor: 0,
        category,
        image_url: String::new(),
        promotion: None,
    }
}
