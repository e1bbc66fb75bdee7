//! Property tests for the cart state machine.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use mystik_canopy_core::{CartState, Price, Product, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn product(id: i32, cents: i64) -> Product {
    Product::new(
        id,
        "Test Canopy",
        Price::from_cents(cents),
        "For property tests",
        "/static/images/test.jpeg",
        &["Queen"],
    )
}

/// Products with ids in a small range so that repeats are common.
fn arb_product() -> impl Strategy<Value = Product> {
    (1..6i32, 0..500_000i64).prop_map(|(id, cents)| product(id, cents))
}

fn arb_cart() -> impl Strategy<Value = CartState> {
    (
        prop::collection::vec(arb_product(), 0..12),
        prop::collection::vec((1..6i32, -10..10i32), 0..8),
        any::<bool>(),
    )
        .prop_map(|(products, updates, visible)| {
            let mut cart = CartState::new();
            for p in &products {
                cart.add_to_cart(p);
            }
            for (id, delta) in updates {
                cart.update_quantity(ProductId::new(id), delta);
            }
            cart.toggle_visibility(visible);
            cart
        })
}

proptest! {
    #[test]
    fn prop_add_appends_one_line_per_call_in_order(
        products in prop::collection::vec(arb_product(), 0..20)
    ) {
        let mut cart = CartState::new();
        for p in &products {
            cart.add_to_cart(p);
        }

        prop_assert_eq!(cart.line_count(), products.len());
        for (line, p) in cart.lines().iter().zip(&products) {
            prop_assert_eq!(line.product(), p);
            prop_assert_eq!(line.quantity(), 1);
        }
        prop_assert_eq!(cart.is_visible(), !products.is_empty());
    }

    #[test]
    fn prop_add_always_opens_panel(mut cart in arb_cart(), p in arb_product()) {
        cart.add_to_cart(&p);
        prop_assert!(cart.is_visible());
    }

    #[test]
    fn prop_remove_only_touches_matching_lines(cart in arb_cart(), id in 0..8i32) {
        let id = ProductId::new(id);
        let expected: Vec<_> = cart
            .lines()
            .iter()
            .filter(|line| line.id() != id)
            .cloned()
            .collect();

        let mut after = cart.clone();
        after.remove_from_cart(id);

        prop_assert_eq!(after.lines(), expected.as_slice());
        prop_assert_eq!(after.is_visible(), cart.is_visible());
    }

    #[test]
    fn prop_update_quantity_clamps_at_one(
        cart in arb_cart(),
        id in 0..8i32,
        delta in any::<i32>()
    ) {
        let id = ProductId::new(id);
        let mut after = cart.clone();
        after.update_quantity(id, delta);

        prop_assert_eq!(after.line_count(), cart.line_count());
        for (old, new) in cart.lines().iter().zip(after.lines()) {
            prop_assert_eq!(old.id(), new.id());
            if old.id() == id {
                let expected = (i64::from(old.quantity()) + i64::from(delta)).max(1);
                let expected = u32::try_from(expected).unwrap_or(u32::MAX);
                prop_assert_eq!(new.quantity(), expected);
            } else {
                prop_assert_eq!(new.quantity(), old.quantity());
            }
            prop_assert!(new.quantity() >= 1);
        }
    }

    #[test]
    fn prop_total_is_exact_sum(cart in arb_cart()) {
        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|line| line.product().price.amount() * Decimal::from(line.quantity()))
            .sum();
        prop_assert_eq!(cart.total().amount(), expected);
    }
}

#[test]
fn test_empty_cart_total_is_zero() {
    assert_eq!(CartState::new().total().amount(), Decimal::ZERO);
}

#[test]
fn test_scenario_remove_unknown_id_leaves_cart_unchanged() {
    let mut cart = CartState::new();
    cart.add_to_cart(&product(1, 159_999));
    cart.add_to_cart(&product(2, 149_999));
    let before = cart.clone();

    cart.remove_from_cart(ProductId::new(999));
    assert_eq!(cart, before);
}
