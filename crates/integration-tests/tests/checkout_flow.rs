//! End-to-end checkout flow through the state machine.
//!
//! Drives a cart from catalog lookup through coupon application, validation,
//! and order creation, verifying the derived totals at each step.

use vizifit_core::{Complexity, OrderStatus, Price, ProductId};
use vizifit_storefront::cart::Cart;
use vizifit_storefront::catalog::Catalog;
use vizifit_storefront::checkout::{
    Checkout, CheckoutError, CheckoutPhase, PaymentMethod, ShippingForm,
};
use vizifit_storefront::models::CustomDesign;

fn shipping() -> ShippingForm {
    ShippingForm {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "12 Marine Drive".to_string(),
        city: "Mumbai".to_string(),
        state: "MH".to_string(),
        zip: "400001".to_string(),
    }
}

fn card() -> PaymentMethod {
    PaymentMethod::Card {
        card_number: "4242 4242 4242 4242".to_string(),
        card_holder: "Asha Rao".to_string(),
        expiry: "12/28".to_string(),
        cvv: "123".to_string(),
    }
}

#[test]
fn test_full_checkout_with_designed_item_and_coupon() {
    let catalog = Catalog::new();
    let hoodie = catalog.get(&ProductId::new("hoodie-aurora")).unwrap();

    let mut cart = Cart::new();
    cart.add_item(
        hoodie,
        Some(CustomDesign {
            prompt: "geometric waves".to_string(),
            image_url: "https://cdn.vizifit.test/waves.png".to_string(),
            fee: Complexity::Detailed.fee(),
        }),
    );
    cart.update_quantity(&hoodie.id, 2);

    // (25 + 20) x 2 = 90
    assert_eq!(cart.total_price(), Price::from_units(90));

    let mut checkout = Checkout::new();
    let discount = checkout
        .apply_coupon("VIZIFIT20", cart.total_price())
        .unwrap();
    assert_eq!(discount, Price::from_units(18));

    checkout.begin_submit(&cart, &shipping(), &card()).unwrap();
    assert_eq!(checkout.phase(), CheckoutPhase::Processing);

    let order = checkout.complete_submit(&mut cart).unwrap();
    assert_eq!(order.total, Price::from_units(72));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);
    assert!(order.items[0].custom_design.is_some());

    assert!(cart.is_empty());
    assert_eq!(checkout.phase(), CheckoutPhase::Completed);
}

#[test]
fn test_discount_tracks_cart_mutation_after_coupon() {
    let catalog = Catalog::new();
    let hoodie = catalog.get(&ProductId::new("hoodie-aurora")).unwrap();

    let mut cart = Cart::new();
    cart.add_item(hoodie, None);

    let mut checkout = Checkout::new();
    checkout
        .apply_coupon("FIRST50", cart.total_price())
        .unwrap();

    // Cart grows after the coupon was applied; the discount follows.
    cart.update_quantity(&hoodie.id, 4); // subtotal 100
    assert_eq!(
        checkout.discount_for(cart.total_price()),
        Price::from_units(50)
    );
}

#[test]
fn test_validation_failure_keeps_cart_and_coupon() {
    let catalog = Catalog::new();
    let tee = catalog.get(&ProductId::new("tshirt-mono")).unwrap();

    let mut cart = Cart::new();
    cart.add_item(tee, None);

    let mut checkout = Checkout::new();
    checkout.apply_coupon("SAVE10", cart.total_price()).unwrap();

    let bad_payment = PaymentMethod::Upi {
        upi_id: "no-at-sign".to_string(),
        selected_app: String::new(),
    };
    let err = checkout
        .begin_submit(&cart, &shipping(), &bad_payment)
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Validation(_)));

    // Nothing was consumed by the failed attempt
    assert_eq!(checkout.phase(), CheckoutPhase::Editing);
    assert!(!cart.is_empty());
    assert!(checkout.coupon().is_some());
}

#[test]
fn test_cod_needs_no_payment_details() {
    let catalog = Catalog::new();
    let tee = catalog.get(&ProductId::new("tshirt-mono")).unwrap();

    let mut cart = Cart::new();
    cart.add_item(tee, None);

    let mut checkout = Checkout::new();
    checkout
        .begin_submit(&cart, &shipping(), &PaymentMethod::Cod)
        .unwrap();
    let order = checkout.complete_submit(&mut cart).unwrap();
    assert_eq!(order.total, Price::from_units(19));
}

#[test]
fn test_reset_allows_fresh_coupon() {
    let catalog = Catalog::new();
    let tee = catalog.get(&ProductId::new("tshirt-mono")).unwrap();

    let mut cart = Cart::new();
    cart.add_item(tee, None);

    let mut checkout = Checkout::new();
    checkout.apply_coupon("SAVE10", cart.total_price()).unwrap();
    checkout.begin_submit(&cart, &shipping(), &card()).unwrap();
    let _order = checkout.complete_submit(&mut cart).unwrap();

    checkout.reset();
    cart.add_item(tee, None);
    // A new session may apply a coupon again
    assert!(checkout.apply_coupon("SAVE10", cart.total_price()).is_ok());
}
