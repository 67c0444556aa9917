//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness check
//!
//! # Products
//! GET    /api/products                 - Catalog listing (optional ?category=)
//! GET    /api/products/{id}            - Product detail
//!
//! # Cart
//! GET    /api/cart                     - Cart view with totals
//! POST   /api/cart/items               - Add item (optionally with a design)
//! PATCH  /api/cart/items/{product_id}  - Update quantity (0 removes)
//! DELETE /api/cart/items/{product_id}  - Remove line
//! DELETE /api/cart                     - Clear cart
//!
//! # Designs (requires auth)
//! POST   /api/designs/generate         - Generate a custom design
//! GET    /api/designs                  - Design history
//!
//! # Checkout
//! GET    /api/checkout                 - Phase + totals
//! POST   /api/checkout/coupon          - Apply a coupon code
//! POST   /api/checkout/submit          - Submit the order (requires auth)
//!
//! # Auth
//! POST   /api/auth/login               - Login
//! POST   /api/auth/signup              - Register
//! POST   /api/auth/logout              - Logout
//! GET    /api/auth/me                  - Current user
//!
//! # Account (requires auth)
//! GET    /api/orders                   - Order history
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod designs;
pub mod products;

use axum::Router;
use axum::routing::{get, patch, post};

use crate::state::AppState;

/// Assemble the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(products::list))
        .route("/api/products/{id}", get(products::detail))
        .route("/api/cart", get(cart::view).delete(cart::clear))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{product_id}",
            patch(cart::update_quantity).delete(cart::remove_item),
        )
        .route("/api/designs/generate", post(designs::generate))
        .route("/api/designs", get(designs::history))
        .route("/api/checkout", get(checkout::view))
        .route("/api/checkout/coupon", post(checkout::apply_coupon))
        .route("/api/checkout/submit", post(checkout::submit))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/orders", get(account::orders))
}

/// Liveness endpoint.
async fn health() -> &'static str {
    "ok"
}
