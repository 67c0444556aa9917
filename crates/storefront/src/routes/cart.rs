//! Cart routes.
//!
//! Every handler locks the caller's session, mutates the cart, and returns
//! the refreshed cart view so the client never has to derive totals itself.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use vizifit_core::{Price, ProductId};

use crate::cart::Cart;
use crate::error::AppError;
use crate::middleware::SessionKey;
use crate::models::CustomDesign;
use crate::session::SessionContext;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default)]
    pub design: Option<DesignAttachment>,
}

/// A design attached at add-to-cart time.
#[derive(Debug, Deserialize)]
pub struct DesignAttachment {
    pub prompt: String,
    pub image_url: String,
    pub fee: Price,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Serialize the cart plus its derived totals and any coupon discount.
pub(crate) fn cart_view(session: &SessionContext) -> Value {
    let cart: &Cart = &session.cart;
    let subtotal = cart.total_price();
    let discount = session.checkout.discount_for(subtotal);
    json!({
        "items": cart.items(),
        "total_items": cart.total_items(),
        "subtotal": subtotal,
        "discount": discount,
        "total": subtotal.saturating_sub(discount),
    })
}

/// `GET /api/cart`
pub async fn view(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
) -> Json<Value> {
    let session = state.sessions().get_or_create(&session_id).await;
    let session = session.lock().await;
    Json(cart_view(&session))
}

/// `POST /api/cart/items`
pub async fn add_item(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<Value>, AppError> {
    let product_id = ProductId::new(request.product_id);
    let product = state
        .catalog()
        .get(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("no product with id {product_id}")))?
        .clone();

    let design = request.design.map(|d| CustomDesign {
        prompt: d.prompt,
        image_url: d.image_url,
        fee: d.fee,
    });

    let session = state.sessions().get_or_create(&session_id).await;
    let mut session = session.lock().await;
    session.cart.add_item(&product, design);
    Ok(Json(cart_view(&session)))
}

/// `PATCH /api/cart/items/{product_id}`
///
/// Quantity 0 removes the line; an absent product is a no-op.
pub async fn update_quantity(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Json<Value> {
    let product_id = ProductId::new(product_id);
    let session = state.sessions().get_or_create(&session_id).await;
    let mut session = session.lock().await;
    session.cart.update_quantity(&product_id, request.quantity);
    Json(cart_view(&session))
}

/// `DELETE /api/cart/items/{product_id}`
pub async fn remove_item(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    Path(product_id): Path<String>,
) -> Json<Value> {
    let product_id = ProductId::new(product_id);
    let session = state.sessions().get_or_create(&session_id).await;
    let mut session = session.lock().await;
    session.cart.remove_item(&product_id);
    Json(cart_view(&session))
}

/// `DELETE /api/cart`
pub async fn clear(State(state): State<AppState>, SessionKey(session_id): SessionKey) -> Json<Value> {
    let session = state.sessions().get_or_create(&session_id).await;
    let mut session = session.lock().await;
    session.cart.clear();
    Json(cart_view(&session))
}
