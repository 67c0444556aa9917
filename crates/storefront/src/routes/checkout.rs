//! Checkout routes.

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use crate::checkout::{CheckoutError, PaymentMethod, ShippingForm};
use crate::error::AppError;
use crate::middleware::{RequireAuth, SessionKey};
use crate::models::Order;
use crate::session::SharedSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub shipping: ShippingForm,
    pub payment: PaymentMethod,
}

/// `GET /api/checkout`
pub async fn view(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
) -> Json<Value> {
    let session = state.sessions().get_or_create(&session_id).await;
    let session = session.lock().await;

    let subtotal = session.cart.total_price();
    let discount = session.checkout.discount_for(subtotal);
    Json(json!({
        "phase": session.checkout.phase(),
        "coupon": session.checkout.coupon(),
        "subtotal": subtotal,
        "discount": discount,
        "total": subtotal.saturating_sub(discount),
    }))
}

/// `POST /api/checkout/coupon`
pub async fn apply_coupon(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    Json(request): Json<CouponRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions().get_or_create(&session_id).await;
    let mut session = session.lock().await;

    let subtotal = session.cart.total_price();
    let discount = session.checkout.apply_coupon(&request.code, subtotal)?;

    Ok(Json(json!({
        "coupon": session.checkout.coupon(),
        "subtotal": subtotal,
        "discount": discount,
        "total": subtotal.saturating_sub(discount),
    })))
}

/// `POST /api/checkout/submit`
///
/// Validates, holds the session in its busy state through the simulated
/// payment delay, then snapshots the cart into an order. The session lock is
/// released during the delay, so concurrent requests observe the busy state
/// rather than blocking on the mutex.
pub async fn submit(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions().get_or_create(&session_id).await;

    {
        let mut session = session.lock().await;
        let session = &mut *session;
        session
            .checkout
            .begin_submit(&session.cart, &request.shipping, &request.payment)?;
    }

    let order = finish_submission(session, state.config().processing_delay)
        .await
        .map_err(|e| AppError::Internal(format!("submission task failed: {e}")))??;

    let history = state.history().clone();
    let recorded = order.clone();
    let user_id = user.id.clone();
    tokio::spawn(async move {
        if let Err(e) = history.prepend_order(&user_id, recorded).await {
            tracing::warn!(error = %e, %user_id, "failed to record order history");
        }
    });

    tracing::info!(order_id = %order.id, total = %order.total, "order submitted");
    Ok(Json(json!({ "order": order })))
}

/// Run the processing delay and the second submission half in a spawned task.
///
/// The session must leave `Processing` even if the client disconnects and the
/// handler future is dropped mid-delay; a detached task guarantees that, the
/// same way the design-generation flag is reset.
fn finish_submission(
    session: SharedSession,
    delay: Duration,
) -> JoinHandle<Result<Order, CheckoutError>> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut session = session.lock().await;
        let session = &mut *session;
        session.checkout.complete_submit(&mut session.cart)
    })
}
