//! Account routes.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// `GET /api/orders`
///
/// The authenticated user's order history, newest first.
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>, AppError> {
    let orders = state.history().orders(&user.id).await?;
    Ok(Json(json!({ "orders": orders })))
}
