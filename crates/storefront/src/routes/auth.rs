//! Authentication routes.
//!
//! Thin pass-throughs to the identity provider. Passwords transit as
//! [`SecretString`] so they never appear in logs or debug output.

use axum::Json;
use axum::extract::State;
use axum::http::request::Parts;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};

use vizifit_core::Email;

use crate::error::AppError;
use crate::middleware::{RequireAuth, auth::bearer_token};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: SecretString,
    #[serde(default)]
    pub name: String,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let email = Email::parse(request.email.trim()).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let session = state.identity().login(&email, &request.password).await?;
    Ok(Json(json!({
        "access_token": session.access_token,
        "user": session.user,
    })))
}

/// `POST /api/auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<Value>, AppError> {
    let email = Email::parse(request.email.trim()).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let session = state
        .identity()
        .signup(&email, &request.password, request.name.trim())
        .await?;
    Ok(Json(json!({
        "access_token": session.access_token,
        "user": session.user,
    })))
}

/// `POST /api/auth/logout`
///
/// Invalidates the token at the provider and drops the storefront session
/// (cart, checkout state). Idempotent: logging out an already-invalid token
/// succeeds.
pub async fn logout(State(state): State<AppState>, parts: Parts) -> Result<Json<Value>, AppError> {
    if let Some(token) = bearer_token(&parts) {
        state.identity().logout(token).await?;
    }
    if let Some(session_id) = session_id(&parts) {
        state.sessions().remove(&session_id).await;
    }
    Ok(Json(json!({ "ok": true })))
}

fn session_id(parts: &Parts) -> Option<vizifit_core::SessionId> {
    parts
        .headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(vizifit_core::SessionId::new)
}

/// `GET /api/auth/me`
pub async fn me(RequireAuth(user): RequireAuth) -> Json<Value> {
    Json(json!({ "user": user }))
}
