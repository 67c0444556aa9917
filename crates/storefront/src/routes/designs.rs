//! Custom design routes.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use vizifit_core::Complexity;

use crate::error::AppError;
use crate::middleware::{RequireAuth, SessionKey};
use crate::models::DesignRecord;
use crate::services::RawDesignRequest;
use crate::state::AppState;

/// `POST /api/designs/generate`
///
/// One generation at a time per session: a second request while one is in
/// flight is rejected instead of queued. On success the design is recorded
/// in the user's history; a failed history write is logged and swallowed,
/// since the client already has the design.
pub async fn generate(
    State(state): State<AppState>,
    SessionKey(session_id): SessionKey,
    RequireAuth(user): RequireAuth,
    Json(request): Json<RawDesignRequest>,
) -> Result<Json<Value>, AppError> {
    let session = state.sessions().get_or_create(&session_id).await;

    {
        let mut session = session.lock().await;
        if session.generation_in_flight {
            return Err(AppError::Conflict(
                "a design generation is already in progress".to_string(),
            ));
        }
        session.generation_in_flight = true;
    }

    // Run the upstream call in its own task so the flag comes back down on
    // every path, even if the client disconnects and this handler is dropped.
    let gateway = state.gateway().clone();
    let forwarded = request.clone();
    let task_session = session.clone();
    let design = tokio::spawn(async move {
        let result = gateway.generate(&forwarded).await;
        task_session.lock().await.generation_in_flight = false;
        result
    })
    .await
    .map_err(|e| AppError::Internal(format!("generation task failed: {e}")))??;

    let fee = request
        .complexity
        .parse::<Complexity>()
        .map(|c| c.fee())
        .unwrap_or_default();

    let history = state.history().clone();
    let record = DesignRecord::new(request.prompt.trim(), &design.image_url);
    let user_id = user.id.clone();
    tokio::spawn(async move {
        if let Err(e) = history.prepend_design(&user_id, record).await {
            tracing::warn!(error = %e, %user_id, "failed to record design history");
        }
    });

    Ok(Json(json!({
        "success": true,
        "image_url": design.image_url,
        "description": design.description,
        "fee": fee,
    })))
}

/// `GET /api/designs`
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Value>, AppError> {
    let designs = state.history().designs(&user.id).await?;
    Ok(Json(json!({ "designs": designs })))
}
