//! Session and authentication extractors.
//!
//! Two layers of identity: every request carries an opaque `X-Session-Id`
//! naming its storefront session, and protected routes additionally require
//! a bearer token verified against the identity provider.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use vizifit_core::SessionId;

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

const SESSION_HEADER: &str = "x-session-id";

/// Extractor for the client-chosen session ID.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(SessionKey(session_id): SessionKey) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct SessionKey(pub SessionId);

impl<S> FromRequestParts<S> for SessionKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::BadRequest("missing X-Session-Id header".to_string()))?;

        Ok(Self(SessionId::new(raw)))
    }
}

/// Extractor that requires a verified bearer token.
///
/// Verification goes through the identity client (with its short-lived
/// cache), so an invalid or expired token rejects the request with 401
/// before the handler body runs.
#[derive(Debug)]
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user = state.identity().verify(token).await?;
        Ok(Self(user))
    }
}

/// Extract the raw bearer token, if the header is present and well-formed.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: &str, value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_session_key_present() {
        let mut parts = parts_with("X-Session-Id", "sess-abc");
        let SessionKey(id) = SessionKey::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(id.as_str(), "sess-abc");
    }

    #[tokio::test]
    async fn test_session_key_missing_or_blank() {
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();
        assert!(
            SessionKey::from_request_parts(&mut parts, &())
                .await
                .is_err()
        );

        let mut parts = parts_with("X-Session-Id", "   ");
        assert!(
            SessionKey::from_request_parts(&mut parts, &())
                .await
                .is_err()
        );
    }

    #[test]
    fn test_bearer_token_parsing() {
        let parts = parts_with("Authorization", "Bearer tok-123");
        assert_eq!(bearer_token(&parts), Some("tok-123"));

        let parts = parts_with("Authorization", "Basic dXNlcg==");
        assert_eq!(bearer_token(&parts), None);

        let parts = parts_with("Authorization", "Bearer   ");
        assert_eq!(bearer_token(&parts), None);
    }

    fn test_state() -> AppState {
        use crate::config::{GatewayConfig, IdentityConfig, StorefrontConfig};
        use secrecy::SecretString;
        use std::time::Duration;

        AppState::new(StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            data_dir: std::env::temp_dir().join("vizifit-auth-test"),
            processing_delay: Duration::ZERO,
            session_ttl: Duration::from_secs(60),
            gateway: GatewayConfig {
                endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
                model: "test-model".to_string(),
                api_key: SecretString::from("k9$Qw2!pL7@zR4#mN8&"),
            },
            identity: IdentityConfig {
                base_url: "http://127.0.0.1:9".to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_require_auth_rejects_missing_bearer() {
        let state = test_state();
        let (mut parts, ()) = Request::builder().body(()).unwrap().into_parts();

        let err = RequireAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_require_auth_rejects_wrong_scheme() {
        let state = test_state();
        let mut parts = parts_with("Authorization", "Basic dXNlcg==");

        let err = RequireAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
