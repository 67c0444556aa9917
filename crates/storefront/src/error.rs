//! Unified application error type.
//!
//! Every boundary error converges here via `#[from]`, and the
//! [`IntoResponse`] impl maps each variant to a status code and a JSON body.
//! Internal detail (I/O paths, provider bodies) is logged but never sent to
//! the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::history::HistoryError;
use crate::services::{GatewayError, IdentityError};

/// Application-level error returned by route handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Gateway(e) => match e {
                GatewayError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                GatewayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                GatewayError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                GatewayError::GenerationFailed(_) | GatewayError::Http(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::Identity(e) => match e {
                IdentityError::Unauthorized => StatusCode::UNAUTHORIZED,
                IdentityError::EmailTaken => StatusCode::CONFLICT,
                IdentityError::Provider { .. }
                | IdentityError::Http(_)
                | IdentityError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Checkout(e) => match e {
                CheckoutError::Validation(_) | CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::InvalidCoupon(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::CouponAlreadyApplied | CheckoutError::AlreadyInProgress => {
                    StatusCode::CONFLICT
                }
            },
            Self::History(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// The message sent to the client. Server-side variants are redacted.
    fn public_message(&self) -> String {
        match self {
            Self::History(_) | Self::Internal(_) => "internal server error".to_string(),
            Self::Identity(IdentityError::Http(_) | IdentityError::Parse(_)) => {
                "identity provider unavailable".to_string()
            }
            Self::Gateway(GatewayError::Http(_)) => {
                "design gateway unavailable".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        // Validation failures carry the per-field map so the client can
        // annotate each control.
        let body = if let Self::Checkout(CheckoutError::Validation(ref errors)) = self {
            json!({
                "success": false,
                "error": self.public_message(),
                "fields": errors,
            })
        } else if let Self::Gateway(GatewayError::RateLimited(retry_after)) = self {
            json!({
                "success": false,
                "error": self.public_message(),
                "retry_after": retry_after,
            })
        } else {
            json!({ "success": false, "error": self.public_message() })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_status_mapping() {
        let cases = [
            (
                GatewayError::InvalidInput {
                    field: "prompt",
                    message: "empty".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (GatewayError::RateLimited(60), StatusCode::TOO_MANY_REQUESTS),
            (
                GatewayError::ServiceUnavailable("credits".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                GatewayError::GenerationFailed("no image".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_identity_status_mapping() {
        assert_eq!(
            AppError::from(IdentityError::Unauthorized).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(IdentityError::EmailTaken).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(IdentityError::Provider {
                status: 500,
                message: "boom".to_string()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_checkout_status_mapping() {
        assert_eq!(
            AppError::from(CheckoutError::InvalidCoupon("X".to_string())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(CheckoutError::CouponAlreadyApplied).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(CheckoutError::AlreadyInProgress).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_history_errors_are_redacted() {
        let err = AppError::from(HistoryError::Io(std::io::Error::other(
            "/var/data/secret-path",
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }
}
