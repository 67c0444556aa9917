//! Hosted identity provider client.
//!
//! The storefront delegates credential handling entirely: signup, login, and
//! token verification all go to the provider, and the storefront only keeps
//! the resulting `{id, email, name}` projection. Raw credentials are never
//! logged or persisted here.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use vizifit_core::{Email, UserId};

use crate::config::IdentityConfig;
use crate::models::CurrentUser;

/// How long a verified token stays in the local cache.
const VERIFY_CACHE_TTL: Duration = Duration::from_secs(60);

/// Errors produced by the identity client.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Credentials rejected or token invalid/expired.
    #[error("unauthorized")]
    Unauthorized,

    /// Signup rejected because the email is already registered.
    #[error("email is already registered")]
    EmailTaken,

    /// Provider returned an unexpected error status.
    #[error("identity provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The request itself failed (connect, timeout, TLS).
    #[error("identity request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider response did not match the expected shape.
    #[error("unexpected identity response: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    user: UserProjection,
}

#[derive(Debug, Deserialize)]
struct UserProjection {
    id: String,
    email: String,
    #[serde(default)]
    name: String,
}

impl UserProjection {
    fn into_current_user(self) -> Result<CurrentUser, IdentityError> {
        let email = Email::parse(&self.email)
            .map_err(|e| IdentityError::Parse(format!("bad email in response: {e}")))?;
        let name = if self.name.trim().is_empty() {
            // Fall back to the local part, matching the provider's default.
            self.email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            self.name
        };
        Ok(CurrentUser {
            id: UserId::new(self.id),
            email,
            name,
        })
    }
}

/// An authenticated identity session as returned by login/signup.
#[derive(Debug, Clone, Serialize)]
pub struct IdentitySession {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// The user the token belongs to.
    pub user: CurrentUser,
}

/// Client for the hosted identity provider.
///
/// Cheaply cloneable; verification results are cached briefly so that every
/// authenticated request does not round-trip to the provider.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    base_url: String,
    verify_cache: Cache<String, CurrentUser>,
}

impl IdentityClient {
    /// Create a new identity client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(IdentityClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                verify_cache: Cache::builder()
                    .max_capacity(10_000)
                    .time_to_live(VERIFY_CACHE_TTL)
                    .build(),
            }),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// [`IdentityError::Unauthorized`] on rejected credentials.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<IdentitySession, IdentityError> {
        let response = self
            .inner
            .client
            .post(format!("{}/auth/login", self.inner.base_url))
            .json(&LoginRequest {
                email: email.as_str(),
                password: password.expose_secret(),
            })
            .send()
            .await?;

        self.session_from_response(response).await
    }

    /// Register a new account and return its first session.
    ///
    /// # Errors
    ///
    /// [`IdentityError::EmailTaken`] when the email already exists.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &Email,
        password: &SecretString,
        name: &str,
    ) -> Result<IdentitySession, IdentityError> {
        let response = self
            .inner
            .client
            .post(format!("{}/auth/signup", self.inner.base_url))
            .json(&SignupRequest {
                email: email.as_str(),
                password: password.expose_secret(),
                name,
            })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(IdentityError::EmailTaken);
        }
        self.session_from_response(response).await
    }

    /// Invalidate a token at the provider and drop it from the local cache.
    ///
    /// # Errors
    ///
    /// Provider and transport failures propagate; an already-invalid token is
    /// not an error.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> Result<(), IdentityError> {
        self.inner.verify_cache.invalidate(token).await;

        let response = self
            .inner
            .client
            .post(format!("{}/auth/logout", self.inner.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(provider_error(status, response.text().await.ok()))
        }
    }

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// Results are cached for [`VERIFY_CACHE_TTL`], so revocation takes up to
    /// that long to propagate to this storefront instance.
    ///
    /// # Errors
    ///
    /// [`IdentityError::Unauthorized`] for invalid or expired tokens.
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> Result<CurrentUser, IdentityError> {
        if let Some(user) = self.inner.verify_cache.get(token).await {
            return Ok(user);
        }

        let response = self
            .inner
            .client
            .get(format!("{}/auth/me", self.inner.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if is_auth_rejection(status) {
            return Err(IdentityError::Unauthorized);
        }
        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        let projection: UserProjection = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;
        let user = projection.into_current_user()?;

        self.inner
            .verify_cache
            .insert(token.to_string(), user.clone())
            .await;
        Ok(user)
    }

    async fn session_from_response(
        &self,
        response: reqwest::Response,
    ) -> Result<IdentitySession, IdentityError> {
        let status = response.status();
        if is_auth_rejection(status) {
            return Err(IdentityError::Unauthorized);
        }
        if !status.is_success() {
            return Err(provider_error(status, response.text().await.ok()));
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;
        let user = session.user.into_current_user()?;

        self.inner
            .verify_cache
            .insert(session.access_token.clone(), user.clone())
            .await;

        Ok(IdentitySession {
            access_token: session.access_token,
            user,
        })
    }
}

/// Provider statuses that mean the credential or token was rejected.
fn is_auth_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

fn provider_error(status: StatusCode, body: Option<String>) -> IdentityError {
    IdentityError::Provider {
        status: status.as_u16(),
        message: body
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect::<String>(),
    }
}
