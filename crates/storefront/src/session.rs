//! In-memory session registry.
//!
//! Each storefront session owns a cart, a checkout state machine, and a
//! generation-in-flight flag. Sessions are keyed by
//! an opaque ID the client sends in `X-Session-Id` and expire after a TTL of
//! inactivity.
//!
//! Contexts live behind a `tokio::sync::Mutex` so a request holds its own
//! session exclusively while mutating it, without serializing unrelated
//! sessions.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use vizifit_core::SessionId;

use crate::cart::Cart;
use crate::checkout::Checkout;

/// Mutable state owned by one storefront session.
///
/// Identity is not stored here: the authenticated user is resolved per
/// request from the bearer token, so a session survives login changes.
#[derive(Debug, Default)]
pub struct SessionContext {
    /// The shopper's cart.
    pub cart: Cart,
    /// Checkout state machine for this session.
    pub checkout: Checkout,
    /// True while a design generation is running for this session.
    pub generation_in_flight: bool,
}

/// Shared handle to one session's state.
pub type SharedSession = Arc<Mutex<SessionContext>>;

/// TTL-bounded registry of active sessions.
#[derive(Clone)]
pub struct Sessions {
    cache: Cache<SessionId, SharedSession>,
}

impl Sessions {
    /// Create a registry whose entries expire after `ttl` of inactivity.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(ttl)
                .build(),
        }
    }

    /// Fetch the session for `id`, creating a fresh one if absent or expired.
    pub async fn get_or_create(&self, id: &SessionId) -> SharedSession {
        self.cache
            .get_with(id.clone(), async { Arc::new(Mutex::new(SessionContext::default())) })
            .await
    }

    /// Drop a session immediately (logout, abandoned checkout).
    pub async fn remove(&self, id: &SessionId) {
        self.cache.invalidate(id).await;
    }
}
