//! Shared application state.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::history::HistoryStore;
use crate::services::{DesignGateway, IdentityClient};
use crate::session::Sessions;

/// Application state shared across all request handlers.
///
/// Cheaply cloneable; everything mutable lives behind its own
/// synchronization (session mutexes, cache internals).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    gateway: DesignGateway,
    identity: IdentityClient,
    history: HistoryStore,
    sessions: Sessions,
}

impl AppState {
    /// Assemble the state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let gateway = DesignGateway::new(&config.gateway);
        let identity = IdentityClient::new(&config.identity);
        let history = HistoryStore::new(&config.data_dir);
        let sessions = Sessions::new(config.session_ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::new(),
                gateway,
                identity,
                history,
                sessions,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn gateway(&self) -> &DesignGateway {
        &self.inner.gateway
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.inner.history
    }

    #[must_use]
    pub fn sessions(&self) -> &Sessions {
        &self.inner.sessions
    }
}
