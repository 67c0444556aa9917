//! Per-user order and design history.
//!
//! Each user gets a directory under the configured data root holding two
//! JSON documents, `orders.json` and `designs.json`. Both are stored
//! newest-first, so readers get reverse-chronological order without sorting.
//!
//! History is a convenience record, not transactional state: writes happen
//! after the primary operation has already succeeded, and a failed write
//! never fails that operation.

use std::path::PathBuf;

use thiserror::Error;
use tracing::instrument;

use serde::{Serialize, de::DeserializeOwned};

use vizifit_core::UserId;

use crate::models::{DesignRecord, Order};

const ORDERS_FILE: &str = "orders.json";
const DESIGNS_FILE: &str = "designs.json";

/// Errors produced by the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed history store, one directory per user.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    /// Create a store rooted at `data_dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// All orders for a user, newest first. A user with no history gets an
    /// empty list, not an error.
    ///
    /// # Errors
    ///
    /// I/O failures other than a missing file, and corrupt JSON.
    #[instrument(skip(self))]
    pub async fn orders(&self, user_id: &UserId) -> Result<Vec<Order>, HistoryError> {
        self.read_list(user_id, ORDERS_FILE).await
    }

    /// All design records for a user, newest first.
    ///
    /// # Errors
    ///
    /// I/O failures other than a missing file, and corrupt JSON.
    #[instrument(skip(self))]
    pub async fn designs(&self, user_id: &UserId) -> Result<Vec<DesignRecord>, HistoryError> {
        self.read_list(user_id, DESIGNS_FILE).await
    }

    /// Prepend an order to the user's history.
    ///
    /// # Errors
    ///
    /// I/O and serialization failures.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn prepend_order(&self, user_id: &UserId, order: Order) -> Result<(), HistoryError> {
        self.prepend(user_id, ORDERS_FILE, order).await
    }

    /// Prepend a design record to the user's history.
    ///
    /// # Errors
    ///
    /// I/O and serialization failures.
    #[instrument(skip(self, record))]
    pub async fn prepend_design(
        &self,
        user_id: &UserId,
        record: DesignRecord,
    ) -> Result<(), HistoryError> {
        self.prepend(user_id, DESIGNS_FILE, record).await
    }

    async fn read_list<T: DeserializeOwned>(
        &self,
        user_id: &UserId,
        file: &str,
    ) -> Result<Vec<T>, HistoryError> {
        let path = self.user_file(user_id, file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn prepend<T: Serialize + DeserializeOwned>(
        &self,
        user_id: &UserId,
        file: &str,
        entry: T,
    ) -> Result<(), HistoryError> {
        let mut entries: Vec<T> = self.read_list(user_id, file).await?;
        entries.insert(0, entry);

        let path = self.user_file(user_id, file);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    fn user_file(&self, user_id: &UserId, file: &str) -> PathBuf {
        self.data_dir.join(sanitize_segment(user_id.as_str())).join(file)
    }
}

/// Reduce an external ID to a safe single path segment.
fn sanitize_segment(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}
