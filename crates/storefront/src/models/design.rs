//! Custom design types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vizifit_core::Price;

/// An AI-generated design attached to a cart line.
///
/// Created from a successful design-gateway call; owned by the cart line it
/// is attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomDesign {
    /// The shopper's design prompt (at most 500 characters).
    pub prompt: String,
    /// Reference to the generated image.
    pub image_url: String,
    /// Fee derived from the chosen complexity tier.
    pub fee: Price,
}

/// One entry in a user's design history.
///
/// Appended (most recent first) on every successful generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesignRecord {
    /// The prompt that produced the design.
    pub prompt: String,
    /// Reference to the generated image.
    pub image_url: String,
    /// When the design was generated.
    pub date: DateTime<Utc>,
}

impl DesignRecord {
    /// Record a generation that just happened.
    #[must_use]
    pub fn new(prompt: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image_url: image_url.into(),
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_design_record_serde_roundtrip() {
        let record = DesignRecord {
            prompt: "red hoodie with white flames".to_string(),
            image_url: "https://cdn.vizifit.test/d1.png".to_string(),
            date: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DesignRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
