//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted order.
///
/// Orders are created as `Processing` (payment confirmation is simulated at
/// submission time); the remaining states exist for history display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        };
        write!(f, "{s}")
    }
}
