//! Order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vizifit_core::{OrderId, OrderStatus, Price};

use crate::cart::CartItem;

/// A submitted order.
///
/// Immutable once created. `items` is a deep snapshot of the cart at
/// submission time, so later cart mutations cannot affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Snapshot of the cart lines at submission time.
    pub items: Vec<CartItem>,
    /// Final total: subtotal minus any coupon discount.
    pub total: Price,
    /// Submission timestamp.
    pub date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Create an order from a cart snapshot.
    ///
    /// Orders start in `Processing`: payment confirmation is simulated at
    /// submission time, so there is no pending-payment window.
    #[must_use]
    pub fn create(items: Vec<CartItem>, total: Price) -> Self {
        Self {
            id: OrderId::generate(),
            items,
            total,
            date: Utc::now(),
            status: OrderStatus::Processing,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vizifit_core::ProductId;

    #[test]
    fn test_create_starts_processing() {
        let order = Order::create(Vec::new(), Price::from_units(70));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, Price::from_units(70));
    }

    #[test]
    fn test_snapshot_is_immune_to_cart_mutation() {
        let item = CartItem {
            product_id: ProductId::new("hoodie-aurora"),
            name: "Aurora Oversized Hoodie".to_string(),
            unit_price: Price::from_units(25),
            quantity: 2,
            custom_design: None,
        };
        let mut cart_lines = vec![item];
        let order = Order::create(cart_lines.clone(), Price::from_units(50));

        cart_lines.clear();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
    }
}
