//! Cart engine.
//!
//! Holds the ordered list of lines for one shopper session and computes
//! aggregate totals. Every operation is a total function: absent lines make
//! mutations no-ops, and totals are recomputed on every read instead of being
//! cached.
//!
//! Lines are keyed by `(product_id, has_design)`. A plain purchase and an
//! AI-customized purchase of the same base product are independent lines;
//! only plain lines merge by incrementing quantity.

use serde::{Deserialize, Serialize};

use vizifit_core::{Price, ProductId};

use crate::catalog::Product;
use crate::models::CustomDesign;

/// A single cart line: a product, a quantity, and an optional custom design.
///
/// `quantity` is always at least 1; reducing it to 0 deletes the line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Product name, denormalized so order snapshots stay meaningful even if
    /// the catalog changes.
    pub name: String,
    /// Base price of one unit, without any design fee.
    pub unit_price: Price,
    /// Number of units.
    pub quantity: u32,
    /// AI-generated custom design attached to this line, if any.
    pub custom_design: Option<CustomDesign>,
}

impl CartItem {
    /// Effective price of one unit: base price plus design fee if customized.
    #[must_use]
    pub fn unit_total(&self) -> Price {
        match &self.custom_design {
            Some(design) => self.unit_price.add(design.fee),
            None => self.unit_price,
        }
    }

    /// Total for this line: unit total times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_total().times(self.quantity)
    }
}

/// Ordered collection of cart lines for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// True if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product to the cart.
    ///
    /// If a line for the same product exists and neither that line nor this
    /// addition carries a custom design, the existing quantity is incremented.
    /// In every other case a new line with quantity 1 is appended, so distinct
    /// custom designs are never collapsed into one line.
    pub fn add_item(&mut self, product: &Product, custom_design: Option<CustomDesign>) {
        if custom_design.is_none() {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.product_id == product.id && i.custom_design.is_none())
            {
                existing.quantity += 1;
                return;
            }
        }

        self.items.push(CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            custom_design,
        });
    }

    /// Set the quantity of the first line matching `product_id`.
    ///
    /// A quantity of 0 removes the line. Absent product IDs are a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        let Some(pos) = self.items.iter().position(|i| &i.product_id == product_id) else {
            return;
        };

        if quantity == 0 {
            self.items.remove(pos);
        } else if let Some(item) = self.items.get_mut(pos) {
            item.quantity = quantity;
        }
    }

    /// Remove the first line matching `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        if let Some(pos) = self.items.iter().position(|i| &i.product_id == product_id) {
            self.items.remove(pos);
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total price across all lines, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Deep copy of the current lines, for order snapshots.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use vizifit_core::Complexity;

    fn product(catalog: &Catalog, id: &str) -> Product {
        catalog.get(&ProductId::new(id)).unwrap().clone()
    }

    fn design(prompt: &str, complexity: Complexity) -> CustomDesign {
        CustomDesign {
            prompt: prompt.to_string(),
            image_url: "https://cdn.vizifit.test/design.png".to_string(),
            fee: complexity.fee(),
        }
    }

    #[test]
    fn test_plain_add_merges_into_one_line() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora");
        let mut cart = Cart::new();

        cart.add_item(&p, None);
        cart.add_item(&p, None);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_customized_add_is_separate_line() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora");
        let mut cart = Cart::new();

        cart.add_item(&p, None);
        cart.add_item(&p, Some(design("flames", Complexity::Simple)));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_two_designs_never_collapse() {
        let catalog = Catalog::new();
        let p = product(&catalog, "tshirt-mono");
        let mut cart = Cart::new();

        cart.add_item(&p, Some(design("waves", Complexity::Simple)));
        cart.add_item(&p, Some(design("flames", Complexity::Complex)));

        assert_eq!(cart.items().len(), 2);
        assert!(cart.items().iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora");
        let mut cart = Cart::new();

        cart.add_item(&p, None);
        cart.update_quantity(&p.id, 0);
        assert!(cart.is_empty());

        // Subsequent remove of the same id is a no-op
        cart.remove_item(&p.id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.update_quantity(&ProductId::new("ghost"), 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_items_matches_quantity_sum() {
        let catalog = Catalog::new();
        let hoodie = product(&catalog, "hoodie-aurora");
        let tee = product(&catalog, "tshirt-mono");
        let mut cart = Cart::new();

        cart.add_item(&hoodie, None);
        cart.add_item(&hoodie, None);
        cart.add_item(&tee, None);
        cart.update_quantity(&tee.id, 4);
        cart.remove_item(&hoodie.id);

        let expected: u32 = cart.items().iter().map(|i| i.quantity).sum();
        assert_eq!(cart.total_items(), expected);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_total_price_includes_design_fee() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora"); // $25.00 in catalog data
        let mut cart = Cart::new();

        cart.add_item(&p, Some(design("flames", Complexity::Simple)));
        cart.update_quantity(&p.id, 2);

        // (25 + 10) x 2 = 70
        assert_eq!(cart.total_price(), Price::from_units(70));
    }

    #[test]
    fn test_clear() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora");
        let mut cart = Cart::new();

        cart.add_item(&p, None);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let catalog = Catalog::new();
        let p = product(&catalog, "hoodie-aurora");
        let mut cart = Cart::new();

        cart.add_item(&p, None);
        let snap = cart.snapshot();
        cart.clear();

        assert_eq!(snap.len(), 1);
        assert!(cart.is_empty());
    }
}
