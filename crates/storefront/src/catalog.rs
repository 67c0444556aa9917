//! Catalog store.
//!
//! The product catalog is a static in-memory list compiled into the binary.
//! It is read-only: products are never created, mutated, or deleted at
//! runtime.

use serde::Serialize;

use vizifit_core::{Category, Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Opaque product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Base price, before any custom-design fee.
    pub price: Price,
    /// Product image reference.
    pub image: String,
    /// Garment category.
    pub category: Category,
}

/// Read-only handle over the static product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog from the static product data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in the given category, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price_units: u32,
    image: &str,
    category: Category,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Price::from_units(price_units),
        image: image.to_string(),
        category,
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        product(
            "hoodie-aurora",
            "Aurora Oversized Hoodie",
            "Heavyweight fleece hoodie with a relaxed drop-shoulder fit.",
            25,
            "/images/hoodie-aurora.jpg",
            Category::Hoodie,
        ),
        product(
            "hoodie-eclipse",
            "Eclipse Zip Hoodie",
            "Full-zip hoodie in brushed cotton with a matte finish.",
            48,
            "/images/hoodie-eclipse.jpg",
            Category::Hoodie,
        ),
        product(
            "tshirt-mono",
            "Mono Essential Tee",
            "Midweight organic cotton tee with a clean boxy cut.",
            19,
            "/images/tshirt-mono.jpg",
            Category::Tshirt,
        ),
        product(
            "tshirt-halftone",
            "Halftone Graphic Tee",
            "Soft combed cotton tee with a tonal halftone print.",
            24,
            "/images/tshirt-halftone.jpg",
            Category::Tshirt,
        ),
        product(
            "dress-meridian",
            "Meridian Slip Dress",
            "Bias-cut satin slip dress with adjustable straps.",
            72,
            "/images/dress-meridian.jpg",
            Category::Dress,
        ),
        product(
            "dress-solstice",
            "Solstice Knit Dress",
            "Ribbed knit midi dress with a fitted silhouette.",
            64,
            "/images/dress-solstice.jpg",
            Category::Dress,
        ),
        product(
            "jacket-strata",
            "Strata Utility Jacket",
            "Water-resistant shell jacket with taped seams.",
            95,
            "/images/jacket-strata.jpg",
            Category::Jacket,
        ),
        product(
            "jacket-ember",
            "Ember Denim Jacket",
            "Washed denim trucker jacket with a vintage finish.",
            78,
            "/images/jacket-ember.jpg",
            Category::Jacket,
        ),
        product(
            "pants-vector",
            "Vector Cargo Pants",
            "Tapered cargo pants in ripstop cotton with articulated knees.",
            58,
            "/images/pants-vector.jpg",
            Category::Pants,
        ),
        product(
            "pants-drift",
            "Drift Wide Trousers",
            "Wide-leg trousers in a drapey twill weave.",
            62,
            "/images/pants-drift.jpg",
            Category::Pants,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new();
        let p = catalog.get(&ProductId::new("hoodie-aurora")).unwrap();
        assert_eq!(p.name, "Aurora Oversized Hoodie");
        assert_eq!(p.price, Price::from_units(25));
    }

    #[test]
    fn test_unknown_id_is_none() {
        let catalog = Catalog::new();
        assert!(catalog.get(&ProductId::new("ghost")).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::new();
        let mut ids: Vec<_> = catalog.all().iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.all().len());
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::new();
        let hoodies = catalog.by_category(Category::Hoodie);
        assert!(!hoodies.is_empty());
        assert!(hoodies.iter().all(|p| p.category == Category::Hoodie));
    }

    #[test]
    fn test_every_category_is_stocked() {
        let catalog = Catalog::new();
        for category in Category::ALL {
            assert!(
                !catalog.by_category(category).is_empty(),
                "no products in {category}"
            );
        }
    }
}
