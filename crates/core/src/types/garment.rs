//! Garment category for catalog products.

use serde::{Deserialize, Serialize};

/// Garment category of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hoodie,
    Tshirt,
    Dress,
    Jacket,
    Pants,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Hoodie,
        Self::Tshirt,
        Self::Dress,
        Self::Jacket,
        Self::Pants,
    ];

    /// Lowercase name as used in API query parameters and catalog data.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hoodie => "hoodie",
            Self::Tshirt => "tshirt",
            Self::Dress => "dress",
            Self::Jacket => "jacket",
            Self::Pants => "pants",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hoodie" => Ok(Self::Hoodie),
            "tshirt" | "t-shirt" => Ok(Self::Tshirt),
            "dress" => Ok(Self::Dress),
            "jacket" => Ok(Self::Jacket),
            "pants" => Ok(Self::Pants),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_case() {
        assert_eq!("Hoodie".parse::<Category>().unwrap(), Category::Hoodie);
        assert_eq!(" T-SHIRT ".parse::<Category>().unwrap(), Category::Tshirt);
        assert!("banana".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Jacket).unwrap();
        assert_eq!(json, "\"jacket\"");
        let parsed: Category = serde_json::from_str("\"pants\"").unwrap();
        assert_eq!(parsed, Category::Pants);
    }
}
