//! Design complexity tiers for AI garment generation.
//!
//! Complexity controls two things: the custom-design fee added to the base
//! product price, and the style clause appended to the upstream image prompt.

use serde::{Deserialize, Serialize};

use crate::types::price::Price;

/// Complexity tier of an AI design request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Detailed,
    Complex,
}

impl Complexity {
    /// All tiers, cheapest first.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Detailed, Self::Complex];

    /// The design fee charged on top of the base product price.
    #[must_use]
    pub const fn fee(&self) -> Price {
        match self {
            Self::Simple => Price::from_units(10),
            Self::Detailed => Price::from_units(20),
            Self::Complex => Price::from_units(30),
        }
    }

    /// The style clause sent to the upstream image model for this tier.
    #[must_use]
    pub const fn style_clause(&self) -> &'static str {
        match self {
            Self::Simple => {
                "Minimalist modern clothing design, clean silhouette, everyday wear, \
                 neutral colors, studio background."
            }
            Self::Detailed => {
                "Premium fashion garment with visible stitching, fabric texture, \
                 modern tailoring, catalog photography."
            }
            Self::Complex => {
                "High-fashion designer outfit, layered fabrics, advanced tailoring, \
                 runway-ready but realistic, luxury aesthetic."
            }
        }
    }

    /// Lowercase name as used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Detailed => "detailed",
            Self::Complex => "complex",
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "detailed" => Ok(Self::Detailed),
            "complex" => Ok(Self::Complex),
            other => Err(format!("unknown complexity: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fees() {
        assert_eq!(Complexity::Simple.fee(), Price::from_units(10));
        assert_eq!(Complexity::Detailed.fee(), Price::from_units(20));
        assert_eq!(Complexity::Complex.fee(), Price::from_units(30));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("SIMPLE".parse::<Complexity>().unwrap(), Complexity::Simple);
        assert_eq!(
            " detailed ".parse::<Complexity>().unwrap(),
            Complexity::Detailed
        );
        assert!("extreme".parse::<Complexity>().is_err());
    }

    #[test]
    fn test_style_clauses_differ() {
        let clauses: Vec<_> = Complexity::ALL.iter().map(|c| c.style_clause()).collect();
        assert_ne!(clauses[0], clauses[1]);
        assert_ne!(clauses[1], clauses[2]);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Complexity::Complex).unwrap(),
            "\"complex\""
        );
    }
}
