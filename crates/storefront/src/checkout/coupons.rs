//! Static coupon table.
//!
//! Coupon codes are compile-time data, not a network interface. Each code
//! maps to a whole-number percentage off the cart subtotal.

/// Code to discount-percentage table.
const COUPON_CODES: &[(&str, u32)] = &[("SAVE10", 10), ("VIZIFIT20", 20), ("FIRST50", 50)];

/// Look up the discount percentage for a coupon code.
///
/// Codes are matched case-sensitively, as issued.
#[must_use]
pub fn discount_percent(code: &str) -> Option<u32> {
    COUPON_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, pct)| *pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(discount_percent("SAVE10"), Some(10));
        assert_eq!(discount_percent("VIZIFIT20"), Some(20));
        assert_eq!(discount_percent("FIRST50"), Some(50));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(discount_percent("SAVE99"), None);
        // Matching is case-sensitive
        assert_eq!(discount_percent("save10"), None);
    }
}
