//! CVV/CVC/CID length rules.
//!
//! - American Express: 4 digits (printed on front)
//! - All other cards, and cards with no known brand: 3 digits
//!
//! Only the length is checked; the characters themselves are not inspected.

use crate::error::RuleViolation;
use crate::CardBrand;

/// Returns the expected CVV length for a card brand.
///
/// ```
/// use cc_card::cvv::cvv_length_for_brand;
/// use cc_card::CardBrand;
///
/// assert_eq!(cvv_length_for_brand(Some(CardBrand::AmericanExpress)), 4);
/// assert_eq!(cvv_length_for_brand(Some(CardBrand::Visa)), 3);
/// assert_eq!(cvv_length_for_brand(None), 3);
/// ```
#[inline]
pub const fn cvv_length_for_brand(brand: Option<CardBrand>) -> usize {
    match brand {
        Some(CardBrand::AmericanExpress) => 4,
        _ => 3,
    }
}

/// Checks that `cvv` has the length the brand requires.
pub fn check_cvv(cvv: &str, brand: Option<CardBrand>) -> Result<(), RuleViolation> {
    let expected = cvv_length_for_brand(brand);
    let length = cvv.chars().count();

    if length != expected {
        return Err(RuleViolation::InvalidCvv { expected, length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amex_requires_four() {
        assert!(check_cvv("1234", Some(CardBrand::AmericanExpress)).is_ok());
        assert_eq!(
            check_cvv("123", Some(CardBrand::AmericanExpress)),
            Err(RuleViolation::InvalidCvv {
                expected: 4,
                length: 3
            })
        );
    }

    #[test]
    fn test_other_brands_require_three() {
        for brand in CardBrand::ALL {
            if brand == CardBrand::AmericanExpress {
                continue;
            }
            assert!(check_cvv("123", Some(brand)).is_ok(), "{brand}");
            assert!(check_cvv("1234", Some(brand)).is_err(), "{brand}");
        }
    }

    #[test]
    fn test_empty_cvv() {
        assert_eq!(
            check_cvv("", Some(CardBrand::Visa)),
            Err(RuleViolation::InvalidCvv {
                expected: 3,
                length: 0
            })
        );
    }

    #[test]
    fn test_unknown_brand_uses_three() {
        assert!(check_cvv("123", None).is_ok());
        assert!(check_cvv("13", None).is_err());
    }
}
