//! Card brand detection using an ordered table of number patterns.
//!
//! Each rule is a whole-string regular expression over the card number
//! describing the brand's prefixes and lengths. Rules are evaluated in table
//! order and the first match wins, so specific ranges are listed before
//! broader ones that overlap them. Maestro's prefix set overlaps Switch
//! (6759) and is therefore the last rule.

use crate::CardBrand;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern sources in evaluation order.
const PATTERNS: [(CardBrand, &str); 14] = [
    (CardBrand::Visa, r"^4\d{12}(?:\d{3}|\d{6})?$"),
    (
        CardBrand::Master,
        r"^(?:(?:5[1-5]\d{4}|677189)\d{10}|2(?:2(?:2[1-9]|[3-9]\d)|[3-6]\d\d|7(?:[01]\d|20))\d{12})$",
    ),
    (
        CardBrand::Discover,
        r"^6(?:011\d{12}|5\d{14}|4[4-9]\d{13}|22(?:1(?:2[6-9]|[3-9]\d)|[2-8]\d{2}|9(?:[01]\d|2[0-5]))\d{10})$",
    ),
    (CardBrand::UnionPay, r"^62\d{14,17}$"),
    (CardBrand::AmericanExpress, r"^3[47]\d{13}$"),
    (
        CardBrand::DinersClub,
        r"^(?:3(?:0[0-5]|09|[689]\d)\d{11}|2014\d{11}|2149\d{11})$",
    ),
    (CardBrand::Jcb, r"^35(?:2[89]|[3-8]\d)\d{12}$"),
    (CardBrand::Mir, r"^220[0-4]\d{12,15}$"),
    (CardBrand::Dankort, r"^5019\d{12}$"),
    (CardBrand::Forbrugsforeningen, r"^600722\d{10}$"),
    (CardBrand::Laser, r"^(?:6706|6771|6709)\d{8}(?:\d{4}|\d{6,7})?$"),
    (CardBrand::Switch, r"^6759\d{12}(?:\d{2,3})?$"),
    (CardBrand::Solo, r"^6767\d{12}(?:\d{2,3})?$"),
    (
        CardBrand::Maestro,
        r"^(?:5018|5020|5038|5612|5892|5893|6304|6759|6761|6762|6763|0604|6390)\d{8,15}$",
    ),
];

/// A single entry in the detection table.
#[derive(Debug)]
pub struct BrandRule {
    brand: CardBrand,
    pattern: Regex,
}

impl BrandRule {
    /// The brand this rule assigns.
    #[inline]
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns true if the whole number matches this rule.
    #[inline]
    pub fn matches(&self, number: &str) -> bool {
        self.pattern.is_match(number)
    }
}

/// Either every rule compiles or the table is empty.
static RULES: Lazy<Vec<BrandRule>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|&(brand, source)| {
            Regex::new(source).map(|pattern| BrandRule { brand, pattern }).map_err(|e| (brand, e))
        })
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|(brand, e)| {
            tracing::error!(brand = brand.code(), error = %e, "brand pattern failed to compile");
            Vec::new()
        })
});

/// Returns the detection table in evaluation order.
pub fn rules() -> &'static [BrandRule] {
    &RULES
}

/// Detects the card brand from a card number.
///
/// The number is expected to be a plain digit string; anything else simply
/// fails to match. No match is a normal outcome and yields `None`.
///
/// # Example
///
/// ```
/// use cc_card::detect::detect_brand;
/// use cc_card::CardBrand;
///
/// assert_eq!(detect_brand("4532875311640795"), Some(CardBrand::Visa));
/// assert_eq!(detect_brand("341419371821943"), Some(CardBrand::AmericanExpress));
/// assert_eq!(detect_brand("869989909227336"), None);
/// ```
pub fn detect_brand(number: &str) -> Option<CardBrand> {
    if number.is_empty() {
        return None;
    }

    let brand = rules()
        .iter()
        .find(|rule| rule.matches(number))
        .map(BrandRule::brand);

    tracing::trace!(brand = brand.map(|b| b.code()), "brand detection");
    brand
}
