//! Typed configuration record used to build a [`Card`](crate::Card).
//!
//! | key           | default  | effect                                    |
//! |---------------|----------|-------------------------------------------|
//! | `holderName`  | `""`     | stored uppercased                         |
//! | `month`       | `"1"`    | expiry month                              |
//! | `year`        | `"1970"` | expiry year, short years padded with `20` |
//! | `brand`       | none     | used when detection finds no brand        |
//! | `number`      | `""`     | card number, drives brand and BIN         |
//! | `cvv`         | `""`     | verification code                         |
//! | `requireCvv`  | `true`   | gates the CVV check                       |
//! | `token`       | none     | stored card reference                     |
//! | `issuingBank` | `""`     | free text                                 |
//! | `country`     | `""`     | ISO alpha-3, free text                    |
//!
//! With the `serde` feature the record deserializes from a JSON object using
//! the camelCase keys above. Unknown keys are ignored.

use crate::{CardBrand, Token};

/// Options for [`Card::new`](crate::Card::new).
///
/// # Example
///
/// ```
/// use cc_card::{Card, CardOptions, CardBrand};
///
/// let card = Card::new(
///     CardOptions::new()
///         .holder_name("John Doe")
///         .month(1)
///         .year(2099)
///         .number("4532875311640795")
///         .cvv("123"),
/// );
/// assert_eq!(card.brand(), Some(CardBrand::Visa));
/// assert_eq!(card.holder_name(), "JOHN DOE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct CardOptions {
    /// Card holder name.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub holder_name: String,
    /// Expiry month as text.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub month: String,
    /// Expiry year as text.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub year: String,
    /// Fallback brand when detection finds none.
    pub brand: Option<CardBrand>,
    /// Card number.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub number: String,
    /// Card verification value.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub cvv: String,
    /// Whether the CVV is checked during validation.
    pub require_cvv: bool,
    /// Stored card reference.
    pub token: Option<Token>,
    /// Issuing bank name.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub issuing_bank: String,
    /// Issuing country.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "de::text"))]
    pub country: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            holder_name: String::new(),
            month: "1".to_owned(),
            year: "1970".to_owned(),
            brand: None,
            number: String::new(),
            cvv: String::new(),
            require_cvv: true,
            token: None,
            issuing_bank: String::new(),
            country: String::new(),
        }
    }
}

impl CardOptions {
    /// Creates options with every key at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON object.
    ///
    /// ```
    /// use cc_card::CardOptions;
    ///
    /// let options = CardOptions::from_json(
    ///     r#"{"holderName": "Jane", "month": 7, "year": "29", "foo": 1}"#,
    /// ).unwrap();
    /// assert_eq!(options.month, "7");
    /// assert_eq!(options.year, "29");
    /// assert!(options.require_cvv);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the holder name.
    pub fn holder_name(mut self, holder_name: impl Into<String>) -> Self {
        self.holder_name = holder_name.into();
        self
    }

    /// Sets the expiry month. Accepts text or an integer.
    pub fn month(mut self, month: impl ToString) -> Self {
        self.month = month.to_string();
        self
    }

    /// Sets the expiry year. Accepts text or an integer.
    pub fn year(mut self, year: impl ToString) -> Self {
        self.year = year.to_string();
        self
    }

    /// Sets the fallback brand.
    pub fn brand(mut self, brand: CardBrand) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Sets the card number.
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the verification value.
    pub fn cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = cvv.into();
        self
    }

    /// Sets whether the CVV is checked.
    pub fn require_cvv(mut self, require_cvv: bool) -> Self {
        self.require_cvv = require_cvv;
        self
    }

    /// Sets the token. A plain reference string is wrapped in a new
    /// [`Token`] with no expiry.
    pub fn token(mut self, token: impl Into<Token>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the issuing bank.
    pub fn issuing_bank(mut self, issuing_bank: impl Into<String>) -> Self {
        self.issuing_bank = issuing_bank.into();
        self
    }

    /// Sets the issuing country.
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

#[cfg(feature = "serde")]
mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    /// Accepts a string, a number, a boolean or `null` (as empty text).
    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Option::<Text>::deserialize(deserializer)? {
            None => String::new(),
            Some(Text::Str(s)) => s,
            Some(Text::Int(n)) => n.to_string(),
            Some(Text::Float(n)) => n.to_string(),
            Some(Text::Bool(b)) => if b { "1".to_owned() } else { String::new() },
        })
    }
}
