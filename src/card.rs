//! Card brands and the immutable [`Card`] value object.
//!
//! A [`Card`] never changes after construction. Every `with_*` method
//! returns a new card with one field replaced, plus the derived fields that
//! depend on it (brand and BIN follow the number, attaching a token masks the
//! number and clears the CVV).

use crate::detect::detect_brand;
use crate::error::ConfigError;
use crate::expiry::ExpiryDate;
use crate::mask;
use crate::options::CardOptions;
use crate::token::Token;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// Number of leading characters that form the BIN.
pub const BIN_LENGTH: usize = 6;

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// Supported card brands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardBrand {
    /// Visa - prefix 4, lengths 13, 16, 19
    Visa,
    /// Mastercard - prefix 51-55, 677189, 2221-2720, length 16
    Master,
    /// Discover - prefix 6011, 644-649, 65, 622126-622925, length 16
    Discover,
    /// American Express - prefix 34, 37, length 15
    AmericanExpress,
    /// Diners Club - prefix 300-305, 309, 36, 38, 39, 2014, 2149
    DinersClub,
    /// JCB - prefix 3528-3589, length 16
    Jcb,
    /// Switch - prefix 6759, lengths 16, 18, 19
    Switch,
    /// Solo - prefix 6767, lengths 16, 18, 19
    Solo,
    /// Dankort - prefix 5019, length 16
    Dankort,
    /// Maestro - assorted prefixes, lengths 12-19
    Maestro,
    /// Forbrugsforeningen - prefix 600722, length 16
    Forbrugsforeningen,
    /// Laser - prefix 6706, 6709, 6771, lengths 12, 16, 18, 19
    Laser,
    /// UnionPay - prefix 62, lengths 16-19
    UnionPay,
    /// Mir - prefix 2200-2204, lengths 16-19
    Mir,
}

impl CardBrand {
    /// Every brand, in declaration order.
    pub const ALL: [CardBrand; 14] = [
        Self::Visa,
        Self::Master,
        Self::Discover,
        Self::AmericanExpress,
        Self::DinersClub,
        Self::Jcb,
        Self::Switch,
        Self::Solo,
        Self::Dankort,
        Self::Maestro,
        Self::Forbrugsforeningen,
        Self::Laser,
        Self::UnionPay,
        Self::Mir,
    ];

    /// Returns the brand code used in options records and error reports.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Master => "master",
            Self::Discover => "discover",
            Self::AmericanExpress => "american_express",
            Self::DinersClub => "diners_club",
            Self::Jcb => "jcb",
            Self::Switch => "switch",
            Self::Solo => "solo",
            Self::Dankort => "dankort",
            Self::Maestro => "maestro",
            Self::Forbrugsforeningen => "forbrugsforeningen",
            Self::Laser => "laser",
            Self::UnionPay => "unionpay",
            Self::Mir => "mir",
        }
    }

    /// Returns a human-readable name for the brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Master => "Mastercard",
            Self::Discover => "Discover",
            Self::AmericanExpress => "American Express",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::Switch => "Switch",
            Self::Solo => "Solo",
            Self::Dankort => "Dankort",
            Self::Maestro => "Maestro",
            Self::Forbrugsforeningen => "Forbrugsforeningen",
            Self::Laser => "Laser",
            Self::UnionPay => "UnionPay",
            Self::Mir => "Mir",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardBrand {
    type Err = ConfigError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|brand| brand.code() == code)
            .ok_or_else(|| ConfigError::UnknownBrand(code.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CardBrand {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = <String as serde::Deserialize>::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CardBrand {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// An immutable payment card.
///
/// # Security
///
/// - `Debug` shows a masked number and hides the CVV
/// - The number and CVV buffers are zeroed on drop using the `zeroize` crate
///
/// # Example
///
/// ```
/// use cc_card::{Card, CardOptions, CardBrand, Token};
///
/// let card = Card::new(CardOptions::new().number("4532875311640795").cvv("123"));
/// assert_eq!(card.brand(), Some(CardBrand::Visa));
/// assert_eq!(card.bin(), "453287");
///
/// let stored = card.with_token(Token::new("0123456789"));
/// assert_eq!(stored.number(), "XXXX-XXXX-XXXX-0795");
/// assert_eq!(stored.cvv(), "");
/// assert_eq!(card.number(), "4532875311640795");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    holder_name: String,
    number: String,
    brand: Option<CardBrand>,
    cvv: String,
    require_cvv: bool,
    expiry_date: ExpiryDate,
    token: Option<Token>,
    bin: String,
    issuing_bank: String,
    country: String,
}

impl Card {
    /// Builds a card from an options record.
    ///
    /// The holder name is uppercased, the brand is detected from the number
    /// (falling back to the supplied brand when nothing matches) and the BIN
    /// is taken from the first six characters of the number.
    pub fn new(options: CardOptions) -> Self {
        let CardOptions {
            holder_name,
            month,
            year,
            brand,
            number,
            cvv,
            require_cvv,
            token,
            issuing_bank,
            country,
        } = options;

        let card = Self {
            holder_name: holder_name.to_uppercase(),
            expiry_date: ExpiryDate::parse(&month, &year),
            brand: detect_brand(&number).or(brand),
            bin: bin_of(&number),
            number,
            cvv,
            require_cvv,
            token,
            issuing_bank,
            country,
        };

        tracing::debug!(
            number = %card.masked(),
            brand = card.brand.map(|b| b.code()),
            has_token = card.token.is_some(),
            "card built"
        );
        card
    }

    /// Returns the card number, or its masked form once tokenized.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the holder name (uppercased).
    #[inline]
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Returns the brand, if detected or supplied.
    #[inline]
    pub fn brand(&self) -> Option<CardBrand> {
        self.brand
    }

    /// Returns the card verification value.
    #[inline]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Returns true if validation checks the CVV.
    #[inline]
    pub fn require_cvv(&self) -> bool {
        self.require_cvv
    }

    /// Returns the expiry date.
    #[inline]
    pub fn expiry_date(&self) -> ExpiryDate {
        self.expiry_date
    }

    /// Returns the attached token, if any.
    #[inline]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Returns true if a token is attached.
    #[inline]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the BIN: the first six characters of the number.
    #[inline]
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Returns the issuing bank.
    #[inline]
    pub fn issuing_bank(&self) -> &str {
        &self.issuing_bank
    }

    /// Returns the issuing country.
    #[inline]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the last four characters of the number.
    #[inline]
    pub fn last_four(&self) -> &str {
        mask::last_four(&self.number)
    }

    /// Returns the number masked for display.
    ///
    /// Format: `****-****-****-1234`. Safe for logs.
    #[inline]
    pub fn masked(&self) -> String {
        mask::mask_display(&self.number)
    }

    /// Copies this card and applies `change` to the copy.
    fn with(&self, change: impl FnOnce(&mut Self)) -> Self {
        let mut card = self.clone();
        change(&mut card);
        card
    }

    /// Returns a card with a new number.
    ///
    /// The brand is detected again, the BIN recomputed and any token dropped.
    #[must_use]
    pub fn with_number(&self, number: impl Into<String>) -> Self {
        let number = number.into();
        self.with(|card| {
            card.brand = detect_brand(&number);
            card.bin = bin_of(&number);
            card.token = None;
            card.number = number;
        })
    }

    /// Returns a card with a new holder name, uppercased.
    #[must_use]
    pub fn with_holder_name(&self, holder_name: &str) -> Self {
        self.with(|card| card.holder_name = holder_name.to_uppercase())
    }

    /// Returns a card with a new expiry date.
    #[must_use]
    pub fn with_expiry_date(&self, expiry_date: ExpiryDate) -> Self {
        self.with(|card| card.expiry_date = expiry_date)
    }

    /// Returns a card with the brand overridden.
    ///
    /// The brand is not checked against the number.
    #[must_use]
    pub fn with_brand(&self, brand: CardBrand) -> Self {
        self.with(|card| card.brand = Some(brand))
    }

    /// Returns a card with a new verification value.
    #[must_use]
    pub fn with_cvv(&self, cvv: impl Into<String>) -> Self {
        self.with(|card| card.cvv = cvv.into())
    }

    /// Returns a card with the CVV requirement changed.
    #[must_use]
    pub fn with_require_cvv(&self, require_cvv: bool) -> Self {
        self.with(|card| card.require_cvv = require_cvv)
    }

    /// Returns a card with a new issuing bank.
    #[must_use]
    pub fn with_issuing_bank(&self, issuing_bank: impl Into<String>) -> Self {
        self.with(|card| card.issuing_bank = issuing_bank.into())
    }

    /// Returns a card with a new issuing country.
    #[must_use]
    pub fn with_country(&self, country: impl Into<String>) -> Self {
        self.with(|card| card.country = country.into())
    }

    /// Returns a card holding `token` in place of its sensitive data.
    ///
    /// A non-empty number is replaced by `XXXX-XXXX-XXXX-` and its last four
    /// characters and the CVV is cleared. The BIN is kept.
    #[must_use]
    pub fn with_token(&self, token: impl Into<Token>) -> Self {
        let token = token.into();
        self.with(|card| {
            if !card.number.is_empty() {
                let masked = mask::mask_for_token(&card.number);
                card.number.zeroize();
                card.number = masked;
            }
            card.cvv.zeroize();
            card.token = Some(token);
        })
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new(CardOptions::default())
    }
}

impl From<CardOptions> for Card {
    fn from(options: CardOptions) -> Self {
        Self::new(options)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("holder_name", &self.holder_name)
            .field("number", &self.masked())
            .field("brand", &self.brand)
            .field("cvv", &"***")
            .field("require_cvv", &self.require_cvv)
            .field("expiry_date", &self.expiry_date)
            .field("token", &self.token)
            .field("bin", &self.bin)
            .field("issuing_bank", &self.issuing_bank)
            .field("country", &self.country)
            .finish()
    }
}

impl Drop for Card {
    fn drop(&mut self) {
        self.number.zeroize();
        self.cvv.zeroize();
    }
}

fn bin_of(number: &str) -> String {
    number.chars().take(BIN_LENGTH).collect()
}
