//! Context-aware validation of a [`Card`].
//!
//! Validation never fails with `Err`: every broken rule becomes an entry in
//! a [`ValidationErrors`] report keyed by [`Field`]. An empty report means the
//! card is valid for the chosen [`Context`].
//!
//! - [`Context::Card`] runs the number, expiry, CVV, brand and holder-name
//!   checks. All of them run; one failing does not stop the others.
//! - [`Context::Token`] checks only that a usable token is attached.
//!
//! The validator keeps no per-call state, so one instance can be shared
//! freely between threads.

use crate::card::{Card, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::cvv;
use crate::error::{ConfigError, RuleViolation};
use crate::expiry::ExpiryDate;
use crate::luhn;
use crate::token::Token;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What a card is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Context {
    /// Full card data: number, expiry, CVV, brand and holder name.
    #[default]
    Card,
    /// A previously stored card, identified by its token.
    Token,
}

impl Context {
    /// Returns the context name (`credit-card` or `token`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "credit-card",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Context {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "credit-card" => Ok(Self::Card),
            "token" => Ok(Self::Token),
            other => Err(ConfigError::UnknownContext(other.to_owned())),
        }
    }
}

/// Keys of the validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Card number.
    Number,
    /// Expiry month.
    Month,
    /// Expiry date as a whole.
    Date,
    /// Verification value.
    Cvv,
    /// Card brand.
    Brand,
    /// Holder name.
    Name,
    /// Stored-card token.
    Token,
}

impl Field {
    /// Returns the field key as used in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Month => "month",
            Self::Date => "date",
            Self::Cvv => "cvv",
            Self::Brand => "brand",
            Self::Name => "name",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed report of failed rules. Holds at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, RuleViolation>,
}

impl ValidationErrors {
    /// Returns true if no rule failed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failed fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if `field` has an error.
    #[inline]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Returns the violation recorded for `field`.
    #[inline]
    pub fn get(&self, field: Field) -> Option<&RuleViolation> {
        self.errors.get(&field)
    }

    /// Returns the message recorded for `field`.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Iterates over failed fields in check order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &RuleViolation)> {
        self.errors.iter().map(|(&field, violation)| (field, violation))
    }

    /// Returns the failed field keys in check order.
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    /// Returns the report as field key -> message.
    pub fn to_message_map(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, violation)| (field.as_str(), violation.to_string()))
            .collect()
    }

    fn record(&mut self, result: Result<(), RuleViolation>) {
        if let Err(violation) = result {
            self.errors.insert(violation.field(), violation);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, violation)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, violation)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, violation) in self.iter() {
            map.serialize_entry(field.as_str(), &violation.to_string())?;
        }
        map.end()
    }
}

/// Runs the checks for one [`Context`].
///
/// # Example
///
/// ```
/// use cc_card::{Card, CardOptions, Context, Field, Validator};
///
/// let card = Card::new(
///     CardOptions::new()
///         .holder_name("John Doe")
///         .month(1)
///         .year(2099)
///         .number("4735930212834206"),
/// );
///
/// let errors = Validator::new(Context::Card).validate(&card);
/// assert_eq!(errors.fields(), vec![Field::Cvv]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    context: Context,
}

impl Validator {
    /// Creates a validator for `context`.
    pub const fn new(context: Context) -> Self {
        Self { context }
    }

    /// Creates a validator from a context name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(name.parse()?))
    }

    /// Returns the active context.
    #[inline]
    pub const fn context(&self) -> Context {
        self.context
    }

    /// Switches the active context.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    /// Switches the active context by name.
    ///
    /// An unknown name is a configuration error and leaves the context
    /// unchanged.
    pub fn set_context_name(&mut self, name: &str) -> Result<(), ConfigError> {
        self.context = name.parse()?;
        Ok(())
    }

    /// Validates `card` against the current time.
    pub fn validate(&self, card: &Card) -> ValidationErrors {
        self.validate_at(card, Local::now())
    }

    /// Validates `card` as of `now`.
    pub fn validate_at(&self, card: &Card, now: DateTime<Local>) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        match self.context {
            Context::Card => {
                errors.record(check_number(card.number()));
                errors.record(check_month(card.expiry_date()));
                errors.record(check_expiry(card.expiry_date(), now));
                if card.require_cvv() {
                    errors.record(cvv::check_cvv(card.cvv(), card.brand()));
                }
                errors.record(check_brand(card));
                errors.record(check_holder_name(card.holder_name()));
            }
            Context::Token => {
                errors.record(check_token(card.token(), now));
            }
        }

        tracing::debug!(
            context = self.context.as_str(),
            number = %card.masked(),
            failed = %errors,
            "card validated"
        );
        errors
    }
}

/// Validates `card` in `context`.
///
/// ```
/// use cc_card::{validate, Card, CardOptions, Context};
///
/// let card = Card::new(CardOptions::new().token("0123456789"));
/// assert!(validate(Context::Token, &card).is_empty());
/// ```
pub fn validate(context: Context, card: &Card) -> ValidationErrors {
    Validator::new(context).validate(card)
}

/// Number must have 12-19 characters and pass the Luhn check.
fn check_number(number: &str) -> Result<(), RuleViolation> {
    let length = number.chars().count();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&length) || !luhn::passes(number) {
        return Err(RuleViolation::InvalidNumber);
    }
    Ok(())
}

fn check_month(expiry: ExpiryDate) -> Result<(), RuleViolation> {
    if !expiry.has_valid_month() {
        return Err(RuleViolation::InvalidMonth(expiry.month()));
    }
    Ok(())
}

fn check_expiry(expiry: ExpiryDate, now: DateTime<Local>) -> Result<(), RuleViolation> {
    if expiry.is_expired_at(now.naive_local()) {
        return Err(RuleViolation::Expired);
    }
    Ok(())
}

fn check_brand(card: &Card) -> Result<(), RuleViolation> {
    card.brand().map(|_| ()).ok_or(RuleViolation::MissingBrand)
}

fn check_holder_name(holder_name: &str) -> Result<(), RuleViolation> {
    if holder_name.is_empty() {
        return Err(RuleViolation::MissingHolderName);
    }
    Ok(())
}

/// Presence is checked first; an absent token is never reported as expired.
fn check_token(token: Option<&Token>, now: DateTime<Local>) -> Result<(), RuleViolation> {
    match token {
        None => Err(RuleViolation::TokenEmpty),
        Some(token) if token.is_empty() => Err(RuleViolation::TokenEmpty),
        Some(token) if token.is_expired_at(now) => Err(RuleViolation::TokenExpired),
        Some(_) => Ok(()),
    }
}
