//! Error types for card construction and validation.
//!
//! Two classes of failure exist and they never mix:
//!
//! - [`ConfigError`] is a caller bug (an unknown validation context, a brand
//!   code that does not exist, a malformed options record). It is returned as
//!   `Err` immediately.
//! - [`RuleViolation`] is an expected data problem found by the
//!   [`Validator`](crate::Validator). Violations are collected into
//!   [`ValidationErrors`](crate::ValidationErrors), never returned as `Err`.

use crate::validate::Field;
use thiserror::Error;

/// Configuration errors. These indicate misuse of the API, not bad card data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The validation context name is not one of `credit-card` or `token`.
    #[error("invalid validation context '{0}'")]
    UnknownContext(String),

    /// The brand code is not one of the supported brand codes.
    #[error("unknown card brand code '{0}'")]
    UnknownBrand(String),

    /// The options record could not be decoded.
    #[cfg(feature = "serde")]
    #[error("invalid card options: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single failed validation rule.
///
/// Every variant belongs to exactly one [`Field`]; the `Display` output is
/// the human-readable message stored in the error report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The number is outside 12-19 characters or fails the Luhn check.
    #[error("not a valid number")]
    InvalidNumber,

    /// The expiry month is not in 1-12.
    #[error("invalid value for month ({0})")]
    InvalidMonth(u8),

    /// The expiry date is in the past.
    #[error("not a valid date")]
    Expired,

    /// The CVV length does not match what the brand requires.
    #[error("not a valid cvv: expected {expected} digits, got {length}")]
    InvalidCvv {
        /// Required length for the card brand.
        expected: usize,
        /// Actual length supplied.
        length: usize,
    },

    /// No brand was detected or supplied.
    #[error("not valid card type")]
    MissingBrand,

    /// The holder name is empty.
    #[error("not a valid holder name")]
    MissingHolderName,

    /// No token is attached, or its reference is empty.
    #[error("token value is empty")]
    TokenEmpty,

    /// The attached token is past its expiry time.
    #[error("token has expired")]
    TokenExpired,
}

impl RuleViolation {
    /// The field this violation is reported under.
    pub const fn field(&self) -> Field {
        match self {
            Self::InvalidNumber => Field::Number,
            Self::InvalidMonth(_) => Field::Month,
            Self::Expired => Field::Date,
            Self::InvalidCvv { .. } => Field::Cvv,
            Self::MissingBrand => Field::Brand,
            Self::MissingHolderName => Field::Name,
            Self::TokenEmpty | Self::TokenExpired => Field::Token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::UnknownContext("wrong".into()).to_string(),
            "invalid validation context 'wrong'"
        );
        assert_eq!(
            ConfigError::UnknownBrand("amex".into()).to_string(),
            "unknown card brand code 'amex'"
        );
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(RuleViolation::InvalidMonth(13).to_string(), "invalid value for month (13)");
        assert_eq!(
            RuleViolation::InvalidCvv {
                expected: 4,
                length: 3
            }
            .to_string(),
            "not a valid cvv: expected 4 digits, got 3"
        );
        assert_eq!(RuleViolation::TokenEmpty.to_string(), "token value is empty");
        assert_eq!(RuleViolation::TokenExpired.to_string(), "token has expired");
    }

    #[test]
    fn test_violation_fields() {
        assert_eq!(RuleViolation::InvalidNumber.field(), Field::Number);
        assert_eq!(RuleViolation::InvalidMonth(0).field(), Field::Month);
        assert_eq!(RuleViolation::Expired.field(), Field::Date);
        assert_eq!(RuleViolation::MissingBrand.field(), Field::Brand);
        assert_eq!(RuleViolation::MissingHolderName.field(), Field::Name);
        assert_eq!(RuleViolation::TokenExpired.field(), Field::Token);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<RuleViolation>();
    }
}
