//! Opaque references to a card stored by a payment processor.

use chrono::{DateTime, Local};
use std::fmt;

/// A stored-card reference with an optional expiry instant.
///
/// A token without an expiry never expires.
///
/// # Example
///
/// ```
/// use cc_card::Token;
/// use chrono::{Duration, Local};
///
/// let token = Token::new("0123456789");
/// assert!(!token.is_expired());
///
/// let token = token.with_expiry_time(Local::now() - Duration::minutes(15));
/// assert!(token.is_expired());
/// assert_eq!(token.reference(), "0123456789");
/// assert_eq!(token.to_string(), "0123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    reference: String,
    expiry_time: Option<DateTime<Local>>,
}

impl Token {
    /// Creates a token that never expires.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            expiry_time: None,
        }
    }

    /// Creates a token that expires at `expiry_time`.
    pub fn with_expiry(reference: impl Into<String>, expiry_time: DateTime<Local>) -> Self {
        Self {
            reference: reference.into(),
            expiry_time: Some(expiry_time),
        }
    }

    /// Returns the opaque reference.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the expiry instant, if any.
    #[inline]
    pub fn expiry_time(&self) -> Option<DateTime<Local>> {
        self.expiry_time
    }

    /// Returns a copy of this token with the same reference and a new expiry.
    #[must_use]
    pub fn with_expiry_time(&self, expiry_time: DateTime<Local>) -> Self {
        Self {
            reference: self.reference.clone(),
            expiry_time: Some(expiry_time),
        }
    }

    /// Returns true if the reference is an empty string.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Returns true if an expiry is set and the current time is past it.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Local::now())
    }

    /// Returns true if an expiry is set and `now` is past it.
    pub fn is_expired_at(&self, now: DateTime<Local>) -> bool {
        self.expiry_time.is_some_and(|expiry| expiry < now)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

impl From<&str> for Token {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for Token {
    fn from(reference: String) -> Self {
        Self::new(reference)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Token;
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Reference(String),
        Full {
            reference: String,
            #[serde(default, rename = "expiryTime")]
            expiry_time: Option<DateTime<Local>>,
        },
    }

    impl<'de> Deserialize<'de> for Token {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match Repr::deserialize(deserializer)? {
                Repr::Reference(reference) => Token::new(reference),
                Repr::Full {
                    reference,
                    expiry_time,
                } => Token {
                    reference,
                    expiry_time,
                },
            })
        }
    }

    impl Serialize for Token {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.reference)
        }
    }
}
