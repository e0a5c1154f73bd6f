//! # cc_card
//!
//! Immutable payment card value objects with local plausibility checks.
//! Nothing here talks to a payment gateway; the checks are meant to run
//! before one is called.
//!
//! ## Features
//!
//! - Card brand detection from an ordered table of number patterns (14 brands)
//! - Luhn checksum
//! - Expiry dates with end-of-month expiration
//! - Stored-card tokens with optional expiry
//! - Immutable [`Card`] with `with_*` transformations
//! - Field-keyed validation reports for full cards or tokens
//!
//! ## Quick Start
//!
//! ```rust
//! use cc_card::{Card, CardBrand, CardOptions, Context, Field, Validator};
//!
//! let card = Card::new(
//!     CardOptions::new()
//!         .holder_name("John Doe")
//!         .month(1)
//!         .year(2099)
//!         .number("4532875311640795")
//!         .cvv("123"),
//! );
//! assert_eq!(card.brand(), Some(CardBrand::Visa));
//! assert_eq!(card.bin(), "453287");
//!
//! let validator = Validator::new(Context::Card);
//! assert!(validator.validate(&card).is_empty());
//!
//! let errors = validator.validate(&card.with_cvv("12"));
//! assert!(errors.contains(Field::Cvv));
//! ```
//!
//! ## Tokens
//!
//! ```rust
//! use cc_card::{Card, CardOptions, Context, Token, validate};
//!
//! let card = Card::new(CardOptions::new().number("4532875311640795").cvv("123"));
//! let stored = card.with_token(Token::new("0123456789"));
//!
//! // The number is masked and the CVV dropped
//! assert_eq!(stored.number(), "XXXX-XXXX-XXXX-0795");
//! assert_eq!(stored.cvv(), "");
//!
//! assert!(validate(Context::Token, &stored).is_empty());
//! ```
//!
//! ## Supported Card Brands
//!
//! Detection order, first match wins:
//!
//! | Brand | Code | Prefix | Length |
//! |-------|------|--------|--------|
//! | Visa | `visa` | 4 | 13, 16, 19 |
//! | Mastercard | `master` | 51-55, 677189, 2221-2720 | 16 |
//! | Discover | `discover` | 6011, 65, 644-649, 622126-622925 | 16 |
//! | UnionPay | `unionpay` | 62 | 16-19 |
//! | American Express | `american_express` | 34, 37 | 15 |
//! | Diners Club | `diners_club` | 300-305, 309, 36, 38, 39, 2014, 2149 | 14, 15 |
//! | JCB | `jcb` | 3528-3589 | 16 |
//! | Mir | `mir` | 2200-2204 | 16-19 |
//! | Dankort | `dankort` | 5019 | 16 |
//! | Forbrugsforeningen | `forbrugsforeningen` | 600722 | 16 |
//! | Laser | `laser` | 6706, 6709, 6771 | 12, 16, 18, 19 |
//! | Switch | `switch` | 6759 | 16, 18, 19 |
//! | Solo | `solo` | 6767 | 16, 18, 19 |
//! | Maestro | `maestro` | 5018, 5020, 5038, 5612, 5892, 5893, 6304, 6759, 6761-6763, 0604, 6390 | 12-19 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `CardOptions::from_json`, serde support for brands, tokens and reports |
//! | `cli` | `cardcheck` command-line tool |
//!
//! ## Security
//!
//! - `Debug` on [`Card`] shows a masked number and hides the CVV
//! - Number and CVV buffers are zeroed when a [`Card`] is dropped
//! - Logs (via `tracing`) only ever carry masked numbers
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod luhn;
pub mod mask;
pub mod options;
pub mod token;
pub mod validate;

// Re-export main types at crate root
pub use card::{Card, CardBrand, BIN_LENGTH, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use detect::detect_brand;
pub use error::{ConfigError, RuleViolation};
pub use expiry::ExpiryDate;
pub use options::CardOptions;
pub use token::Token;
pub use validate::{validate, Context, Field, ValidationErrors, Validator};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Local};

    fn next_year() -> i32 {
        Local::now().year() + 1
    }

    fn last_year() -> i32 {
        Local::now().year() - 1
    }

    #[test]
    fn test_visa_card_is_valid() {
        let card = Card::new(
            CardOptions::new()
                .number("4532875311640795")
                .month("1")
                .year(next_year())
                .cvv("123")
                .holder_name("John Doe"),
        );
        assert_eq!(card.brand(), Some(CardBrand::Visa));
        assert!(validate(Context::Card, &card).is_empty());
    }

    #[test]
    fn test_missing_cvv() {
        let card = Card::new(
            CardOptions::new()
                .number("4735930212834206")
                .month("1")
                .year(next_year())
                .holder_name("John Doe"),
        );
        assert!(validate(Context::Card, &card).contains(Field::Cvv));
    }

    #[test]
    fn test_amex_needs_four_digit_cvv() {
        let options = CardOptions::new()
            .holder_name("John Doe")
            .month(1)
            .year(next_year())
            .brand(CardBrand::AmericanExpress)
            .number("341419371821943");

        let card = Card::new(options.clone().cvv("123"));
        assert!(validate(Context::Card, &card).contains(Field::Cvv));

        let card = Card::new(options.cvv("1234"));
        assert!(validate(Context::Card, &card).is_empty());
    }

    #[test]
    fn test_expired_card() {
        let card = Card::new(
            CardOptions::new()
                .holder_name("John Doe")
                .number("4532287586041099")
                .month("1")
                .year(last_year())
                .cvv("123"),
        );
        let errors = validate(Context::Card, &card);
        assert_eq!(errors.fields(), vec![Field::Date]);
    }

    #[test]
    fn test_bad_month_and_checksum() {
        let card = Card::new(
            CardOptions::new()
                .number("41111111111111")
                .month("13")
                .year(next_year())
                .cvv("123")
                .holder_name("John Doe"),
        );
        let errors = validate(Context::Card, &card);
        assert!(errors.contains(Field::Month));
        // 14 digits is in range but the checksum fails
        assert!(errors.contains(Field::Number));
    }

    #[test]
    fn test_token_scenarios() {
        let card = Card::new(CardOptions::new());
        assert!(validate(Context::Token, &card).contains(Field::Token));

        let expired = Token::with_expiry("0123456789", Local::now() - Duration::minutes(15));
        let card = Card::new(CardOptions::new().token(expired));
        assert!(validate(Context::Token, &card).contains(Field::Token));

        let card = Card::new(CardOptions::new().token("0123456789"));
        assert!(validate(Context::Token, &card).is_empty());
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Card>();
        assert_send_sync::<Token>();
        assert_send_sync::<ExpiryDate>();
        assert_send_sync::<Validator>();
        assert_send_sync::<ValidationErrors>();
        assert_send_sync::<ConfigError>();
    }
}
