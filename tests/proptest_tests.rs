//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use cc_card::{
    detect::rules, detect_brand, luhn, mask, validate, Card, CardBrand, CardOptions, Context,
    ExpiryDate, Field, Token,
};
use chrono::{Local, TimeZone};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit vector of a length within range.
fn digits(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..=9, range)
}

/// Generates a random digit string of a length within range.
fn digit_string(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    digits(range).prop_map(|d| to_string(&d))
}

/// Generates a Luhn-valid number of 12-19 digits.
fn luhn_number() -> impl Strategy<Value = String> {
    digits(11..=18).prop_map(|mut d| {
        d.push(luhn::generate_check_digit(&d));
        to_string(&d)
    })
}

fn brand_strategy() -> impl Strategy<Value = CardBrand> {
    proptest::sample::select(CardBrand::ALL.to_vec())
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

// =============================================================================
// LUHN PROPERTIES
// =============================================================================

proptest! {
    /// Appending the generated check digit always yields a passing number.
    #[test]
    fn check_digit_makes_number_valid(mut d in digits(1..=30)) {
        d.push(luhn::generate_check_digit(&d));
        prop_assert!(luhn::validate(&d));
    }

    /// Changing any single digit of a valid number breaks the checksum.
    #[test]
    fn single_digit_change_is_detected(number in luhn_number(), pos in any::<prop::sample::Index>(), delta in 1u8..=9) {
        let mut d: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
        let i = pos.index(d.len());
        d[i] = (d[i] + delta) % 10;
        prop_assert!(!luhn::validate(&d));
    }

    /// The string and digit forms agree on digit-only input.
    #[test]
    fn passes_matches_validate(d in digits(1..=25)) {
        prop_assert_eq!(luhn::passes(&to_string(&d)), luhn::validate(&d));
    }

    /// Any non-digit character makes the string form fail.
    #[test]
    fn non_digit_never_passes(number in luhn_number(), pos in any::<prop::sample::Index>(), c in "[^0-9]") {
        let mut s = number;
        s.insert_str(pos.index(s.len()), &c);
        prop_assert!(!luhn::passes(&s));
    }
}

// =============================================================================
// DETECTION PROPERTIES
// =============================================================================

proptest! {
    /// Detection is a pure function of the number.
    #[test]
    fn detection_is_deterministic(number in digit_string(0..=22)) {
        prop_assert_eq!(detect_brand(&number), detect_brand(&number));
    }

    /// The detected brand is the first rule in table order that matches.
    #[test]
    fn detection_is_first_match(number in digit_string(10..=20)) {
        let first = rules().iter().find(|rule| rule.matches(&number)).map(|rule| rule.brand());
        prop_assert_eq!(detect_brand(&number), first);
    }

    /// No brand accepts a number outside 12-19 digits.
    #[test]
    fn detection_respects_length_bounds(number in prop_oneof![digit_string(0..=11), digit_string(20..=30)]) {
        prop_assert_eq!(detect_brand(&number), None);
    }

    /// Visa numbers of the three accepted lengths are always detected as Visa.
    #[test]
    fn visa_prefix_detected(rest in prop_oneof![digit_string(12..=12), digit_string(15..=15), digit_string(18..=18)]) {
        prop_assert_eq!(detect_brand(&format!("4{}", rest)), Some(CardBrand::Visa));
    }

    /// American Express numbers are always detected.
    #[test]
    fn amex_prefix_detected(second in prop_oneof![Just('4'), Just('7')], rest in digit_string(13..=13)) {
        prop_assert_eq!(detect_brand(&format!("3{}{}", second, rest)), Some(CardBrand::AmericanExpress));
    }
}

// =============================================================================
// CARD PROPERTIES
// =============================================================================

proptest! {
    /// Every `with_*` transformation leaves the source card untouched.
    #[test]
    fn transformations_do_not_mutate(
        number in luhn_number(),
        other in luhn_number(),
        name in "[a-z ]{0,20}",
        cvv in "[0-9]{0,5}",
        brand in brand_strategy(),
    ) {
        let card = Card::new(CardOptions::new().number(number.clone()).cvv("123").holder_name("John"));
        let snapshot = card.clone();

        let _ = card.with_number(other);
        let _ = card.with_holder_name(&name);
        let _ = card.with_cvv(cvv);
        let _ = card.with_brand(brand);
        let _ = card.with_require_cvv(false);
        let _ = card.with_expiry_date(ExpiryDate::new(12, 2099));
        let _ = card.with_token(Token::new("ref"));

        prop_assert_eq!(&card, &snapshot);
        prop_assert_eq!(card.number(), number.as_str());
    }

    /// The BIN is always the first six characters of the number.
    #[test]
    fn bin_is_number_prefix(number in digit_string(0..=19)) {
        let card = Card::new(CardOptions::new().number(number.clone()));
        let expected: String = number.chars().take(6).collect();
        prop_assert_eq!(card.bin(), expected.as_str());
        let renumbered = card.with_number(number.clone());
        prop_assert_eq!(renumbered.bin(), expected.as_str());
    }

    /// A tokenized card keeps only the last four characters of the number.
    #[test]
    fn token_masking_keeps_last_four(number in digit_string(4..=19), reference in "[a-z0-9]{1,16}") {
        let stored = Card::new(CardOptions::new().number(number.clone()).cvv("123"))
            .with_token(Token::new(reference.clone()));

        let tail = &number[number.len() - 4..];
        prop_assert_eq!(stored.number().to_string(), format!("{}{}", mask::TOKEN_MASK_PREFIX, tail));
        prop_assert_eq!(stored.cvv(), "");
        prop_assert_eq!(stored.token().map(|t| t.reference().to_string()), Some(reference));
    }

    /// Display masking never reveals more than the last four digits.
    #[test]
    fn display_mask_hides_prefix(number in digit_string(5..=19)) {
        let masked = mask::mask_display(&number);
        let visible: String = masked.chars().filter(char::is_ascii_digit).collect();
        prop_assert_eq!(visible.as_str(), &number[number.len() - 4..]);
    }

    /// Holder names are always stored uppercased.
    #[test]
    fn holder_name_uppercased(name in "\\PC{0,30}") {
        let card = Card::new(CardOptions::new().holder_name(name.clone()));
        let upper = name.to_uppercase();
        prop_assert_eq!(card.holder_name(), upper.as_str());
    }
}

// =============================================================================
// EXPIRY PROPERTIES
// =============================================================================

proptest! {
    /// Short years are padded into the 2000s.
    #[test]
    fn two_digit_years_padded(year in 10u16..=99) {
        prop_assert_eq!(ExpiryDate::new(1, year).year(), 2000 + year);
    }

    /// Expiration is the last second of the expiry month.
    #[test]
    fn expiration_is_end_of_month(month in 1u8..=12, year in 2000u16..=2100) {
        let expiry = ExpiryDate::new(month, year);
        let end = expiry.expiration();
        prop_assert!(!expiry.is_expired_at(end));
        prop_assert!(expiry.is_expired_at(end + chrono::Duration::seconds(1)));
    }

    /// Parsing text gives the same date as the numeric constructor.
    #[test]
    fn parse_matches_new(month in 0u8..=20, year in 1000u16..=9999) {
        prop_assert_eq!(
            ExpiryDate::parse(&month.to_string(), &format!(" {} ", year)),
            ExpiryDate::new(month, year)
        );
    }
}

// =============================================================================
// VALIDATOR PROPERTIES
// =============================================================================

proptest! {
    /// Validation never panics on arbitrary text and reports only known fields.
    #[test]
    fn validator_never_panics(
        number in "\\PC{0,25}",
        month in "\\PC{0,4}",
        year in "\\PC{0,6}",
        cvv in "\\PC{0,6}",
        name in "\\PC{0,10}",
        token in proptest::option::of("\\PC{0,10}"),
    ) {
        let mut options = CardOptions::new()
            .number(number)
            .month(month)
            .year(year)
            .cvv(cvv)
            .holder_name(name);
        if let Some(token) = token {
            options = options.token(token);
        }
        let card = Card::new(options);

        let card_errors = validate(Context::Card, &card);
        prop_assert!(!card_errors.contains(Field::Token));
        prop_assert!(card_errors.len() <= 6);

        let token_errors = validate(Context::Token, &card);
        prop_assert!(token_errors.fields().iter().all(|f| *f == Field::Token));
    }

    /// A complete card with a Luhn-valid detected number passes.
    #[test]
    fn complete_card_passes(number in luhn_number()) {
        let card = Card::new(
            CardOptions::new()
                .number(number)
                .month(12)
                .year(2099)
                .cvv("123")
                .holder_name("John Doe"),
        );
        let errors = validate(Context::Card, &card);
        match card.brand() {
            None => prop_assert_eq!(errors.fields(), vec![Field::Brand]),
            Some(CardBrand::AmericanExpress) => prop_assert_eq!(errors.fields(), vec![Field::Cvv]),
            Some(_) => prop_assert!(errors.is_empty(), "{}", errors),
        }
    }

    /// A token with a future expiry is accepted, a past one is not.
    #[test]
    fn token_expiry_respected(offset in 1i64..=1_000_000) {
        let now = Local.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
        let future = Token::with_expiry("ref", now + chrono::Duration::seconds(offset));
        let past = Token::with_expiry("ref", now - chrono::Duration::seconds(offset));

        prop_assert!(!future.is_expired_at(now));
        prop_assert!(past.is_expired_at(now));
    }
}
