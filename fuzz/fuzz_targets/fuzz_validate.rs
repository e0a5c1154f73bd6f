//! Fuzz target for card validation.
//!
//! Builds cards from arbitrary option values and checks that validation
//! never panics in either context.

#![no_main]

use arbitrary::Arbitrary;
use cc_card::{validate, Card, CardBrand, CardOptions, Context, Field, Token};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    holder_name: String,
    month: String,
    year: String,
    number: String,
    cvv: String,
    require_cvv: bool,
    brand: Option<u8>,
    token: Option<String>,
    new_number: Option<String>,
}

fuzz_target!(|input: Input| {
    let mut options = CardOptions::new()
        .holder_name(input.holder_name)
        .month(input.month)
        .year(input.year)
        .number(input.number)
        .cvv(input.cvv)
        .require_cvv(input.require_cvv);
    if let Some(i) = input.brand {
        options = options.brand(CardBrand::ALL[i as usize % CardBrand::ALL.len()]);
    }
    if let Some(token) = input.token {
        options = options.token(Token::new(token));
    }

    let card = Card::new(options);
    let card_errors = validate(Context::Card, &card);
    let token_errors = validate(Context::Token, &card);
    assert!(!card_errors.contains(Field::Token));
    assert!(token_errors.fields().iter().all(|f| *f == Field::Token));

    let _ = card.masked();
    let _ = format!("{:?}", card);
    let stored = card.with_token(Token::new("ref"));
    assert_eq!(stored.cvv(), "");
    let _ = validate(Context::Token, &stored);

    if let Some(number) = input.new_number {
        let _ = validate(Context::Card, &card.with_number(number));
    }
});
