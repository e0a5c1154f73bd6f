//! Card number masking.
//!
//! Two kinds of masking are used:
//!
//! - Token masking replaces a stored number with `XXXX-XXXX-XXXX-` and the
//!   last four characters once a [`Token`](crate::Token) is attached. The
//!   result becomes the card's number.
//! - Display masking hides everything but the last four digits for `Debug`
//!   output and logs. It never changes the card.
//!
//! Never display or log the full card number.

/// Prefix applied to the last four characters of a tokenized number.
pub const TOKEN_MASK_PREFIX: &str = "XXXX-XXXX-XXXX-";

/// Returns the last four characters of `number`, or all of it when shorter.
///
/// ```
/// use cc_card::mask::last_four;
///
/// assert_eq!(last_four("4532875311640795"), "0795");
/// assert_eq!(last_four("123"), "123");
/// ```
pub fn last_four(number: &str) -> &str {
    match number.char_indices().rev().nth(3) {
        Some((idx, _)) => &number[idx..],
        None => number,
    }
}

/// Masks a number for storage alongside a token.
///
/// ```
/// use cc_card::mask::mask_for_token;
///
/// assert_eq!(mask_for_token("4532875311640795"), "XXXX-XXXX-XXXX-0795");
/// assert_eq!(mask_for_token("1234"), "XXXX-XXXX-XXXX-1234");
/// ```
pub fn mask_for_token(number: &str) -> String {
    let tail = last_four(number);
    let mut masked = String::with_capacity(TOKEN_MASK_PREFIX.len() + tail.len());
    masked.push_str(TOKEN_MASK_PREFIX);
    masked.push_str(tail);
    masked
}

/// Returns true if `number` has already been masked for a token.
#[inline]
pub fn is_token_masked(number: &str) -> bool {
    number.starts_with(TOKEN_MASK_PREFIX)
}

/// Masks a number for display, keeping only the last four digits.
///
/// Plain digit strings are grouped in fours: `****-****-****-1234`. Any
/// other input keeps its non-digit characters and hides every digit before
/// the last four characters. Inputs of four characters or fewer are hidden
/// completely.
///
/// ```
/// use cc_card::mask::mask_display;
///
/// assert_eq!(mask_display("4111111111111111"), "****-****-****-1111");
/// assert_eq!(mask_display("XXXX-XXXX-XXXX-1111"), "XXXX-XXXX-XXXX-1111");
/// assert_eq!(mask_display("123"), "***");
/// ```
pub fn mask_display(number: &str) -> String {
    let len = number.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }

    let hidden = len - 4;
    let tail = last_four(number);

    if !number.bytes().all(|b| b.is_ascii_digit()) {
        let mut result: String = number
            .chars()
            .take(hidden)
            .map(|c| if c.is_ascii_digit() { '*' } else { c })
            .collect();
        result.push_str(tail);
        return result;
    }

    // Groups of four counted from the right, so only the first group is short
    let mut result = String::with_capacity(len + len / 4);
    for i in 0..hidden {
        if i > 0 && (len - i) % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }
    result.push('-');
    result.push_str(tail);
    result
}
