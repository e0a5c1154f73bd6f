//! Luhn algorithm implementation for card number checksums.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to catch transcription errors in card numbers and other
//! identification numbers.
//!
//! # Performance
//!
//! This implementation uses a lookup table for the doubling operation,
//! making it O(n) with minimal overhead.

/// Lookup table for the combined digit transform.
///
/// The first ten entries are the identity map used for positions kept as-is,
/// the second ten are the doubled-and-digit-summed values used for every
/// second position counted from the right.
const LUHN_TABLE: [u8; 20] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a card number using the Luhn algorithm.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9) representing the card number.
///
/// # Returns
///
/// `true` if the checksum is valid, `false` otherwise.
///
/// # Algorithm
///
/// 1. Starting from the rightmost digit (check digit), moving left
/// 2. Double every second digit
/// 3. If doubling results in a number > 9, subtract 9
/// 4. Sum all digits
/// 5. If the sum is divisible by 10, the number is valid
///
/// # Example
///
/// ```
/// use cc_card::luhn::validate;
///
/// // Valid Visa test card
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// // Invalid card (changed last digit)
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Checks a digit string with the Luhn algorithm.
///
/// Any character other than an ASCII digit fails the check, so masked
/// numbers such as `XXXX-XXXX-XXXX-1111` never pass.
///
/// ```
/// use cc_card::luhn::passes;
///
/// assert!(passes("4532875311640795"));
/// assert!(!passes("41111111111111"));
/// assert!(!passes("XXXX-XXXX-XXXX-0795"));
/// ```
pub fn passes(number: &str) -> bool {
    let mut digits = Vec::with_capacity(number.len());
    for b in number.bytes() {
        if !b.is_ascii_digit() {
            return false;
        }
        digits.push(b - b'0');
    }
    validate(&digits)
}

/// Computes the Luhn sum for a sequence of digits.
///
/// # Arguments
///
/// * `digits` - A slice of digits (0-9).
///
/// # Returns
///
/// The Luhn sum (not modulo 10).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| LUHN_TABLE[d as usize % 10 + (i & 1) * 10] as u32)
        .sum()
}

/// Generates the check digit for a partial card number.
///
/// Given digits without the check digit, computes what the check digit
/// should be for the number to pass Luhn validation.
///
/// # Example
///
/// ```
/// use cc_card::luhn::generate_check_digit;
///
/// // Visa test card without check digit
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit shifts one position left once the check digit is
    // appended, so the parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| LUHN_TABLE[d as usize % 10 + ((i + 1) & 1) * 10] as u32)
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
