//! Masking for safe display and logging of card numbers.
//!
//! Only the BIN (first 6) and the last 4 digits may ever be shown. Log lines
//! in this crate use [`mask_string`] so raw input never reaches a log sink.

use crate::card::{ValidatedCardNumber, BIN_LENGTH};
use crate::normalize::ascii_digit;

/// Masks a card showing only the last 4 digits.
///
/// Format: `****-****-****-5443`
///
/// # Example
///
/// ```
/// use persian_id::card_number::validate;
///
/// let card = validate("6037701689095443").unwrap();
/// assert_eq!(card.masked(), "****-****-****-5443");
/// ```
#[inline]
pub fn mask_card(card: &ValidatedCardNumber) -> String {
    mask_digits(card.digits())
}

/// Masks a card showing the BIN and the last 4 digits.
///
/// Format: `603770******5443`
///
/// # Example
///
/// ```
/// use persian_id::card_number::validate;
///
/// let card = validate("6037701689095443").unwrap();
/// assert_eq!(card.masked_with_bin(), "603770******5443");
/// ```
#[inline]
pub fn mask_with_bin(card: &ValidatedCardNumber) -> String {
    let digits = card.digits();
    let len = digits.len();

    let mut result = String::with_capacity(len);
    for &d in &digits[..BIN_LENGTH] {
        result.push((b'0' + d) as char);
    }
    for _ in 0..len - BIN_LENGTH - 4 {
        result.push('*');
    }
    for &d in &digits[len - 4..] {
        result.push((b'0' + d) as char);
    }
    result
}

/// Masks an unvalidated string.
///
/// Persian and Arabic digits are mapped to ASCII and everything else is
/// dropped before masking. Inputs of 4 digits or fewer are fully masked.
///
/// # Example
///
/// ```
/// use persian_id::mask::mask_string;
///
/// assert_eq!(mask_string("6037-7016-8909-5443"), "****-****-****-5443");
/// assert_eq!(mask_string("123"), "***");
/// ```
pub fn mask_string(input: &str) -> String {
    let digits: Vec<u8> = input
        .chars()
        .map(ascii_digit)
        .filter(|c| c.is_ascii_digit())
        .map(|c| (c as u8) - b'0')
        .collect();

    if digits.len() <= 4 {
        return "*".repeat(digits.len());
    }
    mask_digits(&digits)
}

fn mask_digits(digits: &[u8]) -> String {
    let len = digits.len();
    let masked_count = len.saturating_sub(4);

    let mut result = String::with_capacity(len + (len / 4));
    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count > 0 && masked_count % 4 == 0 {
        result.push('-');
    }

    for &d in &digits[masked_count..] {
        result.push((b'0' + d) as char);
    }
    result
}

/// Constant-time comparison of two byte slices.
///
/// Takes the same time regardless of where the slices differ, so comparing
/// card numbers does not leak a timing side channel.
///
/// # Example
///
/// ```
/// use persian_id::mask::constant_time_eq;
///
/// assert!(constant_time_eq(b"6037701689095443", b"6037701689095443"));
/// assert!(!constant_time_eq(b"6037701689095443", b"6037701689095444"));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saman() -> ValidatedCardNumber {
        ValidatedCardNumber::new([6, 2, 1, 9, 8, 6, 1, 0, 3, 4, 5, 2, 9, 0, 0, 7])
    }

    #[test]
    fn test_mask_card() {
        assert_eq!(mask_card(&saman()), "****-****-****-9007");
    }

    #[test]
    fn test_mask_with_bin() {
        assert_eq!(mask_with_bin(&saman()), "621986******9007");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("6219861034529007"), "****-****-****-9007");
        assert_eq!(mask_string("6219-8610-3452-9007"), "****-****-****-9007");
        assert_eq!(mask_string("۶۲۱۹ ۸۶۱۰ ۳۴۵۲ ۹۰۰۷"), "****-****-****-9007");
        assert_eq!(mask_string("12345"), "*2345");
        assert_eq!(mask_string("1234"), "****");
        assert_eq!(mask_string(""), "");
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(constant_time_eq(b"", b""));
    }
}
