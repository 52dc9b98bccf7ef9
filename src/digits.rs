//! Digit extraction from normalized numeric strings.
//!
//! Both checksums read their input one position at a time through
//! [`digit_at`]. Callers normalize first; nothing here trims or maps
//! non-ASCII digits.

use crate::error::ValidationError;

/// Returns true if the input is non-empty and made of ASCII digits only.
#[inline]
pub fn is_numeric(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the value of the digit at `index`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidNumber`] if `input` is not made entirely
/// of ASCII digits or if `index` is past the end of the string.
///
/// # Example
///
/// ```
/// use persian_id::digits::digit_at;
///
/// assert_eq!(digit_at("6104038932", 9).unwrap(), 2);
/// assert!(digit_at("523", 6).is_err());
/// assert!(digit_at("test", 1).is_err());
/// ```
#[inline]
pub fn digit_at(input: &str, index: usize) -> Result<u8, ValidationError> {
    if !is_numeric(input) || index >= input.len() {
        return Err(ValidationError::InvalidNumber { index });
    }
    Ok(input.as_bytes()[index] - b'0')
}

/// Reads exactly `N` ASCII digits into a fixed array.
///
/// Reports the first non-digit with its position, so callers get the same
/// detail the format check would give.
pub(crate) fn parse_fixed<const N: usize>(input: &str) -> Result<[u8; N], ValidationError> {
    let length = input.chars().count();
    if length != N {
        return Err(ValidationError::InvalidLength {
            length,
            minimum: N,
            maximum: N,
        });
    }

    let mut digits = [0u8; N];
    for (position, c) in input.chars().enumerate() {
        match c {
            '0'..='9' => digits[position] = (c as u8) - b'0',
            _ => {
                return Err(ValidationError::InvalidCharacter {
                    position,
                    character: c,
                })
            }
        }
    }
    Ok(digits)
}

/// Renders a digit slice back to an ASCII string.
#[inline]
pub(crate) fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}
