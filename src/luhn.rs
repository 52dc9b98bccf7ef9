//! Luhn checksum for 16-digit Iranian bank card numbers.
//!
//! Positions are counted from the left. Every odd 1-indexed position
//! (indices 0, 2, ..., 14) is doubled, and a doubled value above 9 has 9
//! subtracted. The number is valid when the sum of all sixteen contributions
//! is divisible by 10.
//!
//! For a 16-digit number this is the classic right-to-left Luhn check.

/// Card numbers issued in Iran (Shetab network) are always 16 digits.
pub const CARD_NUMBER_LENGTH: usize = 16;

/// Lookup table for doubled digits: double the value, subtract 9 if > 9.
/// Index is the digit (0-9), value is the contribution to the sum.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Returns the contribution of `digit` at 0-indexed `position`.
#[inline]
const fn contribution(position: usize, digit: u8) -> u32 {
    if position % 2 == 0 {
        DOUBLE_TABLE[digit as usize] as u32
    } else {
        digit as u32
    }
}

/// Computes the weighted sum of a 16-digit card number.
///
/// # Example
///
/// ```
/// use persian_id::luhn::checksum;
///
/// let digits = [6, 0, 3, 7, 7, 0, 1, 6, 8, 9, 0, 9, 5, 4, 4, 3];
/// assert_eq!(checksum(&digits) % 10, 0);
/// ```
#[inline]
pub fn checksum(digits: &[u8; CARD_NUMBER_LENGTH]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| contribution(position, digit))
        .sum()
}

/// Returns true if the 16 digits pass the checksum.
#[inline]
pub fn validate(digits: &[u8; CARD_NUMBER_LENGTH]) -> bool {
    checksum(digits) % 10 == 0
}

/// Computes the final digit that completes the first 15 digits of a card.
///
/// # Example
///
/// ```
/// use persian_id::luhn::check_digit;
///
/// let partial = [6, 2, 1, 9, 8, 6, 1, 0, 3, 4, 5, 2, 9, 0, 0];
/// assert_eq!(check_digit(&partial), 7);
/// ```
#[inline]
pub fn check_digit(digits: &[u8; CARD_NUMBER_LENGTH - 1]) -> u8 {
    // The missing digit sits at index 15, which is never doubled.
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| contribution(position, digit))
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const KESHAVARZI: [u8; 16] = [6, 0, 3, 7, 7, 0, 1, 6, 8, 9, 0, 9, 5, 4, 4, 3];
    const SAMAN: [u8; 16] = [6, 2, 1, 9, 8, 6, 1, 0, 3, 4, 5, 2, 9, 0, 0, 7];
    const EGHTESAD_NOVIN: [u8; 16] = [6, 2, 7, 4, 1, 2, 9, 0, 0, 5, 4, 7, 3, 7, 4, 2];

    #[test]
    fn test_valid_cards() {
        assert!(validate(&KESHAVARZI));
        assert!(validate(&SAMAN));
        assert!(validate(&EGHTESAD_NOVIN));
    }

    #[test]
    fn test_invalid_cards() {
        // Changed last digit
        assert!(!validate(&[6, 2, 1, 9, 8, 6, 1, 0, 3, 4, 5, 2, 9, 0, 0, 8]));

        // Changed prefix
        assert!(!validate(&[9, 9, 9, 9, 9, 9, 1, 0, 3, 4, 5, 2, 9, 0, 0, 7]));

        assert!(!validate(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_checksum_value() {
        assert_eq!(checksum(&[0; 16]), 0);
        // 8 doubled ones contribute 2 each, 8 plain ones contribute 1 each
        assert_eq!(checksum(&[1; 16]), 24);
    }

    #[test]
    fn test_check_digit() {
        for card in [KESHAVARZI, SAMAN, EGHTESAD_NOVIN] {
            let mut partial = [0u8; 15];
            partial.copy_from_slice(&card[..15]);
            assert_eq!(check_digit(&partial), card[15]);
        }
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
