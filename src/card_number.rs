//! Iranian bank card number validation and issuer lookup.
//!
//! A card number is exactly 16 digits. Persian and Arabic digits are
//! accepted, but nothing else is stripped: spaces, dashes and surrounding
//! whitespace are format errors. Use [`crate::format::strip_formatting`]
//! first when accepting grouped input.
//!
//! # Example
//!
//! ```
//! use persian_id::card_number;
//!
//! let card = card_number::validate("۶۰۳۷۷۰۱۶۸۹۰۹۵۴۴۳").unwrap();
//! assert_eq!(card.bin(), "603770");
//!
//! let bank = card_number::find_bank("6037701689095443").unwrap().unwrap();
//! assert_eq!(bank.id, "keshavarzi");
//! ```

use crate::card::{ValidatedCardNumber, BIN_LENGTH};
use crate::data::{self, Bank, Collection};
use crate::digits;
use crate::error::ValidationError;
use crate::luhn::{self, CARD_NUMBER_LENGTH};
use crate::mask::mask_string;
use crate::normalize::{is_blank, map_ascii_digits};
use tracing::debug;
use zeroize::Zeroize;

/// Maps Persian and Arabic digits to ASCII. Whitespace is kept.
///
/// # Example
///
/// ```
/// use persian_id::card_number::normalize;
///
/// assert_eq!(normalize("٦٢١٩٨٦١٠٣٤٥٢٩٠٠٧"), "6219861034529007");
/// assert_eq!(normalize(" 6219 "), " 6219 ");
/// ```
#[inline]
pub fn normalize(input: &str) -> String {
    map_ascii_digits(input)
}

/// Validates a card number.
///
/// Rules, in order:
/// 1. Blank input is [`ValidationError::Empty`]
/// 2. After digit normalization the input must be exactly 16 ASCII digits
/// 3. All-identical digits are rejected
/// 4. The positional doubling checksum must be divisible by 10
///
/// # Errors
///
/// Returns the first failing rule as a [`ValidationError`].
///
/// # Example
///
/// ```
/// use persian_id::card_number::validate;
/// use persian_id::ValidationError;
///
/// assert!(validate("6219861034529007").is_ok());
/// assert_eq!(validate("6219861034529008").unwrap_err(), ValidationError::InvalidChecksum);
/// assert_eq!(validate("0000000000000000").unwrap_err(), ValidationError::RepeatedDigits);
/// ```
pub fn validate(input: &str) -> Result<ValidatedCardNumber, ValidationError> {
    if is_blank(input) {
        return Err(ValidationError::Empty);
    }

    let mut normalized = normalize(input);
    let parsed = digits::parse_fixed::<CARD_NUMBER_LENGTH>(&normalized);
    normalized.zeroize();
    let mut digits = parsed?;

    let result = if digits.iter().all(|&d| d == digits[0]) {
        Err(ValidationError::RepeatedDigits)
    } else if !luhn::validate(&digits) {
        Err(ValidationError::InvalidChecksum)
    } else {
        Ok(ValidatedCardNumber::new(digits))
    };
    digits.zeroize();
    result
}

/// Returns true if the card number is valid.
///
/// Never fails; a rejection is logged at debug level with the input masked.
///
/// # Example
///
/// ```
/// use persian_id::card_number::is_valid;
///
/// assert!(is_valid("6274129005473742"));
/// assert!(!is_valid("6274129005473742 "));
/// assert!(!is_valid(""));
/// ```
pub fn is_valid(input: &str) -> bool {
    match validate(input) {
        Ok(_) => true,
        Err(e) => {
            debug!(card = %mask_string(input), error = %e, "card number rejected");
            false
        }
    }
}

/// Validates the card and returns its issuing bank from the bundled table.
///
/// `Ok(None)` means the card is valid but its BIN is not registered.
///
/// # Errors
///
/// Returns the same error [`validate`] would.
pub fn find_bank(input: &str) -> Result<Option<&'static Bank>, ValidationError> {
    find_bank_in(input, data::banks())
}

/// Like [`find_bank`], against a caller-supplied bank table.
pub fn find_bank_in<'a>(
    input: &str,
    banks: &'a Collection<Bank>,
) -> Result<Option<&'a Bank>, ValidationError> {
    let card = validate(input)?;
    let bin = card.bin();
    debug_assert_eq!(bin.len(), BIN_LENGTH);
    Ok(banks.find_by_bin(&bin))
}
