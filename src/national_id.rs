//! Iranian national identity number (کد ملی) validation and parsing.
//!
//! A national ID is 10 digits: a 3-digit hometown code, a 6-digit personal
//! code and a control digit. Inputs of 8 or 9 digits are left-padded with
//! zeros, since leading zeros are routinely dropped when IDs pass through
//! spreadsheets and numeric fields.
//!
//! # Checksum
//!
//! For the first nine digits, `sum = Σ digit[i] * (10 - i)` and
//! `r = sum % 11`. The control digit must equal `r` when `r < 2`, and
//! `11 - r` otherwise.
//!
//! # Example
//!
//! ```
//! use persian_id::national_id;
//!
//! assert!(national_id::is_valid("۲۷۹۱۵۶۷۸۹۵"));
//!
//! let id = national_id::parse("2791567895").unwrap();
//! assert_eq!(id.hometown_code(), "279");
//! assert_eq!(id.personal_code(), "156789");
//! assert_eq!(id.control_digit(), 5);
//! assert_eq!(id.hometowns()[0].city, "خوی");
//! ```

use crate::data::{self, Collection, Hometown};
use crate::digits::{self, digit_at};
use crate::error::{ParseError, ValidationError};
use crate::normalize::{is_blank, to_ascii_digits};
use serde::Serialize;
use tracing::debug;

/// Length of a canonical national ID.
pub const NATIONAL_ID_LENGTH: usize = 10;

/// Shortest accepted input; anything shorter needs more than two zeros of
/// padding.
pub const MIN_INPUT_LENGTH: usize = 8;

/// Length of the hometown prefix.
pub const HOMETOWN_CODE_LENGTH: usize = 3;

/// Sequential values that pass the checksum but are never issued.
pub const BLACKLIST: [&str; 2] = ["0123456789", "1234567890"];

/// Computes the control digit for the first nine digits of a national ID.
///
/// # Example
///
/// ```
/// use persian_id::national_id::control_digit;
///
/// assert_eq!(control_digit(&[2, 7, 9, 1, 5, 6, 7, 8, 9]), 5);
/// assert_eq!(control_digit(&[1, 1, 1, 1, 1, 1, 1, 1, 1]), 1);
/// ```
pub fn control_digit(digits: &[u8; NATIONAL_ID_LENGTH - 1]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d as u32 * (NATIONAL_ID_LENGTH - i) as u32)
        .sum();
    let remainder = (sum % 11) as u8;
    if remainder < 2 {
        remainder
    } else {
        11 - remainder
    }
}

/// Normalizes a national ID to its canonical 10-digit form.
///
/// Trims, maps Persian and Arabic digits to ASCII, then left-pads 8 and 9
/// digit inputs with zeros.
///
/// # Errors
///
/// - [`ValidationError::Empty`] for blank input
/// - [`ValidationError::InvalidLength`] for fewer than 8 or more than 10 characters
/// - [`ValidationError::InvalidCharacter`] for anything but digits
/// - [`ValidationError::RepeatedDigits`] for ten identical digits other than `1111111111`
///
/// # Example
///
/// ```
/// use persian_id::national_id::normalize;
///
/// assert_eq!(normalize(" ۶۸۴۱۵۹۴۱ ").unwrap(), "0068415941");
/// assert_eq!(normalize("1111111111").unwrap(), "1111111111");
/// assert!(normalize("2222222222").is_err());
/// ```
pub fn normalize(input: &str) -> Result<String, ValidationError> {
    if is_blank(input) {
        return Err(ValidationError::Empty);
    }

    let ascii = to_ascii_digits(input);
    let length = ascii.chars().count();
    if !(MIN_INPUT_LENGTH..=NATIONAL_ID_LENGTH).contains(&length) {
        return Err(ValidationError::InvalidLength {
            length,
            minimum: MIN_INPUT_LENGTH,
            maximum: NATIONAL_ID_LENGTH,
        });
    }

    // Positions index the trimmed input, not the padded form.
    if let Some((position, character)) = ascii
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidCharacter {
            position,
            character,
        });
    }

    let padded = format!("{:0>width$}", ascii, width = NATIONAL_ID_LENGTH);
    let digits = digits::parse_fixed::<NATIONAL_ID_LENGTH>(&padded)?;

    // Ten ones is a real, issued number.
    if digits[0] != 1 && digits.iter().all(|&d| d == digits[0]) {
        return Err(ValidationError::RepeatedDigits);
    }

    Ok(padded)
}

/// Validates a national ID and returns its canonical 10-digit form.
///
/// # Errors
///
/// Any [`normalize`] error, then [`ValidationError::Blacklisted`] or
/// [`ValidationError::InvalidChecksum`].
///
/// # Example
///
/// ```
/// use persian_id::national_id::validate;
/// use persian_id::ValidationError;
///
/// assert_eq!(validate("0499370899").unwrap(), "0499370899");
/// assert_eq!(validate("1234567890").unwrap_err(), ValidationError::Blacklisted);
/// assert_eq!(validate("6104038932").unwrap_err(), ValidationError::InvalidChecksum);
/// ```
pub fn validate(input: &str) -> Result<String, ValidationError> {
    let id = normalize(input)?;

    if BLACKLIST.contains(&id.as_str()) {
        return Err(ValidationError::Blacklisted);
    }

    let mut sum = 0u32;
    for position in 0..NATIONAL_ID_LENGTH - 1 {
        sum += digit_at(&id, position)? as u32 * (NATIONAL_ID_LENGTH - position) as u32;
    }
    let remainder = sum % 11;
    let control = digit_at(&id, NATIONAL_ID_LENGTH - 1)? as u32;

    let matches = if remainder < 2 {
        control == remainder
    } else {
        remainder + control == 11
    };
    if !matches {
        return Err(ValidationError::InvalidChecksum);
    }

    Ok(id)
}

/// Returns true if the national ID is valid.
///
/// Never fails; a rejection is logged at debug level.
pub fn is_valid(input: &str) -> bool {
    match validate(input) {
        Ok(_) => true,
        Err(e) => {
            debug!(error = %e, "national ID rejected");
            false
        }
    }
}

/// Validates the ID and returns every bundled hometown registered under its
/// prefix, in dataset order.
///
/// An empty result is not an error here; only [`parse`] treats it as one.
///
/// # Errors
///
/// Returns the same error [`validate`] would.
pub fn find_hometown(input: &str) -> Result<Vec<&'static Hometown>, ValidationError> {
    find_hometown_in(input, data::hometowns())
}

/// Like [`find_hometown`], against a caller-supplied hometown table.
pub fn find_hometown_in<'a>(
    input: &str,
    hometowns: &'a Collection<Hometown>,
) -> Result<Vec<&'a Hometown>, ValidationError> {
    let id = validate(input)?;
    Ok(hometowns.find_all_by_code(&id[..HOMETOWN_CODE_LENGTH]))
}

/// Validates and splits a national ID, resolving its hometowns from the
/// bundled table.
///
/// # Errors
///
/// [`ParseError::Invalid`] if validation fails, or
/// [`ParseError::HometownNotFound`] if no hometown owns the prefix.
pub fn parse(input: &str) -> Result<NationalId, ParseError> {
    parse_in(input, data::hometowns())
}

/// Like [`parse`], against a caller-supplied hometown table.
pub fn parse_in(input: &str, hometowns: &Collection<Hometown>) -> Result<NationalId, ParseError> {
    let id = validate(input)?;
    let found = hometowns.find_all_by_code(&id[..HOMETOWN_CODE_LENGTH]);
    if found.is_empty() {
        return Err(ParseError::HometownNotFound { national_id: id });
    }

    let control_digit = digit_at(&id, NATIONAL_ID_LENGTH - 1)?;
    Ok(NationalId {
        hometown_code: id[..HOMETOWN_CODE_LENGTH].to_string(),
        personal_code: id[HOMETOWN_CODE_LENGTH..NATIONAL_ID_LENGTH - 1].to_string(),
        control_digit,
        hometowns: found.into_iter().cloned().collect(),
        id,
    })
}

/// A parsed national ID.
///
/// Only produced by [`parse`], so `hometowns` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalId {
    id: String,
    hometown_code: String,
    personal_code: String,
    control_digit: u8,
    hometowns: Vec<Hometown>,
}

impl NationalId {
    /// The canonical 10-digit ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Digits 1 to 3.
    pub fn hometown_code(&self) -> &str {
        &self.hometown_code
    }

    /// Digits 4 to 9.
    pub fn personal_code(&self) -> &str {
        &self.personal_code
    }

    /// The 10th digit.
    pub fn control_digit(&self) -> u8 {
        self.control_digit
    }

    /// Every hometown registered under [`NationalId::hometown_code`].
    pub fn hometowns(&self) -> &[Hometown] {
        &self.hometowns
    }
}
