//! Validated card number value.
//!
//! [`ValidatedCardNumber`] is only produced by a successful
//! [`crate::card_number::validate`] and holds the card securely: digits live
//! in a fixed-size array that is wiped on drop, and every formatting trait
//! shows a masked number.

use crate::digits;
use crate::luhn::CARD_NUMBER_LENGTH;
use std::fmt;
use zeroize::Zeroize;

/// Number of leading digits forming the BIN.
pub const BIN_LENGTH: usize = 6;

/// A card number that passed format and checksum validation.
///
/// # Security
///
/// - Full number is only reachable through [`ValidatedCardNumber::number`]
/// - Memory is zeroed on drop using the `zeroize` crate
/// - `Debug` and `Display` are masked
#[derive(Clone)]
pub struct ValidatedCardNumber {
    digits: [u8; CARD_NUMBER_LENGTH],
}

impl ValidatedCardNumber {
    /// Wraps digits that already passed validation.
    #[inline]
    pub(crate) fn new(digits: [u8; CARD_NUMBER_LENGTH]) -> Self {
        Self { digits }
    }

    /// Returns the 6-digit BIN identifying the issuing bank.
    #[inline]
    pub fn bin(&self) -> String {
        digits::to_string(&self.digits[..BIN_LENGTH])
    }

    /// Returns the last four digits.
    #[inline]
    pub fn last_four(&self) -> String {
        digits::to_string(&self.digits[CARD_NUMBER_LENGTH - 4..])
    }

    /// Returns the full card number.
    ///
    /// # Security Warning
    ///
    /// Never log the result. Use [`ValidatedCardNumber::masked`] for display.
    #[inline]
    pub fn number(&self) -> String {
        digits::to_string(&self.digits)
    }

    /// Returns the number masked except for the last four digits.
    ///
    /// Format: `****-****-****-5443`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    /// Returns the number with the BIN and last four digits visible.
    ///
    /// Format: `603770******5443`.
    #[inline]
    pub fn masked_with_bin(&self) -> String {
        crate::mask::mask_with_bin(self)
    }

    /// Returns the full number grouped as `XXXX XXXX XXXX XXXX`.
    #[inline]
    pub fn formatted(&self) -> String {
        crate::format::format_card_number(&self.number())
    }

    #[inline]
    pub(crate) fn digits(&self) -> &[u8; CARD_NUMBER_LENGTH] {
        &self.digits
    }
}

impl fmt::Debug for ValidatedCardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCardNumber")
            .field("number", &self.masked())
            .finish()
    }
}

impl fmt::Display for ValidatedCardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl PartialEq for ValidatedCardNumber {
    fn eq(&self, other: &Self) -> bool {
        crate::mask::constant_time_eq(&self.digits, &other.digits)
    }
}

impl Eq for ValidatedCardNumber {}

impl Drop for ValidatedCardNumber {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}
