//! Common interface over the identifier validators.
//!
//! Both identifier families share the same shape: a fallible `validate` and
//! a boolean `is_valid` that never fails. Code generic over [`Validator`]
//! (such as [`crate::batch`]) works with either.

use crate::card::ValidatedCardNumber;
use crate::error::ValidationError;
use crate::{card_number, national_id};

/// A validator for one kind of identifier.
pub trait Validator: Send + Sync {
    /// What a successful validation yields.
    type Output: Send;

    /// Short name of the identifier kind, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Validates the input, stopping at the first failing rule.
    fn validate(&self, input: &str) -> Result<Self::Output, ValidationError>;

    /// Returns true if [`Validator::validate`] succeeds.
    fn is_valid(&self, input: &str) -> bool {
        self.validate(input).is_ok()
    }
}

/// Validates 16-digit bank card numbers.
///
/// # Example
///
/// ```
/// use persian_id::{CardNumberValidator, Validator};
///
/// let validator = CardNumberValidator;
/// assert!(validator.is_valid("6219861034529007"));
/// assert_eq!(validator.validate("6219861034529007").unwrap().last_four(), "9007");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardNumberValidator;

impl Validator for CardNumberValidator {
    type Output = ValidatedCardNumber;

    fn name(&self) -> &'static str {
        "card number"
    }

    fn validate(&self, input: &str) -> Result<ValidatedCardNumber, ValidationError> {
        card_number::validate(input)
    }

    fn is_valid(&self, input: &str) -> bool {
        card_number::is_valid(input)
    }
}

/// Validates national IDs, yielding the canonical 10-digit form.
///
/// # Example
///
/// ```
/// use persian_id::{NationalIdValidator, Validator};
///
/// let validator = NationalIdValidator;
/// assert_eq!(validator.validate("68415941").unwrap(), "0068415941");
/// assert!(!validator.is_valid("0123456789"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NationalIdValidator;

impl Validator for NationalIdValidator {
    type Output = String;

    fn name(&self) -> &'static str {
        "national ID"
    }

    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        national_id::validate(input)
    }

    fn is_valid(&self, input: &str) -> bool {
        national_id::is_valid(input)
    }
}
