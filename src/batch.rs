//! Bulk validation of card numbers or national IDs.
//!
//! Every function is generic over [`Validator`], so the same code handles
//! both identifier families. With the `parallel` feature, rayon spreads
//! large batches across all cores.
//!
//! # Example
//!
//! ```
//! use persian_id::batch::{count_valid, validate_all};
//! use persian_id::{CardNumberValidator, NationalIdValidator};
//!
//! let ids = ["2791567895", "0123456789", "68415941"];
//! let results = validate_all(&NationalIdValidator, &ids);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! assert_eq!(results[2].as_deref(), Ok("0068415941"));
//!
//! let cards = ["6037701689095443", "6037701689095444"];
//! assert_eq!(count_valid(&CardNumberValidator, &cards), (1, 1));
//! ```

use crate::error::ValidationError;
use crate::validator::Validator;
use tracing::debug;

/// Batch validator bound to one identifier family.
///
/// # Example
///
/// ```
/// use persian_id::{BatchValidator, CardNumberValidator};
///
/// let batch = BatchValidator::new(CardNumberValidator);
/// let valid = batch.validate_valid_only(&["6219861034529007", "bad"]);
/// assert_eq!(valid.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchValidator<V> {
    validator: V,
}

impl<V: Validator> BatchValidator<V> {
    /// Creates a batch validator.
    #[inline]
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Validates every input, returning results in input order.
    pub fn validate_all<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<V::Output, ValidationError>> {
        validate_all(&self.validator, inputs)
    }

    /// Validates every input and keeps only the successes.
    pub fn validate_valid_only<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<V::Output> {
        inputs
            .iter()
            .filter_map(|s| self.validator.validate(s.as_ref()).ok())
            .collect()
    }

    /// Splits a batch into successes and `(index, error)` failures.
    pub fn partition<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> (Vec<V::Output>, Vec<(usize, ValidationError)>) {
        partition(&self.validator, inputs)
    }

    /// Validates in parallel using rayon.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel<S: AsRef<str> + Sync>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<V::Output, ValidationError>> {
        validate_parallel(&self.validator, inputs)
    }
}

/// Validates every input, returning results in input order.
#[inline]
pub fn validate_all<V: Validator, S: AsRef<str>>(
    validator: &V,
    inputs: &[S],
) -> Vec<Result<V::Output, ValidationError>> {
    inputs.iter().map(|s| validator.validate(s.as_ref())).collect()
}

/// Counts valid and invalid inputs without keeping results.
///
/// # Returns
///
/// Tuple of (valid_count, invalid_count)
#[inline]
pub fn count_valid<V: Validator, S: AsRef<str>>(validator: &V, inputs: &[S]) -> (usize, usize) {
    let valid = inputs
        .iter()
        .filter(|s| validator.validate(s.as_ref()).is_ok())
        .count();
    let invalid = inputs.len() - valid;
    debug!(validator = validator.name(), valid, invalid, "batch counted");
    (valid, invalid)
}

/// Splits a batch into successes and `(index, error)` failures.
pub fn partition<V: Validator, S: AsRef<str>>(
    validator: &V,
    inputs: &[S],
) -> (Vec<V::Output>, Vec<(usize, ValidationError)>) {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for (i, input) in inputs.iter().enumerate() {
        match validator.validate(input.as_ref()) {
            Ok(output) => valid.push(output),
            Err(e) => invalid.push((i, e)),
        }
    }

    debug!(
        validator = validator.name(),
        valid = valid.len(),
        invalid = invalid.len(),
        "batch partitioned"
    );
    (valid, invalid)
}

/// Validates in parallel, returning results in input order.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn validate_parallel<V: Validator, S: AsRef<str> + Sync>(
    validator: &V,
    inputs: &[S],
) -> Vec<Result<V::Output, ValidationError>> {
    use rayon::prelude::*;
    inputs
        .par_iter()
        .map(|s| validator.validate(s.as_ref()))
        .collect()
}

/// Counts valid and invalid inputs in parallel.
///
/// # Feature
///
/// Requires the `parallel` feature to be enabled.
#[cfg(feature = "parallel")]
pub fn count_valid_parallel<V: Validator, S: AsRef<str> + Sync>(
    validator: &V,
    inputs: &[S],
) -> (usize, usize) {
    use rayon::prelude::*;
    let valid = inputs
        .par_iter()
        .filter(|s| validator.validate(s.as_ref()).is_ok())
        .count();
    (valid, inputs.len() - valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{CardNumberValidator, NationalIdValidator};

    const VALID_CARD: &str = "6037701689095443";
    const VALID_CARD_2: &str = "6274129005473742";
    const INVALID_CARD: &str = "6219861034529008";

    #[test]
    fn test_validate_all_keeps_order() {
        let batch = BatchValidator::new(CardNumberValidator);
        let results = batch.validate_all(&[VALID_CARD, INVALID_CARD, VALID_CARD_2]);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err(), &ValidationError::InvalidChecksum);
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_partition() {
        let ids = ["2791567895", "bad", "1111111111", "0000000000"];
        let (valid, invalid) = partition(&NationalIdValidator, &ids);

        assert_eq!(valid, vec!["2791567895", "1111111111"]);
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0].0, 1);
        assert_eq!(invalid[1], (3, ValidationError::RepeatedDigits));
    }

    #[test]
    fn test_count_valid() {
        let cards = [VALID_CARD, INVALID_CARD, VALID_CARD_2, ""];
        assert_eq!(count_valid(&CardNumberValidator, &cards), (2, 2));
    }

    #[test]
    fn test_partition_custom_validator() {
        struct EvenLength;

        impl Validator for EvenLength {
            type Output = usize;

            fn name(&self) -> &'static str {
                "even length"
            }

            fn validate(&self, input: &str) -> Result<usize, ValidationError> {
                match input.len() {
                    0 => Err(ValidationError::Empty),
                    n if n % 2 == 0 => Ok(n),
                    _ => Err(ValidationError::InvalidChecksum),
                }
            }
        }

        let validator = EvenLength;
        assert_eq!(validator.name(), "even length");
        let (valid, invalid) = partition(&validator, &["ab", "abc", "", "abcd"]);
        assert_eq!(valid, vec![2, 4]);
        assert_eq!(
            invalid,
            vec![(1, ValidationError::InvalidChecksum), (2, ValidationError::Empty)]
        );
        assert_eq!(count_valid(&validator, &["ab", "a"]), (1, 1));
    }

    #[test]
    fn test_valid_only() {
        let batch = BatchValidator::new(NationalIdValidator);
        let valid = batch.validate_valid_only(&["68415941", "12345"]);
        assert_eq!(valid, vec!["0068415941"]);
    }

    #[test]
    fn test_empty_batch() {
        let inputs: Vec<&str> = vec![];
        assert!(validate_all(&CardNumberValidator, &inputs).is_empty());
        assert_eq!(count_valid(&CardNumberValidator, &inputs), (0, 0));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_validation() {
        let cards: Vec<String> = (0..1000).map(|_| VALID_CARD.to_string()).collect();
        let results = validate_parallel(&CardNumberValidator, &cards);
        assert_eq!(results.len(), 1000);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_count_valid_parallel() {
        let ids = ["2791567895", "0123456789", "6104038931", "x"];
        assert_eq!(count_valid_parallel(&NationalIdValidator, &ids), (2, 2));
    }
}
