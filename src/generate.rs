//! Test identifier generation.
//!
//! Produces card numbers and national IDs that pass validation. They are
//! mathematically valid but not issued to anyone; use them for testing only.
//!
//! The deterministic functions need no features. Random generation requires
//! the `generate` feature (which enables the `rand` dependency).
//!
//! # Example
//!
//! ```
//! use persian_id::generate::{
//!     generate_card_number_deterministic, generate_national_id_deterministic,
//! };
//!
//! let card = generate_card_number_deterministic("621986").unwrap();
//! assert!(card.starts_with("621986"));
//! assert!(persian_id::card_number::is_valid(&card));
//!
//! let id = generate_national_id_deterministic("279").unwrap();
//! assert!(id.starts_with("279"));
//! assert!(persian_id::national_id::is_valid(&id));
//! ```

use crate::card::BIN_LENGTH;
use crate::digits::{self, parse_fixed};
use crate::error::ValidationError;
use crate::luhn::{self, CARD_NUMBER_LENGTH};
use crate::national_id::{self, HOMETOWN_CODE_LENGTH, NATIONAL_ID_LENGTH};
use crate::normalize::to_ascii_digits;

#[cfg(feature = "generate")]
use rand::Rng;

fn parse_prefix<const N: usize>(prefix: &str) -> Result<[u8; N], ValidationError> {
    parse_fixed::<N>(&to_ascii_digits(prefix))
}

/// Appends the check digit to the first 15 digits of a card number.
///
/// # Example
///
/// ```
/// use persian_id::generate::complete_card_number;
///
/// let partial = [6, 0, 3, 7, 7, 0, 1, 6, 8, 9, 0, 9, 5, 4, 4];
/// assert_eq!(complete_card_number(&partial), "6037701689095443");
/// ```
pub fn complete_card_number(partial: &[u8; CARD_NUMBER_LENGTH - 1]) -> String {
    let mut digits = [0u8; CARD_NUMBER_LENGTH];
    digits[..CARD_NUMBER_LENGTH - 1].copy_from_slice(partial);
    digits[CARD_NUMBER_LENGTH - 1] = luhn::check_digit(partial);
    digits::to_string(&digits)
}

/// Appends the control digit to the first 9 digits of a national ID.
///
/// # Example
///
/// ```
/// use persian_id::generate::complete_national_id;
///
/// assert_eq!(complete_national_id(&[2, 7, 9, 1, 5, 6, 7, 8, 9]), "2791567895");
/// ```
pub fn complete_national_id(partial: &[u8; NATIONAL_ID_LENGTH - 1]) -> String {
    let mut digits = [0u8; NATIONAL_ID_LENGTH];
    digits[..NATIONAL_ID_LENGTH - 1].copy_from_slice(partial);
    digits[NATIONAL_ID_LENGTH - 1] = national_id::control_digit(partial);
    digits::to_string(&digits)
}

/// Generates a valid card number for `bin` without randomness.
///
/// The account digits count up from the BIN, so the same BIN always yields
/// the same number.
///
/// # Errors
///
/// Returns a format error if `bin` is not exactly 6 digits.
pub fn generate_card_number_deterministic(bin: &str) -> Result<String, ValidationError> {
    let prefix = parse_prefix::<BIN_LENGTH>(bin)?;

    let mut partial = [0u8; CARD_NUMBER_LENGTH - 1];
    partial[..BIN_LENGTH].copy_from_slice(&prefix);
    for (i, d) in partial.iter_mut().enumerate().skip(BIN_LENGTH) {
        *d = (i % 10) as u8;
    }
    Ok(complete_card_number(&partial))
}

/// Generates a valid national ID for `hometown_code` without randomness.
///
/// # Errors
///
/// Returns a format error if `hometown_code` is not exactly 3 digits.
pub fn generate_national_id_deterministic(hometown_code: &str) -> Result<String, ValidationError> {
    let prefix = parse_prefix::<HOMETOWN_CODE_LENGTH>(hometown_code)?;

    // Personal code 000001 can never complete to a repeated or blacklisted ID.
    let mut partial = [0u8; NATIONAL_ID_LENGTH - 1];
    partial[..HOMETOWN_CODE_LENGTH].copy_from_slice(&prefix);
    partial[NATIONAL_ID_LENGTH - 2] = 1;
    Ok(complete_national_id(&partial))
}

/// Generates a random valid card number for `bin`.
///
/// Requires the `generate` feature.
///
/// # Example
///
/// ```
/// use persian_id::generate::generate_card_number;
///
/// let card = generate_card_number("603770").unwrap();
/// assert!(persian_id::card_number::is_valid(&card));
/// ```
#[cfg(feature = "generate")]
pub fn generate_card_number(bin: &str) -> Result<String, ValidationError> {
    generate_card_number_with_rng(bin, &mut rand::thread_rng())
}

/// Generates a random valid card number using a provided RNG.
///
/// Useful for reproducible generation with a seeded RNG.
#[cfg(feature = "generate")]
pub fn generate_card_number_with_rng<R: Rng>(
    bin: &str,
    rng: &mut R,
) -> Result<String, ValidationError> {
    let prefix = parse_prefix::<BIN_LENGTH>(bin)?;

    loop {
        let mut partial = [0u8; CARD_NUMBER_LENGTH - 1];
        partial[..BIN_LENGTH].copy_from_slice(&prefix);
        for d in partial.iter_mut().skip(BIN_LENGTH) {
            *d = rng.gen_range(0..10);
        }

        let card = complete_card_number(&partial);
        // Only an all-identical number can fail here.
        if crate::card_number::validate(&card).is_ok() {
            return Ok(card);
        }
    }
}

/// Generates several random card numbers for `bin`.
#[cfg(feature = "generate")]
pub fn generate_card_numbers(bin: &str, count: usize) -> Result<Vec<String>, ValidationError> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| generate_card_number_with_rng(bin, &mut rng))
        .collect()
}

/// Generates a random valid national ID for `hometown_code`.
///
/// Requires the `generate` feature.
///
/// # Example
///
/// ```
/// use persian_id::generate::generate_national_id;
///
/// let id = generate_national_id("385").unwrap();
/// assert!(id.starts_with("385"));
/// assert!(persian_id::national_id::is_valid(&id));
/// ```
#[cfg(feature = "generate")]
pub fn generate_national_id(hometown_code: &str) -> Result<String, ValidationError> {
    generate_national_id_with_rng(hometown_code, &mut rand::thread_rng())
}

/// Generates a random valid national ID using a provided RNG.
#[cfg(feature = "generate")]
pub fn generate_national_id_with_rng<R: Rng>(
    hometown_code: &str,
    rng: &mut R,
) -> Result<String, ValidationError> {
    let prefix = parse_prefix::<HOMETOWN_CODE_LENGTH>(hometown_code)?;

    loop {
        let mut partial = [0u8; NATIONAL_ID_LENGTH - 1];
        partial[..HOMETOWN_CODE_LENGTH].copy_from_slice(&prefix);
        for d in partial.iter_mut().skip(HOMETOWN_CODE_LENGTH) {
            *d = rng.gen_range(0..10);
        }

        let id = complete_national_id(&partial);
        // Repeated digits and the blacklist can still reject a completed ID.
        if national_id::validate(&id).is_ok() {
            return Ok(id);
        }
    }
}

/// Generates several random national IDs for `hometown_code`.
#[cfg(feature = "generate")]
pub fn generate_national_ids(
    hometown_code: &str,
    count: usize,
) -> Result<Vec<String>, ValidationError> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| generate_national_id_with_rng(hometown_code, &mut rng))
        .collect()
}

/// Picks a random BIN from the bundled bank table.
///
/// Returns `None` if the table is empty.
#[cfg(feature = "generate")]
pub fn random_bin<R: Rng>(rng: &mut R) -> Option<String> {
    use rand::seq::SliceRandom;

    let bins: Vec<&String> = crate::data::banks().iter().flat_map(|b| &b.bins).collect();
    bins.choose(rng).map(|b| b.to_string())
}

/// Picks a random hometown code from the bundled hometown table.
///
/// Returns `None` if the table is empty.
#[cfg(feature = "generate")]
pub fn random_hometown_code<R: Rng>(rng: &mut R) -> Option<String> {
    use rand::seq::SliceRandom;

    let codes: Vec<&String> = crate::data::hometowns()
        .iter()
        .flat_map(|h| &h.codes)
        .collect();
    codes.choose(rng).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card_number, national_id};

    #[test]
    fn test_complete_card_number() {
        let partial = [6, 2, 7, 4, 1, 2, 9, 0, 0, 5, 4, 7, 3, 7, 4];
        assert_eq!(complete_card_number(&partial), "6274129005473742");
    }

    #[test]
    fn test_complete_national_id() {
        assert_eq!(
            complete_national_id(&[0, 4, 9, 9, 3, 7, 0, 8, 9]),
            "0499370899"
        );
    }

    #[test]
    fn test_deterministic_card_for_every_bundled_bin() {
        for bank in crate::data::banks() {
            for bin in &bank.bins {
                let card = generate_card_number_deterministic(bin).unwrap();
                assert!(card.starts_with(bin.as_str()));
                assert!(card_number::is_valid(&card), "{}", card);
                let found = card_number::find_bank(&card).unwrap().unwrap();
                assert_eq!(found.id, bank.id);
            }
        }
    }

    #[test]
    fn test_deterministic_card_is_reproducible() {
        assert_eq!(
            generate_card_number_deterministic("603770").unwrap(),
            generate_card_number_deterministic("603770").unwrap()
        );
    }

    #[test]
    fn test_deterministic_card_with_repeated_bin() {
        for d in 0..10 {
            let bin = d.to_string().repeat(6);
            let card = generate_card_number_deterministic(&bin).unwrap();
            assert!(card_number::is_valid(&card), "{}", card);
        }
    }

    #[test]
    fn test_deterministic_national_id() {
        for code in ["000", "001", "012", "111", "279", "999"] {
            let id = generate_national_id_deterministic(code).unwrap();
            assert!(id.starts_with(code));
            assert!(national_id::is_valid(&id), "{}", id);
        }
    }

    #[test]
    fn test_persian_prefix() {
        let id = generate_national_id_deterministic("۲۷۹").unwrap();
        assert!(id.starts_with("279"));
    }

    #[test]
    fn test_bad_prefix() {
        assert!(matches!(
            generate_card_number_deterministic("60377").unwrap_err(),
            ValidationError::InvalidLength { length: 5, .. }
        ));
        assert!(generate_national_id_deterministic("2a9").is_err());
        assert!(generate_national_id_deterministic("").is_err());
    }

    #[cfg(feature = "generate")]
    mod random_tests {
        use super::*;
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        #[test]
        fn test_generate_card_number() {
            let card = generate_card_number("621986").unwrap();
            assert!(card.starts_with("621986"));
            assert!(card_number::is_valid(&card));
        }

        #[test]
        fn test_generate_card_numbers_are_unique() {
            let cards = generate_card_numbers("603799", 100).unwrap();
            let unique: std::collections::HashSet<_> = cards.iter().collect();
            assert!(unique.len() >= 90);
            assert!(cards.iter().all(|c| card_number::is_valid(c)));
        }

        #[test]
        fn test_generate_national_ids() {
            let ids = generate_national_ids("385", 50).unwrap();
            for id in &ids {
                assert!(id.starts_with("385"));
                assert!(national_id::is_valid(id));
                assert!(national_id::parse(id).unwrap().hometowns().len() >= 2);
            }
        }

        #[test]
        fn test_seeded_rng_is_reproducible() {
            let a = generate_national_id_with_rng("279", &mut StdRng::seed_from_u64(7)).unwrap();
            let b = generate_national_id_with_rng("279", &mut StdRng::seed_from_u64(7)).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn test_random_prefixes_come_from_bundled_data() {
            let mut rng = StdRng::seed_from_u64(42);
            let bin = random_bin(&mut rng).unwrap();
            assert!(crate::data::banks().find_by_bin(&bin).is_some());

            let code = random_hometown_code(&mut rng).unwrap();
            assert!(!crate::data::hometowns().find_all_by_code(&code).is_empty());
        }
    }
}
