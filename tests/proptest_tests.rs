//! Property-based tests using proptest.
//!
//! These check invariants that should hold for all inputs, not just the
//! handful of identifiers the unit tests pin down.

use persian_id::{
    card_number, format,
    generate::{complete_card_number, complete_national_id},
    luhn, mask, national_id, normalize, ValidationError,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

fn digit_array<const N: usize>() -> impl Strategy<Value = [u8; N]> {
    proptest::collection::vec(0u8..10, N).prop_map(|v| {
        let mut out = [0u8; N];
        out.copy_from_slice(&v);
        out
    })
}

/// Rewrites ASCII digits in the given digit system.
fn in_digit_system(input: &str, zero: char) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(zero as u32 + d).unwrap(),
            None => c,
        })
        .collect()
}

fn all_same(input: &str) -> bool {
    let first = input.as_bytes()[0];
    input.bytes().all(|b| b == first)
}

fn parse_digits<const N: usize>(input: &str) -> [u8; N] {
    let mut out = [0u8; N];
    for (slot, b) in out.iter_mut().zip(input.bytes()) {
        *slot = b - b'0';
    }
    out
}

// =============================================================================
// CARD NUMBER PROPERTIES
// =============================================================================

proptest! {
    /// Property: a 16-digit card is valid exactly when the checksum passes
    /// and its digits are not all identical.
    #[test]
    fn card_validity_matches_checksum(card in digit_string(16)) {
        let expected = !all_same(&card) && luhn::validate(&parse_digits::<16>(&card));
        prop_assert_eq!(card_number::is_valid(&card), expected);
    }

    /// Property: completing any 15-digit prefix yields a valid card, unless
    /// the result is a single repeated digit.
    #[test]
    fn completed_cards_are_valid(partial in digit_array::<15>()) {
        let card = complete_card_number(&partial);
        prop_assert_eq!(card.len(), 16);
        if all_same(&card) {
            prop_assert_eq!(
                card_number::validate(&card).unwrap_err(),
                ValidationError::RepeatedDigits
            );
        } else {
            prop_assert!(card_number::is_valid(&card), "completed card {} is invalid", card);
        }
    }

    /// Property: any other 16th digit breaks the checksum.
    #[test]
    fn wrong_check_digit_fails(partial in digit_array::<15>(), shift in 1u8..10) {
        let card = complete_card_number(&partial);
        let check = card.as_bytes()[15] - b'0';
        let wrong = format!("{}{}", &card[..15], (check + shift) % 10);
        prop_assert!(!card_number::is_valid(&wrong));
    }

    /// Property: cards of any length other than 16 are rejected on length.
    #[test]
    fn card_wrong_length_rejected(card in digit_string_range(1..=30)) {
        prop_assume!(card.len() != 16);
        let is_length_error = matches!(
            card_number::validate(&card),
            Err(ValidationError::InvalidLength { .. })
        );
        prop_assert!(is_length_error);
    }

    /// Property: Persian and Arabic renderings validate like the ASCII one.
    #[test]
    fn card_digit_systems_agree(card in digit_string(16)) {
        let ascii = card_number::is_valid(&card);
        prop_assert_eq!(card_number::is_valid(&in_digit_system(&card, '۰')), ascii);
        prop_assert_eq!(card_number::is_valid(&in_digit_system(&card, '٠')), ascii);
    }

    /// Property: validation never panics.
    #[test]
    fn card_validation_never_panics(input in ".*") {
        let _ = card_number::is_valid(&input);
        let _ = card_number::validate(&input);
        let _ = card_number::find_bank(&input);
    }

    /// Property: is_valid agrees with validate.
    #[test]
    fn card_is_valid_agrees_with_validate(input in "[0-9۰-۹ -]{0,20}") {
        prop_assert_eq!(
            card_number::is_valid(&input),
            card_number::validate(&input).is_ok()
        );
    }
}

// =============================================================================
// NATIONAL ID PROPERTIES
// =============================================================================

proptest! {
    /// Property: completing any 9-digit prefix yields a valid ID unless it
    /// lands on a blacklisted or repeated value.
    #[test]
    fn completed_national_ids_are_valid(partial in digit_array::<9>()) {
        let id = complete_national_id(&partial);
        match national_id::validate(&id) {
            Ok(normalized) => prop_assert_eq!(normalized, id),
            Err(ValidationError::Blacklisted) => {
                prop_assert!(national_id::BLACKLIST.contains(&id.as_str()))
            }
            Err(ValidationError::RepeatedDigits) => prop_assert!(all_same(&id)),
            Err(other) => prop_assert!(false, "{} rejected with {}", id, other),
        }
    }

    /// Property: a short ID validates exactly like its zero-padded form.
    #[test]
    fn padding_is_transparent(id in digit_string_range(8..=10)) {
        let padded = format!("{:0>10}", id);
        prop_assert_eq!(national_id::validate(&id), national_id::validate(&padded));
    }

    /// Property: a valid ID always normalizes to 10 ASCII digits.
    #[test]
    fn valid_ids_are_canonical(id in digit_string_range(8..=10)) {
        if let Ok(normalized) = national_id::validate(&id) {
            prop_assert_eq!(normalized.len(), national_id::NATIONAL_ID_LENGTH);
            prop_assert!(normalized.bytes().all(|b| b.is_ascii_digit()));
            prop_assert!(normalized.ends_with(&id));
        }
    }

    /// Property: Persian, Arabic and ASCII renderings give the same result.
    #[test]
    fn national_id_digit_systems_agree(id in digit_string_range(8..=10)) {
        let ascii = national_id::validate(&id);
        prop_assert_eq!(national_id::validate(&in_digit_system(&id, '۰')), ascii.clone());
        prop_assert_eq!(national_id::validate(&in_digit_system(&id, '٠')), ascii);
    }

    /// Property: surrounding whitespace is ignored.
    #[test]
    fn national_id_trims_whitespace(id in digit_string(10), pad in " {0,3}") {
        let padded = format!("{}{}{}", pad, id, pad);
        prop_assert_eq!(national_id::validate(&padded), national_id::validate(&id));
    }

    /// Property: lengths outside 8..=10 are always rejected.
    #[test]
    fn national_id_wrong_length_rejected(id in digit_string_range(1..=20)) {
        prop_assume!(!(8..=10).contains(&id.len()));
        let is_length_error = matches!(
            national_id::validate(&id),
            Err(ValidationError::InvalidLength { .. })
        );
        prop_assert!(is_length_error);
    }

    /// Property: validation and lookups never panic.
    #[test]
    fn national_id_never_panics(input in ".*") {
        let _ = national_id::is_valid(&input);
        let _ = national_id::find_hometown(&input);
        let _ = national_id::parse(&input);
    }

    /// Property: is_valid agrees with validate.
    #[test]
    fn national_id_is_valid_agrees_with_validate(input in "[0-9۰-۹٠-٩ a]{0,12}") {
        prop_assert_eq!(
            national_id::is_valid(&input),
            national_id::validate(&input).is_ok()
        );
    }

    /// Property: a parsed ID splits back into its own digits.
    #[test]
    fn parse_components_reassemble(partial in digit_array::<9>()) {
        let id = complete_national_id(&partial);
        if let Ok(parsed) = national_id::parse(&id) {
            let rebuilt = format!(
                "{}{}{}",
                parsed.hometown_code(),
                parsed.personal_code(),
                parsed.control_digit()
            );
            prop_assert_eq!(rebuilt, id);
            prop_assert!(!parsed.hometowns().is_empty());
        }
    }
}

// =============================================================================
// NORMALIZATION PROPERTIES
// =============================================================================

proptest! {
    /// Property: digit normalization is idempotent.
    #[test]
    fn to_ascii_digits_idempotent(input in ".*") {
        let once = normalize::to_ascii_digits(&input);
        prop_assert_eq!(normalize::to_ascii_digits(&once), once.clone());
    }

    /// Property: Persian normalization is idempotent.
    #[test]
    fn normalize_persian_idempotent(input in ".*") {
        let once = normalize::normalize_persian(&input);
        prop_assert_eq!(normalize::normalize_persian(&once), once.clone());
    }

    /// Property: all three digit systems normalize to the same ASCII string.
    #[test]
    fn digit_systems_normalize_alike(digits in digit_string_range(1..=20)) {
        prop_assert_eq!(normalize::to_ascii_digits(&in_digit_system(&digits, '۰')), digits.clone());
        prop_assert_eq!(normalize::to_ascii_digits(&in_digit_system(&digits, '٠')), digits);
    }

    /// Property: normalized Persian text never contains Arabic-Indic digits.
    #[test]
    fn normalize_persian_removes_arabic_digits(input in "[٠-٩ا-ی ]{0,20}") {
        let normalized = normalize::normalize_persian(&input);
        prop_assert!(!normalized.chars().any(|c| ('٠'..='٩').contains(&c)));
    }

    /// Property: blank input is reported as empty by both validators.
    #[test]
    fn blank_is_empty(input in "[ \t\n]{0,8}") {
        prop_assert!(normalize::is_blank(&input));
        prop_assert_eq!(national_id::validate(&input).unwrap_err(), ValidationError::Empty);
        prop_assert_eq!(card_number::validate(&input).unwrap_err(), ValidationError::Empty);
    }
}

// =============================================================================
// MASKING AND FORMATTING PROPERTIES
// =============================================================================

proptest! {
    /// Property: masking shows at most the last four digits.
    #[test]
    fn mask_shows_at_most_four_digits(input in digit_string_range(0..=25)) {
        let masked = mask::mask_string(&input);
        let visible = masked.chars().filter(|c| c.is_ascii_digit()).count();
        prop_assert!(visible <= 4);
        if input.len() > 4 {
            prop_assert!(masked.ends_with(&input[input.len() - 4..]));
        }
    }

    /// Property: stripping a formatted number gives the digits back.
    #[test]
    fn format_then_strip(digits in digit_string_range(1..=20)) {
        let formatted = format::format_card_number(&digits);
        prop_assert_eq!(format::strip_formatting(&formatted), digits);
    }

    /// Property: a validated card's renderings are consistent.
    #[test]
    fn validated_card_renderings(partial in digit_array::<15>()) {
        let card = complete_card_number(&partial);
        prop_assume!(!all_same(&card));
        let validated = card_number::validate(&card).unwrap();
        prop_assert_eq!(validated.number(), card.clone());
        prop_assert_eq!(validated.bin(), card[..6].to_string());
        prop_assert_eq!(validated.last_four(), card[12..].to_string());
        prop_assert_eq!(validated.masked(), mask::mask_string(&card));
    }
}
