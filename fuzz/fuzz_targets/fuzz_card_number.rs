//! Fuzz target for card number validation.
//!
//! Validation, lookup and masking must never panic, and a validated card
//! must never leak its full number through its renderings.

#![no_main]

use libfuzzer_sys::fuzz_target;
use persian_id::{card_number, format, generate, mask};

fuzz_target!(|data: &str| {
    let valid = card_number::is_valid(data);
    let result = card_number::validate(data);
    assert_eq!(valid, result.is_ok(), "is_valid disagrees with validate");
    assert_eq!(
        card_number::find_bank(data).err(),
        result.as_ref().err().cloned(),
        "lookup error differs from validation error"
    );

    let masked = mask::mask_string(data);
    assert!(masked.chars().filter(|c| c.is_ascii_digit()).count() <= 4);

    let _ = format::format_card_number(data);
    let _ = format::split_into_groups(data);

    if let Ok(card) = result {
        let number = card.number();
        assert!(!card.masked().contains(&number));
        assert!(!format!("{:?}", card).contains(&number));
        assert_eq!(format::strip_formatting(&card.formatted()), number);
    }

    // Completing the leading digits must always yield a checksum-valid card.
    let digits: Vec<u8> = data.bytes().map(|b| b % 10).collect();
    if let Ok(partial) = <[u8; 15]>::try_from(digits.as_slice()) {
        let completed = generate::complete_card_number(&partial);
        let first = completed.as_bytes()[0];
        if !completed.bytes().all(|b| b == first) {
            assert!(card_number::is_valid(&completed));
        }
    }
});
