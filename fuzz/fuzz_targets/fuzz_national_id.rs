//! Fuzz target for national ID validation and parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use persian_id::{national_id, ParseError};

fuzz_target!(|data: &str| {
    let result = national_id::validate(data);
    assert_eq!(national_id::is_valid(data), result.is_ok());

    match (&result, national_id::parse(data)) {
        (Ok(id), Ok(parsed)) => {
            assert_eq!(parsed.id(), id);
            assert!(!parsed.hometowns().is_empty());
        }
        (Ok(id), Err(ParseError::HometownNotFound { national_id: missing })) => {
            assert_eq!(&missing, id);
        }
        (Err(expected), Err(ParseError::Invalid(actual))) => assert_eq!(expected, &actual),
        (result, parsed) => panic!("validate {:?} but parse {:?}", result, parsed),
    }

    if let Ok(id) = result {
        assert_eq!(id.len(), national_id::NATIONAL_ID_LENGTH);
        assert!(id.bytes().all(|b| b.is_ascii_digit()));
        // Canonical form is a fixed point.
        assert_eq!(national_id::validate(&id), Ok(id.clone()));
    }
});
