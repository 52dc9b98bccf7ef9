//! Fuzz target for digit and text normalization.

#![no_main]

use libfuzzer_sys::fuzz_target;
use persian_id::normalize;

fuzz_target!(|data: &str| {
    let ascii = normalize::to_ascii_digits(data);
    assert_eq!(normalize::to_ascii_digits(&ascii), ascii);
    assert!(!ascii.chars().any(|c| ('۰'..='۹').contains(&c) || ('٠'..='٩').contains(&c)));

    let persian = normalize::normalize_persian(data);
    assert_eq!(normalize::normalize_persian(&persian), persian);

    let _ = normalize::is_persian_text(data);
    let _ = normalize::is_blank(data);
});
