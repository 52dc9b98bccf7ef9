//! Card number formatting.
//!
//! Iranian cards are always printed in four groups of four digits. Input may
//! carry Persian or Arabic digits and any separators; only digits survive.
//!
//! # Example
//!
//! ```
//! use persian_id::format::{format_card_number, format_with_separator, strip_formatting};
//!
//! assert_eq!(format_card_number("6037701689095443"), "6037 7016 8909 5443");
//! assert_eq!(format_with_separator("۶۰۳۷۷۰۱۶۸۹۰۹۵۴۴۳", "-"), "6037-7016-8909-5443");
//! assert_eq!(strip_formatting("6037-7016 8909-5443"), "6037701689095443");
//! ```

use crate::normalize::ascii_digit;

const GROUP_SIZE: usize = 4;

/// Formats a card number in groups of four separated by spaces.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number in groups of four with a custom separator.
///
/// A trailing partial group is kept, so this also formats numbers as they
/// are being typed.
///
/// # Example
///
/// ```
/// use persian_id::format::format_with_separator;
///
/// assert_eq!(format_with_separator("621986", " "), "6219 86");
/// assert_eq!(format_with_separator("6219861034529007", " - "), "6219 - 8610 - 3452 - 9007");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits = strip_formatting(input);

    let mut result = String::with_capacity(digits.len() + (digits.len() / GROUP_SIZE) * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Strips all formatting, leaving only ASCII digits.
///
/// Persian and Arabic digits are converted rather than dropped.
pub fn strip_formatting(input: &str) -> String {
    input
        .chars()
        .map(ascii_digit)
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Splits a card number into its digit groups.
///
/// # Example
///
/// ```
/// use persian_id::format::split_into_groups;
///
/// assert_eq!(
///     split_into_groups("6274129005473742"),
///     vec!["6274", "1290", "0547", "3742"]
/// );
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let digits: Vec<char> = strip_formatting(input).chars().collect();
    digits
        .chunks(GROUP_SIZE)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("6219861034529007"), "6219 8610 3452 9007");
        assert_eq!(format_card_number("6219-8610-3452-9007"), "6219 8610 3452 9007");
    }

    #[test]
    fn test_format_persian_digits() {
        assert_eq!(format_card_number("۶۲۱۹۸۶۱۰۳۴۵۲۹۰۰۷"), "6219 8610 3452 9007");
        assert_eq!(format_card_number("٦٢١٩٨٦١٠٣٤٥٢٩٠٠٧"), "6219 8610 3452 9007");
    }

    #[test]
    fn test_format_partial() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("6219"), "6219");
        assert_eq!(format_card_number("62198"), "6219 8");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("6219 8610 3452 9007"), "6219861034529007");
        assert_eq!(strip_formatting("abc"), "");
    }

    #[test]
    fn test_split_into_groups() {
        assert_eq!(
            split_into_groups("6219861034529007"),
            vec!["6219", "8610", "3452", "9007"]
        );
        assert_eq!(split_into_groups("621986"), vec!["6219", "86"]);
        assert!(split_into_groups("").is_empty());
    }
}
