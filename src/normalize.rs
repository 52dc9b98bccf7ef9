//! Persian and Arabic text normalization.
//!
//! Identifiers typed on a Persian or Arabic keyboard arrive with non-ASCII
//! digits (`۱۲۳`, `١٢٣`) and with Arabic presentation variants of a few
//! letters. Every checksum in this crate works on ASCII digits only, so input
//! passes through this module first.
//!
//! # Example
//!
//! ```
//! use persian_id::normalize::{is_persian_text, normalize_persian, to_ascii_digits};
//!
//! assert_eq!(to_ascii_digits(" ۲۷۹۱۵۶۷۸۹۵ "), "2791567895");
//! assert_eq!(normalize_persian("علي"), "علی");
//! assert!(is_persian_text("سلام دنیا"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Persian (Extended Arabic-Indic) digit zero, U+06F0.
const PERSIAN_ZERO: u32 = 0x06F0;

/// Arabic-Indic digit zero, U+0660.
const ARABIC_ZERO: u32 = 0x0660;

/// Persian Yeh (ی).
const PERSIAN_YEH: char = '\u{06CC}';

/// Persian Keheh (ک).
const PERSIAN_KAF: char = '\u{06A9}';

/// Waw (و).
const PERSIAN_WAW: char = '\u{0648}';

/// Arabic and regional variants rendered as Persian Yeh.
const YEH_VARIANTS: &[char] = &[
    '\u{0620}', // Kashmiri yeh
    '\u{063D}', // Farsi yeh with inverted v
    '\u{063E}', // Farsi yeh with two dots above
    '\u{063F}', // Farsi yeh with three dots above
    '\u{064A}', // Arabic yeh
    '\u{0678}', // High hamza yeh
    '\u{06CD}', // Yeh with tail
    '\u{06CE}', // Yeh with small v
    '\u{06D1}', // Yeh with three dots below
    '\u{06D2}', // Yeh barree
    '\u{06D3}', // Yeh barree with hamza above
];

/// Arabic and regional variants rendered as Persian Kaf.
const KAF_VARIANTS: &[char] = &[
    '\u{0643}', // Arabic kaf
    '\u{06AA}', // Swash kaf
    '\u{06AB}', // Kaf with ring
    '\u{06AC}', // Kaf with dot above
    '\u{06AE}', // Kaf with three dots below
    '\u{063B}', // Keheh with two dots above
    '\u{063C}', // Keheh with three dots below
];

/// Arabic and regional variants rendered as Waw.
const WAW_VARIANTS: &[char] = &[
    '\u{0676}', // High hamza waw
    '\u{06C4}', // Waw with ring
    '\u{06CA}', // Waw with two dots above
    '\u{06CF}', // Waw with dot above
];

/// Character class accepted by [`is_persian_text`].
///
/// ASCII and Persian/Arabic digits, the Persian alphabet, short vowels,
/// tanwin, Persian/Arabic punctuation, common symbols and whitespace.
const PERSIAN_CLASS: &str = concat!(
    r"0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}",
    r"\x{0621}-\x{0628}\x{062A}-\x{063A}\x{0641}-\x{0642}\x{0644}-\x{0649}",
    r"\x{06CC}\x{06A9}\x{06AF}\x{0686}\x{067E}\x{0698}",
    r"\x{064E}\x{0650}\x{064F}",
    r"\x{064B}\x{064C}\x{064D}",
    r"\x{200C}\x{0640}\x{060C}\x{00AB}\x{00BB}\x{061B}\x{061F}\x{066C}\x{060D}\x{066B}\x{066A}",
    r##"!-/:-@\[-`\{-~\x{00D7}\x{00F7}\x{20AC}\x{00A3}\x{00A5}"##,
    r"\s",
);

static PERSIAN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^[{}]+$", PERSIAN_CLASS)).expect("valid character class"));

/// Returns true if the input is empty or contains only whitespace.
#[inline]
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

/// Maps a Persian or Arabic-Indic digit to its ASCII counterpart.
///
/// Any other character is returned unchanged.
#[inline]
pub fn ascii_digit(c: char) -> char {
    let code = c as u32;
    let offset = if (PERSIAN_ZERO..=PERSIAN_ZERO + 9).contains(&code) {
        code - PERSIAN_ZERO
    } else if (ARABIC_ZERO..=ARABIC_ZERO + 9).contains(&code) {
        code - ARABIC_ZERO
    } else {
        return c;
    };
    (b'0' + offset as u8) as char
}

/// Replaces Persian and Arabic digits with ASCII digits without trimming.
///
/// Used where surrounding whitespace is significant (card numbers).
pub fn map_ascii_digits(input: &str) -> String {
    input.chars().map(ascii_digit).collect()
}

/// Converts Persian (`۰`-`۹`) and Arabic (`٠`-`٩`) digits to ASCII digits.
///
/// The input is trimmed first. All other characters pass through unchanged.
/// Blank input yields an empty string.
///
/// # Example
///
/// ```
/// use persian_id::normalize::to_ascii_digits;
///
/// assert_eq!(to_ascii_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
/// assert_eq!(to_ascii_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
/// assert_eq!(to_ascii_digits("۱test٢۳"), "1test23");
/// assert_eq!(to_ascii_digits("   "), "");
/// ```
pub fn to_ascii_digits(input: &str) -> String {
    map_ascii_digits(input.trim())
}

/// Normalizes Arabic letter variants and digits to their Persian forms.
///
/// The input is trimmed, then:
/// - Arabic and regional yeh variants become `ی`
/// - Arabic and regional kaf variants become `ک`
/// - Waw variants become `و`
/// - Arabic-Indic digits become Persian digits
///
/// ASCII digits and Latin letters are untouched. Blank input yields an empty
/// string.
///
/// # Example
///
/// ```
/// use persian_id::normalize::normalize_persian;
///
/// assert_eq!(
///     normalize_persian("اين يك تست كاربردي مي باشد"),
///     "این یک تست کاربردی می باشد"
/// );
/// assert_eq!(normalize_persian("٠١٢٣"), "۰۱۲۳");
/// ```
pub fn normalize_persian(input: &str) -> String {
    input.trim().chars().map(persian_char).collect()
}

#[inline]
fn persian_char(c: char) -> char {
    let code = c as u32;
    if (ARABIC_ZERO..=ARABIC_ZERO + 9).contains(&code) {
        // Offset is at most 9, so the result is always a Persian digit.
        return char::from_u32(code - ARABIC_ZERO + PERSIAN_ZERO).unwrap_or(c);
    }
    if YEH_VARIANTS.contains(&c) {
        PERSIAN_YEH
    } else if KAF_VARIANTS.contains(&c) {
        PERSIAN_KAF
    } else if WAW_VARIANTS.contains(&c) {
        PERSIAN_WAW
    } else {
        c
    }
}

/// Returns true if the trimmed input consists solely of Persian text.
///
/// Accepted characters: Persian letters, ASCII/Persian/Arabic digits, short
/// vowels, tanwin, Persian/Arabic punctuation, common symbols and whitespace.
/// Arabic-only letters such as `ي` and `ك` are rejected. Blank input returns
/// false.
///
/// # Example
///
/// ```
/// use persian_id::normalize::is_persian_text;
///
/// assert!(is_persian_text("صرفاً یک تست"));
/// assert!(is_persian_text("۰۱۲۳۴۵۶۷۸۹"));
/// assert!(!is_persian_text("hello"));
/// assert!(!is_persian_text("يك"));
/// assert!(!is_persian_text(""));
/// ```
pub fn is_persian_text(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && PERSIAN_TEXT.is_match(trimmed)
}
