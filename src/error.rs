//! Rich error types for identifier validation and parsing.
//!
//! Every failure carries enough detail to tell the caller exactly which rule
//! rejected the input. Validation stops at the first failing rule.

use std::fmt;

/// Errors that can occur while validating a card number or national ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty or contained only whitespace.
    Empty,

    /// The identifier has the wrong number of characters.
    InvalidLength {
        /// The actual number of characters provided.
        length: usize,
        /// The minimum accepted length.
        minimum: usize,
        /// The maximum accepted length.
        maximum: usize,
    },

    /// A character other than an ASCII digit was found.
    InvalidCharacter {
        /// The character position in the trimmed input, before any padding (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// Every digit of the identifier is the same (e.g. `0000000000`).
    RepeatedDigits,

    /// The identifier is a well-known fake that happens to pass the checksum.
    Blacklisted,

    /// The digits are well-formed but the checksum does not match.
    InvalidChecksum,

    /// A digit was requested from a non-numeric string or past its end.
    InvalidNumber {
        /// The requested position.
        index: usize,
    },
}

/// Broad classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Null, empty or blank input.
    EmptyInput,
    /// Wrong length, non-digit characters or a degenerate repeated-digit value.
    Format,
    /// Known-fake denylisted value.
    Blacklist,
    /// Checksum mismatch.
    Checksum,
}

impl ErrorKind {
    /// Returns a stable snake_case name, suitable for API responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::Format => "format",
            Self::Blacklist => "blacklist",
            Self::Checksum => "checksum",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError {
    /// Returns the broad kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::EmptyInput,
            Self::InvalidLength { .. }
            | Self::InvalidCharacter { .. }
            | Self::RepeatedDigits
            | Self::InvalidNumber { .. } => ErrorKind::Format,
            Self::Blacklisted => ErrorKind::Blacklist,
            Self::InvalidChecksum => ErrorKind::Checksum,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),

            Self::InvalidLength {
                length,
                minimum,
                maximum,
            } => {
                if minimum == maximum {
                    write!(f, "invalid length: got {} digits, expected {}", length, minimum)
                } else {
                    write!(
                        f,
                        "invalid length: got {} digits, expected {} to {}",
                        length, minimum, maximum
                    )
                }
            }

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::RepeatedDigits => write!(f, "all digits are identical"),

            Self::Blacklisted => write!(f, "identifier is on the list of known fake values"),

            Self::InvalidChecksum => {
                write!(f, "invalid checksum - please verify the number")
            }

            Self::InvalidNumber { index } => {
                write!(f, "invalid number: no digit at position {}", index)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned by [`crate::national_id::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The national ID failed validation.
    Invalid(ValidationError),

    /// The national ID is valid but no hometown is registered for its prefix.
    HometownNotFound {
        /// The normalized 10-digit national ID.
        national_id: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "invalid national ID: {}", e),
            Self::HometownNotFound { national_id } => {
                write!(f, "no hometown found for national ID {}", national_id)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(e) => Some(e),
            Self::HometownNotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}
