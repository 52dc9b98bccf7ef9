//! # persian_id
//!
//! Validation and parsing of Iranian identifiers.
//!
//! ## Features
//!
//! - National ID (کد ملی) validation with padding, blacklist and checksum
//! - National ID parsing into hometown code, personal code and control digit
//! - Hometown lookup by national ID prefix
//! - Bank card number validation and issuing bank lookup by BIN
//! - Persian and Arabic digit normalization and Persian text detection
//! - Card number masking and formatting for display
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use persian_id::{card_number, national_id};
//!
//! // National IDs, typed with any digit system
//! assert!(national_id::is_valid("۲۷۹۱۵۶۷۸۹۵"));
//! let id = national_id::parse("2791567895").unwrap();
//! assert_eq!(id.hometown_code(), "279");
//! assert_eq!(id.hometowns()[0].city, "خوی");
//!
//! // Card numbers
//! let card = card_number::validate("6037701689095443").unwrap();
//! println!("Card: {}", card); // "****-****-****-5443"
//! let bank = card_number::find_bank("6037701689095443").unwrap().unwrap();
//! assert_eq!(bank.persian_name, "بانک کشاورزی");
//! ```
//!
//! ## Normalization
//!
//! ```rust
//! use persian_id::normalize;
//!
//! assert_eq!(normalize::to_ascii_digits("۰۱۲٣٤٥"), "012345");
//! assert_eq!(normalize::normalize_persian("كيك"), "کیک");
//! assert!(normalize::is_persian_text("کد ملی"));
//! ```
//!
//! ## Errors
//!
//! Validation stops at the first failing rule and says which one:
//!
//! ```rust
//! use persian_id::{national_id, ErrorKind, ValidationError};
//!
//! let err = national_id::validate("0123456789").unwrap_err();
//! assert_eq!(err, ValidationError::Blacklisted);
//! assert_eq!(err.kind(), ErrorKind::Blacklist);
//! ```
//!
//! ## Custom Reference Data
//!
//! The bundled bank and hometown tables are used by default. Every lookup
//! has an `*_in` variant taking any [`data::Collection`]:
//!
//! ```rust
//! use persian_id::data::{Collection, Hometown};
//! use persian_id::national_id;
//!
//! let json = r#"[{ "province": "تهران", "city": "تهران", "code": ["279"] }]"#;
//! let hometowns: Collection<Hometown> = Collection::from_json_str(json).unwrap();
//!
//! let id = national_id::parse_in("2791567895", &hometowns).unwrap();
//! assert_eq!(id.hometowns()[0].province, "تهران");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `generate` | Random test identifier generation |
//! | `parallel` | Rayon-based batch validation |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//!
//! ## Security
//!
//! - Card numbers stored in fixed-size arrays, not heap strings
//! - Automatic memory zeroization when `ValidatedCardNumber` is dropped
//! - `Debug` and `Display` show masked card numbers only
//! - Log lines never carry a full card number
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod card_number;
pub mod data;
pub mod digits;
pub mod error;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod national_id;
pub mod normalize;
pub mod validator;

// Re-export main types at crate root
pub use batch::BatchValidator;
pub use card::ValidatedCardNumber;
pub use data::{Bank, Collection, Hometown};
pub use error::{ErrorKind, ParseError, ValidationError};
pub use national_id::NationalId;
pub use normalize::{is_blank, is_persian_text, normalize_persian, to_ascii_digits};
pub use validator::{CardNumberValidator, NationalIdValidator, Validator};
