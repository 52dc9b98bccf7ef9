//! Reference data: issuing banks and hometown registration offices.
//!
//! Records are immutable once loaded and live in an ordered [`Collection`].
//! Lookups scan in order, so a prefix shared by several records resolves to
//! all of them in dataset order.
//!
//! The bundled datasets are embedded at compile time and parsed on first use
//! (see [`banks`] and [`hometowns`]). Callers with their own registry load it
//! through [`Collection::from_json_file`] and pass it to the `*_in` lookups.
//!
//! # Example
//!
//! ```
//! use persian_id::data::{Bank, Collection};
//!
//! let json = r#"[{ "id": "saman", "name": "Saman", "persianName": "بانک سامان",
//!                  "code": ["056"], "bin": [621986] }]"#;
//! let banks: Collection<Bank> = Collection::from_json_str(json).unwrap();
//!
//! let saman = banks.find_by_bin("621986").unwrap();
//! assert_eq!(saman.id, "saman");
//! ```

mod bank;
mod bundled;
mod hometown;

pub use bank::Bank;
pub use bundled::{banks, hometowns};
pub use hometown::Hometown;

use crate::normalize::normalize_persian;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// A record type that can be loaded from a JSON dataset.
pub trait Record: DeserializeOwned {
    /// Short name used in log lines and errors, e.g. `"bank"`.
    const KIND: &'static str;

    /// Checks the record's invariants, returning a reason on violation.
    fn check(&self) -> Result<(), String>;
}

/// An immutable, ordered sequence of reference records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Collection<T> {
    /// Wraps records, keeping their order.
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the first record matching the predicate.
    pub fn find_by<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }

    /// Returns every record matching the predicate, in collection order.
    pub fn find_all_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Iterates the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Collection<T> {
    /// Parses a JSON array of records, rejecting the whole dataset if any
    /// record breaks its invariants.
    ///
    /// # Errors
    ///
    /// [`DataError::Json`] for malformed JSON, [`DataError::InvalidRecord`]
    /// for the first record that fails [`Record::check`].
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let records: Vec<T> = serde_json::from_str(json)?;
        for (index, record) in records.iter().enumerate() {
            record
                .check()
                .map_err(|reason| DataError::InvalidRecord {
                    kind: T::KIND,
                    index,
                    reason,
                })?;
        }

        info!(kind = T::KIND, records = records.len(), "reference data loaded");
        Ok(Self::new(records))
    }

    /// Parses a JSON array of records, dropping records that break their
    /// invariants instead of failing.
    ///
    /// # Errors
    ///
    /// [`DataError::Json`] if the document itself cannot be parsed.
    pub fn from_json_str_lossy(json: &str) -> Result<Self, DataError> {
        let parsed: Vec<T> = serde_json::from_str(json)?;
        let total = parsed.len();

        let records: Vec<T> = parsed
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match record.check() {
                Ok(()) => Some(record),
                Err(reason) => {
                    warn!(kind = T::KIND, index, %reason, "skipping invalid record");
                    None
                }
            })
            .collect();

        info!(
            kind = T::KIND,
            records = records.len(),
            skipped = total - records.len(),
            "reference data loaded"
        );
        Ok(Self::new(records))
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use persian_id::data::{Collection, Hometown};
    ///
    /// let registry: Collection<Hometown> = Collection::from_json_file("hometowns.json")?;
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Loads a dataset from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DataError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json_str(&content)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Error type for reference data loading.
#[derive(Debug)]
pub enum DataError {
    /// Failed to read the dataset.
    Io(std::io::Error),
    /// The dataset is not valid JSON or does not match the record shape.
    Json(serde_json::Error),
    /// A record violates its invariants.
    InvalidRecord {
        /// Record kind, e.g. `"bank"`.
        kind: &'static str,
        /// Position of the record in the dataset.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::InvalidRecord {
                kind,
                index,
                reason,
            } => write!(f, "invalid {} record at index {}: {}", kind, index, reason),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidRecord { .. } => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Numeric identifiers may be written as JSON strings or integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericCode {
    Text(String),
    Number(u64),
}

impl NumericCode {
    fn into_padded(self, width: usize) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => format!("{:0width$}", n, width = width),
        }
    }
}

fn padded_codes<'de, D>(deserializer: D, width: usize) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<NumericCode>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.into_padded(width)).collect())
}

/// Deserializes 3-digit codes; integers are zero-padded (`16` becomes `"016"`).
pub(crate) fn three_digit_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    padded_codes(deserializer, 3)
}

/// Deserializes 6-digit BINs; integers are zero-padded.
pub(crate) fn six_digit_codes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    padded_codes(deserializer, 6)
}

/// Deserializes free text into its canonical Persian form.
pub(crate) fn persian_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_persian(&raw))
}

/// True if `code` is exactly `width` ASCII digits.
pub(crate) fn is_digits(code: &str, width: usize) -> bool {
    code.len() == width && code.bytes().all(|b| b.is_ascii_digit())
}
