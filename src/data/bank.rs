//! Issuing bank records, looked up by card BIN.

use super::{is_digits, persian_text, six_digit_codes, three_digit_codes, Collection, Record};
use serde::{Deserialize, Serialize};

/// An Iranian bank or credit institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    /// Stable slug, e.g. `"keshavarzi"`.
    pub id: String,

    /// English name.
    #[serde(deserialize_with = "persian_text")]
    pub name: String,

    /// Persian name, normalized on load.
    #[serde(deserialize_with = "persian_text")]
    pub persian_name: String,

    /// 3-digit issuer codes (`0XX`).
    #[serde(
        rename(serialize = "codes", deserialize = "code"),
        alias = "codes",
        default,
        deserialize_with = "three_digit_codes"
    )]
    pub codes: Vec<String>,

    /// 6-digit card prefixes.
    #[serde(
        rename(serialize = "bins", deserialize = "bin"),
        alias = "bins",
        default,
        deserialize_with = "six_digit_codes"
    )]
    pub bins: Vec<String>,
}

impl Bank {
    /// Returns true if this bank issues cards starting with `bin`.
    #[inline]
    pub fn has_bin(&self, bin: &str) -> bool {
        self.bins.iter().any(|b| b == bin)
    }

    /// Returns true if `code` is one of this bank's issuer codes.
    #[inline]
    pub fn has_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

impl Record for Bank {
    const KIND: &'static str = "bank";

    fn check(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("missing id".to_string());
        }
        if let Some(code) = self
            .codes
            .iter()
            .find(|c| !(is_digits(c, 3) && c.starts_with('0')))
        {
            return Err(format!("bank {}: code {:?} is not of the form 0XX", self.id, code));
        }
        if let Some(bin) = self.bins.iter().find(|b| !is_digits(b, 6)) {
            return Err(format!("bank {}: bin {:?} is not 6 digits", self.id, bin));
        }
        Ok(())
    }
}

impl Collection<Bank> {
    /// Returns the first bank whose BIN list contains `bin`.
    pub fn find_by_bin(&self, bin: &str) -> Option<&Bank> {
        self.find_by(|bank| bank.has_bin(bin))
    }

    /// Returns the first bank with the issuer code `code`.
    pub fn find_by_code(&self, code: &str) -> Option<&Bank> {
        self.find_by(|bank| bank.has_code(code))
    }
}
