//! Hometown records, looked up by the 3-digit national ID prefix.

use super::{is_digits, persian_text, three_digit_codes, Collection, Record};
use serde::{Deserialize, Serialize};

/// A province and city with the registration codes issued there.
///
/// One code may belong to several hometowns, and a hometown usually owns
/// more than one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hometown {
    /// Province name, normalized on load.
    #[serde(deserialize_with = "persian_text")]
    pub province: String,

    /// City name, normalized on load.
    #[serde(deserialize_with = "persian_text")]
    pub city: String,

    /// 3-digit national ID prefixes.
    #[serde(
        rename(serialize = "codes", deserialize = "code"),
        alias = "codes",
        default,
        deserialize_with = "three_digit_codes"
    )]
    pub codes: Vec<String>,
}

impl Hometown {
    /// Returns true if `code` is one of this hometown's prefixes.
    #[inline]
    pub fn has_code(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

impl Record for Hometown {
    const KIND: &'static str = "hometown";

    fn check(&self) -> Result<(), String> {
        if let Some(code) = self.codes.iter().find(|c| !is_digits(c, 3)) {
            return Err(format!(
                "{}/{}: code {:?} is not 3 digits",
                self.province, self.city, code
            ));
        }
        Ok(())
    }
}

impl Collection<Hometown> {
    /// Returns every hometown registered under `code`, in collection order.
    pub fn find_all_by_code(&self, code: &str) -> Vec<&Hometown> {
        self.find_all_by(|hometown| hometown.has_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOMETOWNS: &str = r#"[
        { "province": "آذربايجان غربي", "city": "خوي", "code": ["279", "280"] },
        { "province": "خراسان رضوی", "city": "مشهد", "code": ["092", "093", "094"] },
        { "province": "خراسان رضوی", "city": "نیشابور", "code": ["106", 107] },
        { "province": "خراسان رضوی", "city": "سبزوار", "code": ["094"] }
    ]"#;

    #[test]
    fn test_single_match() {
        let hometowns = Collection::<Hometown>::from_json_str(HOMETOWNS).unwrap();
        let found = hometowns.find_all_by_code("279");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].province, "آذربایجان غربی");
        assert_eq!(found[0].city, "خوی");
    }

    #[test]
    fn test_shared_code_returns_all_in_order() {
        let hometowns = Collection::<Hometown>::from_json_str(HOMETOWNS).unwrap();
        let found = hometowns.find_all_by_code("094");
        let cities: Vec<&str> = found.iter().map(|h| h.city.as_str()).collect();
        assert_eq!(cities, vec!["مشهد", "سبزوار"]);
    }

    #[test]
    fn test_integer_code_is_padded() {
        let hometowns = Collection::<Hometown>::from_json_str(HOMETOWNS).unwrap();
        assert_eq!(hometowns.find_all_by_code("107").len(), 1);
    }

    #[test]
    fn test_missing_code() {
        let hometowns = Collection::<Hometown>::from_json_str(HOMETOWNS).unwrap();
        assert!(hometowns.find_all_by_code("890").is_empty());
    }

    #[test]
    fn test_code_must_be_three_digits() {
        let json = r#"[{ "province": "تهران", "city": "تهران", "code": ["0011"] }]"#;
        assert!(Collection::<Hometown>::from_json_str(json).is_err());
    }
}
