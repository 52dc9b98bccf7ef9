//! Datasets embedded in the crate, parsed once on first access.

use super::{Bank, Collection, Hometown, Record};
use once_cell::sync::Lazy;
use tracing::error;

static BANKS: Lazy<Collection<Bank>> =
    Lazy::new(|| load(include_str!("../../data/banks.json")));

static HOMETOWNS: Lazy<Collection<Hometown>> =
    Lazy::new(|| load(include_str!("../../data/hometowns.json")));

/// Parses a bundled dataset. A broken dataset degrades to an empty
/// collection so lookups report "not found" instead of failing.
fn load<T: Record>(json: &str) -> Collection<T> {
    match Collection::from_json_str_lossy(json) {
        Ok(collection) => collection,
        Err(e) => {
            error!(kind = T::KIND, error = %e, "bundled reference data failed to load");
            Collection::empty()
        }
    }
}

/// Returns the bundled bank table.
///
/// # Example
///
/// ```
/// let saman = persian_id::data::banks().find_by_bin("621986").unwrap();
/// assert_eq!(saman.id, "saman");
/// ```
pub fn banks() -> &'static Collection<Bank> {
    &BANKS
}

/// Returns the bundled hometown table.
pub fn hometowns() -> &'static Collection<Hometown> {
    &HOMETOWNS
}
