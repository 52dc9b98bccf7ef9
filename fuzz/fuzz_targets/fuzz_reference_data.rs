//! Fuzz target for reference data loading.
//!
//! Arbitrary JSON must be rejected or loaded, never panic, and lossy loading
//! must keep only records that strict loading would accept.

#![no_main]

use libfuzzer_sys::fuzz_target;
use persian_id::data::{Bank, Collection, Hometown};

fuzz_target!(|data: &str| {
    if let Ok(strict) = Collection::<Hometown>::from_json_str(data) {
        let lossy = Collection::<Hometown>::from_json_str_lossy(data)
            .expect("strict success implies lossy success");
        assert_eq!(strict.len(), lossy.len());
    }

    if let Ok(banks) = Collection::<Bank>::from_json_str_lossy(data) {
        for bank in &banks {
            for bin in &bank.bins {
                let _ = banks.find_by_bin(bin);
            }
        }
    }
});
