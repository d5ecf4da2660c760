//! Fuzz testing for request validation.
//!
//! Ensures the validators never panic and always answer with a `Result`,
//! whatever bytes a client sends.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```
//!
//! # What This Tests
//!
//! - `validate_product_payload`: arbitrary JSON documents
//! - `parse_positive_integer` and `Pagination::from_params`: raw query values
//! - `validate_search_query`: raw search terms

#![no_main]

use libfuzzer_sys::fuzz_target;
use product_catalog::Pagination;
use product_catalog::validation::{
    parse_positive_integer, validate_product_payload, validate_search_query,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(input) = validate_product_payload(&value) {
            assert!(!input.name.is_empty());
            assert!(!input.category.is_empty());
        }
    }

    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(n) = parse_positive_integer(s) {
            assert!(n >= 1);
        }

        let (page, limit) = s.split_once('&').unwrap_or((s, s));
        if let Ok(pagination) = Pagination::from_params(Some(page), Some(limit)) {
            // Bounds must stay in range for any collection size
            let (start, end) = pagination.bounds(usize::MAX);
            assert!(start <= end);
        }

        let _ = validate_search_query(Some(s));
    }
});
