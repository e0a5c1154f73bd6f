//! Fuzz target for CVV validation.
//!
//! Tests that CVV checks never panic on arbitrary input.

#![no_main]

use cc_card::{cvv, CardBrand};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = cvv::check_cvv(data, None);

    for brand in CardBrand::ALL {
        let expected = cvv::cvv_length_for_brand(Some(brand));
        let ok = cvv::check_cvv(data, Some(brand)).is_ok();
        assert_eq!(ok, data.chars().count() == expected);
    }
});
