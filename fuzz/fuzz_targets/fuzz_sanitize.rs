//! Fuzz target for text sanitization.
//!
//! Arbitrary input must never panic, and masking with a non-word token must
//! leave nothing for a second pass to replace.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wordveil::WordFilter;

fuzz_target!(|data: &str| {
    let filter = WordFilter::default();
    filter.add_words(["flowers?", "bees", r"sun\s+flower", "ass"], None);

    let found = filter.check(data, None);
    let once = filter.sanitize(data, None, None);

    if !found {
        assert_eq!(once, data, "text without matches must be returned unchanged");
    }

    let twice = filter.sanitize(&once, None, None);
    assert_eq!(once, twice, "sanitizing must be stable once masked");
});
