//! Fuzz target for dictionary compilation.
//!
//! Caller-supplied word patterns and substitutes may be arbitrary text,
//! including broken regex syntax; compiling and matching must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wordveil::{Dictionary, SymbolAlternatives, WordFilter};

#[derive(Debug, Arbitrary)]
struct Input {
    words: Vec<String>,
    substitutions: Vec<(char, Vec<String>)>,
    text: String,
}

fuzz_target!(|input: Input| {
    let table: SymbolAlternatives = input.substitutions.into_iter().collect();
    let dictionary = Dictionary::new("fuzz")
        .with_symbol_alternatives(table)
        .with_words(input.words);

    let filter = WordFilter::default();
    let _ = filter.add_dictionary(dictionary);
    let _ = filter.check(&input.text, Some("fuzz"));
    let _ = filter.sanitize(&input.text, Some("fuzz"), None);
});
