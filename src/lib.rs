//! wordveil
//!
//! Dictionary-driven word matching and redaction. Callers register named
//! dictionaries of word patterns; each dictionary compiles into one
//! case-insensitive matcher that tolerates leetspeak-style substitutions
//! (`fl0wer` for `flower`) and only matches between non-word characters or
//! text edges, so `ass` never fires inside `assassin`.
//!
//! ```
//! use wordveil::{SanitizeOptions, WordFilter};
//!
//! let filter = WordFilter::default();
//! filter.add_words(["flowers?"], None);
//!
//! assert!(filter.check("a fl0wer!", None));
//! assert_eq!(filter.sanitize("a flower", None, None), "a ******");
//!
//! let by_word = SanitizeOptions::new().replacer("[x]").replace_by_word(true);
//! assert_eq!(filter.sanitize("two flowers", None, Some(&by_word)), "two [x]");
//! ```
//!
//! # Layout
//!
//! - [`filter`]: dictionaries, pattern compiler, matcher/replacer
//! - [`config`]: TOML and environment configuration
//! - [`telemetry`]: `tracing` subscriber setup
//! - [`cli`]: subcommands behind the `wordveil-cli` binary

pub mod cli;
pub mod config;
pub mod filter;
pub mod telemetry;

pub use config::{ConfigError, DictionaryConfig, FilterConfig};
pub use filter::{
    default_symbol_alternatives, CompiledPattern, Dictionary, DictionaryFilter, FilterError,
    FilterOptions, Replacer, SanitizeOptions, SymbolAlternatives, WordFilter, WordMatch,
    DEFAULT_DICTIONARY_NAME,
};
