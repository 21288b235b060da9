//! Dictionary-driven word filter.
//!
//! Holds named dictionaries, keeps each one's compiled pattern current, and
//! uses those patterns to detect and redact words in arbitrary text.
//!
//! Unknown dictionary names are never an error: looking one up creates an
//! empty dictionary with the default substitution table. Only
//! [`WordFilter::add_dictionary`] refuses a name that is already taken.

pub mod bound;
pub mod dictionary;
pub mod error;
pub mod pattern;
pub mod replacer;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

pub use bound::DictionaryFilter;
pub use dictionary::{default_symbol_alternatives, Dictionary, DEFAULT_DICTIONARY_NAME};
pub use error::FilterError;
pub use pattern::{CompiledPattern, SymbolAlternatives, WordMatch};
pub use replacer::{Replacer, SanitizeOptions, TransformFn};

use replacer::ReplacementPolicy;

/// Construction options for a [`WordFilter`].
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Dictionary registered up front under its own name.
    pub dictionary: Option<Dictionary>,
    /// Default replacement for matched words.
    pub replacer: Replacer,
    /// Replace each match with the token once instead of once per character.
    pub replace_by_word: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            dictionary: None,
            replacer: Replacer::default(),
            replace_by_word: false,
        }
    }
}

/// Word filter engine. Each instance owns an isolated dictionary store.
#[derive(Debug)]
pub struct WordFilter {
    dictionaries: RwLock<HashMap<String, Dictionary>>,
    replacer: Replacer,
    replace_by_word: bool,
}

fn resolve_name(name: Option<&str>) -> &str {
    name.unwrap_or(DEFAULT_DICTIONARY_NAME)
}

impl WordFilter {
    /// Create a filter with the given defaults.
    pub fn new(options: FilterOptions) -> Self {
        let mut dictionaries = HashMap::new();
        if let Some(mut dictionary) = options.dictionary {
            if dictionary.name().is_empty() {
                dictionary.rename(DEFAULT_DICTIONARY_NAME);
            }
            dictionaries.insert(dictionary.name().to_string(), dictionary);
        }
        Self {
            dictionaries: RwLock::new(dictionaries),
            replacer: options.replacer,
            replace_by_word: options.replace_by_word,
        }
    }

    /// Default replacement used when a call does not override it.
    pub fn replacer(&self) -> &Replacer {
        &self.replacer
    }

    pub fn replace_by_word(&self) -> bool {
        self.replace_by_word
    }

    /// Returns true if any word of the named dictionary occurs in `text`.
    pub fn check(&self, text: &str, dictionary: Option<&str>) -> bool {
        self.pattern_for(resolve_name(dictionary))
            .is_some_and(|p| p.is_match(text))
    }

    /// Return `text` with every match of the named dictionary replaced.
    ///
    /// When nothing matches the input is handed back borrowed, untouched.
    pub fn sanitize<'t>(
        &self,
        text: &'t str,
        dictionary: Option<&str>,
        options: Option<&SanitizeOptions>,
    ) -> Cow<'t, str> {
        let name = resolve_name(dictionary);
        let Some(pattern) = self.pattern_for(name) else {
            return Cow::Borrowed(text);
        };
        let policy = ReplacementPolicy::resolve(&self.replacer, self.replace_by_word, options);

        let mut out = String::new();
        let mut last = 0;
        let mut replaced = 0usize;
        for m in pattern.find_iter(text) {
            if replaced == 0 {
                out.reserve(text.len());
            }
            out.push_str(&text[last..m.start]);
            out.push_str(&policy.apply(m.as_str(text)));
            last = m.end;
            replaced += 1;
        }

        if replaced == 0 {
            return Cow::Borrowed(text);
        }
        out.push_str(&text[last..]);
        tracing::trace!(dictionary = %name, replaced, "text sanitized");
        Cow::Owned(out)
    }

    /// Append words to the named dictionary and recompile it.
    pub fn add_words<I, S>(&self, words: I, dictionary: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_dictionary_mut(resolve_name(dictionary), |d| d.add_words(words));
    }

    /// Remove every entry equal to one of `words` and recompile.
    pub fn remove_words<I, S>(&self, words: I, dictionary: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_dictionary_mut(resolve_name(dictionary), |d| d.remove_words(words));
    }

    /// Register a dictionary under its own name; an empty name registers
    /// it as the default dictionary.
    ///
    /// Fails without touching the store if the name is already registered.
    pub fn add_dictionary(&self, mut dictionary: Dictionary) -> Result<(), FilterError> {
        if dictionary.name().is_empty() {
            dictionary.rename(DEFAULT_DICTIONARY_NAME);
        }
        let mut dictionaries = self.dictionaries.write();
        if dictionaries.contains_key(dictionary.name()) {
            tracing::warn!(dictionary = %dictionary.name(), "dictionary already registered");
            return Err(FilterError::DictionaryExists(dictionary.name().to_string()));
        }
        tracing::info!(
            dictionary = %dictionary.name(),
            words = dictionary.words().len(),
            "dictionary registered"
        );
        dictionaries.insert(dictionary.name().to_string(), dictionary);
        Ok(())
    }

    /// Existence check; never creates a dictionary.
    pub fn has_dictionary(&self, name: &str) -> bool {
        self.dictionaries.read().contains_key(name)
    }

    /// Snapshot of the named dictionary, creating it if absent.
    pub fn get_dictionary(&self, name: Option<&str>) -> Dictionary {
        let name = resolve_name(name);
        if let Some(dictionary) = self.dictionaries.read().get(name) {
            return dictionary.clone();
        }
        self.with_dictionary_mut(name, |d| d.clone())
    }

    /// Delete the named dictionary. Missing names are ignored.
    pub fn remove_dictionary(&self, name: Option<&str>) {
        let name = resolve_name(name);
        if self.dictionaries.write().remove(name).is_some() {
            tracing::info!(dictionary = %name, "dictionary removed");
        }
    }

    /// Empty the named dictionary's word list.
    pub fn clean_dictionary(&self, name: Option<&str>) {
        self.with_dictionary_mut(resolve_name(name), Dictionary::clean);
    }

    /// Names of all registered dictionaries, sorted.
    pub fn dictionary_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dictionaries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// A view of this filter with the dictionary name fixed.
    pub fn filter_by_dictionary(&self, name: Option<&str>) -> DictionaryFilter<'_> {
        DictionaryFilter::new(self, resolve_name(name))
    }

    /// Take a shared handle to the compiled pattern, creating the dictionary
    /// if needed. Matching then runs without holding the lock, so replacer
    /// callbacks may call back into the filter.
    fn pattern_for(&self, name: &str) -> Option<Arc<CompiledPattern>> {
        if let Some(dictionary) = self.dictionaries.read().get(name) {
            return dictionary.shared_pattern();
        }
        self.with_dictionary_mut(name, |d| d.shared_pattern())
    }

    fn with_dictionary_mut<R>(&self, name: &str, f: impl FnOnce(&mut Dictionary) -> R) -> R {
        let mut dictionaries = self.dictionaries.write();
        let dictionary = dictionaries.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(dictionary = %name, "creating dictionary on first use");
            Dictionary::with_default_symbols(name)
        });
        f(dictionary)
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}
