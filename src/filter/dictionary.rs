//! Named dictionaries of word patterns.
//!
//! A dictionary owns its word list and keeps the compiled pattern in step
//! with it. Each word is validated once, when it is added; the combined
//! pattern is dropped on every mutation and rebuilt on the next lookup.

use std::sync::{Arc, OnceLock};

use serde::Serialize;

use super::error::FilterError;
use super::pattern::{self, CompiledPattern, Fragment, Matches, SymbolAlternatives};

/// Reserved name of the dictionary used when no name is given.
pub const DEFAULT_DICTIONARY_NAME: &str = "default";

/// Substitution table given to dictionaries created on first reference.
pub fn default_symbol_alternatives() -> SymbolAlternatives {
    let mut table = SymbolAlternatives::new();
    table.insert('o', vec!["0".to_string()]);
    table.insert(
        'e',
        ["3", "&", "€", "é", "è"].iter().map(|s| s.to_string()).collect(),
    );
    table.insert('a', vec!["4".to_string(), "à".to_string()]);
    table.insert('s', vec!["$".to_string()]);
    table
}

/// A named, mutable list of word patterns plus its compiled matcher.
#[derive(Debug, Clone, Serialize)]
pub struct Dictionary {
    name: String,
    words: Vec<String>,
    symbol_alternatives: Option<SymbolAlternatives>,
    /// Prepared form of each entry of `words`, index for index.
    #[serde(skip)]
    fragments: Vec<Fragment>,
    #[serde(skip)]
    pattern: OnceLock<Option<Arc<CompiledPattern>>>,
}

impl Dictionary {
    /// Create an empty dictionary that matches words literally.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: Vec::new(),
            symbol_alternatives: None,
            fragments: Vec::new(),
            pattern: OnceLock::new(),
        }
    }

    /// Create an empty dictionary carrying the default substitution table.
    pub fn with_default_symbols(name: impl Into<String>) -> Self {
        Self::new(name).with_symbol_alternatives(default_symbol_alternatives())
    }

    /// Replace the word list.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words = words.into_iter().map(Into::into).collect();
        self.reprepare();
        self
    }

    /// Replace the substitution table. Keys are folded to lowercase; an
    /// empty table turns substitution off.
    pub fn with_symbol_alternatives(mut self, table: SymbolAlternatives) -> Self {
        let mut folded = SymbolAlternatives::new();
        for (key, alternatives) in table {
            let key = key.to_lowercase().next().unwrap_or(key);
            folded.entry(key).or_default().extend(alternatives);
        }
        self.symbol_alternatives = (!folded.is_empty()).then_some(folded);
        self.reprepare();
        self
    }

    /// Build a substitution table from string keys, as found in config files.
    pub fn symbol_table_from_strings<I, K>(entries: I) -> Result<SymbolAlternatives, FilterError>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        let mut table = SymbolAlternatives::new();
        for (key, alternatives) in entries {
            let key = key.as_ref();
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    table.entry(c).or_default().extend(alternatives);
                }
                _ => {
                    return Err(FilterError::InvalidSymbol {
                        key: key.to_string(),
                    })
                }
            }
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Word patterns in insertion order, duplicates included.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn symbol_alternatives(&self) -> Option<&SymbolAlternatives> {
        self.symbol_alternatives.as_ref()
    }

    /// Number of words that are not valid patterns and never match.
    pub fn skipped(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f, Fragment::Invalid))
            .count()
    }

    /// The compiled matcher, or `None` if nothing can match.
    pub fn pattern(&self) -> Option<&CompiledPattern> {
        self.compiled().as_deref()
    }

    /// Returns true if any word of this dictionary occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern().is_some_and(|p| p.is_match(text))
    }

    /// Iterate over word matches in `text`; empty if nothing can match.
    pub fn find_iter<'p, 't>(&'p self, text: &'t str) -> Option<Matches<'p, 't>> {
        self.pattern().map(|p| p.find_iter(text))
    }

    /// Shared handle to the compiled matcher, usable after the dictionary
    /// itself is no longer borrowed.
    pub(crate) fn shared_pattern(&self) -> Option<Arc<CompiledPattern>> {
        self.compiled().clone()
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = self.symbol_alternatives.as_ref();
        for word in words {
            let word = word.into();
            self.fragments.push(pattern::prepare_word(&word, symbols));
            self.words.push(word);
        }
        self.invalidate();
    }

    /// Drop every stored entry equal to one of `words`.
    pub(crate) fn remove_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doomed: Vec<S> = words.into_iter().collect();
        let words = std::mem::take(&mut self.words);
        let fragments = std::mem::take(&mut self.fragments);
        let (words, fragments): (Vec<String>, Vec<Fragment>) = words
            .into_iter()
            .zip(fragments)
            .filter(|(w, _)| !doomed.iter().any(|d| d.as_ref() == w.as_str()))
            .unzip();
        self.words = words;
        self.fragments = fragments;
        self.invalidate();
    }

    pub(crate) fn clean(&mut self) {
        self.words.clear();
        self.fragments.clear();
        self.invalidate();
    }

    /// Prepare every word again, after the word list or table was replaced.
    fn reprepare(&mut self) {
        let symbols = self.symbol_alternatives.as_ref();
        self.fragments = self
            .words
            .iter()
            .map(|w| pattern::prepare_word(w, symbols))
            .collect();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.pattern = OnceLock::new();
    }

    fn compiled(&self) -> &Option<Arc<CompiledPattern>> {
        self.pattern.get_or_init(|| {
            let valid = self.fragments.iter().filter_map(|f| match f {
                Fragment::Valid(source) => Some(source.as_str()),
                _ => None,
            });
            let compiled = pattern::assemble(valid, self.skipped()).map(Arc::new);
            tracing::debug!(
                dictionary = %self.name,
                words = self.words.len(),
                skipped = self.skipped(),
                matchable = compiled.is_some(),
                "dictionary compiled"
            );
            compiled
        })
    }
}
