//! A view of one dictionary of a shared filter.

use std::borrow::Cow;

use super::dictionary::Dictionary;
use super::replacer::SanitizeOptions;
use super::WordFilter;

/// Operations of a [`WordFilter`] with the dictionary name fixed.
///
/// Holds a reference to the filter, not a copy of the dictionary, so changes
/// made through the view are visible to the filter and the other way round.
#[derive(Debug, Clone)]
pub struct DictionaryFilter<'f> {
    filter: &'f WordFilter,
    name: String,
}

impl<'f> DictionaryFilter<'f> {
    pub(crate) fn new(filter: &'f WordFilter, name: &str) -> Self {
        Self {
            filter,
            name: name.to_string(),
        }
    }

    /// Name of the bound dictionary.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, text: &str) -> bool {
        self.filter.check(text, Some(&self.name))
    }

    pub fn sanitize<'t>(&self, text: &'t str, options: Option<&SanitizeOptions>) -> Cow<'t, str> {
        self.filter.sanitize(text, Some(&self.name), options)
    }

    pub fn add_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.add_words(words, Some(&self.name));
    }

    pub fn remove_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter.remove_words(words, Some(&self.name));
    }

    pub fn get_dictionary(&self) -> Dictionary {
        self.filter.get_dictionary(Some(&self.name))
    }

    pub fn clean_dictionary(&self) {
        self.filter.clean_dictionary(Some(&self.name));
    }
}
