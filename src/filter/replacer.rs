//! Replacement policy for matched words.

use std::fmt;
use std::sync::Arc;

/// Transform applied to each matched word.
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// What a matched word is replaced with.
#[derive(Clone)]
pub enum Replacer {
    /// A fixed token, used whole or repeated per character.
    Text(String),
    /// Caller-supplied transform of the matched text.
    Transform(TransformFn),
}

impl Replacer {
    /// Wrap a closure as a transform replacer.
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Transform(Arc::new(f))
    }
}

impl Default for Replacer {
    fn default() -> Self {
        Self::Text("*".to_string())
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl From<&str> for Replacer {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Replacer {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Per-call overrides for `sanitize`. Unset fields fall back to the
/// filter's own defaults, each field independently.
#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    pub replacer: Option<Replacer>,
    pub replace_by_word: Option<bool>,
}

impl SanitizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replacer(mut self, replacer: impl Into<Replacer>) -> Self {
        self.replacer = Some(replacer.into());
        self
    }

    pub fn replace_by_word(mut self, by_word: bool) -> Self {
        self.replace_by_word = Some(by_word);
        self
    }
}

/// Replacement rule in effect for one `sanitize` call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReplacementPolicy<'a> {
    replacer: &'a Replacer,
    by_word: bool,
}

impl<'a> ReplacementPolicy<'a> {
    pub(crate) fn resolve(
        default_replacer: &'a Replacer,
        default_by_word: bool,
        options: Option<&'a SanitizeOptions>,
    ) -> Self {
        let replacer = options
            .and_then(|o| o.replacer.as_ref())
            .unwrap_or(default_replacer);
        let by_word = options
            .and_then(|o| o.replace_by_word)
            .unwrap_or(default_by_word);
        Self { replacer, by_word }
    }

    /// Replacement text for one matched word.
    pub(crate) fn apply(&self, matched: &str) -> String {
        match self.replacer {
            Replacer::Transform(f) => f(matched),
            Replacer::Text(token) if self.by_word => token.clone(),
            Replacer::Text(token) => token.repeat(matched.chars().count()),
        }
    }
}
