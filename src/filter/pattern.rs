//! Pattern compiler for dictionary word lists.
//!
//! Every word is expanded against the symbol table (`o` -> `(?:o|0)`), the
//! expanded words are joined into one alternation, and the alternation is
//! wrapped so a match must sit between non-word characters or text edges.
//! Word patterns are NFC-normalized first so decomposed input words behave
//! like their composed forms.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

/// Per-character substitution table. Keys are stored lowercase.
pub type SymbolAlternatives = BTreeMap<char, Vec<String>>;

/// Capture group holding the matched word (group 0 includes the boundaries).
const WORD_GROUP: usize = 1;

/// Compiled matcher for a whole dictionary.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    /// Words that failed to compile on their own and were left out.
    skipped: usize,
}

/// Byte range of a matched word, boundaries excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    pub start: usize,
    pub end: usize,
}

impl WordMatch {
    /// Slice the matched word out of the searched text.
    pub fn as_str<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

impl CompiledPattern {
    /// The regex source this pattern was built from.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of words excluded because they were not valid patterns.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns true if any dictionary word occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.find_iter(text).next().is_some()
    }

    /// Iterate over every non-overlapping word match, left to right.
    pub fn find_iter<'p, 't>(&'p self, text: &'t str) -> Matches<'p, 't> {
        Matches {
            regex: &self.regex,
            text,
            pos: 0,
        }
    }
}

/// Iterator over word matches.
///
/// The boundary characters are consumed by the regex, so scanning resumes at
/// the end of the word group rather than the end of the whole match. That way
/// the separator after one word can also serve as the separator before the
/// next one.
pub struct Matches<'p, 't> {
    regex: &'p Regex,
    text: &'t str,
    pos: usize,
}

impl Iterator for Matches<'_, '_> {
    type Item = WordMatch;

    fn next(&mut self) -> Option<WordMatch> {
        while self.pos <= self.text.len() {
            let caps = self.regex.captures_at(self.text, self.pos)?;
            let whole = caps.get(0)?;
            let word = caps.get(WORD_GROUP)?;

            if word.start() < word.end() {
                self.pos = word.end();
                return Some(WordMatch {
                    start: word.start(),
                    end: word.end(),
                });
            }

            // Empty word match: step one character past where it began.
            let step = self.text[whole.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.pos = whole.start() + step;
        }
        None
    }
}

/// Compile a word list into a single matcher.
///
/// Returns `None` when nothing can match: the list is empty, every word was
/// empty or invalid, or the combined pattern was rejected by the regex engine.
pub fn compile(words: &[String], symbols: Option<&SymbolAlternatives>) -> Option<CompiledPattern> {
    let mut fragments = Vec::with_capacity(words.len());
    let mut skipped = 0;
    for word in words {
        match prepare_word(word, symbols) {
            Fragment::Valid(fragment) => fragments.push(fragment),
            Fragment::Invalid => skipped += 1,
            Fragment::Empty => {}
        }
    }
    assemble(fragments.iter().map(String::as_str), skipped)
}

/// Outcome of preparing a single word pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fragment {
    /// Nothing left after normalization.
    Empty,
    /// Rejected by the regex engine on its own.
    Invalid,
    /// Expanded source, known to compile.
    Valid(String),
}

/// Normalize, expand and validate one word pattern.
pub(crate) fn prepare_word(word: &str, symbols: Option<&SymbolAlternatives>) -> Fragment {
    let normalized: String = word.nfc().collect();
    if normalized.is_empty() {
        return Fragment::Empty;
    }
    let fragment = match symbols {
        Some(table) if !table.is_empty() => expand_word(&normalized, table),
        _ => normalized,
    };
    match build(&format!("(?:{})", fragment)) {
        Ok(_) => Fragment::Valid(fragment),
        Err(e) => {
            tracing::warn!(word = %word, error = %e, "skipping invalid word pattern");
            Fragment::Invalid
        }
    }
}

/// Join already validated fragments into the dictionary matcher.
pub(crate) fn assemble<'a>(
    fragments: impl Iterator<Item = &'a str>,
    skipped: usize,
) -> Option<CompiledPattern> {
    let fragments: Vec<&str> = fragments.collect();
    if fragments.is_empty() {
        return None;
    }

    let source = format!(r"(?:^|\W)({})(?:\W|$)", fragments.join("|"));
    match build(&source) {
        Ok(regex) => Some(CompiledPattern { regex, skipped }),
        Err(e) => {
            tracing::warn!(words = fragments.len(), error = %e, "dictionary pattern rejected");
            None
        }
    }
}

fn build(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// Expand substitutable characters of one word pattern into alternations.
///
/// Escape sequences are copied untouched, as is anything inside a character
/// class or a `{n,m}` repetition count.
fn expand_word(word: &str, symbols: &SymbolAlternatives) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    let mut chars = word.chars();
    let mut class_depth = 0usize;
    let mut in_repetition = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                class_depth += 1;
                out.push(c);
            }
            ']' if class_depth > 0 => {
                class_depth -= 1;
                out.push(c);
            }
            '{' if class_depth == 0 => {
                in_repetition = true;
                out.push(c);
            }
            '}' if in_repetition => {
                in_repetition = false;
                out.push(c);
            }
            _ if class_depth > 0 || in_repetition => out.push(c),
            _ => match lookup(symbols, c) {
                Some(alternatives) => push_alternation(&mut out, c, alternatives),
                None => out.push(c),
            },
        }
    }
    out
}

fn lookup(symbols: &SymbolAlternatives, c: char) -> Option<&Vec<String>> {
    c.to_lowercase().next().and_then(|lower| symbols.get(&lower))
}

fn push_alternation(out: &mut String, c: char, alternatives: &[String]) {
    out.push_str("(?:");
    out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4])));
    for alternative in alternatives {
        let alternative: String = alternative.nfc().collect();
        if alternative.is_empty() {
            continue;
        }
        out.push('|');
        out.push_str(&regex::escape(&alternative));
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(char, &[&str])]) -> SymbolAlternatives {
        entries
            .iter()
            .map(|(k, v)| (*k, v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_expand_replaces_table_characters() {
        let symbols = table(&[('o', &["0"])]);
        assert_eq!(expand_word("flower", &symbols), "fl(?:o|0)wer");
    }

    #[test]
    fn test_expand_escapes_syntax_in_substitutes() {
        let symbols = table(&[('s', &["$"])]);
        assert_eq!(expand_word("bass", &symbols), r"ba(?:s|\$)(?:s|\$)");
    }

    #[test]
    fn test_expand_keeps_escape_sequences() {
        let symbols = table(&[('s', &["$"]), ('w', &["vv"])]);
        assert_eq!(expand_word(r"sun\sflower", &symbols), r"(?:s|\$)un\sflo(?:w|vv)er");
    }

    #[test]
    fn test_expand_skips_classes_and_repetitions() {
        let symbols = table(&[('a', &["4"]), ('1', &["!"])]);
        assert_eq!(expand_word("b[a-z]{1}a", &symbols), "b[a-z]{1}(?:a|4)");
    }

    #[test]
    fn test_expand_is_case_insensitive_on_keys() {
        let symbols = table(&[('o', &["0"])]);
        assert_eq!(expand_word("FlOwer", &symbols), "Fl(?:O|0)wer");
    }

    #[test]
    fn test_compile_empty_list_is_none() {
        assert!(compile(&[], None).is_none());
        assert!(compile(&words(&["", ""]), None).is_none());
    }

    #[test]
    fn test_compile_skips_invalid_words() {
        let pattern = compile(&words(&["flower", "(unclosed"]), None).unwrap();
        assert_eq!(pattern.skipped(), 1);
        assert!(pattern.is_match("a flower"));
    }

    #[test]
    fn test_prepare_word_outcomes() {
        let symbols = table(&[('o', &["0"])]);
        assert_eq!(prepare_word("", Some(&symbols)), Fragment::Empty);
        assert_eq!(prepare_word("(open", Some(&symbols)), Fragment::Invalid);
        assert_eq!(
            prepare_word("flower", Some(&symbols)),
            Fragment::Valid("fl(?:o|0)wer".to_string())
        );
        assert_eq!(prepare_word("flower", None), Fragment::Valid("flower".to_string()));
    }

    #[test]
    fn test_unbalanced_words_do_not_pair_up() {
        let pattern = compile(&words(&["(", ")", "bees"]), None).unwrap();
        assert_eq!(pattern.skipped(), 2);
        assert!(pattern.is_match("two bees"));
        assert!(!pattern.is_match("a ( b"));
    }

    #[test]
    fn test_compile_all_invalid_is_none() {
        assert!(compile(&words(&["[oops"]), None).is_none());
    }

    #[test]
    fn test_adjacent_words_both_match() {
        let pattern = compile(&words(&["flower"]), None).unwrap();
        let found: Vec<_> = pattern.find_iter("flower flower").collect();
        assert_eq!(
            found,
            vec![WordMatch { start: 0, end: 6 }, WordMatch { start: 7, end: 13 }]
        );
    }

    #[test]
    fn test_empty_word_matches_are_ignored() {
        let pattern = compile(&words(&["x?"]), None).unwrap();
        assert!(!pattern.is_match("a b c"));
        assert!(pattern.is_match("a x c"));
    }

    #[test]
    fn test_match_positions_exclude_boundaries() {
        let pattern = compile(&words(&["bees"]), None).unwrap();
        let text = "(bees!)";
        let m = pattern.find_iter(text).next().unwrap();
        assert_eq!(m.as_str(text), "bees");
    }
}
