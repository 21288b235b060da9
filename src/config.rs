//! Filter configuration loading from TOML files and environment variables.
//!
//! A config file describes the default replacement policy and any number of
//! dictionaries. Environment variables override the replacement policy;
//! invalid values fall back to the file or built-in value without failing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `WORDVEIL_REPLACER` | `*` | Replacement token |
//! | `WORDVEIL_REPLACE_BY_WORD` | `false` | Replace whole words instead of per character |
//!
//! # File format
//!
//! ```toml
//! replacer = "*"
//! replace_by_word = false
//!
//! [[dictionaries]]
//! name = "en"
//! words = ["flowers?", "bees"]
//! use_default_symbols = true
//!
//! [dictionaries.symbol_alternatives]
//! i = ["1", "!"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::{
    default_symbol_alternatives, Dictionary, FilterError, FilterOptions, Replacer, WordFilter,
};

pub const ENV_REPLACER: &str = "WORDVEIL_REPLACER";
pub const ENV_REPLACE_BY_WORD: &str = "WORDVEIL_REPLACE_BY_WORD";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Filter(#[from] FilterError),
}

/// Top-level filter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub replacer: String,
    pub replace_by_word: bool,
    pub dictionaries: Vec<DictionaryConfig>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            replacer: "*".to_string(),
            replace_by_word: false,
            dictionaries: Vec::new(),
        }
    }
}

/// One dictionary entry of a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    pub name: String,
    #[serde(default)]
    pub words: Vec<String>,
    /// Start from the built-in substitution table before applying
    /// `symbol_alternatives`.
    #[serde(default)]
    pub use_default_symbols: bool,
    #[serde(default)]
    pub symbol_alternatives: BTreeMap<String, Vec<String>>,
}

impl DictionaryConfig {
    /// Build the dictionary this entry describes.
    pub fn to_dictionary(&self) -> Result<Dictionary, FilterError> {
        let mut table = if self.use_default_symbols {
            default_symbol_alternatives()
        } else {
            BTreeMap::new()
        };
        let extra = Dictionary::symbol_table_from_strings(self.symbol_alternatives.clone())?;
        for (key, alternatives) in extra {
            let key = key.to_lowercase().next().unwrap_or(key);
            table.insert(key, alternatives);
        }
        Ok(Dictionary::new(self.name.as_str())
            .with_symbol_alternatives(table)
            .with_words(self.words.iter().cloned()))
    }
}

impl FilterConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Construction options for the filter, without dictionaries.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            dictionary: None,
            replacer: Replacer::Text(self.replacer.clone()),
            replace_by_word: self.replace_by_word,
        }
    }

    /// Build a filter with every configured dictionary registered.
    pub fn build(&self) -> Result<WordFilter, ConfigError> {
        let filter = WordFilter::new(self.filter_options());
        for entry in &self.dictionaries {
            filter.add_dictionary(entry.to_dictionary()?)?;
        }
        Ok(filter)
    }
}

/// Read and parse a config file.
pub fn load_file(path: &Path) -> Result<FilterConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = FilterConfig::from_toml_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        dictionaries = config.dictionaries.len(),
        "config file loaded"
    );
    Ok(config)
}

/// Parse a boolean env var, returning `default` on missing or invalid.
fn parse_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Overlay environment overrides onto `config`.
pub fn apply_env(config: &mut FilterConfig) {
    if let Ok(replacer) = std::env::var(ENV_REPLACER) {
        if !replacer.is_empty() {
            config.replacer = replacer;
        }
    }
    config.replace_by_word = parse_bool(ENV_REPLACE_BY_WORD, config.replace_by_word);
}

/// Load configuration: the file if given (defaults otherwise), then env.
pub fn load(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => FilterConfig::default(),
    };
    apply_env(&mut config);
    Ok(config)
}
