//! CLI module for wordveil commands.
//!
//! ## Usage
//!
//! ```bash
//! wordveil-cli check --config words.toml --dict en "some text"
//! echo "some text" | wordveil-cli sanitize --dict en --by-word
//! wordveil-cli dict show --config words.toml --dict en
//! wordveil-cli config validate --config words.toml
//! ```

pub mod config_cmd;
pub mod text_cmd;

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{self, ConfigError, FilterConfig};
use crate::filter::FilterError;

/// Exit code: success, or no dictionary word found.
pub const EXIT_OK: i32 = 0;
/// Exit code: dictionary word found, or command failure.
pub const EXIT_FOUND: i32 = 1;
/// Exit code: configuration or usage error.
pub const EXIT_CONFIG: i32 = 2;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Options shared by the text and config subcommands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub config_path: Option<PathBuf>,
    pub dictionary: Option<String>,
    pub replacer: Option<String>,
    pub replace_by_word: Option<bool>,
    /// Positional words joined with single spaces.
    pub text: Option<String>,
}

impl CommandArgs {
    /// Parse options following the subcommand name.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut parsed = Self::default();
        let mut positional: Vec<&str> = Vec::new();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config_path = Some(PathBuf::from(value(&mut iter, arg)?)),
                "--dict" | "-d" => parsed.dictionary = Some(value(&mut iter, arg)?),
                "--replacer" | "-r" => parsed.replacer = Some(value(&mut iter, arg)?),
                "--by-word" => parsed.replace_by_word = Some(true),
                "--by-char" => parsed.replace_by_word = Some(false),
                "--" => {
                    positional.extend(iter.by_ref().map(String::as_str));
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(CliError::UnknownOption(flag.to_string()));
                }
                word => positional.push(word),
            }
        }

        if !positional.is_empty() {
            parsed.text = Some(positional.join(" "));
        }
        Ok(parsed)
    }

    /// Load config from `--config` (if any) with env overrides applied.
    pub fn load_config(&self) -> Result<FilterConfig, CliError> {
        Ok(config::load(self.config_path.as_deref())?)
    }

    /// The text argument, or all of stdin when none was given.
    pub fn input_text(&self) -> Result<String, CliError> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

fn value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String, CliError> {
    iter.next()
        .cloned()
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}
