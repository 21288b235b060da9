//! Config CLI subcommands: show, defaults, validate.

use super::{CommandArgs, EXIT_CONFIG, EXIT_FOUND, EXIT_OK};
use crate::config::{FilterConfig, ENV_REPLACER, ENV_REPLACE_BY_WORD};

/// Print the effective config (file plus env overrides).
pub fn run_show(args: &CommandArgs) -> i32 {
    match args.load_config() {
        Ok(cfg) => {
            print_config(&cfg);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_CONFIG
        }
    }
}

/// Print built-in defaults, ignoring files and env.
pub fn run_defaults() {
    print_config(&FilterConfig::default());
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 if warnings were found, 2 if it cannot be loaded.
pub fn run_validate(args: &CommandArgs) -> i32 {
    let cfg = match args.load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG;
        }
    };
    let filter = match cfg.build() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG;
        }
    };

    let mut warnings = 0;
    for entry in &cfg.dictionaries {
        let dictionary = filter.get_dictionary(Some(&entry.name));
        let skipped = dictionary.pattern().map_or(0, |p| p.skipped());
        if !entry.words.is_empty() && dictionary.pattern().is_none() {
            eprintln!("WARNING: dictionary \"{}\" has no usable word pattern", entry.name);
            warnings += 1;
        } else if skipped > 0 {
            eprintln!(
                "WARNING: dictionary \"{}\" skips {} invalid word pattern(s)",
                entry.name, skipped
            );
            warnings += 1;
        }
    }

    if warnings == 0 {
        println!("Configuration is valid.");
        EXIT_OK
    } else {
        EXIT_FOUND
    }
}

fn print_config(cfg: &FilterConfig) {
    println!("{}={}", ENV_REPLACER, cfg.replacer);
    println!("{}={}", ENV_REPLACE_BY_WORD, cfg.replace_by_word);
    for entry in &cfg.dictionaries {
        println!(
            "dictionary.{}.words={} use_default_symbols={}",
            entry.name,
            entry.words.len(),
            entry.use_default_symbols
        );
    }
}
