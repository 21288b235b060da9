//! Text subcommands: check, sanitize, and dictionary inspection.

use super::{CliError, CommandArgs, EXIT_CONFIG, EXIT_FOUND, EXIT_OK};
use crate::filter::{Replacer, SanitizeOptions, WordFilter};

/// Build the filter described by the command's config.
fn build_filter(args: &CommandArgs) -> Result<WordFilter, CliError> {
    Ok(args.load_config()?.build()?)
}

fn report(err: CliError) -> i32 {
    eprintln!("Error: {}", err);
    EXIT_CONFIG
}

/// Per-call overrides taken from `--replacer` / `--by-word` / `--by-char`.
pub fn sanitize_options(args: &CommandArgs) -> SanitizeOptions {
    SanitizeOptions {
        replacer: args.replacer.clone().map(Replacer::Text),
        replace_by_word: args.replace_by_word,
    }
}

/// Check text for dictionary words.
///
/// Returns 0 if the text is clean, 1 if a word was found.
pub fn run_check(args: &CommandArgs) -> i32 {
    let result = build_filter(args).and_then(|filter| {
        let text = args.input_text()?;
        Ok(filter.check(&text, args.dictionary.as_deref()))
    });
    match result {
        Ok(true) => {
            println!("found");
            EXIT_FOUND
        }
        Ok(false) => {
            println!("clean");
            EXIT_OK
        }
        Err(e) => report(e),
    }
}

/// Print the sanitized text.
pub fn run_sanitize(args: &CommandArgs) -> i32 {
    let result = build_filter(args).and_then(|filter| {
        let text = args.input_text()?;
        let options = sanitize_options(args);
        Ok(filter
            .sanitize(&text, args.dictionary.as_deref(), Some(&options))
            .into_owned())
    });
    match result {
        Ok(sanitized) => {
            print!("{}", sanitized);
            if !sanitized.ends_with('\n') {
                println!();
            }
            EXIT_OK
        }
        Err(e) => report(e),
    }
}

/// Render a dictionary snapshot as pretty JSON.
pub fn dictionary_json(filter: &WordFilter, name: Option<&str>) -> String {
    let dictionary = filter.get_dictionary(name);
    serde_json::to_string_pretty(&dictionary).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

/// Print a dictionary snapshot.
pub fn run_dict_show(args: &CommandArgs) -> i32 {
    match build_filter(args) {
        Ok(filter) => {
            println!("{}", dictionary_json(&filter, args.dictionary.as_deref()));
            EXIT_OK
        }
        Err(e) => report(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_options_from_args() {
        let args = CommandArgs {
            replacer: Some("#".to_string()),
            ..Default::default()
        };
        let options = sanitize_options(&args);
        assert!(matches!(options.replacer, Some(Replacer::Text(ref t)) if t == "#"));
        assert_eq!(options.replace_by_word, None);
    }

    #[test]
    fn test_dictionary_json_lists_words() {
        let filter = WordFilter::default();
        filter.add_words(["flower", "bees"], Some("en"));
        let json: serde_json::Value =
            serde_json::from_str(&dictionary_json(&filter, Some("en"))).unwrap();
        assert_eq!(json["name"], "en");
        assert_eq!(json["words"], serde_json::json!(["flower", "bees"]));
        assert_eq!(json["symbol_alternatives"]["o"], serde_json::json!(["0"]));
        assert!(json.get("pattern").is_none());
    }

    #[test]
    fn test_check_with_inline_text() {
        let args = CommandArgs {
            text: Some("nothing here".to_string()),
            ..Default::default()
        };
        // Default config has empty dictionaries, so nothing is ever found.
        assert_eq!(run_check(&args), EXIT_OK);
    }
}
