//! wordveil command-line entry point.
//!
//! ## CLI Subcommands
//!
//! - `wordveil-cli check` - Exit 1 if the text contains a dictionary word
//! - `wordveil-cli sanitize` - Print the text with dictionary words masked
//! - `wordveil-cli dict show` - Print a dictionary as JSON
//! - `wordveil-cli config show|defaults|validate` - Inspect configuration

use std::process::ExitCode;

use wordveil::cli::{config_cmd, text_cmd, CommandArgs, EXIT_CONFIG};
use wordveil::telemetry::{init_logging, LogConfig, LogFormat};

fn main() -> ExitCode {
    let log_config = LogConfig {
        format: LogFormat::Pretty,
        ..Default::default()
    }
    .with_env();
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Logging disabled: {}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    let code = match command {
        "check" => with_args(&args[2..], text_cmd::run_check),
        "sanitize" => with_args(&args[2..], text_cmd::run_sanitize),
        "dict" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            let rest = args.get(3..).unwrap_or(&[]);
            match subcommand {
                "show" => with_args(rest, text_cmd::run_dict_show),
                _ => {
                    eprintln!("Unknown dict subcommand: {}", subcommand);
                    print_command_help("dict");
                    EXIT_CONFIG
                }
            }
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            let rest = args.get(3..).unwrap_or(&[]);
            match subcommand {
                "show" => with_args(rest, config_cmd::run_show),
                "defaults" => {
                    config_cmd::run_defaults();
                    0
                }
                "validate" => with_args(rest, config_cmd::run_validate),
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_command_help("config");
                    EXIT_CONFIG
                }
            }
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = args.get(2) {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            0
        }
        "version" | "--version" | "-V" => {
            println!("wordveil {}", env!("CARGO_PKG_VERSION"));
            0
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            EXIT_CONFIG
        }
    };

    ExitCode::from(code as u8)
}

fn with_args(raw: &[String], run: impl FnOnce(&CommandArgs) -> i32) -> i32 {
    match CommandArgs::parse(raw) {
        Ok(args) => run(&args),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_CONFIG
        }
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "wordveil - dictionary word matching and redaction v{}

USAGE:
    wordveil-cli [COMMAND] [OPTIONS] [TEXT]

COMMANDS:
    check        Exit 1 if TEXT (or stdin) contains a dictionary word
    sanitize     Print TEXT (or stdin) with dictionary words replaced
    dict show    Print a dictionary as JSON
    config       Inspect configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

OPTIONS:
    -c, --config PATH    TOML config file with dictionaries
    -d, --dict NAME      Dictionary to use (default: \"default\")
    -r, --replacer TEXT  Replacement token for this call
    --by-word            Replace each match with the token once
    --by-char            Repeat the token once per matched character

ENVIRONMENT:
    WORDVEIL_REPLACER         Default replacement token (default: *)
    WORDVEIL_REPLACE_BY_WORD  Replace whole words (default: false)
    WORDVEIL_LOG              Log filter (default: warn)
    WORDVEIL_LOG_FORMAT       json or pretty (default: pretty)

EXIT CODES:
    0  Success / Clean
    1  Word found / Validation warnings
    2  Configuration or usage error",
        version
    );
}

fn print_command_help(command: &str) {
    match command {
        "check" => eprintln!("wordveil-cli check [--config PATH] [--dict NAME] [TEXT]"),
        "sanitize" => eprintln!(
            "wordveil-cli sanitize [--config PATH] [--dict NAME] [--replacer TEXT] [--by-word|--by-char] [TEXT]"
        ),
        "dict" => eprintln!("wordveil-cli dict show [--config PATH] [--dict NAME]"),
        "config" => eprintln!("wordveil-cli config show|defaults|validate [--config PATH]"),
        _ => print_usage(),
    }
}
