//! Command-line interface for sml
//! This binary parses sml markup, prints the runs it describes and writes it back out.
//!
//! Usage:
//!   sml convert `<path>` [--runs] [--strict]    - Re-emit markup with minimal tags
//!   sml inspect `<path>` [--format `<format>`]  - Print the compacted runs
//!   sml tokens `<path>` [--format `<format>`]   - Print the raw token stream
//!   sml sample                                  - Run the built-in sample
//!
//! A path of `-` reads from stdin. `--config <file>` layers a TOML file over the
//! defaults, `-v` (repeatable) raises the log level.

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{LevelFilter, Log, Metadata, Record};
use sml::sml::config::{Loader, SmlConfig};
use sml::sml::error::ProcessingError;
use sml::sml::lexing::tokenize;
use sml::sml::processor::{
    convert, format_document, format_tokens, parse_markup, OutputFormat, SAMPLE,
};
use std::io::Read;

/// Writes log records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the sml file, or - for stdin")
        .required(true)
        .index(1)
}

fn format_help() -> String {
    format!("Output format ({})", OutputFormat::available().join(", "))
}

fn build_cli() -> Command {
    Command::new("sml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing, inspecting and re-emitting sml markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (repeatable)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Parse markup and write it back out with minimal tags")
                .arg(path_arg())
                .arg(
                    Arg::new("runs")
                        .long("runs")
                        .help("Print the compacted runs before the markup")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on malformed (truncated) input")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the compacted runs")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help(format_help()),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the raw token stream")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help(format_help())
                        .default_value("json"),
                ),
        )
        .subcommand(Command::new("sample").about("Run the built-in sample document"))
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    init_logging(matches.get_count("verbose"), &config);

    let result = match matches.subcommand() {
        Some(("convert", sub)) => handle_convert_command(path_of(sub), &config),
        Some(("inspect", sub)) => handle_inspect_command(path_of(sub), &config),
        Some(("tokens", sub)) => {
            let format = sub.get_one::<String>("format").expect("format has a default");
            handle_tokens_command(path_of(sub), format)
        }
        Some(("sample", _)) => handle_sample_command(),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn path_of(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .expect("path is required")
}

/// Build the configuration from defaults, the optional user file and flags
fn load_config(matches: &ArgMatches) -> Result<SmlConfig, ProcessingError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    match matches.subcommand() {
        Some(("convert", sub)) => {
            if sub.get_flag("runs") {
                loader = loader.set_override("convert.print_runs", true)?;
            }
            if sub.get_flag("strict") {
                loader = loader.set_override("convert.strict", true)?;
            }
        }
        Some(("inspect", sub)) => {
            if let Some(format) = sub.get_one::<String>("format") {
                format.parse::<OutputFormat>()?;
                loader = loader.set_override("inspect.format", format.as_str())?;
            }
        }
        _ => {}
    }

    Ok(loader.build()?)
}

fn init_logging(verbosity: u8, config: &SmlConfig) {
    let level = match verbosity {
        0 => config.logging.level_filter(),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn read_input(path: &str) -> Result<String, ProcessingError> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Handle the convert command
fn handle_convert_command(path: &str, config: &SmlConfig) -> Result<(), ProcessingError> {
    let source = read_input(path)?;
    let conversion = convert(&source)?;

    if let Some(truncation) = conversion.truncation {
        if config.convert.strict {
            return Err(ProcessingError::Truncated(truncation));
        }
    }
    if config.convert.print_runs {
        print!("{}", conversion.document);
    }
    println!("{}", conversion.sml);
    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, config: &SmlConfig) -> Result<(), ProcessingError> {
    let source = read_input(path)?;
    let (document, _) = parse_markup(&source)?;
    print!("{}", format_document(&document, config.inspect.format)?);
    Ok(())
}

/// Handle the tokens command
fn handle_tokens_command(path: &str, format: &str) -> Result<(), ProcessingError> {
    let format = format.parse::<OutputFormat>()?;
    let source = read_input(path)?;
    let stream = tokenize(&source);
    print!("{}", format_tokens(stream.tokens(), format)?);
    if let Some(truncation) = stream.truncation() {
        eprintln!("Note: input truncated: {}", truncation);
    }
    Ok(())
}

/// Handle the sample command
fn handle_sample_command() -> Result<(), ProcessingError> {
    let conversion = convert(SAMPLE)?;
    print!("{}", conversion.document);
    println!("{}", conversion.sml);
    Ok(())
}
