//! SuiteRunner CLI Entry Point
//!
//! Provides a command-line host that selects a registered suite and runs it.
//!
//! # Usage
//!
//! ```bash
//! # Run the sample suite
//! suiterunner
//!
//! # Run a suite by name
//! suiterunner sample
//!
//! # Preview the execution order without invoking anything
//! suiterunner sample --dry-run
//!
//! # Same, as JSON
//! suiterunner sample --dry-run --json
//!
//! # Print per-operation timings after the run
//! suiterunner sample --timeline
//! ```

use std::env;
use std::error::Error;
use std::process::ExitCode;

use colored::Colorize;
use log::{error, info};

use suiterunner::execution::Engine;
use suiterunner::sample::SampleSuite;
use suiterunner::suite::Suite;
use suiterunner::{APP_NAME, VERSION};

/// Suite run when none is specified.
const DEFAULT_SUITE: &str = "sample";

/// A suite the CLI knows how to run.
struct SuiteEntry {
    name: &'static str,
    execute: fn(&Config) -> Result<(), Box<dyn Error>>,
}

/// Suites selectable from the command line.
const SUITES: &[SuiteEntry] = &[SuiteEntry {
    name: "sample",
    execute: execute::<SampleSuite>,
}];

/// Command-line configuration parsed from arguments.
#[derive(Debug, PartialEq)]
struct Config {
    suite: String,
    dry_run: bool,
    json: bool,
    timeline: bool,
    list: bool,
    verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suite: DEFAULT_SUITE.to_string(),
            dry_run: false,
            json: false,
            timeline: false,
            list: false,
            verbose: false,
        }
    }
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Lifecycle Test Suite Runner");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: suiterunner [OPTIONS] [SUITE]");
    println!();
    println!("Arguments:");
    println!("  [SUITE]             Registered suite to run (default: {})", DEFAULT_SUITE);
    println!();
    println!("Options:");
    println!("  --dry-run           Validate and print the execution order only");
    println!("  --json              With --dry-run, print the plan as JSON");
    println!("  --timeline          Print per-operation timings after the run");
    println!("  --list              List registered suites");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  suiterunner sample");
    println!("  suiterunner sample --dry-run --json");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut positional_seen = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--dry-run" => config.dry_run = true,
            "--json" => config.json = true,
            "--timeline" => config.timeline = true,
            "--list" => config.list = true,
            "--verbose" | "-v" => config.verbose = true,
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ if positional_seen => {
                return Err(format!("Unexpected argument: {}", arg));
            }
            _ => {
                config.suite = arg.clone();
                positional_seen = true;
            }
        }
    }

    if config.json && !config.dry_run {
        return Err("--json requires --dry-run".to_string());
    }

    Ok(config)
}

/// Runs or dry-runs suite `S` according to `config`.
fn execute<S: Suite>(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut engine = Engine::<S>::new();

    if config.dry_run {
        let plan = engine.plan()?;
        if config.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            info!("Mode: DRY RUN (operations will not be invoked)");
            println!("{}", plan.describe());
        }
        return Ok(());
    }

    let result = engine.run();

    if config.timeline {
        println!("{}", engine.timeline().report());
    }

    result?;
    Ok(())
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(config.verbose);

    if config.list {
        for entry in SUITES {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    if !config.json {
        print_banner();
    }

    let entry = SUITES
        .iter()
        .find(|entry| entry.name == config.suite)
        .ok_or_else(|| format!("Unknown suite '{}'. Use --list to see available suites.", config.suite))?;

    info!("Suite: {}", entry.name);

    (entry.execute)(&config).map_err(|e| {
        error!("Suite '{}' failed", entry.name);
        e
    })?;

    if !config.dry_run {
        println!();
        println!("{}", "PASSED".green().bold());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "FAILED:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("suiterunner")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = parse_arguments(&args(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.suite, "sample");
    }

    #[test]
    fn test_flags_and_suite() {
        let config = parse_arguments(&args(&["sample", "--dry-run", "--json", "-v"])).unwrap();

        assert_eq!(config.suite, "sample");
        assert!(config.dry_run);
        assert!(config.json);
        assert!(config.verbose);
        assert!(!config.timeline);
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse_arguments(&args(&["--parallel"])).is_err());
    }

    #[test]
    fn test_second_positional_rejected() {
        assert!(parse_arguments(&args(&["a", "b"])).is_err());
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(parse_arguments(&args(&["--json"])).is_err());
    }

    #[test]
    fn test_registered_suite_executes() {
        let entry = SUITES.iter().find(|e| e.name == DEFAULT_SUITE).unwrap();
        assert!((entry.execute)(&Config::default()).is_ok());
    }
}
