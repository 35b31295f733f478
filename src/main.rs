//! numsort: sort numeric values read from files or standard input
//!
//! Thin command-line host around the library: it turns arguments into a
//! `SortConfig`, sets up logging and maps errors to exit codes.

use std::process;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use numsort::{
    config::{ElementMode, SortConfig, SortConfigBuilder},
    error::{SortError, SortResult},
    pivot::PivotStrategy,
    run,
};

fn main() {
    let result = run_cli();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("numsort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run_cli() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;
    init_logging(config.debug);
    run(&config)
}

/// Log to stderr; `RUST_LOG` wins over the `--debug` default
fn init_logging(debug: bool) {
    let default_directive = if debug { "numsort=debug" } else { "numsort=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_cli() -> Command {
    Command::new("numsort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("numsort [OPTION]... [FILE]...")
        .about("Sort numeric values in ascending order")
        .long_about("Sort whitespace-separated numeric values read from FILEs (or standard input) and print one value per line.\n\nWith --binary, each FILE is instead a raw array of native-endian values of the given --type and is sorted in place.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Element handling
        .arg(Arg::new("type")
            .short('t')
            .long("type")
            .help("Element type: auto, int, f32 or f64")
            .long_help("Element type of the input values.\n\n  auto - integers if every value is a 32-bit integer, otherwise 64-bit floats\n  int  - 32-bit signed integers\n  f32  - 32-bit floats\n  f64  - 64-bit floats")
            .value_name("TYPE")
            .default_value("auto"))
        .arg(Arg::new("pivot")
            .long("pivot")
            .help("Pivot selection: last, median-of-three or random")
            .value_name("STRATEGY")
            .default_value("last"))
        .arg(Arg::new("seed")
            .long("seed")
            .help("Seed for --pivot random")
            .value_name("N"))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("binary")
            .long("binary")
            .help("Sort each FILE in place as a raw buffer of --type values")
            .action(ArgAction::SetTrue))

        // I/O options
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Log diagnostic information to stderr")
            .action(ArgAction::SetTrue))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(mode) = matches.get_one::<String>("type") {
        builder = builder.element_mode(mode.parse::<ElementMode>()?);
    }
    if let Some(pivot) = matches.get_one::<String>("pivot") {
        builder = builder.pivot(pivot.parse::<PivotStrategy>()?);
    }
    if let Some(seed_str) = matches.get_one::<String>("seed") {
        let seed: u64 = seed_str
            .parse()
            .map_err(|_| SortError::parse_error(&format!("invalid seed: {}", seed_str)))?;
        builder = builder.seed(seed);
    }

    if matches.get_flag("check") {
        builder = builder.check();
    }
    if matches.get_flag("binary") {
        builder = builder.binary();
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }

    let input_files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();

    builder.input_files(input_files).build()
}
