//! Command-line interface for cfgl
//! Compiles a cfgl file (or stdin) and writes the document to stdout.
//!
//! Usage:
//!   cfgl [`<path>`|-] [--format `<format>`] [--config `<file.toml>`] [--strict]
//!   cfgl --list-formats
//!
//! Exit codes: 0 on success, 1 when compilation fails, 2 for usage, I/O and configuration
//! errors. Diagnostics always go to stderr.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cfgl::cfgl::config::{CfglConfig, Loader};
use cfgl::cfgl::diagnostics::render_all;
use cfgl::cfgl::processor::{process, CompileOptions, ProcessingError, ProcessingSpec};

const EXIT_COMPILE_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("CFGL_LOG").unwrap_or_else(|_| EnvFilter::new("error")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = Command::new("cfgl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile cfgl configuration files to YAML and other formats")
        .arg(
            Arg::new("path")
                .help("Path to the cfgl file ('-' or absent reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'yaml', 'json', 'token-simple'); see --list-formats"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when any fault is recorded instead of emitting a degraded document")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return ExitCode::SUCCESS;
    }

    match handle_compile_command(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

/// Layer the config file and command-line flags over the defaults
fn load_config(matches: &ArgMatches) -> Result<CfglConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("strict") {
        loader = loader.set_override("diagnostics.strict", true)?;
    }
    loader.build()
}

fn read_input(path: Option<&str>) -> io::Result<(String, String)> {
    match path {
        None | Some("-") => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, "<stdin>".to_string()))
        }
        Some(path) => Ok((fs::read_to_string(path)?, path.to_string())),
    }
}

/// Handle the compile command, returning the exit code on failure
fn handle_compile_command(matches: &ArgMatches) -> Result<(), u8> {
    let config = load_config(matches).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        EXIT_USAGE
    })?;

    let spec = ProcessingSpec::from_string(&config.output.format).map_err(|e| {
        eprintln!("{}", e);
        eprintln!("Run `cfgl --list-formats` to see the available formats");
        EXIT_USAGE
    })?;

    let path = matches.get_one::<String>("path").map(String::as_str);
    let (source, origin) = read_input(path).map_err(|e| {
        eprintln!("Error reading {}: {}", path.unwrap_or("<stdin>"), e);
        EXIT_USAGE
    })?;
    debug!(%origin, bytes = source.len(), format = %config.output.format, "compiling");

    let options = CompileOptions::from(&config.diagnostics);
    let color = config.diagnostics.color && io::stderr().is_terminal();

    match process(&source, &spec, &options) {
        Ok(processed) => {
            eprint!("{}", render_all(&processed.faults, &source, &origin, color));
            print!("{}", processed.output);
            Ok(())
        }
        Err(ProcessingError::Compile(error)) => {
            eprint!("{}", render_all(&error.faults, &source, &origin, color));
            Err(EXIT_COMPILE_FAILURE)
        }
        Err(ProcessingError::Format(error)) => {
            eprintln!("error: {}", error);
            Err(EXIT_COMPILE_FAILURE)
        }
        Err(error) => {
            eprintln!("error: {}", error);
            Err(EXIT_USAGE)
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");

    for spec in ProcessingSpec::available_specs() {
        println!("  {}", spec.as_format_string());
        println!("    {}", spec.description());
        println!();
    }
}
