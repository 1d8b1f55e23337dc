//! Command-line interface entry point for `skyebridge`

mod args;
mod commands;

use args::{Cli, Command};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use skyebridge::config::Config;
use skyebridge::info;
use skyebridge::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let mut args = parse_args();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command.take() {
        Some(Command::Config { subcommand }) => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        None => commands::generate::run(args, &config),
    }
}

/// Parse the command line; only status codes 0 and 1 leave the process.
///
/// No arguments at all prints the help. Help and version requests print to
/// stdout and succeed, any other usage error is a one-line `✗` failure.
fn parse_args() -> Cli {
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        std::process::exit(0);
    }

    match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered.lines().next().unwrap_or_default();
            eprintln!("✗ {}", message.trim_start_matches("error: "));
            std::process::exit(1);
        }
    }
}
