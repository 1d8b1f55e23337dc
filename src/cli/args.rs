//! CLI argument definitions for `skyebridge`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use skyebridge::config::ConfigOverrides;
use skyebridge::logger::Level;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `title`, `cdn_url`, `timeout`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "skyebridge",
    about = "Generate an interactive HTML flow diagram from a JSON file or URL",
    version = skyebridge::get_version(),
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Input file path or URL (JSON in which a flow is defined)
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<String>,

    /// Output file path (HTML in which a diagram is drawn)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Content of <title></title> in the HTML (default: "Flow Diagram")
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Minify the HTML
    #[arg(short, long)]
    pub minify: bool,

    /// Reference vis-network from a CDN instead of embedding it (works only online)
    #[arg(short, long)]
    pub cdn: bool,

    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the vis-network CDN URL
    #[arg(long = "cdn-url", value_name = "URL")]
    pub cdn_url: Option<String>,

    /// Override the local vis-network file inlined into pages
    #[arg(long = "library-path", value_name = "PATH")]
    pub library_path: Option<PathBuf>,

    /// Override the HTTP timeout in seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the minifier timeout in seconds
    #[arg(long = "minify-timeout", value_name = "SECS")]
    pub minify_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--title` is routed through the config so that an explicit title wins
    /// over `render.title` for this run only.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            title: self.title.clone(),
            cdn_url: self.cdn_url.clone(),
            library_path: self
                .library_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            timeout_secs: self.timeout,
            minify_timeout_secs: self.minify_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("skyebridge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-i", "flow.json", "-o", "out/diagram.html", "-t", "T", "-m", "-c"]);
        assert_eq!(cli.input.as_deref(), Some("flow.json"));
        assert_eq!(cli.output, Some(PathBuf::from("out/diagram.html")));
        assert_eq!(cli.title.as_deref(), Some("T"));
        assert!(cli.minify);
        assert!(cli.cdn);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_required_options_are_not_enforced_by_parser() {
        let cli = parse(&["--minify"]);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = parse(&["config", "get", "title"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                subcommand: Some(ConfigSubcommand::Get { key: Some(_) })
            })
        ));
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["--minify"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.title.is_none());
        assert!(overrides.cdn_url.is_none());
        assert!(overrides.library_path.is_none());
        assert!(overrides.timeout_secs.is_none());
        assert!(overrides.minify_timeout_secs.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let overrides = parse(&[
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/skyebridge.log",
            "--verbose",
            "--title",
            "Orders",
            "--cdn-url",
            "https://cdn.test/vis.js",
            "--library-path",
            "/opt/vis.js",
            "--timeout",
            "5",
            "--minify-timeout",
            "9",
        ])
        .to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/skyebridge.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.title, Some("Orders".to_string()));
        assert_eq!(overrides.cdn_url, Some("https://cdn.test/vis.js".to_string()));
        assert_eq!(overrides.library_path, Some("/opt/vis.js".to_string()));
        assert_eq!(overrides.timeout_secs, Some(5));
        assert_eq!(overrides.minify_timeout_secs, Some(9));
    }
}
