//! Configuration module for `skyebridge`

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default configuration compiled into the binary.
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultConfig.toml");

const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable that relocates the `$SKYEBRIDGE` directory.
pub const HOME_ENV: &str = "SKYEBRIDGE_HOME";

/// Placeholder expanded to the `$SKYEBRIDGE` directory in string values.
const HOME_VARIABLE: &str = "$SKYEBRIDGE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Page title used when `--title` is not given
    #[serde(default)]
    pub title: String,
    /// vis-network URL used by `--cdn` and for the first download
    #[serde(default)]
    pub cdn_url: String,
    /// Local copy of vis-network inlined into pages
    #[serde(default)]
    pub library_path: String,
}

/// Network configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// HTTP timeout in seconds (0 means the default)
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Minifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinifyConfig {
    /// Seconds the minifier worker may take (0 means the default)
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Network settings
    #[serde(default)]
    pub network: NetworkConfig,
    /// Minifier settings
    #[serde(default)]
    pub minify: MinifyConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default page title
    pub title: Option<String>,
    /// Override vis-network CDN URL
    pub cdn_url: Option<String>,
    /// Override local vis-network path
    pub library_path: Option<String>,
    /// Override HTTP timeout
    pub timeout_secs: Option<u64>,
    /// Override minifier timeout
    pub minify_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the `$SKYEBRIDGE` directory path
    ///
    /// `$SKYEBRIDGE_HOME` when set and non-empty, otherwise:
    /// - Linux: `~/.config/skyebridge`
    /// - macOS: `~/Library/Application Support/skyebridge`
    /// - Windows: `%APPDATA%\skyebridge`
    #[must_use]
    pub fn get_skyebridge_dir() -> PathBuf {
        match env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("skyebridge"),
        }
    }

    /// Get the user config file path
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_skyebridge_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fills empty strings and zero timeouts from `defaults`, so config files
    /// written by older versions pick up new settings.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (value, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.render.title, &defaults.render.title),
            (&mut self.render.cdn_url, &defaults.render.cdn_url),
            (&mut self.render.library_path, &defaults.render.library_path),
        ] {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        for (value, default) in [
            (&mut self.network.timeout_secs, defaults.network.timeout_secs),
            (&mut self.minify.timeout_secs, defaults.minify.timeout_secs),
        ] {
            if *value == 0 && default != 0 {
                *value = default;
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values. Nothing is persisted.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(title) = &overrides.title {
            self.render.title.clone_from(title);
        }
        if let Some(cdn_url) = &overrides.cdn_url {
            self.render.cdn_url.clone_from(cdn_url);
        }
        if let Some(library_path) = &overrides.library_path {
            self.render.library_path = Self::expand_variables(library_path);
        }

        if let Some(timeout) = overrides.timeout_secs {
            self.network.timeout_secs = timeout;
        }
        if let Some(timeout) = overrides.minify_timeout_secs {
            self.minify.timeout_secs = timeout;
        }
    }

    /// Expand `$SKYEBRIDGE` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(HOME_VARIABLE) {
            let dir = Self::get_skyebridge_dir();
            value.replace(HOME_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields take their serde defaults (empty strings,
    /// `false`, `0`); `$SKYEBRIDGE` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.render.library_path = Self::expand_variables(&config.render.library_path);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS)
            .expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - Existing file: loaded, missing fields merged from defaults and saved back.
    /// - First run: the defaults are written to the config file.
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save();
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config cannot be serialized to TOML (shouldn't happen)
    /// - The config directory cannot be created
    /// - The file cannot be written (permissions, disk full, etc.)
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `title`, `cdn_url`,
    /// `library_path`, `timeout`, `minify_timeout` (dashes accepted in place
    /// of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "title" => Some(self.render.title.clone()),
            "cdn_url" | "cdn-url" => Some(self.render.cdn_url.clone()),
            "library_path" | "library-path" => Some(self.render.library_path.clone()),
            "timeout" => Some(self.network.timeout_secs.to_string()),
            "minify_timeout" | "minify-timeout" => Some(self.minify.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value does not
    /// parse (booleans for `verbose`, whole seconds for the timeouts).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let seconds = |value: &str| {
            value
                .parse::<u64>()
                .map_err(|_| format!("Invalid number of seconds for '{key}': '{value}'"))
        };
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "title" => self.render.title = value.to_string(),
            "cdn_url" | "cdn-url" => self.render.cdn_url = value.to_string(),
            "library_path" | "library-path" => self.render.library_path = value.to_string(),
            "timeout" => self.network.timeout_secs = seconds(value)?,
            "minify_timeout" | "minify-timeout" => self.minify.timeout_secs = seconds(value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "title" => self.render.title.clone_from(&defaults.render.title),
            "cdn_url" | "cdn-url" => self.render.cdn_url.clone_from(&defaults.render.cdn_url),
            "library_path" | "library-path" => self
                .render
                .library_path
                .clone_from(&defaults.render.library_path),
            "timeout" => self.network.timeout_secs = defaults.network.timeout_secs,
            "minify_timeout" | "minify-timeout" => {
                self.minify.timeout_secs = defaults.minify.timeout_secs;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  title = \"{}\"", self.render.title)?;
        writeln!(f, "  cdn_url = \"{}\"", self.render.cdn_url)?;
        writeln!(f, "  library_path = \"{}\"", self.render.library_path)?;

        writeln!(f, "\n[network]")?;
        writeln!(f, "  timeout_secs = {}", self.network.timeout_secs)?;

        writeln!(f, "\n[minify]")?;
        writeln!(f, "  timeout_secs = {}", self.minify.timeout_secs)?;

        Ok(())
    }
}
