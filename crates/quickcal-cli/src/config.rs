//! Configuration management for the `quickcal` CLI.
//!
//! Values are layered, later layers winning: built-in defaults, an optional TOML
//! file (`--config` or `QUICKCAL_CONFIG`), `QUICKCAL_*` environment variables (nested
//! keys split on `__`, e.g. `QUICKCAL_SOURCE__ACCESS_TOKEN`), then command-line flags.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use clap::ValueEnum;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Where calendar data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Google Calendar REST API.
    #[default]
    Google,
    /// A JSON snapshot file of calendars and their events.
    File,
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What to do when one calendar cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log a warning, leave the calendar out, and continue with the rest.
    Skip,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Calendar data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Base URL of the Google Calendar v3 API.
    pub api_base: String,
    /// OAuth bearer token with calendar read access. Obtaining and refreshing it is
    /// left to the caller.
    pub access_token: Option<String>,
    /// Snapshot file read when `kind` is `file`.
    pub events_file: Option<PathBuf>,
    pub timeout_seconds: u64,
    /// Restrict the report to these calendar ids. Empty means every calendar.
    #[serde(default)]
    pub calendars: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: None,
            events_file: None,
            timeout_seconds: 30,
            calendars: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default log level if no RUST_LOG is set
    pub default_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            default_level: "warn".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Length of the query window in days, starting now.
    pub days: u32,
    /// IANA timezone used when printing times.
    pub display_timezone: String,
    pub format: OutputFormat,
    /// Hide combined free slots shorter than this many minutes.
    pub min_minutes: u32,
    pub on_fetch_error: FetchPolicy,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days: quickcal_engine::DEFAULT_DAYS,
            display_timezone: "America/Chicago".to_string(),
            format: OutputFormat::default(),
            min_minutes: 0,
            on_fetch_error: FetchPolicy::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Values supplied on the command line. `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_fetch_error: Option<FetchPolicy>,
    pub source: SourceOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calendars: Vec<String>,
}

impl Config {
    /// Load configuration from defaults, an optional config file, the environment,
    /// and command-line overrides.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv().ok();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("QUICKCAL_CONFIG").map(PathBuf::from));

        if let Some(ref path) = path {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        Self::from_figment(Self::figment(path.as_deref(), overrides))
    }

    /// The layered configuration sources, lowest precedence first.
    pub fn figment(path: Option<&Path>, overrides: &Overrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("QUICKCAL_").split("__"))
            .merge(Serialized::defaults(overrides))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::InvalidValue(
                "days must be a positive integer".to_string(),
            ));
        }

        self.display_zone()?;

        match self.source.kind {
            SourceKind::Google => {
                if self.source.api_base.is_empty() {
                    return Err(ConfigError::MissingConfig(
                        "source.api_base is required".to_string(),
                    ));
                }
                if self
                    .source
                    .access_token
                    .as_deref()
                    .is_none_or(|token| token.trim().is_empty())
                {
                    return Err(ConfigError::MissingConfig(
                        "source.access_token is required for the google source \
                         (set QUICKCAL_SOURCE__ACCESS_TOKEN)"
                            .to_string(),
                    ));
                }
            }
            SourceKind::File => {
                if self.source.events_file.is_none() {
                    return Err(ConfigError::MissingConfig(
                        "source.events_file is required for the file source \
                         (use --events-file)"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// The timezone used to print times.
    pub fn display_zone(&self) -> Result<Tz, ConfigError> {
        quickcal_engine::parse_timezone(&self.display_timezone)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Config {
        Config::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)),
        )
        .unwrap()
    }

    #[test]
    fn defaults_cover_five_days_in_chicago() {
        let config = Config::default();
        assert_eq!(config.days, 5);
        assert_eq!(config.display_timezone, "America/Chicago");
        assert_eq!(config.on_fetch_error, FetchPolicy::Abort);
        assert_eq!(config.source.kind, SourceKind::Google);
        assert_eq!(config.source.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn toml_overrides_nested_values() {
        let config = from_toml(
            r#"
            days = 3
            on_fetch_error = "skip"

            [source]
            kind = "file"
            events_file = "calendars.json"
            calendars = ["work", "home"]
            "#,
        );

        assert_eq!(config.days, 3);
        assert_eq!(config.on_fetch_error, FetchPolicy::Skip);
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.events_file, Some(PathBuf::from("calendars.json")));
        assert_eq!(config.source.calendars, vec!["work", "home"]);
        // Untouched keys keep their defaults.
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.logging.default_level, "warn");
    }

    #[test]
    fn command_line_overrides_win() {
        let overrides = Overrides {
            days: Some(7),
            format: Some(OutputFormat::Json),
            source: SourceOverrides {
                kind: Some(SourceKind::File),
                ..SourceOverrides::default()
            },
            ..Overrides::default()
        };
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string("days = 2\n[source]\nkind = \"google\""))
            .merge(Serialized::defaults(&overrides));

        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.days, 7);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn google_source_requires_token() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfig(_)));
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn file_source_requires_path() {
        let mut config = Config::default();
        config.source.kind = SourceKind::File;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingConfig(_))
        ));

        config.source.events_file = Some(PathBuf::from("events.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_days_is_rejected() {
        let mut config = from_toml("days = 0\n[source]\nkind = \"file\"\nevents_file = \"x.json\"");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
        config.days = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_display_timezone_is_rejected() {
        let mut config = Config::default();
        config.source.access_token = Some("token".to_string());
        config.display_timezone = "Nowhere/Special".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
