use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::monitoring::OverlapPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadFailed { path: path::PathBuf, source: std::io::Error },

    #[error("Failed to write config {path}: {source}")]
    WriteFailed { path: path::PathBuf, source: std::io::Error },

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Neither XDG_CONFIG_HOME nor HOME is set")]
    ConfigPathUnavailable,

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Period between sweeps
    pub interval_ms: u64,
    /// Per-probe timeout
    pub timeout_ms: u64,
    /// Scheme used when a host is registered without one
    pub scheme: String,
    pub overlap: OverlapPolicy,
    /// Hard bound on a request that already lost its timeout race
    pub request_ceiling_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub path: Option<path::PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file used while the TUI owns the terminal
    pub file: Option<path::PathBuf>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval_ms: 10_000,
            timeout_ms: 6_000,
            scheme: "https".into(),
            overlap: OverlapPolicy::Allow,
            request_ceiling_ms: 60_000,
        }
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Resolve `$XDG_<kind>_HOME` or `$HOME/<fallback>`
fn xdg_dir(var: &str, fallback: &str) -> Result<path::PathBuf, ConfigError> {
    if let Ok(dir) = env::var(var) {
        Ok(path::PathBuf::from(dir))
    } else if let Some(home_dir) = env::home_dir() {
        Ok(home_dir.join(fallback))
    } else {
        Err(ConfigError::ConfigPathUnavailable)
    }
}

/// Get default config path ($XDG_CONFIG_HOME/uppe/monitor.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    Ok(xdg_dir("XDG_CONFIG_HOME", ".config")?.join("uppe/monitor.toml"))
}

/// Get default store path ($XDG_DATA_HOME/uppe/store.json or
/// $HOME/.local/share/...)
fn default_store_path() -> Result<path::PathBuf, ConfigError> {
    Ok(xdg_dir("XDG_DATA_HOME", ".local/share")?.join("uppe/store.json"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);
        let unset = "(default)";

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Interval (ms)", &self.monitor.interval_ms)?;
        write_1(f, "Timeout (ms)", &self.monitor.timeout_ms)?;
        write_1(f, "Scheme", &self.monitor.scheme)?;
        write_1(f, "Overlapping sweeps", &self.monitor.overlap)?;
        write_1(f, "Request ceiling (ms)", &self.monitor.request_ceiling_ms)?;
        write_title_1(f, "Storage")?;
        match &self.storage.path {
            Some(path) => write_1(f, "Path", &path.display())?,
            None => write_1(f, "Path", &unset)?,
        }
        write_title_1(f, "Logging")?;
        match &self.logging.file {
            Some(path) => write_1(f, "File", &path.display())?,
            None => write_1(f, "File", &unset)?,
        }

        Ok(())
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/uppe/monitor.toml
    ///  or the specified path if one does not exist
    ///
    /// ```ignore
    /// let cfg = config::Config::from_config(None::<&path::Path>)?;
    /// println!("{}", cfg);
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        let config = if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path)
                .map_err(|source| ConfigError::ReadFailed { path: config_path.clone(), source })?;
            toml::from_str::<Self>(raw_string.as_str())?
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::WriteFailed { path: path.to_path_buf(), source })?;
        }

        fs::write(path, config_str)
            .map_err(|source| ConfigError::WriteFailed { path: path.to_path_buf(), source })
    }

    /// Reject settings the scheduler or prober cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        const MIN_INTERVAL_MS: u64 = 1_000;
        const MIN_TIMEOUT_MS: u64 = 100;

        if self.monitor.interval_ms < MIN_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "interval_ms too short: {} (minimum: {MIN_INTERVAL_MS})",
                self.monitor.interval_ms
            )));
        }

        if self.monitor.timeout_ms < MIN_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "timeout_ms too short: {} (minimum: {MIN_TIMEOUT_MS})",
                self.monitor.timeout_ms
            )));
        }

        if self.monitor.request_ceiling_ms < self.monitor.timeout_ms {
            return Err(ConfigError::Invalid(
                "request_ceiling_ms must not be shorter than timeout_ms".into(),
            ));
        }

        match self.monitor.scheme.as_str() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "Invalid scheme '{other}'. Must be http or https"
            ))),
        }
    }

    /// Location of the key-value store, falling back to the XDG data dir
    pub fn store_path(&self) -> Result<path::PathBuf, ConfigError> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => default_store_path(),
        }
    }
}
