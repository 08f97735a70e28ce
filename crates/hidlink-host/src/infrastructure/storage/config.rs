//! TOML-based configuration for the host application.
//!
//! Reads and writes `AppConfig` from an explicit path or the
//! platform-appropriate config file:
//! - Windows:  `%APPDATA%\hidlink\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/hidlink/config.toml` (or `~/.config/hidlink/`)
//! - macOS:    `~/Library/Application Support/hidlink/config.toml`
//!
//! # What is TOML? (for beginners)
//!
//! TOML (Tom's Obvious Minimal Language) is a configuration file format designed
//! to be easy to read and write.  It looks similar to INI files but with more
//! data types.  Example:
//!
//! ```toml
//! [target]
//! image = "target.png"
//! threshold = 0.8
//!
//! [transport]
//! port = "COM5"
//! baud_rate = 115200
//!
//! [typing]
//! payload = "1#Aa甘蓝"
//! ```
//!
//! The `serde` library provides automatic serialisation/deserialisation between
//! Rust structs and TOML text.  The `#[derive(Serialize, Deserialize)]` macros
//! generate all the boilerplate code at compile time.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, and whole
//! sections marked `#[serde(default)]` may be omitted.  An empty file is a
//! valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hidlink_core::ScreenPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::automation::AutomationSettings;
use crate::application::send_commands::PacingProfile;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where to click.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetConfig {
    /// Template image the locator searches for.
    #[serde(default = "default_image")]
    pub image: PathBuf,
    /// Minimum match similarity in `[0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_search_poll_ms")]
    pub search_poll_ms: u64,
    /// Fixed target coordinate used instead of image search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_y: Option<i32>,
}

/// Serial link to the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportConfig {
    /// Port name, e.g. `COM5` or `/dev/ttyACM0`.
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

/// What to type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypingConfig {
    #[serde(default = "default_payload")]
    pub payload: String,
}

/// Human-plausibility and settle timings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Largest random offset, per axis, added to the click point.
    #[serde(default = "default_click_jitter_px")]
    pub click_jitter_px: i32,
    /// Wait after the double click before typing starts.
    #[serde(default = "default_focus_settle_ms")]
    pub focus_settle_ms: u64,
    #[serde(default = "default_double_click_gap_min_ms")]
    pub double_click_gap_min_ms: u64,
    #[serde(default = "default_double_click_gap_max_ms")]
    pub double_click_gap_max_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_image() -> PathBuf {
    PathBuf::from("target.png")
}
fn default_threshold() -> f64 {
    0.8
}
fn default_search_timeout_secs() -> u64 {
    30
}
fn default_search_poll_ms() -> u64 {
    500
}
fn default_port() -> String {
    "COM5".to_string()
}
fn default_baud_rate() -> u32 {
    115_200
}
fn default_payload() -> String {
    "1#Aa甘蓝".to_string()
}
fn default_click_jitter_px() -> i32 {
    3
}
fn default_focus_settle_ms() -> u64 {
    1000
}
fn default_double_click_gap_min_ms() -> u64 {
    80
}
fn default_double_click_gap_max_ms() -> u64 {
    150
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            threshold: default_threshold(),
            search_timeout_secs: default_search_timeout_secs(),
            search_poll_ms: default_search_poll_ms(),
            fixed_x: None,
            fixed_y: None,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            payload: default_payload(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            click_jitter_px: default_click_jitter_px(),
            focus_settle_ms: default_focus_settle_ms(),
            double_click_gap_min_ms: default_double_click_gap_min_ms(),
            double_click_gap_max_ms: default_double_click_gap_max_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Derived settings ──────────────────────────────────────────────────────────

impl TargetConfig {
    /// The fixed coordinate, when both axes are configured.
    pub fn fixed_point(&self) -> Option<ScreenPoint> {
        Some(ScreenPoint::new(self.fixed_x?, self.fixed_y?))
    }
}

impl AppConfig {
    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if !(0.0..=1.0).contains(&self.target.threshold) {
            return invalid("target.threshold", "must be between 0 and 1");
        }
        if self.target.search_timeout_secs == 0 {
            return invalid("target.search_timeout_secs", "must be greater than 0");
        }
        if self.target.search_poll_ms == 0 {
            return invalid("target.search_poll_ms", "must be greater than 0");
        }
        if self.target.fixed_x.is_some() != self.target.fixed_y.is_some() {
            return invalid("target.fixed_x", "fixed_x and fixed_y must be set together");
        }
        if self.transport.port.trim().is_empty() {
            return invalid("transport.port", "must not be empty");
        }
        if self.transport.baud_rate == 0 {
            return invalid("transport.baud_rate", "must be greater than 0");
        }
        if self.typing.payload.contains(['\n', '\r']) {
            return invalid("typing.payload", "must not contain line breaks");
        }
        if self.timing.click_jitter_px < 0 {
            return invalid("timing.click_jitter_px", "must not be negative");
        }
        if self.timing.double_click_gap_min_ms > self.timing.double_click_gap_max_ms {
            return invalid(
                "timing.double_click_gap_min_ms",
                "must not exceed double_click_gap_max_ms",
            );
        }
        Ok(())
    }

    /// Parameters for an automation run.
    pub fn automation_settings(&self) -> AutomationSettings {
        AutomationSettings {
            image: self.target.image.clone(),
            threshold: self.target.threshold,
            search_timeout: Duration::from_secs(self.target.search_timeout_secs),
            search_poll: Duration::from_millis(self.target.search_poll_ms),
            click_jitter: self.timing.click_jitter_px,
            focus_settle: Duration::from_millis(self.timing.focus_settle_ms),
            payload: self.typing.payload.clone(),
        }
    }

    /// Command pacing with the configured double-click gap.
    pub fn pacing_profile(&self) -> PacingProfile {
        PacingProfile {
            double_click_gap_min: Duration::from_millis(self.timing.double_click_gap_min_ms),
            double_click_gap_max: Duration::from_millis(self.timing.double_click_gap_max_ms),
            ..PacingProfile::default()
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config directory including the `hidlink` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("hidlink"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("hidlink"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("hidlink")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
