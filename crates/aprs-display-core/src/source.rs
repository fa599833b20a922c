//! Configuration source abstraction.
//!
//! This module provides a trait for configuration sources that can be
//! implemented differently on each platform:
//! - Linux: JSON file or process environment
//! - ESP32: compiled-in constants or NVS (Non-Volatile Storage)
//!
//! A source only produces raw strings; all validation happens in
//! [`crate::config::ConfigStore::load`], so the loading mechanism stays
//! pluggable without changing the store's contract.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// Raw, unvalidated configuration fields as read from a source.
///
/// `None` means the field is absent from the source entirely;
/// `Some("")` means it is present but empty. The distinction matters:
/// absence is a validation error, emptiness often is not.
///
/// Serde names follow the persisted layout of the original Arduino
/// configuration header, so an exported file stays recognizable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(rename = "WIFI_SSID", skip_serializing_if = "Option::is_none")]
    pub wifi_ssid: Option<String>,

    #[serde(rename = "WIFI_PASSWORD", skip_serializing_if = "Option::is_none")]
    pub wifi_password: Option<String>,

    #[serde(rename = "APRS_MY_CALL", skip_serializing_if = "Option::is_none")]
    pub aprs_my_call: Option<String>,

    #[serde(rename = "APRS_THEIR_CALL", skip_serializing_if = "Option::is_none")]
    pub aprs_their_call: Option<String>,

    #[serde(rename = "APRS_PASSCODE", skip_serializing_if = "Option::is_none")]
    pub aprs_passcode: Option<String>,

    #[serde(rename = "APRS_FILTER", skip_serializing_if = "Option::is_none")]
    pub aprs_filter: Option<String>,

    #[serde(rename = "tzLocation", skip_serializing_if = "Option::is_none")]
    pub tz_location: Option<String>,
}

impl RawConfig {
    /// Compiled-in defaults matching the original configuration header:
    /// WiFi and uplink unconfigured, W4KRL-15 as the watched station,
    /// US Eastern time for the clock.
    pub fn defaults() -> Self {
        Self {
            wifi_ssid: Some(String::new()),
            wifi_password: Some(String::new()),
            aprs_my_call: Some(String::new()),
            aprs_their_call: Some("W4KRL-15".to_string()),
            aprs_passcode: Some(String::new()),
            aprs_filter: Some("b/W4KRL-*".to_string()),
            tz_location: Some("America/New_York".to_string()),
        }
    }
}

/// Abstract configuration source.
///
/// Implementations provide platform-specific reading mechanisms. All methods
/// are synchronous to support embedded platforms; `read` runs once during
/// process initialization, before any concurrent activity begins.
pub trait ConfigSource {
    /// Read the raw configuration fields.
    ///
    /// Fails only when the source itself cannot be read (missing file,
    /// malformed JSON); per-field problems are left to validation.
    fn read(&self) -> Result<RawConfig, ConfigError>;
}

/// Configuration source backed by the process environment.
///
/// Reads `WIFI_SSID`, `WIFI_PASSWORD`, `APRS_MY_CALL`, `APRS_THEIR_CALL`,
/// `APRS_PASSCODE`, `APRS_FILTER`, and `TZ_LOCATION`. An unset variable is
/// an absent field; a set-but-empty variable is present-but-empty.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }

    fn var(name: &str) -> Result<Option<String>, ConfigError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Read(format!("{}: {}", name, e))),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn read(&self) -> Result<RawConfig, ConfigError> {
        Ok(RawConfig {
            wifi_ssid: Self::var("WIFI_SSID")?,
            wifi_password: Self::var("WIFI_PASSWORD")?,
            aprs_my_call: Self::var("APRS_MY_CALL")?,
            aprs_their_call: Self::var("APRS_THEIR_CALL")?,
            aprs_passcode: Self::var("APRS_PASSCODE")?,
            aprs_filter: Self::var("APRS_FILTER")?,
            tz_location: Self::var("TZ_LOCATION")?,
        })
    }
}

/// Configuration source backed by a JSON file.
///
/// The file uses the persisted layout names, e.g.:
///
/// ```json
/// {
///   "WIFI_SSID": "",
///   "WIFI_PASSWORD": "",
///   "APRS_MY_CALL": "",
///   "APRS_THEIR_CALL": "W4KRL-15",
///   "APRS_PASSCODE": "",
///   "APRS_FILTER": "b/W4KRL-*",
///   "tzLocation": "America/New_York"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn read(&self) -> Result<RawConfig, ConfigError> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Read(format!("{}: {}", self.path.display(), e)))
    }
}
