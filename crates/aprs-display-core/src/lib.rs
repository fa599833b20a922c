//! # aprs-display-core
//!
//! Core configuration model and store for the APRS remote weather display.
//!
//! This crate provides:
//! - Typed configuration entities (WiFi credentials, APRS identity, timezone)
//! - Callsign-SSID parsing and validation
//! - A pluggable configuration source abstraction (file, environment,
//!   compiled-in defaults)
//! - The validated, immutable [`config::ConfigStore`]
//!
//! This crate is intentionally runtime-agnostic and contains no async code,
//! making it usable on both Linux (tokio) and ESP32 (esp-idf) targets. The
//! display pipeline, APRS-IS client, network stack, and timezone resolution
//! live elsewhere and only consume the validated configuration produced here.

pub mod callsign;
pub mod config;
pub mod source;

pub use callsign::{Callsign, CallsignError};
pub use config::{
    AprsIdentity, ConfigError, ConfigStore, TimezoneSetting, Violation, WifiCredentials,
};
pub use source::{ConfigSource, EnvConfigSource, FileConfigSource, RawConfig};
