//! Validated configuration store.
//!
//! The store reads raw fields from a [`ConfigSource`], validates every field
//! in one pass, and exposes typed read-only accessors to the rest of the
//! system (network join, APRS-IS client, clock). Validation collects every
//! problem before failing, so an operator fixing a configuration sees the
//! full list at once instead of chasing errors one restart at a time.
//!
//! The store is immutable after [`ConfigStore::load`] and can be shared by
//! reference across concurrent readers with no locking.

use serde::{Deserialize, Serialize};

use crate::callsign::{Callsign, CallsignError};
use crate::source::{ConfigSource, RawConfig};

/// Longest SSID the 802.11 spec allows, in bytes.
pub const MAX_SSID_BYTES: usize = 32;

/// WiFi association credentials.
///
/// An empty `ssid` is a valid "unconfigured" state, not an error; the
/// network-join collaborator must refuse to associate and surface a
/// user-visible "WiFi not configured" state instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}

/// APRS protocol identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AprsIdentity {
    /// Operator's callsign-SSID for display. Empty when unconfigured.
    pub my_call: String,
    /// Callsign-SSID of the watched weather station. Always present.
    pub their_call: String,
    /// 5-digit APRS-IS passcode, or empty when uplink is disabled.
    pub passcode: String,
    /// Opaque APRS-IS filter expression, e.g. "b/W4KRL-*".
    pub filter: String,
}

/// IANA timezone selection for the clock display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimezoneSetting {
    /// Identifier in `Region/City` form, e.g. "America/New_York".
    pub tz_location: String,
}

/// A single field-level validation failure.
///
/// Every variant carries the persisted field name; malformed values carry
/// the raw string so the operator sees exactly what was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("{field}: required field is missing from the configuration source")]
    MissingField { field: &'static str },

    #[error("{field}: {value:?} is not a valid callsign-SSID ({reason})")]
    MalformedCallsign {
        field: &'static str,
        value: String,
        reason: CallsignError,
    },

    #[error("{field}: {value:?} must be exactly 5 ASCII digits or empty")]
    MalformedPasscode { field: &'static str, value: String },

    #[error("{field}: {value:?} is not a Region/City timezone identifier")]
    MalformedTimezone { field: &'static str, value: String },

    #[error("{field}: SSID is {length} bytes, longest allowed is {MAX_SSID_BYTES}")]
    OversizedSsid { field: &'static str, length: usize },

    #[error("{field}: filter expression must not be empty")]
    EmptyFilter { field: &'static str },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The configuration source itself could not be read.
    #[error("Failed to read configuration: {0}")]
    Read(String),

    /// One or more fields violated a validation rule. Carries every
    /// violation found in the pass, not just the first.
    #[error("Invalid configuration: {}", list_violations(.0))]
    Invalid(Vec<Violation>),
}

fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated, immutable configuration.
///
/// There are exactly two states: unloaded (the value does not exist yet) and
/// loaded-and-valid. [`ConfigStore::load`] is the only transition and the
/// only fallible operation; a failure is fatal to startup and there is no
/// path back short of process restart.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    wifi: WifiCredentials,
    aprs: AprsIdentity,
    timezone: TimezoneSetting,
}

impl ConfigStore {
    /// Read raw fields from a source and validate them.
    ///
    /// Runs once during process initialization, before any concurrent
    /// activity begins. Fails with [`ConfigError::Read`] when the source
    /// cannot be read, or [`ConfigError::Invalid`] with the aggregate of
    /// every field-level violation.
    pub fn load<S: ConfigSource>(source: &S) -> Result<Self, ConfigError> {
        Self::from_raw(source.read()?)
    }

    /// Validate raw fields directly, without an intermediate source.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        require(&raw.wifi_ssid, "WIFI_SSID", &mut violations);
        require(&raw.wifi_password, "WIFI_PASSWORD", &mut violations);
        require(&raw.aprs_my_call, "APRS_MY_CALL", &mut violations);
        require(&raw.aprs_their_call, "APRS_THEIR_CALL", &mut violations);
        require(&raw.aprs_passcode, "APRS_PASSCODE", &mut violations);
        require(&raw.aprs_filter, "APRS_FILTER", &mut violations);
        require(&raw.tz_location, "tzLocation", &mut violations);

        if let Some(ssid) = &raw.wifi_ssid {
            if ssid.len() > MAX_SSID_BYTES {
                violations.push(Violation::OversizedSsid {
                    field: "WIFI_SSID",
                    length: ssid.len(),
                });
            }
        }

        // Empty my_call means "not configured for display" and is fine;
        // anything non-empty has to parse.
        if let Some(call) = &raw.aprs_my_call {
            if !call.is_empty() {
                if let Err(reason) = Callsign::parse(call) {
                    violations.push(Violation::MalformedCallsign {
                        field: "APRS_MY_CALL",
                        value: call.clone(),
                        reason,
                    });
                }
            }
        }

        // their_call has no unconfigured variant: a default is always
        // supplied, so even the empty string is a violation here.
        if let Some(call) = &raw.aprs_their_call {
            if let Err(reason) = Callsign::parse(call) {
                violations.push(Violation::MalformedCallsign {
                    field: "APRS_THEIR_CALL",
                    value: call.clone(),
                    reason,
                });
            }
        }

        if let Some(passcode) = &raw.aprs_passcode {
            if !passcode.is_empty()
                && (passcode.len() != 5 || !passcode.bytes().all(|b| b.is_ascii_digit()))
            {
                violations.push(Violation::MalformedPasscode {
                    field: "APRS_PASSCODE",
                    value: passcode.clone(),
                });
            }
        }

        if let Some(filter) = &raw.aprs_filter {
            if filter.is_empty() {
                violations.push(Violation::EmptyFilter {
                    field: "APRS_FILTER",
                });
            }
        }

        // Only the Region/City shape is checked here; whether the zone
        // actually exists in the IANA database is the timezone resolver's
        // problem.
        if let Some(tz) = &raw.tz_location {
            if tz.is_empty() || !tz.contains('/') {
                violations.push(Violation::MalformedTimezone {
                    field: "tzLocation",
                    value: tz.clone(),
                });
            }
        }

        if !violations.is_empty() {
            return Err(ConfigError::Invalid(violations));
        }

        Ok(Self {
            wifi: WifiCredentials {
                ssid: raw.wifi_ssid.unwrap_or_default(),
                password: raw.wifi_password.unwrap_or_default(),
            },
            aprs: AprsIdentity {
                my_call: raw.aprs_my_call.unwrap_or_default(),
                their_call: raw.aprs_their_call.unwrap_or_default(),
                passcode: raw.aprs_passcode.unwrap_or_default(),
                filter: raw.aprs_filter.unwrap_or_default(),
            },
            timezone: TimezoneSetting {
                tz_location: raw.tz_location.unwrap_or_default(),
            },
        })
    }

    /// Get the WiFi credentials. Possibly empty; check
    /// [`is_wifi_configured`](Self::is_wifi_configured) before associating.
    pub fn wifi_credentials(&self) -> &WifiCredentials {
        &self.wifi
    }

    /// Get the APRS identifiers for the APRS-IS client.
    pub fn aprs_identity(&self) -> &AprsIdentity {
        &self.aprs
    }

    /// Get the IANA timezone identifier for the clock collaborator.
    pub fn timezone_location(&self) -> &str {
        &self.timezone.tz_location
    }

    /// True iff an SSID is configured. False means the network-join
    /// collaborator must refuse to associate.
    pub fn is_wifi_configured(&self) -> bool {
        !self.wifi.ssid.is_empty()
    }

    /// True iff a passcode is configured (and therefore exactly 5 digits,
    /// enforced at load time). False means APRS uplink is disabled.
    pub fn is_aprs_uplink_configured(&self) -> bool {
        !self.aprs.passcode.is_empty()
    }
}

fn require(value: &Option<String>, field: &'static str, violations: &mut Vec<Violation>) {
    if value.is_none() {
        violations.push(Violation::MissingField { field });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_raw() -> RawConfig {
        RawConfig {
            wifi_ssid: Some("shack24".to_string()),
            wifi_password: Some("hunter2".to_string()),
            aprs_my_call: Some("N0CALL-4".to_string()),
            aprs_their_call: Some("W4KRL-15".to_string()),
            aprs_passcode: Some("12345".to_string()),
            aprs_filter: Some("b/W4KRL-*".to_string()),
            tz_location: Some("America/New_York".to_string()),
        }
    }

    /// In-memory source for testing, mirroring how a platform source plugs in.
    struct MemoryConfigSource {
        raw: RawConfig,
    }

    impl ConfigSource for MemoryConfigSource {
        fn read(&self) -> Result<RawConfig, ConfigError> {
            Ok(self.raw.clone())
        }
    }

    fn violations(result: Result<ConfigStore, ConfigError>) -> Vec<Violation> {
        match result {
            Err(ConfigError::Invalid(v)) => v,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_identity() {
        let store = ConfigStore::from_raw(valid_raw()).unwrap();

        assert_eq!(store.wifi_credentials().ssid, "shack24");
        assert_eq!(store.wifi_credentials().password, "hunter2");
        assert_eq!(store.aprs_identity().my_call, "N0CALL-4");
        assert_eq!(store.aprs_identity().their_call, "W4KRL-15");
        assert_eq!(store.aprs_identity().passcode, "12345");
        assert_eq!(store.aprs_identity().filter, "b/W4KRL-*");
        assert_eq!(store.timezone_location(), "America/New_York");
        assert!(store.is_wifi_configured());
        assert!(store.is_aprs_uplink_configured());
    }

    #[test]
    fn test_load_through_source() {
        let source = MemoryConfigSource {
            raw: RawConfig::defaults(),
        };
        let store = ConfigStore::load(&source).unwrap();
        assert_eq!(store.aprs_identity().their_call, "W4KRL-15");
        assert!(!store.is_wifi_configured());
    }

    #[test]
    fn test_unconfigured_wifi_is_not_an_error() {
        let mut raw = valid_raw();
        raw.wifi_ssid = Some(String::new());
        raw.wifi_password = Some(String::new());

        let store = ConfigStore::from_raw(raw).unwrap();
        assert!(!store.is_wifi_configured());
        assert_eq!(store.wifi_credentials().ssid, "");
    }

    #[test]
    fn test_empty_passcode_disables_uplink() {
        let mut raw = valid_raw();
        raw.aprs_passcode = Some(String::new());

        let store = ConfigStore::from_raw(raw).unwrap();
        assert!(!store.is_aprs_uplink_configured());
    }

    #[test]
    fn test_short_passcode_is_rejected() {
        let mut raw = valid_raw();
        raw.aprs_passcode = Some("1234".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert_eq!(
            found,
            vec![Violation::MalformedPasscode {
                field: "APRS_PASSCODE",
                value: "1234".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_digit_passcode_is_rejected() {
        let mut raw = valid_raw();
        raw.aprs_passcode = Some("12a45".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(found[0], Violation::MalformedPasscode { .. }));
    }

    #[test]
    fn test_their_call_syntax() {
        let mut raw = valid_raw();
        raw.aprs_their_call = Some("this is not a callsign".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(
            found[0],
            Violation::MalformedCallsign {
                field: "APRS_THEIR_CALL",
                ..
            }
        ));
    }

    #[test]
    fn test_their_call_has_no_unconfigured_variant() {
        let mut raw = valid_raw();
        raw.aprs_their_call = Some(String::new());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(
            found[0],
            Violation::MalformedCallsign {
                field: "APRS_THEIR_CALL",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_my_call_is_unconfigured() {
        let mut raw = valid_raw();
        raw.aprs_my_call = Some(String::new());
        assert!(ConfigStore::from_raw(raw).is_ok());
    }

    #[test]
    fn test_bad_my_call_is_rejected() {
        let mut raw = valid_raw();
        raw.aprs_my_call = Some("N0CALL-99".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(
            found[0],
            Violation::MalformedCallsign {
                field: "APRS_MY_CALL",
                ..
            }
        ));
    }

    #[test]
    fn test_timezone_needs_separator() {
        let mut raw = valid_raw();
        raw.tz_location = Some("Nowhere".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert_eq!(
            found,
            vec![Violation::MalformedTimezone {
                field: "tzLocation",
                value: "Nowhere".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_timezone_is_rejected() {
        let mut raw = valid_raw();
        raw.tz_location = Some(String::new());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(found[0], Violation::MalformedTimezone { .. }));
    }

    #[test]
    fn test_oversized_ssid_is_rejected() {
        let mut raw = valid_raw();
        raw.wifi_ssid = Some("x".repeat(33));

        let found = violations(ConfigStore::from_raw(raw));
        assert_eq!(
            found,
            vec![Violation::OversizedSsid {
                field: "WIFI_SSID",
                length: 33,
            }]
        );
    }

    #[test]
    fn test_empty_filter_is_rejected() {
        let mut raw = valid_raw();
        raw.aprs_filter = Some(String::new());

        let found = violations(ConfigStore::from_raw(raw));
        assert!(matches!(found[0], Violation::EmptyFilter { .. }));
    }

    #[test]
    fn test_missing_field_is_distinct_from_empty() {
        let mut raw = valid_raw();
        raw.aprs_their_call = None;

        let found = violations(ConfigStore::from_raw(raw));
        // Absence reports once; the callsign check must not also fire.
        assert_eq!(
            found,
            vec![Violation::MissingField {
                field: "APRS_THEIR_CALL",
            }]
        );
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        let mut raw = valid_raw();
        raw.aprs_passcode = Some("1234".to_string());
        raw.tz_location = Some("Nowhere".to_string());

        let found = violations(ConfigStore::from_raw(raw));
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .any(|v| matches!(v, Violation::MalformedPasscode { .. })));
        assert!(found
            .iter()
            .any(|v| matches!(v, Violation::MalformedTimezone { .. })));
    }

    #[test]
    fn test_aggregate_error_display_lists_everything() {
        let mut raw = valid_raw();
        raw.aprs_passcode = Some("1234".to_string());
        raw.tz_location = Some("Nowhere".to_string());

        let err = ConfigStore::from_raw(raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("APRS_PASSCODE"));
        assert!(msg.contains("tzLocation"));
    }
}
