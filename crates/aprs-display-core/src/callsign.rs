//! Amateur-radio callsign-SSID parsing.
//!
//! Callsign-SSIDs are strings like "W4KRL-15": a base callsign of one to six
//! ASCII alphanumerics, optionally followed by a hyphen and a numeric
//! Secondary Station Identifier between 1 and 15.
//!
//! Validation uses simple character checks without regex to minimize memory
//! usage on embedded platforms (ESP32).

/// A parsed amateur-radio callsign-SSID.
#[derive(Debug, Clone, PartialEq)]
pub struct Callsign {
    /// The original callsign string
    raw: String,
    /// Base callsign without the SSID suffix
    base: String,
    /// Secondary Station Identifier, if present
    ssid: Option<u8>,
}

impl Callsign {
    /// Parse a callsign-SSID string.
    ///
    /// Accepted syntax:
    /// - Base only: "W4KRL"
    /// - Base with SSID: "W4KRL-15"
    ///
    /// The base must be 1-6 ASCII alphanumerics; the SSID, when present,
    /// must be a number between 1 and 15 with no sign or padding.
    pub fn parse(s: &str) -> Result<Self, CallsignError> {
        if s.is_empty() {
            return Err(CallsignError::Empty);
        }

        let (base, ssid_part) = match s.split_once('-') {
            Some((base, ssid)) => (base, Some(ssid)),
            None => (s, None),
        };

        if base.is_empty() || base.len() > 6 || !base.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CallsignError::InvalidBase(s.to_string()));
        }

        let ssid = match ssid_part {
            Some(digits) => {
                // Reject signs, padding, and anything past two digits before
                // parsing, since u8::from_str accepts a leading '+'.
                if digits.is_empty()
                    || digits.len() > 2
                    || !digits.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(CallsignError::InvalidSsid(s.to_string()));
                }
                let n: u8 = digits
                    .parse()
                    .map_err(|_| CallsignError::InvalidSsid(s.to_string()))?;
                if !(1..=15).contains(&n) {
                    return Err(CallsignError::InvalidSsid(s.to_string()));
                }
                Some(n)
            }
            None => None,
        };

        Ok(Self {
            raw: s.to_string(),
            base: base.to_string(),
            ssid,
        })
    }

    /// Get the original callsign string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the base callsign without the SSID suffix.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Get the Secondary Station Identifier, if present.
    pub fn ssid(&self) -> Option<u8> {
        self.ssid
    }
}

impl std::fmt::Display for Callsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Errors that can occur when parsing a callsign-SSID.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CallsignError {
    #[error("Empty callsign")]
    Empty,
    #[error("Invalid base callsign in {0:?}")]
    InvalidBase(String),
    #[error("Invalid SSID in {0:?}")]
    InvalidSsid(String),
}
