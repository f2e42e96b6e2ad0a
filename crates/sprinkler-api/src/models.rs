// Device API response types
//
// Every device response carries a top-level `status` field; `"ok"` means
// success. The `/status` payload carries far more than the client needs, so
// `DeviceStatus` models a stable subset and keeps the rest in `extra`.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Status envelope ──────────────────────────────────────────────────

/// The minimal shape every device JSON response shares.
///
/// ```json
/// { "status": "ok", "addr": "192.168.7.65", ... }
/// ```
///
/// Both fields are kept as raw JSON so that a missing or oddly typed
/// `status` is reported as a protocol failure rather than a decoding one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusEnvelope {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub addr: Option<Value>,
}

impl StatusEnvelope {
    /// Only the string `"ok"` counts.
    pub fn is_ok(&self) -> bool {
        matches!(&self.status, Some(Value::String(s)) if s == "ok")
    }

    /// The reported device address, when it is a string.
    pub fn addr(&self) -> Option<&str> {
        self.addr.as_ref().and_then(Value::as_str)
    }
}

/// A fully-read device response: HTTP status plus the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponse {
    pub http_status: StatusCode,
    pub body: String,
}

// ── Full status ──────────────────────────────────────────────────────

/// Typed view of `GET /status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub status: String,
    pub addr: String,
    #[serde(default)]
    pub hostname: Option<String>,
    /// Device-local wall clock, `HH:MM:SS`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub up_time: Option<String>,
    /// 1-based numbers of the zones currently on.
    #[serde(default)]
    pub on: Vec<u8>,
    #[serde(default)]
    pub num_zones: Option<u8>,
    #[serde(default)]
    pub scheduler_state: Option<String>,
    #[serde(default)]
    pub curr_cycle: Option<String>,
    #[serde(default)]
    pub next_cycle: Option<String>,
    #[serde(default)]
    pub start_date_time: Option<String>,
    /// Seasonal adjustment, percent.
    #[serde(default)]
    pub adj: Option<u16>,
    #[serde(default)]
    pub hold_days: Option<i32>,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub toggle_delay: Option<u64>,
    #[serde(default)]
    pub log_size: Option<u64>,
    #[serde(default)]
    pub rssi: Option<i32>,
    /// Catch-all for the diagnostic fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Zones ────────────────────────────────────────────────────────────

/// Opaque zone identifier passed through to the device untouched.
///
/// The device accepts a single 1-based zone (`"4"`), a comma-separated list
/// (`"1,3"`), or `"all"`. The client never validates it; the device is the
/// only authority on which zones exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Every zone the device has configured.
    pub fn all() -> Self {
        Self("all".into())
    }

    /// Several zones switched together, e.g. `[1, 3]` -> `"1,3"`.
    pub fn list(zones: &[u8]) -> Self {
        let joined = zones
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u8> for ZoneId {
    fn from(zone: u8) -> Self {
        Self(zone.to_string())
    }
}

impl From<u32> for ZoneId {
    fn from(zone: u32) -> Self {
        Self(zone.to_string())
    }
}

impl From<&str> for ZoneId {
    fn from(zone: &str) -> Self {
        Self(zone.to_owned())
    }
}

impl From<String> for ZoneId {
    fn from(zone: String) -> Self {
        Self(zone)
    }
}

/// The action segment of `/zone/{zone}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneCommand {
    On,
    Off,
    /// Turn every other zone off, then this one on.
    Toggle,
}

impl ZoneCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for ZoneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
