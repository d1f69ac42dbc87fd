//! Status record - the JSON document published as status.json

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-value operational flag. `off` means the application is in maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    On,
    Off,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::On => "on",
            Status::Off => "off",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The published record. Whatever the remote file contains is trusted as-is;
/// malformed values are carried through rather than validated away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: Status,
    pub reason: String,
    pub last_updated: String,
    pub version: String,
    pub maintenance: bool,
    pub message: String,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self {
            status: Status::On,
            reason: String::new(),
            last_updated: String::new(),
            version: "v6.0".to_string(),
            maintenance: false,
            message: String::new(),
        }
    }
}

impl StatusRecord {
    /// Apply a status transition. `message` is preserved unless a non-empty
    /// replacement is supplied; `version` is never touched.
    pub fn apply(&mut self, status: Status, reason: &str, message: Option<&str>) {
        self.status = status;
        self.reason = reason.to_string();
        self.last_updated = chrono::Utc::now().to_rfc3339();
        self.maintenance = status == Status::Off;
        if let Some(message) = message.filter(|m| !m.is_empty()) {
            self.message = message.to_string();
        }
    }

    /// Serialized form written to the store: 2-space indented JSON.
    pub fn to_pretty_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
