use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseLevelError;

/// Log severity, ordered from least to most severe.
///
/// Discriminants use the common numbering where debug is -1 and info is 0,
/// so numeric level strings (`"-1"` through `"5"`) parse as other tooling expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i8)]
pub enum Severity {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    /// Panics after writing, but only in development mode.
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
}

impl Severity {
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::DPanic,
        Severity::Panic,
        Severity::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::DPanic => "dpanic",
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
        }
    }

    pub fn as_i8(self) -> i8 {
        self as i8
    }

    pub fn from_i8(v: i8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_i8() == v)
    }

    /// Parses a level name: the alias table first (case-insensitive), then
    /// the fallback grammar (empty string or a numeric discriminant).
    pub fn parse(input: &str) -> Result<Self, ParseLevelError> {
        match input.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "dpanic" => Ok(Severity::DPanic),
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            _ => Self::parse_fallback(input)
                .ok_or_else(|| ParseLevelError::InvalidLevelName(input.to_string())),
        }
    }

    /// Empty string (the zero value, Info) or a discriminant spelled
    /// exactly `-1` or `0`..`5`: no sign on non-negatives, no leading zeros.
    fn parse_fallback(input: &str) -> Option<Self> {
        match input.as_bytes() {
            [] => Some(Severity::Info),
            b"-1" => Some(Severity::Debug),
            [d @ b'0'..=b'5'] => Self::from_i8((*d - b'0') as i8),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Severity::parse(&s).map_err(serde::de::Error::custom)
    }
}
