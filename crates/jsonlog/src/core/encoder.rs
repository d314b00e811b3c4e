use std::fmt;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Deserialize;

use super::{field::Field, record::LogRecord};

/// Formats a timestamp into the string written under the time key.
pub type TimeEncoder = fn(&DateTime<Local>) -> String;

/// ISO-8601 with millisecond precision and a numeric offset, e.g.
/// `2024-05-01T09:30:00.123+0200`.
pub fn iso8601_time(t: &DateTime<Local>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

/// RFC 3339 with nanosecond precision.
pub fn rfc3339_nano_time(t: &DateTime<Local>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerFormat {
    #[default]
    Short,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    #[default]
    Iso8601,
    Rfc3339Nano,
}

impl TimeFormat {
    pub fn encoder(self) -> TimeEncoder {
        match self {
            TimeFormat::Iso8601 => iso8601_time,
            TimeFormat::Rfc3339Nano => rfc3339_nano_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub time_format: TimeFormat,
    pub caller_format: CallerFormat,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "timestamp".into(),
            level_key: "level".into(),
            name_key: "logger".into(),
            caller_key: "caller".into(),
            message_key: "msg".into(),
            time_format: TimeFormat::Iso8601,
            caller_format: CallerFormat::Short,
        }
    }
}

/// Encodes records as one JSON object per line.
///
/// Keys are written in a fixed order (level, time, name, caller, message,
/// context fields, call fields) and are not deduplicated.
#[derive(Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
    encode_time: TimeEncoder,
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        let encode_time = config.time_format.encoder();
        Self {
            config,
            encode_time,
        }
    }

    /// Overrides the time format with an arbitrary function.
    pub fn with_time_encoder(mut self, encode_time: TimeEncoder) -> Self {
        self.encode_time = encode_time;
        self
    }

    /// Returns the encoded line, newline included.
    pub fn encode(&self, record: &LogRecord<'_>) -> Vec<u8> {
        let mut out = Vec::with_capacity(128);
        out.push(b'{');
        let mut first = true;

        let c = &self.config;
        write_str_entry(&mut out, &mut first, &c.level_key, record.level.as_str());
        write_str_entry(&mut out, &mut first, &c.time_key, &(self.encode_time)(&record.timestamp));
        if let Some(name) = record.logger_name {
            write_str_entry(&mut out, &mut first, &c.name_key, name);
        }
        if let Some(caller) = &record.caller {
            let s = match c.caller_format {
                CallerFormat::Short => caller.short(),
                CallerFormat::Full => caller.full(),
            };
            write_str_entry(&mut out, &mut first, &c.caller_key, &s);
        }
        write_str_entry(&mut out, &mut first, &c.message_key, record.message);

        for field in record.context.iter().chain(record.fields) {
            write_field(&mut out, &mut first, field);
        }

        out.extend_from_slice(b"}\n");
        out
    }
}

impl fmt::Debug for JsonEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonEncoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

fn write_key(out: &mut Vec<u8>, first: &mut bool, key: &str) {
    if !*first {
        out.push(b',');
    }
    *first = false;
    write_json_str(out, key);
    out.push(b':');
}

fn write_str_entry(out: &mut Vec<u8>, first: &mut bool, key: &str, value: &str) {
    write_key(out, first, key);
    write_json_str(out, value);
}

fn write_field(out: &mut Vec<u8>, first: &mut bool, field: &Field) {
    write_key(out, first, &field.key);
    // Writing a `Value` into a Vec cannot fail.
    if serde_json::to_writer(&mut *out, &field.value).is_err() {
        out.extend_from_slice(b"null");
    }
}

fn write_json_str(out: &mut Vec<u8>, s: &str) {
    if serde_json::to_writer(&mut *out, s).is_err() {
        out.extend_from_slice(b"\"\"");
    }
}
