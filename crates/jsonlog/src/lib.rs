//! Process-wide structured JSON logging with a runtime-adjustable level.
//!
//! ```no_run
//! use jsonlog::Field;
//!
//! // Apply LOG_LEVEL, if set. Call once, early.
//! jsonlog::init();
//!
//! jsonlog::info("Application started", &[Field::string("version", "1.0")]);
//! jsonlog::debug("Debug information", &[Field::int("count", 42)]);
//!
//! jsonlog::set_level("debug").unwrap();
//! assert_eq!(jsonlog::get_level(), "debug");
//! ```
//!
//! Each call writes one JSON object per line with `level`, `timestamp`,
//! `caller` and `msg` keys followed by the supplied fields.

pub mod bridge;
pub mod config;
pub mod core;
pub mod error;
pub mod global;
pub mod logger;

pub use crate::{
    config::{LoggerConfig, Output},
    core::{
        encoder::{EncoderConfig, JsonEncoder},
        field::Field,
        gate::LevelGate,
        record::{Caller, LogRecord},
        severity::Severity,
        sink::{SharedBuffer, Sink},
    },
    error::ParseLevelError,
    global::{
        debug, dpanic, enabled, error, fatal, get_level, global, info, init, panic, replace_global,
        set_level, warn,
    },
    logger::{Logger, LEVEL_ENV},
};
