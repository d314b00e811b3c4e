use std::{io, sync::Arc};

use chrono::Local;

use crate::{
    core::{
        encoder::{iso8601_time, JsonEncoder},
        field::Field,
        gate::LevelGate,
        record::{Caller, LogRecord},
        severity::Severity,
        sink::Sink,
    },
    error::ParseLevelError,
};

/// Environment variable consulted by [`Logger::init_from_env`].
pub const LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug)]
struct Core {
    gate: Arc<LevelGate>,
    encoder: JsonEncoder,
    sink: Sink,
    development: bool,
}

/// A leveled JSON logger.
///
/// Cloning is cheap; clones and children made with [`with`](Logger::with)
/// or [`named`](Logger::named) share the same gate and sink.
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<Core>,
    name: Option<String>,
    context: Vec<Field>,
}

impl Logger {
    /// Production logger: default encoder, given threshold and sink.
    pub fn new(level: Severity, sink: Sink) -> Self {
        Self::from_parts(Arc::new(LevelGate::new(level)), JsonEncoder::default(), sink, false)
    }

    pub fn from_parts(
        gate: Arc<LevelGate>,
        encoder: JsonEncoder,
        sink: Sink,
        development: bool,
    ) -> Self {
        Self {
            core: Arc::new(Core {
                gate,
                encoder,
                sink,
                development,
            }),
            name: None,
            context: Vec::new(),
        }
    }

    pub fn gate(&self) -> &Arc<LevelGate> {
        &self.core.gate
    }

    pub fn is_development(&self) -> bool {
        self.core.development
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_level(&self, input: &str) -> Result<(), ParseLevelError> {
        self.core.gate.set_level(input)
    }

    pub fn get_level(&self) -> &'static str {
        self.core.gate.get_level()
    }

    pub fn enabled(&self, level: Severity) -> bool {
        self.core.gate.enabled(level)
    }

    /// Child logger whose lines also carry `fields`.
    pub fn with(&self, fields: &[Field]) -> Logger {
        let mut child = self.clone();
        child.context.extend_from_slice(fields);
        child
    }

    /// Child logger with `name` appended to the logger name (dot-separated).
    pub fn named(&self, name: &str) -> Logger {
        let mut child = self.clone();
        child.name = Some(match &self.name {
            Some(parent) if !name.is_empty() => format!("{parent}.{name}"),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        });
        child
    }

    /// Reads `LOG_LEVEL` and applies it. Never fails: a bad value is
    /// reported as a warning and the current threshold is kept.
    #[track_caller]
    pub fn init_from_env(&self) {
        self.init_from_lookup(|key| std::env::var(key).ok());
    }

    #[track_caller]
    pub fn init_from_lookup<F>(&self, lookup: F)
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(LEVEL_ENV).filter(|v| !v.is_empty()) {
            None => self.info(
                "Log level is not set, using default.",
                &[Field::string("current", self.get_level())],
            ),
            Some(value) => match self.set_level(&value) {
                Ok(()) => self.info(
                    "Log level set from environment.",
                    &[Field::string("value", value.as_str())],
                ),
                Err(e) => self.warn(
                    "Invalid LOG_LEVEL provided, using default.",
                    &[Field::string("value", value.as_str()), Field::error(&e)],
                ),
            },
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::Error, msg, fields);
    }

    /// Writes at dpanic level, then panics if this is a development logger.
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.log(Severity::DPanic, msg, fields);
    }

    /// Writes at panic level, then panics, whether or not the line was written.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Severity::Panic, msg, fields);
        unreachable!("panic-level log returned")
    }

    /// Writes at fatal level, flushes, then exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Severity::Fatal, msg, fields);
        unreachable!("fatal-level log returned")
    }

    /// Emits at `level`, then applies the level's terminal action
    /// (panic for panic/dpanic-in-development, exit for fatal).
    #[track_caller]
    pub fn log(&self, level: Severity, msg: &str, fields: &[Field]) {
        let caller = Caller::here();
        self.write(level, msg, fields, Some(caller));

        match level {
            Severity::DPanic if self.core.development => panic!("{msg}"),
            Severity::Panic => panic!("{msg}"),
            Severity::Fatal => {
                let _ = self.flush();
                std::process::exit(1);
            }
            _ => {}
        }
    }

    /// Gate check, encode and write. No terminal action.
    pub(crate) fn write(&self, level: Severity, msg: &str, fields: &[Field], caller: Option<Caller>) {
        if !self.enabled(level) {
            return;
        }
        let record = LogRecord {
            level,
            message: msg,
            logger_name: self.name.as_deref(),
            context: &self.context,
            fields,
            timestamp: Local::now(),
            caller,
        };
        let line = self.core.encoder.encode(&record);
        if let Err(e) = self.core.sink.write_line(&line) {
            eprintln!("{} write error: {}", iso8601_time(&Local::now()), e);
        }
        if level >= Severity::DPanic {
            let _ = self.flush();
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.core.sink.flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Info, Sink::stdout())
    }
}
