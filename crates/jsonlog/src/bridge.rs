//! Routes `tracing` events through a [`Logger`], so one JSON stream carries
//! both facade calls and `tracing` macros from the host and its dependencies.
//!
//! Levels map TRACE/DEBUG to debug, INFO to info, WARN to warn and ERROR to
//! error. The logger's gate is consulted on every event, so level changes
//! made after installation take effect immediately.
//!
//! Records from the `log` crate arrive through `tracing-log`; their real file
//! and line are recovered from the normalized metadata.

use std::{borrow::Cow, fmt};

use serde_json::Value;
use tracing::{
    field::{Field as TracingField, Visit},
    metadata::LevelFilter,
    subscriber::Interest,
    Event, Level, Metadata, Subscriber,
};
use tracing_log::NormalizeEvent;
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::{
    core::{
        field::{float_value, Field},
        record::Caller,
        severity::Severity,
    },
    logger::Logger,
};

pub struct JsonLayer {
    logger: Logger,
}

impl JsonLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::TRACE | Level::DEBUG => Severity::Debug,
        Level::INFO => Severity::Info,
        Level::WARN => Severity::Warn,
        Level::ERROR => Severity::Error,
    }
}

impl<S: Subscriber> Layer<S> for JsonLayer {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // The gate can move at any time; never let a callsite be cached as off.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger.enabled(severity_for(metadata.level()))
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(LevelFilter::TRACE)
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = match event.normalized_metadata() {
            Some(log_meta) => log_meta
                .file()
                .zip(log_meta.line())
                .map(|(file, line)| Caller::new(file.to_string(), line)),
            None => meta.file().zip(meta.line()).map(|(file, line)| Caller::new(file, line)),
        };
        self.logger.write(
            severity_for(meta.level()),
            &visitor.message,
            &visitor.fields,
            caller,
        );
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: &TracingField, value: Value) {
        if field.name() == "message" {
            self.message = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return;
        }
        // Metadata copied over by tracing-log; it duplicates what we already encode.
        if field.name().starts_with("log.") {
            return;
        }
        self.fields.push(Field::new(Cow::Borrowed(field.name()), value));
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, float_value(value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.push(field, Value::String(format!("{value:?}")));
    }
}

/// Installs a global `tracing` subscriber that writes through `logger`.
///
/// `RUST_LOG`, when set, narrows which targets reach the logger. Does nothing
/// if a global subscriber is already installed.
pub fn init(logger: Logger) {
    let filter = EnvFilter::try_from_default_env().ok();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(JsonLayer::new(logger))
        .try_init();
}
