use std::sync::Arc;

use serde::Deserialize;

use crate::{
    core::{
        encoder::{EncoderConfig, JsonEncoder},
        gate::LevelGate,
        severity::Severity,
        sink::Sink,
    },
    logger::Logger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
}

impl Output {
    pub fn sink(self) -> Sink {
        match self {
            Output::Stdout => Sink::stdout(),
            Output::Stderr => Sink::stderr(),
        }
    }
}

/// Logger settings, embeddable in a host application's config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Severity,
    pub development: bool,
    pub output: Output,
    pub encoder: EncoderConfig,
}

impl LoggerConfig {
    pub fn build(&self) -> Logger {
        self.build_with_sink(self.output.sink())
    }

    /// Same as [`build`](Self::build) but writing to `sink` instead of `output`.
    pub fn build_with_sink(&self, sink: Sink) -> Logger {
        Logger::from_parts(
            Arc::new(LevelGate::new(self.level)),
            JsonEncoder::new(self.encoder.clone()),
            sink,
            self.development,
        )
    }
}
