use clap::Parser;

use jsonlog::{EncoderConfig, LoggerConfig, Output, Severity};

#[derive(Parser, Debug, Clone)]
#[command(name = "jsonlog")]
pub struct Args {
    /// Minimum level to emit. Overrides LOG_LEVEL when given.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write log lines to stderr instead of stdout.
    #[arg(long)]
    pub stderr: bool,

    /// Development mode: dpanic-level requests panic after writing.
    #[arg(long)]
    pub development: bool,

    /// Key under which the timestamp is written.
    #[arg(long, default_value = "timestamp")]
    pub time_key: String,
}

impl Args {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: Severity::Info,
            development: self.development,
            output: if self.stderr { Output::Stderr } else { Output::Stdout },
            encoder: EncoderConfig {
                time_key: self.time_key.clone(),
                ..EncoderConfig::default()
            },
        }
    }
}
