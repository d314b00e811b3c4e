mod cli;

use std::io::{self, BufRead};

use clap::Parser;
use serde::Deserialize;

use jsonlog::{
    bridge,
    error::{AppError, AppResult},
    Field, Severity,
};

use crate::cli::Args;

/// One NDJSON line read from stdin.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Request {
    SetLevel {
        set_level: String,
    },
    Log {
        #[serde(default)]
        level: Severity,
        msg: String,
        #[serde(default)]
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

fn main() -> AppResult<()> {
    let args = Args::parse();
    jsonlog::replace_global(args.logger_config().build());
    bridge::init(jsonlog::global().as_ref().clone());

    match &args.log_level {
        Some(level) => jsonlog::set_level(level)?,
        None => jsonlog::init(),
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Request>(&line) {
            Ok(req) => handle(req),
            Err(e) => {
                let e = AppError::InvalidRequest(e.to_string());
                tracing::warn!(code = e.code(), error = %e, "skipping malformed request");
            }
        }
    }

    jsonlog::global().flush()?;
    Ok(())
}

fn handle(req: Request) {
    match req {
        Request::SetLevel { set_level } => {
            if let Err(e) = jsonlog::set_level(&set_level) {
                let e = AppError::from(e);
                tracing::warn!(code = e.code(), error = %e, "level unchanged");
            }
        }
        Request::Log { level, msg, fields } => {
            let fields: Vec<Field> = fields.into_iter().map(|(k, v)| Field::new(k, v)).collect();
            jsonlog::global().log(level, &msg, &fields);
        }
    }
}
