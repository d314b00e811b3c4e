//! Process-wide logger handle and the free-function facade over it.
//!
//! The handle is created lazily as an info-level stdout logger. Tests (or a
//! host application) can install their own logger with [`replace_global`].

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::{
    core::{field::Field, severity::Severity},
    error::ParseLevelError,
    logger::Logger,
};

static GLOBAL: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn cell() -> &'static RwLock<Arc<Logger>> {
    GLOBAL.get_or_init(|| RwLock::new(Arc::new(Logger::default())))
}

/// The current process-wide logger.
pub fn global() -> Arc<Logger> {
    Arc::clone(&cell().read().unwrap_or_else(PoisonError::into_inner))
}

/// Installs `logger` as the process-wide logger and returns the previous one.
pub fn replace_global(logger: Logger) -> Arc<Logger> {
    let mut guard = cell().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, Arc::new(logger))
}

/// Applies `LOG_LEVEL` to the global logger. See [`Logger::init_from_env`].
#[track_caller]
pub fn init() {
    global().init_from_env();
}

pub fn set_level(input: &str) -> Result<(), ParseLevelError> {
    global().set_level(input)
}

pub fn get_level() -> &'static str {
    global().get_level()
}

pub fn enabled(level: Severity) -> bool {
    global().enabled(level)
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    global().debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    global().info(msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    global().warn(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    global().error(msg, fields);
}

#[track_caller]
pub fn dpanic(msg: &str, fields: &[Field]) {
    global().dpanic(msg, fields);
}

#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    global().panic(msg, fields)
}

#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    global().fatal(msg, fields)
}
