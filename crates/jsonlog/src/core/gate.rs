use std::sync::atomic::{AtomicI8, Ordering};

use super::severity::Severity;
use crate::error::ParseLevelError;

/// Shared minimum-severity threshold.
///
/// The level lives in a single `AtomicI8`, so readers always observe a
/// whole value written by some `set`, never a partial one.
#[derive(Debug)]
pub struct LevelGate {
    level: AtomicI8,
}

impl LevelGate {
    pub fn new(level: Severity) -> Self {
        Self {
            level: AtomicI8::new(level.as_i8()),
        }
    }

    pub fn level(&self) -> Severity {
        // Only `set` writes this cell and it stores valid discriminants.
        Severity::from_i8(self.level.load(Ordering::SeqCst)).unwrap_or_default()
    }

    pub fn set(&self, level: Severity) {
        self.level.store(level.as_i8(), Ordering::SeqCst);
    }

    /// Parses `input` and replaces the threshold. On error the threshold is untouched.
    pub fn set_level(&self, input: &str) -> Result<(), ParseLevelError> {
        let level = Severity::parse(input)?;
        self.set(level);
        Ok(())
    }

    /// Canonical lowercase name of the current threshold.
    pub fn get_level(&self) -> &'static str {
        self.level().as_str()
    }

    pub fn enabled(&self, level: Severity) -> bool {
        level >= self.level()
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}
