use std::{borrow::Cow, panic::Location};

use chrono::{DateTime, Local};

use super::{field::Field, severity::Severity};

/// Source location of the code that invoked an emit function.
///
/// The file is borrowed for call sites known at compile time and owned for
/// records forwarded from the `log` crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// The caller of the enclosing `#[track_caller]` chain.
    #[track_caller]
    pub fn here() -> Self {
        Location::caller().into()
    }

    /// `dir/file:line`: the file and its immediate parent directory only.
    pub fn short(&self) -> String {
        let file: &str = &self.file;
        let trimmed = match file.rfind(['/', '\\']) {
            Some(last) => match file[..last].rfind(['/', '\\']) {
                Some(prev) => &file[prev + 1..],
                None => file,
            },
            None => file,
        };
        format!("{}:{}", trimmed, self.line)
    }

    pub fn full(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(loc: &'static Location<'static>) -> Self {
        Self::new(loc.file(), loc.line())
    }
}

/// One log call, built when the gate lets it through and dropped once encoded.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: Severity,
    pub message: &'a str,
    pub logger_name: Option<&'a str>,
    pub context: &'a [Field],
    pub fields: &'a [Field],
    pub timestamp: DateTime<Local>,
    pub caller: Option<Caller>,
}
