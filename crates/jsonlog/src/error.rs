use thiserror::Error;

/// Returned when a string does not name a [`Severity`](crate::Severity).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLevelError {
    #[error("invalid log level string: {0}")]
    InvalidLevelName(String),
}

impl ParseLevelError {
    /// The rejected input, verbatim.
    pub fn input(&self) -> &str {
        match self {
            ParseLevelError::InvalidLevelName(s) => s,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::InvalidLevel(_) => "INVALID_LEVEL",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
