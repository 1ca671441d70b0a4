use std::fmt;

use crate::risk::RiskError;

#[derive(Debug)]
pub enum AppError {
    ConfigError(String),
    ValidationError(String),
    DataSourceError(String),
    ExportError(String),
    Timeout(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::DataSourceError(msg) => write!(f, "Data source error: {}", msg),
            AppError::ExportError(msg) => write!(f, "Export error: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::DataSourceError(format!("JSON parse error: {}", err))
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ExportError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::ConfigurationError { message } => AppError::ConfigError(message),
            other => AppError::ValidationError(other.to_string()),
        }
    }
}
