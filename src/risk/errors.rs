// Risk calculation error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Protocol not supported: {protocol}")]
    UnsupportedProtocol { protocol: String },

    #[error("Invalid metric {field}: {value}")]
    InvalidMetric { field: String, value: f64 },

    #[error("Invalid input {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Calculator for {expected} received {found} metrics")]
    ProtocolMismatch { expected: String, found: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RiskError {
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        RiskError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
