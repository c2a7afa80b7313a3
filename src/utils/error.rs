use crate::core::checkout::CheckoutIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Storage error on slot '{key}': {message}")]
    PersistenceError { key: String, message: String },

    #[error("Malformed value in slot '{key}': {message}")]
    MalformedStateError { key: String, message: String },

    #[error("Checkout form has {} problem(s)", .issues.len())]
    ValidationError { issues: Vec<CheckoutIssue> },

    #[error("Cart is empty")]
    EmptyCartError,

    #[error("Order rejected: {message}")]
    InvalidOrderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShopError {
    pub fn persistence(key: &str, message: impl Into<String>) -> Self {
        Self::PersistenceError {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedStateError { .. } => ErrorSeverity::Low,
            Self::ValidationError { .. } | Self::EmptyCartError => ErrorSeverity::Medium,
            Self::PersistenceError { .. } | Self::IoError(_) => ErrorSeverity::Medium,
            Self::InvalidOrderError { .. }
            | Self::SerializationError(_)
            | Self::CsvError(_) => ErrorSeverity::High,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::EmptyCartError => {
                "Your cart is empty. Please choose a plan first.".to_string()
            }
            Self::ValidationError { issues } => {
                let lines: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
                format!("Please correct:\n{}", lines.join("\n"))
            }
            Self::PersistenceError { .. } | Self::IoError(_) => {
                "Your changes could not be saved.".to_string()
            }
            Self::MalformedStateError { .. } => {
                "Stored data was unreadable and has been reset.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::EmptyCartError => "Add a plan with `skipass-shop add <plan>` before checking out",
            Self::ValidationError { .. } | Self::InvalidOrderError { .. } => {
                "Fix the listed fields and submit again"
            }
            Self::PersistenceError { .. } | Self::IoError(_) => {
                "Check that the data directory exists and is writable, then retry"
            }
            Self::MalformedStateError { .. } => "No action needed; the slot falls back to its default",
            Self::SerializationError(_) | Self::CsvError(_) => "Retry the export in another format",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;
