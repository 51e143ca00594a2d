//! Error types for smartfin-core
//!
//! Error codes and severities for the analytics and dataset operations.

use serde::{Deserialize, Serialize};
use smartfin_parser::ParseError;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Operation needs at least one transaction
    EmptyDataset,
    /// Caller supplied unusable data
    InvalidInput,
    /// Statement import failed
    ImportError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::EmptyDataset => write!(f, "EMPTY_DATASET"),
            ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
            ErrorCode::ImportError => write!(f, "IMPORT_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Debug,
    Warning,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("No transactions available for {operation}")]
    EmptyDataset { operation: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Import failed: {0}")]
    Import(#[from] ParseError),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::EmptyDataset { .. } => ErrorCode::EmptyDataset,
            CoreError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CoreError::Import(_) => ErrorCode::ImportError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::EmptyDataset { .. } => ErrorSeverity::Warning,
            CoreError::InvalidInput { .. } => ErrorSeverity::Debug,
            CoreError::Import(_) => ErrorSeverity::Warning,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the caller, not the server, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::InvalidInput { .. } | CoreError::Import(_))
    }

    /// Log the error at a level matching its severity
    pub fn log(&self, operation: &str) {
        match self.severity() {
            ErrorSeverity::Critical => {
                log::error!(target: "smartfin::error", "[{}] {} - Operation: {}", self.code(), self, operation)
            }
            ErrorSeverity::Warning => {
                log::warn!(target: "smartfin::error", "[{}] {} - Operation: {}", self.code(), self, operation)
            }
            ErrorSeverity::Debug => {
                log::debug!(target: "smartfin::error", "[{}] {} - Operation: {}", self.code(), self, operation)
            }
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
