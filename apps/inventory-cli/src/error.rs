//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Inventory CLI                      │
//! │                                                                         │
//! │  inventory customers add --email ada@example.com                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad form input? ─── ValidationError ──────────┐                │  │
//! │  │         │                                      │                │  │
//! │  │         ▼                                      ▼                │  │
//! │  │  Store refused? ──── StorageError ──────────► AppError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[DUPLICATE]: Email is already in use                     │
//! │  exit status: ErrorCode::exit_code()                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the same error is printed as:
//! ```json
//! { "code": "DUPLICATE", "message": "Email is already in use" }
//! ```

use serde::Serialize;
use thiserror::Error;

use inventory_core::ValidationError;
use inventory_db::StorageError;

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from CLI commands.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected before reaching the store
    ValidationError,

    /// A unique value (customer email) is already taken
    Duplicate,

    /// A referenced supplier or customer does not exist
    InvalidReference,

    /// The store rejected a value (NOT NULL or CHECK)
    ConstraintViolation,

    /// Store unreachable or busy
    DatabaseUnavailable,

    /// Any other store failure
    DatabaseError,

    /// Configuration could not be resolved
    Config,

    /// Writing the output failed
    Output,
}

impl ErrorCode {
    /// Process exit status for this error.
    ///
    /// Follows the BSD `sysexits.h` values.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::Duplicate
            | ErrorCode::InvalidReference
            | ErrorCode::ConstraintViolation => 65,
            ErrorCode::DatabaseUnavailable => 69,
            ErrorCode::DatabaseError => 70,
            ErrorCode::Config => 78,
            ErrorCode::Output => 74,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::InvalidReference => "INVALID_REFERENCE",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Output => "OUTPUT",
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Config, message)
    }
}

/// Converts store errors to CLI errors.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { constraint } => {
                let field = if constraint.contains("email") {
                    "Email"
                } else {
                    constraint.as_str()
                };
                AppError::new(
                    ErrorCode::Duplicate,
                    format!("{} is already in use", field),
                )
            }
            StorageError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                AppError::new(
                    ErrorCode::InvalidReference,
                    "The referenced supplier or customer does not exist",
                )
            }
            StorageError::NotNullViolation { message } => AppError::new(
                ErrorCode::ConstraintViolation,
                format!("Missing required value ({})", message),
            ),
            StorageError::CheckViolation { message } => AppError::new(
                ErrorCode::ConstraintViolation,
                format!("Value rejected by the database ({})", message),
            ),
            StorageError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseUnavailable, "Database connection failed")
            }
            StorageError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseUnavailable, "Database is busy")
            }
            StorageError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            StorageError::Decode(e) => {
                tracing::error!("Row decode failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database returned unexpected data")
            }
            StorageError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::Output, format!("Could not write output: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::new(ErrorCode::Output, format!("Could not encode JSON: {}", err))
    }
}

/// Converts form validation errors to CLI errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_message() {
        let err: AppError = StorageError::UniqueViolation {
            constraint: "Customers.email_customer".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.message, "Email is already in use");
    }

    #[test]
    fn test_store_errors_hide_details() {
        let err: AppError = StorageError::QueryFailed("near \"SELEC\": syntax error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_validation_error_keeps_field() {
        let err: AppError = ValidationError::required("Supplier Name").into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "Supplier Name is required");
    }

    #[test]
    fn test_exit_codes_are_nonzero() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::Duplicate,
            ErrorCode::InvalidReference,
            ErrorCode::ConstraintViolation,
            ErrorCode::DatabaseUnavailable,
            ErrorCode::DatabaseError,
            ErrorCode::Config,
            ErrorCode::Output,
        ] {
            assert_ne!(code.exit_code(), 0, "{}", code.as_str());
        }
    }

    #[test]
    fn test_json_shape() {
        let err = AppError::validation("Name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Name is required");
    }
}
