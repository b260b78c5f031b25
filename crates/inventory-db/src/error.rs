//! # Storage Error Types
//!
//! The single error kind for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Categorized by constraint / cause        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in the CLI) ← Code + user-facing message                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant means the operation persisted nothing.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Store operation errors.
///
/// Variants only categorize the cause; callers that don't care can treat
/// every variant the same.
#[derive(Debug, Error)]
pub enum StorageError {
    /// UNIQUE constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a customer whose email is already taken
    #[error("Duplicate value: {constraint}")]
    UniqueViolation { constraint: String },

    /// FOREIGN KEY constraint violation.
    ///
    /// ## When This Occurs
    /// - Product referencing a supplier id that doesn't exist
    /// - Order referencing a customer id that doesn't exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// NOT NULL constraint violation.
    #[error("Missing required value: {message}")]
    NotNullViolation { message: String },

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - Order status outside the fixed enumeration
    /// - Non-positive price or total, negative stock, blank supplier name
    #[error("Constraint violation: {message}")]
    CheckViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be opened or created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed (syntax error, datatype mismatch, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A row couldn't be decoded into its entity type.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    /// No connection became available within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StorageError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → classified by ErrorKind
/// sqlx::Error::ColumnDecode   → StorageError::Decode
/// sqlx::Error::PoolTimedOut   → StorageError::PoolExhausted
/// sqlx::Error::Io / Tls       → StorageError::ConnectionFailed
/// Other                       → StorageError::Internal
/// ```
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => StorageError::UniqueViolation {
                        // SQLite: "UNIQUE constraint failed: Customers.email_customer"
                        constraint: message
                            .split("UNIQUE constraint failed: ")
                            .nth(1)
                            .unwrap_or(&message)
                            .to_string(),
                    },
                    ErrorKind::ForeignKeyViolation => StorageError::ForeignKeyViolation { message },
                    ErrorKind::NotNullViolation => StorageError::NotNullViolation { message },
                    ErrorKind::CheckViolation => StorageError::CheckViolation { message },
                    _ => StorageError::QueryFailed(message),
                }
            }

            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_) => StorageError::Decode(err.to_string()),

            sqlx::Error::PoolTimedOut => StorageError::PoolExhausted,

            sqlx::Error::PoolClosed => StorageError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                StorageError::ConnectionFailed(err.to_string())
            }

            _ => StorageError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, StorageError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolTimedOut),
            StorageError::PoolExhausted
        ));
        assert!(matches!(
            StorageError::from(sqlx::Error::PoolClosed),
            StorageError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        assert!(matches!(
            StorageError::from(sqlx::Error::RowNotFound),
            StorageError::Internal(_)
        ));
    }

    #[test]
    fn test_constraint_classification() {
        let unique = StorageError::UniqueViolation {
            constraint: "Customers.email_customer".to_string(),
        };
        assert_eq!(unique.to_string(), "Duplicate value: Customers.email_customer");
    }
}
