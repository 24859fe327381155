//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure an action can report. Validation and dependency
//! failures are detected before the store is mutated; store failures are
//! passed through opaquely.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::ValidationFailure {
///     field: "email".to_string(),
///     message: "Email already in use".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid email: Email already in use");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Input was rejected before anything was written.
    #[error("Invalid {field}: {message}")]
    ValidationFailure {
        /// The offending input field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee cannot be deleted while payrolls reference it.
    #[error("Employee {employee_id} has {payroll_count} payroll(s); delete the payrolls first")]
    HasDependents {
        /// The employee whose deletion was refused.
        employee_id: Uuid,
        /// The number of referencing payroll records.
        payroll_count: usize,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (e.g., "Employee").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// The requesting identity may not perform the action.
    #[error("Not authorized: {message}")]
    Unauthorized {
        /// A description of the refused action.
        message: String,
    },

    /// The external record store failed.
    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),

    /// A password could not be hashed or a stored hash could not be read.
    #[error("Password hashing failed: {message}")]
    PasswordHash {
        /// The underlying hasher error.
        message: String,
    },

    /// A payslip link could not be encoded as a QR code.
    #[error("QR code could not be generated: {message}")]
    QrEncoding {
        /// The underlying encoder error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl PayrollError {
    /// Shorthand for a [`PayrollError::ValidationFailure`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`PayrollError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for a [`PayrollError::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
