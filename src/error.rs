//! Error types for cosecha operations.
//!
//! Provides rich error context for library consumers, with enough structure
//! for a host to distinguish client errors (bad request) from operator
//! errors (missing deployment artifacts).

use std::fmt;

/// Why a named input field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    /// The field was absent from the request.
    Missing,
    /// The field was present but was not a number or numeric string.
    NotNumeric,
    /// The field parsed but was NaN or infinite.
    NotFinite,
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputReason::Missing => write!(f, "missing"),
            InvalidInputReason::NotNumeric => write!(f, "not numeric"),
            InvalidInputReason::NotFinite => write!(f, "not finite"),
        }
    }
}

/// Main error type for cosecha operations.
///
/// # Examples
///
/// ```
/// use cosecha::error::{CosechaError, InvalidInputReason};
///
/// let err = CosechaError::InvalidInput {
///     field: "rainfall".to_string(),
///     reason: InvalidInputReason::Missing,
/// };
/// assert!(err.to_string().contains("rainfall"));
/// assert!(err.is_client_error());
/// ```
#[derive(Debug)]
pub enum CosechaError {
    /// A required input field is missing or does not parse as a finite number.
    InvalidInput {
        /// Canonical name of the offending field
        field: String,
        /// What was wrong with it
        reason: InvalidInputReason,
    },

    /// The configured classifier expects a feature name that no alias resolves.
    UnmappedFeature {
        /// The feature name the classifier declared
        feature: String,
    },

    /// The reference dataset is empty or missing when statistics are requested.
    DataUnavailable {
        /// What was being built when the data came up empty
        context: String,
    },

    /// Neither a classifier nor reference statistics are configured.
    ServiceUnavailable,

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// CSV parse error from dataset loading.
    Csv(csv::Error),
}

impl fmt::Display for CosechaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CosechaError::InvalidInput { field, reason } => {
                write!(f, "Invalid input field '{field}': {reason}")
            }
            CosechaError::UnmappedFeature { feature } => {
                write!(f, "No alias resolves classifier feature '{feature}'")
            }
            CosechaError::DataUnavailable { context } => {
                write!(f, "Reference dataset unavailable: {context}")
            }
            CosechaError::ServiceUnavailable => {
                write!(f, "No model or dataset available for prediction")
            }
            CosechaError::Io(e) => write!(f, "I/O error: {e}"),
            CosechaError::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for CosechaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CosechaError::Io(e) => Some(e),
            CosechaError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CosechaError {
    fn from(err: std::io::Error) -> Self {
        CosechaError::Io(err)
    }
}

impl From<csv::Error> for CosechaError {
    fn from(err: csv::Error) -> Self {
        CosechaError::Csv(err)
    }
}

impl CosechaError {
    /// Create an error for a field absent from the request
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: InvalidInputReason::Missing,
        }
    }

    /// Create an error for a field that does not parse as a number
    #[must_use]
    pub fn non_numeric_field(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: InvalidInputReason::NotNumeric,
        }
    }

    /// Create an error for a field carrying NaN or an infinity
    #[must_use]
    pub fn non_finite_field(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: InvalidInputReason::NotFinite,
        }
    }

    /// True when the failure is the caller's to fix (bad request or model
    /// misconfiguration), false for missing deployment artifacts.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CosechaError::InvalidInput { .. } | CosechaError::UnmappedFeature { .. }
        )
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CosechaError>;
