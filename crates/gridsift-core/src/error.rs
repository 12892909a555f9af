//! Error types for `GridSift`.
//!
//! This module provides a unified error type for filter compilation and
//! search execution. Every failure in the engine is synchronous and fatal:
//! the engine is pure computation, so nothing is retried or recovered
//! internally and errors surface directly to the caller.

use thiserror::Error;

use crate::filter::Comparator;

/// Result type alias for `GridSift` operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while compiling or executing a search request.
///
/// Each variant includes a descriptive error message suitable for end-users.
/// Error codes follow the pattern `GRID-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Filter references a field with no registered mapping (GRID-001).
    #[error("[GRID-001] No field mapping registered for filter field '{0}'")]
    UnknownField(String),

    /// Sort references a field with no registered mapping (GRID-002).
    #[error("[GRID-002] No field mapping registered for sort field '{0}'")]
    UnknownSortField(String),

    /// A date filter value failed to parse (GRID-003).
    ///
    /// Date filters must always be well-formed when present; every other
    /// kind is dropped silently on a parse failure.
    #[error("[GRID-003] Value '{value}' for field '{field}' is not a valid date")]
    BadFilterValue {
        /// Field the filter targeted.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Comparator is structurally unsupported for the field's kind (GRID-004).
    #[error("[GRID-004] Comparator {comparator:?} is not supported on field '{field}' of kind {kind}")]
    BadComparator {
        /// Field the filter targeted.
        field: String,
        /// The requested comparator.
        comparator: Comparator,
        /// Declared kind of the field.
        kind: &'static str,
    },

    /// Default-sort resolution was requested on an empty registry (GRID-005).
    #[error("[GRID-005] Registry has no mappings to resolve a default sort from")]
    NoDefaultSort,
}

impl SearchError {
    /// Returns the stable `GRID-XXX` code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "GRID-001",
            Self::UnknownSortField(_) => "GRID-002",
            Self::BadFilterValue { .. } => "GRID-003",
            Self::BadComparator { .. } => "GRID-004",
            Self::NoDefaultSort => "GRID-005",
        }
    }

    /// Returns the field name the error refers to, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownField(field) | Self::UnknownSortField(field) => Some(field),
            Self::BadFilterValue { field, .. } | Self::BadComparator { field, .. } => Some(field),
            Self::NoDefaultSort => None,
        }
    }
}
