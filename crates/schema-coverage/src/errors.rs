//! Error types for coverage classification.

use thiserror::Error;

/// Errors that can occur during coverage classification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoverageError {
    /// No document schemas were supplied, so no ratio can be computed.
    #[error("cannot classify coverage over zero documents")]
    EmptyInput,
}

/// Result type for coverage operations.
pub type CoverageResult<T> = Result<T, CoverageError>;
