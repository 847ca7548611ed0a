//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants). Infrastructure concerns belong elsewhere; duplicate business
/// keys surface from the storage layer, not from here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. missing field, non-positive amount).
    #[error("validación fallida: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. paying a voided invoice).
    #[error("invariante violada: {0}")]
    InvariantViolation(String),

    /// A requested resource was not found (domain-level).
    #[error("no encontrado")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
