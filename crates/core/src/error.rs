//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock preconditions, missing references). Infrastructure concerns belong elsewhere.
///
/// None of these are fatal: the scheduling engine reports them to the caller as
/// notices and leaves state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-numeric or negative input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A production commitment exceeds the stock held in the part's bins.
    #[error("insufficient stock for part {part}: requested {requested}, available {available}")]
    InsufficientStock {
        part: String,
        requested: i64,
        available: i64,
    },

    /// A referenced vulcanizer, part or ledger row does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn insufficient_stock(part: impl Into<String>, requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            part: part.into(),
            requested,
            available,
        }
    }

    /// Whether this error is a rejection of user input (as opposed to a missing reference).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientStock { .. })
    }
}
