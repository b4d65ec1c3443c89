//! Domain error types.
//!
//! These errors represent consistency failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Line id is not in the firmware's line table
    #[error("unknown line id: {0:?}")]
    UnknownLine(String),
}
