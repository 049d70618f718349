//! Cart error types.
//!
//! None of these reach callers of the mutating store operations; the store
//! logs and absorbs them. They surface from snapshot decoding and from the
//! order summary.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Persisted snapshot is present but unusable.
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(#[from] cart_storage::StorageError),
}
