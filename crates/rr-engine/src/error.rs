//! Error types for the bet engine

use thiserror::Error;

use rr_slot::SlotError;

use crate::storage::StorageError;

/// Bet engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Attempted bet exceeds the account balance; the bet is rejected
    /// explicitly, never silently dropped
    #[error("Insufficient funds: bet requires {required:.2}, balance is {balance:.2}")]
    InsufficientFunds { required: f64, balance: f64 },

    /// Unknown game or malformed outcome from the slot core
    #[error(transparent)]
    Slot(#[from] SlotError),

    /// Persistence failure; the bet fails and the balance is left unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
