//! Error type for window operations.

use crate::store::StoreError;
use crate::types::RecordId;
use thiserror::Error;

/// Failures reported by the forward-path window operations.
///
/// Undo-path operations never return these; they log and carry on.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The record store refused the physical insert or delete.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// Delete was called while the chain holds no records.
    #[error("Window is empty")]
    EmptyWindow,
    /// The target id does not name a live record.
    #[error("Unknown record {0}")]
    UnknownRecord(RecordId),
    /// An eviction failed mid-slide. Window state is left partially applied.
    #[error("Eviction of {id} failed: {source}")]
    Eviction {
        id: RecordId,
        #[source]
        source: StoreError,
    },
    /// Chain linkage disagrees with the store or the counters.
    #[error("Chain corrupted: {0}")]
    ChainCorrupted(String),
}

pub type WindowResult<T> = Result<T, WindowError>;
