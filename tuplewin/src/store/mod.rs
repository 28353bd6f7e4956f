//! Record store trait and error types.
//!
//! Responsibilities:
//! - Physical slot allocation, identifier assignment and deletion.
//! - Ownership of the window-member counter (`tuple_count`).
//! - Record linkage and tag updates, so the counter can never drift from
//!   the tags actually stored.
//!
//! The window manager layers chain and slide semantics on top of any
//! implementation of `RecordStore`.

pub mod memory;

pub use memory::MemoryRecordStore;

use crate::types::{Record, RecordId, RecordTag, UndoMark};
use thiserror::Error;

/// Error type for record stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store is full ({capacity} records)")]
    Full { capacity: usize },
    #[error("Unknown record {0}")]
    UnknownRecord(RecordId),
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Minimal storage API consumed by the window manager.
///
/// Notes:
/// - `insert` and `insert_for_undo` create records tagged `Window` and count
///   them in `tuple_count`, like rows of a plain table.
/// - `set_tag` adjusts `tuple_count` when a record moves in or out of the
///   window, and reports the previous tag.
/// - Physical deletion decrements `tuple_count` only for window members.
pub trait RecordStore {
    type Payload;

    fn insert(&mut self, payload: Self::Payload) -> Result<RecordId, StoreError>;
    fn insert_for_undo(
        &mut self,
        payload: Self::Payload,
        mark: UndoMark,
    ) -> Result<RecordId, StoreError>;
    fn delete(&mut self, id: RecordId, release_strings: bool) -> Result<(), StoreError>;
    fn delete_for_undo(&mut self, id: RecordId, mark: UndoMark) -> Result<(), StoreError>;

    fn get(&self, id: RecordId) -> Option<&Record<Self::Payload>>;
    fn set_next(&mut self, id: RecordId, next: Option<RecordId>) -> Result<(), StoreError>;
    fn set_tag(&mut self, id: RecordId, tag: RecordTag) -> Result<RecordTag, StoreError>;

    /// Confirmed window members currently stored.
    fn tuple_count(&self) -> usize;
    /// All live records, staged or not.
    fn live_count(&self) -> usize;

    fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }
}
