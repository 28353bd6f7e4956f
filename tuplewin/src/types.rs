//! Core record types shared by the store, the chain walker and the window manager.
//!
//! Unit tests are colocated at the bottom of this file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot identifier assigned by a record store.
///
/// Identifiers are only meaningful to the store that issued them and may be
/// reused once the record they named has been physically deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u32);

impl RecordId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Window membership of a live record.
///
/// A record is always exactly one of the two; there is no "neither" or
/// "both" state to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordTag {
    /// Inserted since the last slide, not yet confirmed.
    Staged,
    /// Confirmed window member.
    Window,
}

impl RecordTag {
    pub fn is_staged(self) -> bool {
        matches!(self, RecordTag::Staged)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordTag::Staged => "staged",
            RecordTag::Window => "window",
        }
    }
}

/// Opaque position in the surrounding transaction's undo log.
///
/// Passed through untouched to the store's undo entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndoMark(pub usize);

/// A live tuple as held by a record store.
///
/// Linkage and tag are only mutated through the owning store so that its
/// window-member counter stays consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    id: RecordId,
    next: Option<RecordId>,
    tag: RecordTag,
    payload: T,
}

impl<T> Record<T> {
    /// Fresh record as a plain table row: unlinked and counted as a window member.
    pub fn new(id: RecordId, payload: T) -> Self {
        Self {
            id,
            next: None,
            tag: RecordTag::Window,
            payload,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Next-newer record in the chain, `None` for the newest.
    pub fn next(&self) -> Option<RecordId> {
        self.next
    }

    pub fn tag(&self) -> RecordTag {
        self.tag
    }

    pub fn is_staged(&self) -> bool {
        self.tag.is_staged()
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub(crate) fn set_next(&mut self, next: Option<RecordId>) {
        self.next = next;
    }

    /// Replace the tag, returning the previous one.
    pub(crate) fn replace_tag(&mut self, tag: RecordTag) -> RecordTag {
        std::mem::replace(&mut self.tag, tag)
    }
}
