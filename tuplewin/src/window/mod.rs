//! Sliding-window tuple table.
//!
//! `WindowManager` keeps a singly-linked chain over every live record of a
//! `RecordStore`, oldest to newest, and advances the window in batches:
//!
//! ```text
//!  oldest                                              newest
//!    │                                                   │
//!    ▼                                                   ▼
//!  [W] ──► [W] ──► [W] ──► [W] ──► [S] ──► [S] ──► ... [S]
//!  └──────── window members ──────┘ └──── staged since last slide ───┘
//! ```
//!
//! Every insert stages a record at the newest end. Once `slide_size` records
//! are staged, a slide evicts from the oldest end until staged plus window
//! members fit in `window_size`, then confirms every staged record.
//!
//! The undo entry points (`insert_for_undo`, `delete_for_undo`) run the same
//! chain and slide logic against the store's undo entry points and swallow
//! failures, since the rollback protocol has no way to report them.
//!
//! The manager is single-writer: every mutation takes `&mut self`.

pub mod dump;
pub mod events;

pub use dump::WindowSnapshot;
pub use events::{InsertOutcome, SlideReport, TriggerSignal};

use crate::chain::{ChainCursor, ChainWalker};
use crate::config::{ConfigError, WindowConfig};
use crate::error::{WindowError, WindowResult};
use crate::store::{MemoryRecordStore, RecordStore, StoreError};
use crate::types::{Record, RecordId, RecordTag, UndoMark};
use tracing::{debug, trace, warn};

/// Which store entry point a structural change is applied through.
#[derive(Debug, Clone, Copy)]
enum StoreEntry {
    Forward { release_strings: bool },
    Undo(UndoMark),
}

/// Chain endpoints and counters owned by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowState {
    oldest_id: Option<RecordId>,
    newest_id: Option<RecordId>,
    newest_window_id: Option<RecordId>,
    num_staged: usize,
    is_empty: bool,
    pending_trigger: Option<TriggerSignal>,
}

impl WindowState {
    fn new() -> Self {
        Self {
            oldest_id: None,
            newest_id: None,
            newest_window_id: None,
            num_staged: 0,
            is_empty: true,
            pending_trigger: None,
        }
    }

    fn reset_endpoints(&mut self) {
        self.oldest_id = None;
        self.newest_id = None;
        self.newest_window_id = None;
        self.is_empty = true;
    }
}

/// Window table layered over a record store.
#[derive(Debug)]
pub struct WindowManager<S: RecordStore> {
    window_size: usize,
    slide_size: usize,
    has_triggers: bool,
    state: WindowState,
    store: S,
}

impl<T> WindowManager<MemoryRecordStore<T>> {
    /// Window table backed by a fresh in-memory store built from `config.store`.
    pub fn in_memory(config: &WindowConfig) -> Result<Self, ConfigError> {
        Self::new(config, MemoryRecordStore::new(config.store.clone()))
    }
}

impl<S: RecordStore> WindowManager<S> {
    pub fn new(config: &WindowConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            window_size: config.window_size,
            slide_size: config.slide_size,
            has_triggers: config.has_triggers,
            state: WindowState::new(),
            store,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn slide_size(&self) -> usize {
        self.slide_size
    }

    pub fn oldest_id(&self) -> Option<RecordId> {
        self.state.oldest_id
    }

    pub fn newest_id(&self) -> Option<RecordId> {
        self.state.newest_id
    }

    /// Most recent confirmed window member, as of the last slide.
    pub fn newest_window_id(&self) -> Option<RecordId> {
        self.state.newest_window_id
    }

    pub fn num_staged(&self) -> usize {
        self.state.num_staged
    }

    /// Confirmed window members, as counted by the store.
    pub fn tuple_count(&self) -> usize {
        self.store.tuple_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty
    }

    /// All live records, staged or confirmed.
    pub fn len(&self) -> usize {
        self.store.live_count()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<S::Payload>> {
        self.store.get(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a trigger signal is latched and not yet consumed.
    pub fn fires_triggers(&self) -> bool {
        self.state.pending_trigger.is_some()
    }

    /// Consume the latched trigger signal, clearing it.
    pub fn take_trigger(&mut self) -> Option<TriggerSignal> {
        self.state.pending_trigger.take()
    }

    /// Walk every live record, oldest first.
    pub fn walk(&self) -> ChainWalker<'_, S> {
        ChainWalker::new(&self.store, self.state.oldest_id)
    }

    pub fn window_members(&self) -> impl Iterator<Item = &Record<S::Payload>> + '_ {
        self.walk().filter(|record| record.tag() == RecordTag::Window)
    }

    pub fn staged_records(&self) -> impl Iterator<Item = &Record<S::Payload>> + '_ {
        self.walk().filter(|record| record.is_staged())
    }

    /// Insert a record at the newest end, sliding if enough are staged.
    ///
    /// A store failure leaves the window untouched. A failed eviction during
    /// the slide is reported as `WindowError::Eviction` with the record
    /// already linked and counted; only the caller's transaction can undo it.
    pub fn insert(&mut self, payload: S::Payload) -> WindowResult<InsertOutcome> {
        let id = self.store.insert(payload)?;
        self.append(id)?;
        trace!(%id, staged = self.state.num_staged, "record staged");
        Ok(match self.slide_if_due()? {
            Some(report) => InsertOutcome::Slid { id, report },
            None => InsertOutcome::Staged { id },
        })
    }

    /// Re-apply an insert on behalf of a rolled-back transaction.
    pub fn insert_for_undo(&mut self, payload: S::Payload, mark: UndoMark) {
        let id = match self.store.insert_for_undo(payload, mark) {
            Ok(id) => id,
            Err(e) => {
                warn!(mark = mark.0, error = %e, "undo insert rejected by store");
                return;
            }
        };
        if let Err(e) = self.append(id).and_then(|_| self.slide_if_due()) {
            warn!(%id, mark = mark.0, error = %e, "undo insert left window partially applied");
        }
    }

    /// Unlink and physically delete a record, staged or confirmed.
    pub fn delete(&mut self, id: RecordId, release_strings: bool) -> WindowResult<()> {
        self.remove(id, StoreEntry::Forward { release_strings })
    }

    /// Re-apply a delete on behalf of a rolled-back transaction.
    pub fn delete_for_undo(&mut self, id: RecordId, mark: UndoMark) {
        if let Err(e) = self.remove(id, StoreEntry::Undo(mark)) {
            warn!(%id, mark = mark.0, error = %e, "undo delete skipped");
        }
    }

    /// Check chain linkage against the endpoints and counters.
    ///
    /// Returns the chain length, which equals `tuple_count + num_staged`.
    pub fn verify_chain(&self) -> WindowResult<usize> {
        let mut cursor = ChainCursor::new(self.state.oldest_id, self.store.live_count());
        let mut visited = 0usize;
        let mut last = None;
        while let Some(id) = cursor.advance(&self.store)? {
            visited += 1;
            last = Some(id);
        }
        if last != self.state.newest_id {
            return Err(WindowError::ChainCorrupted(format!(
                "chain ends at {:?}, newest is {:?}",
                last, self.state.newest_id
            )));
        }
        if visited != self.store.live_count() {
            return Err(WindowError::ChainCorrupted(format!(
                "chain links {} of {} live records",
                visited,
                self.store.live_count()
            )));
        }
        let counted = self.store.tuple_count() + self.state.num_staged;
        if visited != counted {
            return Err(WindowError::ChainCorrupted(format!(
                "chain length {} but {} window members and {} staged",
                visited,
                self.store.tuple_count(),
                self.state.num_staged
            )));
        }
        if self.state.is_empty != (visited == 0) {
            return Err(WindowError::ChainCorrupted(format!(
                "empty flag {} with {} chained records",
                self.state.is_empty, visited
            )));
        }
        Ok(visited)
    }

    // -----------------------------------------------------------------------
    // Chain maintenance
    // -----------------------------------------------------------------------

    /// Link a freshly stored record at the newest end and stage it.
    fn append(&mut self, id: RecordId) -> WindowResult<()> {
        if self.state.is_empty {
            self.state.oldest_id = Some(id);
        } else {
            let newest = self.state.newest_id.ok_or_else(|| {
                WindowError::ChainCorrupted("non-empty window without a newest record".into())
            })?;
            self.store.set_next(newest, Some(id))?;
        }
        self.state.newest_id = Some(id);
        self.mark_staged(id)?;
        self.state.is_empty = false;
        Ok(())
    }

    fn remove(&mut self, id: RecordId, entry: StoreEntry) -> WindowResult<()> {
        let Some(oldest) = self.state.oldest_id else {
            return Err(WindowError::EmptyWindow);
        };
        let target_next = self
            .store
            .get(id)
            .map(Record::next)
            .ok_or(WindowError::UnknownRecord(id))?;

        if self.state.oldest_id == self.state.newest_id {
            if id != oldest {
                return Err(WindowError::ChainCorrupted(format!(
                    "{} is not linked into a single-record chain",
                    id
                )));
            }
            self.state.reset_endpoints();
        } else if id == oldest {
            self.state.oldest_id = target_next;
            if self.state.newest_window_id == Some(id) {
                self.state.newest_window_id = None;
            }
        } else {
            let prev = self.find_predecessor(oldest, id)?;
            self.store.set_next(prev, target_next)?;
            if self.state.newest_id == Some(id) {
                self.state.newest_id = Some(prev);
            }
            if self.state.newest_window_id == Some(id) {
                self.state.newest_window_id = Some(prev);
            }
        }

        // A staged record must leave through the window so num_staged drops
        // with it; the store only uncounts window members.
        self.mark_window(id)?;
        match entry {
            StoreEntry::Forward { release_strings } => self.store.delete(id, release_strings)?,
            StoreEntry::Undo(mark) => self.store.delete_for_undo(id, mark)?,
        }
        trace!(%id, staged = self.state.num_staged, "record unlinked");
        Ok(())
    }

    /// Scan from `oldest` for the record whose `next` is `target`.
    fn find_predecessor(&self, oldest: RecordId, target: RecordId) -> WindowResult<RecordId> {
        let mut cursor = ChainCursor::new(Some(oldest), self.store.live_count());
        while let Some(id) = cursor.advance(&self.store)? {
            if cursor.peek() == Some(target) {
                return Ok(id);
            }
        }
        Err(WindowError::ChainCorrupted(format!(
            "{} is not linked into the chain",
            target
        )))
    }

    fn mark_staged(&mut self, id: RecordId) -> Result<(), StoreError> {
        if self.store.set_tag(id, RecordTag::Staged)? == RecordTag::Window {
            self.state.num_staged += 1;
        }
        Ok(())
    }

    /// Confirm a record as window member; true if it was staged.
    fn mark_window(&mut self, id: RecordId) -> WindowResult<bool> {
        let promoted = self.store.set_tag(id, RecordTag::Window)? == RecordTag::Staged;
        if promoted {
            self.state.num_staged = self.state.num_staged.checked_sub(1).ok_or_else(|| {
                WindowError::ChainCorrupted(format!(
                    "{} was tagged staged but no staged records are counted",
                    id
                ))
            })?;
        }
        Ok(promoted)
    }

    // -----------------------------------------------------------------------
    // Sliding
    // -----------------------------------------------------------------------

    fn slide_if_due(&mut self) -> WindowResult<Option<SlideReport>> {
        if self.state.num_staged >= self.slide_size {
            self.slide().map(Some)
        } else {
            Ok(None)
        }
    }

    fn slide(&mut self) -> WindowResult<SlideReport> {
        let mut evicted = Vec::new();
        while self.state.num_staged + self.store.tuple_count() > self.window_size {
            evicted.push(self.evict_oldest()?);
        }

        let (promoted, last) = self.tag_window_members()?;
        self.state.newest_window_id = last;

        let trigger = match last {
            Some(newest_window_id) if self.has_triggers => {
                let signal = TriggerSignal { newest_window_id };
                self.state.pending_trigger = Some(signal);
                Some(signal)
            }
            _ => None,
        };

        debug!(
            evicted = evicted.len(),
            promoted,
            tuple_count = self.store.tuple_count(),
            fires_triggers = trigger.is_some(),
            "window slid"
        );
        Ok(SlideReport {
            evicted,
            promoted,
            newest_window_id: last,
            tuple_count: self.store.tuple_count(),
            trigger,
        })
    }

    /// Confirm every staged record on the chain.
    ///
    /// Visits the whole chain, so confirmed records are re-tagged as well;
    /// on a fully confirmed chain this changes nothing. Returns the number
    /// of records promoted and the last record visited.
    fn tag_window_members(&mut self) -> WindowResult<(usize, Option<RecordId>)> {
        let mut cursor = ChainCursor::new(self.state.oldest_id, self.store.live_count());
        let mut promoted = 0;
        let mut last = None;
        while let Some(id) = cursor.advance(&self.store)? {
            if self.mark_window(id)? {
                promoted += 1;
            }
            last = Some(id);
        }
        Ok((promoted, last))
    }

    fn evict_oldest(&mut self) -> WindowResult<RecordId> {
        let id = self.state.oldest_id.ok_or_else(|| {
            WindowError::ChainCorrupted("eviction requested on an empty chain".into())
        })?;
        let next = self
            .store
            .get(id)
            .map(Record::next)
            .ok_or_else(|| WindowError::ChainCorrupted(format!("oldest record {} is missing", id)))?;

        self.state.oldest_id = next;
        if next.is_none() {
            self.state.reset_endpoints();
        }
        if self.state.newest_window_id == Some(id) {
            self.state.newest_window_id = None;
        }

        match self.mark_window(id) {
            Ok(_) => {}
            Err(WindowError::Store(source)) => return Err(WindowError::Eviction { id, source }),
            Err(e) => return Err(e),
        }
        self.store
            .delete(id, true)
            .map_err(|source| WindowError::Eviction { id, source })?;
        trace!(%id, "record evicted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn window(window_size: usize, slide_size: usize) -> WindowManager<MemoryRecordStore<u32>> {
        WindowManager::in_memory(&WindowConfig::new(window_size, slide_size)).unwrap()
    }

    fn payloads(manager: &WindowManager<MemoryRecordStore<u32>>) -> Vec<u32> {
        manager.walk().map(|r| *r.payload()).collect()
    }

    #[test]
    fn test_new_window_is_empty() {
        let manager = window(5, 2);
        assert!(manager.is_empty());
        assert_eq!(manager.oldest_id(), None);
        assert_eq!(manager.newest_id(), None);
        assert_eq!(manager.tuple_count(), 0);
        assert_eq!(manager.verify_chain().unwrap(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = WindowManager::<MemoryRecordStore<u32>>::in_memory(&WindowConfig::new(0, 1));
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_first_insert_sets_both_endpoints() {
        let mut manager = window(5, 2);
        let outcome = manager.insert(1).unwrap();
        let id = outcome.id();
        assert!(matches!(outcome, InsertOutcome::Staged { .. }));
        assert_eq!(manager.oldest_id(), Some(id));
        assert_eq!(manager.newest_id(), Some(id));
        assert!(!manager.is_empty());
        assert_eq!(manager.num_staged(), 1);
        assert_eq!(manager.tuple_count(), 0);
        assert!(manager.get(id).unwrap().is_staged());
    }

    #[test]
    fn test_slide_promotes_staged_records() {
        let mut manager = window(5, 2);
        let first = manager.insert(1).unwrap().id();
        let outcome = manager.insert(2).unwrap();
        let report = outcome.slide().expect("second insert slides");
        assert!(report.evicted.is_empty());
        assert_eq!(report.promoted, 2);
        assert_eq!(report.newest_window_id, Some(outcome.id()));
        assert_eq!(manager.num_staged(), 0);
        assert_eq!(manager.tuple_count(), 2);
        assert_eq!(manager.newest_window_id(), Some(outcome.id()));
        assert_eq!(manager.get(first).unwrap().tag(), RecordTag::Window);
    }

    #[test]
    fn test_slide_evicts_oldest_first() {
        let mut manager = window(3, 1);
        for value in 1..=5 {
            manager.insert(value).unwrap();
        }
        assert_eq!(payloads(&manager), vec![3, 4, 5]);
        assert_eq!(manager.tuple_count(), 3);
        assert_eq!(manager.verify_chain().unwrap(), 3);
    }

    #[test]
    fn test_retagging_confirmed_chain_is_idempotent() {
        let mut manager = window(4, 2);
        for value in 1..=4 {
            manager.insert(value).unwrap();
        }
        let before: Vec<_> = manager.walk().map(|r| (r.id(), r.tag())).collect();
        let (promoted, last) = manager.tag_window_members().unwrap();
        let after: Vec<_> = manager.walk().map(|r| (r.id(), r.tag())).collect();
        assert_eq!(promoted, 0);
        assert_eq!(last, manager.newest_id());
        assert_eq!(before, after);
        assert_eq!(manager.tuple_count(), 4);
    }

    #[test]
    fn test_slide_larger_than_window_evicts_staged() {
        let mut manager = window(2, 3);
        manager.insert(1).unwrap();
        manager.insert(2).unwrap();
        let report = manager.insert(3).unwrap().slide().cloned().unwrap();
        assert_eq!(report.evicted.len(), 1);
        assert_eq!(payloads(&manager), vec![2, 3]);
        assert_eq!(manager.num_staged(), 0);
        assert_eq!(manager.tuple_count(), 2);
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_delete_on_empty_window_fails() {
        let mut manager = window(5, 2);
        assert!(matches!(
            manager.delete(RecordId(0), true),
            Err(WindowError::EmptyWindow)
        ));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_delete_unknown_record_fails_without_mutation() {
        let mut manager = window(5, 2);
        manager.insert(1).unwrap();
        assert!(matches!(
            manager.delete(RecordId(40), true),
            Err(WindowError::UnknownRecord(RecordId(40)))
        ));
        assert_eq!(manager.verify_chain().unwrap(), 1);
    }

    #[test]
    fn test_delete_sole_record_resets_window() {
        let mut manager = window(5, 2);
        let id = manager.insert(1).unwrap().id();
        manager.delete(id, true).unwrap();
        assert!(manager.is_empty());
        assert_eq!(manager.oldest_id(), None);
        assert_eq!(manager.newest_id(), None);
        assert_eq!(manager.newest_window_id(), None);
        assert_eq!(manager.num_staged(), 0);
        assert_eq!(manager.tuple_count(), 0);

        // the next insert starts a fresh chain
        let again = manager.insert(2).unwrap().id();
        assert_eq!(manager.oldest_id(), Some(again));
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_delete_oldest_advances_endpoint() {
        let mut manager = window(5, 2);
        let a = manager.insert(1).unwrap().id();
        let b = manager.insert(2).unwrap().id();
        manager.delete(a, true).unwrap();
        assert_eq!(manager.oldest_id(), Some(b));
        assert_eq!(payloads(&manager), vec![2]);
        assert_eq!(manager.tuple_count(), 1);
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_delete_middle_relinks_predecessor() {
        let mut manager = window(10, 10);
        let ids: Vec<_> = (1..=4).map(|v| manager.insert(v).unwrap().id()).collect();
        manager.delete(ids[2], true).unwrap();
        assert_eq!(payloads(&manager), vec![1, 2, 4]);
        assert_eq!(manager.get(ids[1]).unwrap().next(), Some(ids[3]));
        assert_eq!(manager.num_staged(), 3);
        assert_eq!(manager.tuple_count(), 0);
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_delete_newest_moves_endpoints_back() {
        let mut manager = window(5, 3);
        let ids: Vec<_> = (1..=3).map(|v| manager.insert(v).unwrap().id()).collect();
        assert_eq!(manager.newest_window_id(), Some(ids[2]));
        manager.delete(ids[2], true).unwrap();
        assert_eq!(manager.newest_id(), Some(ids[1]));
        assert_eq!(manager.newest_window_id(), Some(ids[1]));
        let next = manager.insert(4).unwrap().id();
        assert_eq!(manager.get(ids[1]).unwrap().next(), Some(next));
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_delete_staged_record_drops_staged_count() {
        let mut manager = window(5, 3);
        manager.insert(1).unwrap();
        let staged = manager.insert(2).unwrap().id();
        assert_eq!(manager.num_staged(), 2);
        manager.delete(staged, true).unwrap();
        assert_eq!(manager.num_staged(), 1);
        assert_eq!(manager.tuple_count(), 0);
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_trigger_latched_and_consumed() {
        let config = WindowConfig::new(4, 2).with_triggers(true);
        let mut manager = WindowManager::in_memory(&config).unwrap();
        manager.insert(1u32).unwrap();
        assert!(!manager.fires_triggers());
        let outcome = manager.insert(2).unwrap();
        let signal = outcome.fired_trigger().unwrap();
        assert_eq!(signal.newest_window_id, outcome.id());
        assert!(manager.fires_triggers());
        assert_eq!(manager.take_trigger(), Some(signal));
        assert!(!manager.fires_triggers());
        assert_eq!(manager.take_trigger(), None);
    }

    #[test]
    fn test_no_trigger_without_configured_triggers() {
        let mut manager = window(4, 1);
        let outcome = manager.insert(1).unwrap();
        assert!(outcome.slide().is_some());
        assert!(outcome.fired_trigger().is_none());
        assert!(!manager.fires_triggers());
    }

    #[test]
    fn test_store_full_leaves_window_untouched() {
        let store = StoreConfig {
            tuples_per_block: 2,
            max_blocks: Some(1),
            export_enabled: false,
        };
        let config = WindowConfig::new(10, 10).with_store(store);
        let mut manager = WindowManager::in_memory(&config).unwrap();
        manager.insert(1u32).unwrap();
        manager.insert(2).unwrap();
        let newest = manager.newest_id();
        assert!(matches!(
            manager.insert(3),
            Err(WindowError::Store(StoreError::Full { capacity: 2 }))
        ));
        assert_eq!(manager.newest_id(), newest);
        assert_eq!(manager.num_staged(), 2);
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_undo_paths_mirror_forward_paths() {
        let mut manager = window(3, 2);
        manager.insert_for_undo(1, UndoMark(1));
        manager.insert_for_undo(2, UndoMark(2));
        assert_eq!(manager.num_staged(), 0);
        assert_eq!(manager.tuple_count(), 2);
        assert_eq!(manager.store().last_undo_mark(), Some(UndoMark(2)));

        let oldest = manager.oldest_id().unwrap();
        manager.delete_for_undo(oldest, UndoMark(3));
        assert_eq!(payloads(&manager), vec![2]);
        assert_eq!(manager.store().last_undo_mark(), Some(UndoMark(3)));
        manager.verify_chain().unwrap();
    }

    #[test]
    fn test_undo_delete_on_empty_window_is_silent() {
        let mut manager = window(3, 2);
        manager.delete_for_undo(RecordId(0), UndoMark(9));
        assert!(manager.is_empty());
        assert_eq!(manager.store().last_undo_mark(), None);
    }

    #[test]
    fn test_filtered_views() {
        let mut manager = window(5, 3);
        for value in 1..=4 {
            manager.insert(value).unwrap();
        }
        let window: Vec<_> = manager.window_members().map(|r| *r.payload()).collect();
        let staged: Vec<_> = manager.staged_records().map(|r| *r.payload()).collect();
        assert_eq!(window, vec![1, 2, 3]);
        assert_eq!(staged, vec![4]);
    }

    /// Store that hands back records already tagged staged.
    struct PreStagedStore(MemoryRecordStore<u32>);

    impl RecordStore for PreStagedStore {
        type Payload = u32;

        fn insert(&mut self, payload: u32) -> Result<RecordId, StoreError> {
            let id = self.0.insert(payload)?;
            self.0.set_tag(id, RecordTag::Staged)?;
            Ok(id)
        }
        fn insert_for_undo(&mut self, payload: u32, mark: UndoMark) -> Result<RecordId, StoreError> {
            self.0.insert_for_undo(payload, mark)
        }
        fn delete(&mut self, id: RecordId, release_strings: bool) -> Result<(), StoreError> {
            self.0.delete(id, release_strings)
        }
        fn delete_for_undo(&mut self, id: RecordId, mark: UndoMark) -> Result<(), StoreError> {
            self.0.delete_for_undo(id, mark)
        }
        fn get(&self, id: RecordId) -> Option<&Record<u32>> {
            self.0.get(id)
        }
        fn set_next(&mut self, id: RecordId, next: Option<RecordId>) -> Result<(), StoreError> {
            self.0.set_next(id, next)
        }
        fn set_tag(&mut self, id: RecordId, tag: RecordTag) -> Result<RecordTag, StoreError> {
            self.0.set_tag(id, tag)
        }
        fn tuple_count(&self) -> usize {
            self.0.tuple_count()
        }
        fn live_count(&self) -> usize {
            self.0.live_count()
        }
    }

    #[test]
    fn test_uncounted_staged_record_reports_corruption() {
        let store = PreStagedStore(MemoryRecordStore::new(StoreConfig::default()));
        let mut manager = WindowManager::new(&WindowConfig::new(5, 5), store).unwrap();
        let id = manager.insert(1).unwrap().id();
        assert_eq!(manager.num_staged(), 0);

        assert!(matches!(
            manager.delete(id, true),
            Err(WindowError::ChainCorrupted(_))
        ));
        assert_eq!(manager.num_staged(), 0);
    }
}
