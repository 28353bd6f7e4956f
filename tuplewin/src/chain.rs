//! Ordered traversal of the record chain, oldest to newest.
//!
//! Two flavours:
//! - `ChainCursor` holds only the id of the next record to visit, so the
//!   store can be borrowed mutably between steps. It reads a record's `next`
//!   link at visit time; changing the tag of the record just visited is
//!   safe, relinking it is not.
//! - `ChainWalker` is a read-only `Iterator` over records, used for dumps and
//!   filtered views.
//!
//! Both are bounded by the store's live count so a cyclic chain cannot
//! loop forever.

use crate::error::{WindowError, WindowResult};
use crate::store::RecordStore;
use crate::types::{Record, RecordId};

/// Forward-only cursor over the chain. Each traversal restarts from a fresh
/// cursor at the oldest record.
#[derive(Debug, Clone)]
pub struct ChainCursor {
    next: Option<RecordId>,
    remaining: usize,
}

impl ChainCursor {
    /// Position a cursor at `oldest`, allowing at most `limit` visits.
    pub fn new(oldest: Option<RecordId>, limit: usize) -> Self {
        Self {
            next: oldest,
            remaining: limit,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Id of the record the next call to `advance` will visit.
    pub fn peek(&self) -> Option<RecordId> {
        self.next
    }

    /// Visit the next record, returning its id.
    pub fn advance<S>(&mut self, store: &S) -> WindowResult<Option<RecordId>>
    where
        S: RecordStore + ?Sized,
    {
        let Some(id) = self.next else {
            return Ok(None);
        };
        if self.remaining == 0 {
            return Err(WindowError::ChainCorrupted(format!(
                "chain continues past {} live records at {}",
                store.live_count(),
                id
            )));
        }
        let record = store.get(id).ok_or_else(|| {
            WindowError::ChainCorrupted(format!("chain links to missing record {}", id))
        })?;
        self.next = record.next();
        self.remaining -= 1;
        Ok(Some(id))
    }
}

/// Read-only iterator over chained records.
///
/// Stops quietly at a dangling link or once the live count is exhausted;
/// use `WindowManager::verify_chain` to detect those conditions.
pub struct ChainWalker<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    next: Option<RecordId>,
    remaining: usize,
}

impl<'a, S: RecordStore + ?Sized> ChainWalker<'a, S> {
    pub fn new(store: &'a S, oldest: Option<RecordId>) -> Self {
        Self {
            store,
            next: oldest,
            remaining: store.live_count(),
        }
    }
}

impl<'a, S: RecordStore + ?Sized> Iterator for ChainWalker<'a, S> {
    type Item = &'a Record<S::Payload>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let record = self.store.get(self.next?)?;
        self.next = record.next();
        self.remaining -= 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store::MemoryRecordStore;

    fn linked(payloads: &[&'static str]) -> (MemoryRecordStore<&'static str>, Vec<RecordId>) {
        let mut store = MemoryRecordStore::new(StoreConfig::default());
        let ids: Vec<_> = payloads.iter().map(|p| store.insert(*p).unwrap()).collect();
        for pair in ids.windows(2) {
            store.set_next(pair[0], Some(pair[1])).unwrap();
        }
        (store, ids)
    }

    #[test]
    fn test_walker_visits_in_chain_order() {
        let (store, ids) = linked(&["a", "b", "c"]);
        let seen: Vec<_> = ChainWalker::new(&store, ids.first().copied())
            .map(|r| *r.payload())
            .collect();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_walker_on_empty_chain() {
        let store: MemoryRecordStore<()> = MemoryRecordStore::new(StoreConfig::default());
        assert_eq!(ChainWalker::new(&store, None).count(), 0);
    }

    #[test]
    fn test_cursor_tolerates_tag_mutation_of_visited_record() {
        let (mut store, ids) = linked(&["a", "b", "c"]);
        let mut cursor = ChainCursor::new(Some(ids[0]), store.live_count());
        let mut visited = Vec::new();
        while cursor.has_next() {
            let id = cursor.advance(&store).unwrap().unwrap();
            store
                .set_tag(id, crate::types::RecordTag::Staged)
                .unwrap();
            visited.push(id);
        }
        assert_eq!(visited, ids);
        assert_eq!(store.tuple_count(), 0);
    }

    #[test]
    fn test_cursor_detects_cycle() {
        let (mut store, ids) = linked(&["a", "b"]);
        store.set_next(ids[1], Some(ids[0])).unwrap();
        let mut cursor = ChainCursor::new(Some(ids[0]), store.live_count());
        assert!(cursor.advance(&store).unwrap().is_some());
        assert!(cursor.advance(&store).unwrap().is_some());
        assert!(matches!(
            cursor.advance(&store),
            Err(WindowError::ChainCorrupted(_))
        ));
        // the read-only walker just stops
        assert_eq!(ChainWalker::new(&store, Some(ids[0])).count(), 2);
    }

    #[test]
    fn test_cursor_detects_dangling_link() {
        let (mut store, ids) = linked(&["a", "b"]);
        store.set_next(ids[1], Some(RecordId(99))).unwrap();
        let mut cursor = ChainCursor::new(Some(ids[0]), 10);
        cursor.advance(&store).unwrap();
        cursor.advance(&store).unwrap();
        assert!(cursor.has_next());
        assert!(cursor.advance(&store).is_err());
    }
}
