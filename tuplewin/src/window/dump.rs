//! Read-only diagnostics: text dump and serializable state snapshot.

use super::WindowManager;
use crate::store::RecordStore;
use crate::types::{RecordId, RecordTag};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Point-in-time copy of a window's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub window_size: usize,
    pub slide_size: usize,
    pub oldest_id: Option<RecordId>,
    pub newest_id: Option<RecordId>,
    pub newest_window_id: Option<RecordId>,
    pub tuple_count: usize,
    pub num_staged: usize,
    pub live_count: usize,
    pub is_empty: bool,
    pub fires_triggers: bool,
}

impl<S: RecordStore> WindowManager<S> {
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            window_size: self.window_size,
            slide_size: self.slide_size,
            oldest_id: self.state.oldest_id,
            newest_id: self.state.newest_id,
            newest_window_id: self.state.newest_window_id,
            tuple_count: self.store.tuple_count(),
            num_staged: self.state.num_staged,
            live_count: self.store.live_count(),
            is_empty: self.state.is_empty,
            fires_triggers: self.fires_triggers(),
        }
    }
}

impl<S> WindowManager<S>
where
    S: RecordStore,
    S::Payload: fmt::Debug,
{
    /// Render the chain, one line per record, after a size header.
    ///
    /// Staged and window records are numbered separately from zero. Safe to
    /// call on a partially slid window.
    pub fn dump(&self) -> String {
        let mut output = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_dump(&mut output);
        output
    }

    fn write_dump(&self, output: &mut String) -> fmt::Result {
        writeln!(
            output,
            "DEBUG TABLE SIZE: {} tuples, {} staged",
            self.store.tuple_count(),
            self.state.num_staged
        )?;
        let mut stage_id = 0usize;
        let mut win_id = 0usize;
        for record in self.walk() {
            match record.tag() {
                RecordTag::Staged => {
                    write!(output, "STAGED {}: ", stage_id)?;
                    stage_id += 1;
                }
                RecordTag::Window => {
                    write!(output, "WINDOW {}: ", win_id)?;
                    win_id += 1;
                }
            }
            writeln!(output, "{:?}", record.payload())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::WindowConfig;
    use crate::store::MemoryRecordStore;
    use crate::window::WindowManager;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_empty_window() {
        let manager: WindowManager<MemoryRecordStore<String>> =
            WindowManager::in_memory(&WindowConfig::new(3, 2)).unwrap();
        assert_eq!(manager.dump(), "DEBUG TABLE SIZE: 0 tuples, 0 staged\n");
    }

    #[test]
    fn test_dump_numbers_each_class_separately() {
        let mut manager = WindowManager::in_memory(&WindowConfig::new(3, 2)).unwrap();
        for name in ["a", "b", "c"] {
            manager.insert(name.to_string()).unwrap();
        }
        let expected = "\
DEBUG TABLE SIZE: 2 tuples, 1 staged
WINDOW 0: \"a\"
WINDOW 1: \"b\"
STAGED 0: \"c\"
";
        assert_eq!(manager.dump(), expected);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let config = WindowConfig::new(3, 1).with_triggers(true);
        let mut manager = WindowManager::in_memory(&config).unwrap();
        let id = manager.insert(7u8).unwrap().id();
        let snapshot = manager.snapshot();
        assert_eq!(snapshot.oldest_id, Some(id));
        assert_eq!(snapshot.newest_window_id, Some(id));
        assert_eq!(snapshot.tuple_count, 1);
        assert_eq!(snapshot.num_staged, 0);
        assert_eq!(snapshot.live_count, 1);
        assert!(snapshot.fires_triggers);
        assert!(!snapshot.is_empty);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["window_size"], 3);
        assert_eq!(json["newest_id"], id.get());
    }
}
