// tuplewin Library
// Sliding-window tuple tables over a pluggable record store

pub mod chain;
pub mod config;
pub mod error;
pub mod replay;
pub mod store;
pub mod types;
pub mod window;

pub use config::{ConfigError, StoreConfig, WindowConfig};
pub use error::{WindowError, WindowResult};
pub use store::{MemoryRecordStore, RecordStore, StoreError};
pub use types::{Record, RecordId, RecordTag, UndoMark};
pub use window::{InsertOutcome, SlideReport, TriggerSignal, WindowManager, WindowSnapshot};
