//! Configuration for window tables and their record stores.
//!
//! Window sizing lives in `WindowConfig`; storage geometry and the export
//! flag live in `StoreConfig`, which is handed to the store and never read
//! by the window manager.

pub mod types;

pub use types::*;
