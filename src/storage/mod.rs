//! Persistence module
//!
//! A key-value backend plus the typed store for the one countdown record.

pub mod kv;
pub mod countdown_store;

// Re-export main types
pub use kv::{FileStorage, KeyValueStore, MemoryStorage};
pub use countdown_store::{CountdownStore, RECORD_KEY};
