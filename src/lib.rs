//! Countdown Widget - a persisted single-countdown engine
//!
//! This library provides the countdown state machine, its one-record
//! persistence and recovery, and a headless widget view that any renderer
//! can observe.

pub mod clock;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod view;
pub mod api;
pub mod utils;
mod tasks;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{CountdownError, StorageError, ValidationError};
pub use state::{AppState, CountdownEngine, CountdownRecord, EngineSettings, EngineState, TimeRemaining};
pub use storage::{CountdownStore, FileStorage, KeyValueStore, MemoryStorage};
pub use view::{Severity, ViewController, WidgetView};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
