//! State management module
//!
//! This module contains the countdown data model, the time-remaining
//! calculation, the engine that drives them and the state the server shares.

pub mod countdown_state;
pub mod time_remaining;
pub mod engine;
pub mod app_state;

// Re-export main types
pub use countdown_state::{
    form_min_date, parse_target_date, CountdownRecord, EngineState, DEFAULT_TITLE, FINISHED_TITLE,
};
pub use time_remaining::{pad2, time_remaining, TimeRemaining};
pub use engine::{CountdownEngine, EngineSettings, EngineSnapshot};
pub use app_state::AppState;
