//! View layer interface
//!
//! The engine never renders anything itself. Every visible effect goes
//! through [`ViewController`], so any rendering technology can sit behind it.

pub mod widget;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimeRemaining;

pub use widget::{Digits, Panel, ViewSnapshot, WidgetView, DEFAULT_NOTIFICATION_TTL};

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Success,
    Error,
}

/// A toast as last shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
    /// The toast is hidden from this instant on
    pub expires_at: DateTime<Utc>,
}

/// Render target and notification sink driven by the engine.
///
/// The engine calls these methods while holding its internal state lock.
/// An implementation must not call back into the `CountdownEngine` that
/// drives it (not even `state()`) from inside a callback, or it deadlocks.
/// Hand the work off to another task instead.
pub trait ViewController: Send + Sync {
    fn show_config_panel(&self, title: &str);
    fn show_running_panel(&self, title: &str);
    fn show_finished_panel(&self, title: &str, message: &str);
    fn update_tick(&self, remaining: &TimeRemaining);
    fn mark_fields_invalid(&self);
    fn clear_fields_invalid(&self);
    /// Empty the name and date inputs
    fn reset_form(&self);
    /// Fire-and-forget
    fn notify(&self, severity: Severity, message: &str);
}
