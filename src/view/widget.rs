//! Headless widget view that tracks what a page would be showing

use std::time::Duration;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Notification, Severity, ViewController};
use crate::state::{TimeRemaining, DEFAULT_TITLE};

/// Which of the three panels is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Config,
    Running,
    Finished,
}

/// Padded countdown digits as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digits {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for Digits {
    fn default() -> Self {
        Self {
            days: "00".to_string(),
            hours: "00".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
        }
    }
}

impl From<&TimeRemaining> for Digits {
    fn from(remaining: &TimeRemaining) -> Self {
        let [days, hours, minutes, seconds] = remaining.padded();
        Self { days, hours, minutes, seconds }
    }
}

/// Everything visible on the widget at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub panel: Panel,
    pub title: String,
    pub digits: Digits,
    pub finish_message: Option<String>,
    pub fields_invalid: bool,
    /// Incremented whenever the form inputs should be emptied
    pub form_resets: u64,
    pub notification: Option<Notification>,
}

impl ViewSnapshot {
    pub fn new() -> Self {
        Self {
            panel: Panel::Config,
            title: DEFAULT_TITLE.to_string(),
            digits: Digits::default(),
            finish_message: None,
            fields_invalid: false,
            form_resets: 0,
            notification: None,
        }
    }
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// How long a notification stays visible by default
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// View that keeps a [`ViewSnapshot`] and publishes every change
#[derive(Debug)]
pub struct WidgetView {
    snapshot_tx: watch::Sender<ViewSnapshot>,
    notification_ttl: Duration,
}

impl WidgetView {
    pub fn new() -> Self {
        Self::with_notification_ttl(DEFAULT_NOTIFICATION_TTL)
    }

    /// A view whose notifications disappear after `ttl`
    pub fn with_notification_ttl(ttl: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(ViewSnapshot::new());
        Self {
            snapshot_tx,
            notification_ttl: ttl,
        }
    }

    /// Current view contents, without an expired notification
    pub fn snapshot(&self) -> ViewSnapshot {
        let mut snapshot = self.snapshot_tx.borrow().clone();
        let now = Utc::now();
        if snapshot.notification.as_ref().map_or(false, |n| n.expires_at <= now) {
            snapshot.notification = None;
        }
        snapshot
    }

    /// Receive a fresh snapshot after each change
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn modify<F>(&self, updater: F)
    where
        F: FnOnce(&mut ViewSnapshot),
    {
        // send_modify updates the value even with no receivers attached
        self.snapshot_tx.send_modify(updater);
    }
}

impl Default for WidgetView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController for WidgetView {
    fn show_config_panel(&self, title: &str) {
        info!("Showing config panel");
        self.modify(|s| {
            s.panel = Panel::Config;
            s.title = title.to_string();
            s.digits = Digits::default();
            s.finish_message = None;
        });
    }

    fn show_running_panel(&self, title: &str) {
        info!("Showing countdown for '{}'", title);
        self.modify(|s| {
            s.panel = Panel::Running;
            s.title = title.to_string();
            s.finish_message = None;
        });
    }

    fn show_finished_panel(&self, title: &str, message: &str) {
        info!("{}", message);
        self.modify(|s| {
            s.panel = Panel::Finished;
            s.title = title.to_string();
            s.finish_message = Some(message.to_string());
        });
    }

    fn update_tick(&self, remaining: &TimeRemaining) {
        debug!("Tick: {}", remaining);
        if remaining.is_expired {
            return;
        }
        let digits = Digits::from(remaining);
        self.modify(|s| s.digits = digits);
    }

    fn mark_fields_invalid(&self) {
        self.modify(|s| s.fields_invalid = true);
    }

    fn clear_fields_invalid(&self) {
        self.modify(|s| s.fields_invalid = false);
    }

    fn reset_form(&self) {
        self.modify(|s| {
            s.form_resets += 1;
            s.fields_invalid = false;
        });
    }

    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning | Severity::Error => warn!("Notification ({:?}): {}", severity, message),
            Severity::Success => info!("Notification: {}", message),
        }
        let at = Utc::now();
        let ttl = chrono::Duration::from_std(self.notification_ttl)
            .unwrap_or_else(|_| chrono::Duration::milliseconds(3000));
        let notification = Notification {
            severity,
            message: message.to_string(),
            at,
            expires_at: at + ttl,
        };
        self.modify(|s| s.notification = Some(notification));
    }
}
