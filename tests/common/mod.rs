#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use chrono::{DateTime, TimeZone, Utc};
use countdown_widget::{
    state::TimeRemaining,
    view::{Severity, ViewController},
    Clock, CountdownEngine, CountdownStore, EngineSettings, KeyValueStore, MemoryStorage,
    StorageError,
};

/// One call the engine made into the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowConfig(String),
    ShowRunning(String),
    ShowFinished(String, String),
    Tick(TimeRemaining),
    MarkInvalid,
    ClearInvalid,
    ResetForm,
    Notify(Severity, String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn push(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ticks(&self) -> Vec<TimeRemaining> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Tick(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn count_notifications(&self, severity: Severity) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ViewCall::Notify(s, _) if *s == severity))
            .count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl ViewController for RecordingView {
    fn show_config_panel(&self, title: &str) {
        self.push(ViewCall::ShowConfig(title.to_string()));
    }

    fn show_running_panel(&self, title: &str) {
        self.push(ViewCall::ShowRunning(title.to_string()));
    }

    fn show_finished_panel(&self, title: &str, message: &str) {
        self.push(ViewCall::ShowFinished(title.to_string(), message.to_string()));
    }

    fn update_tick(&self, remaining: &TimeRemaining) {
        self.push(ViewCall::Tick(*remaining));
    }

    fn mark_fields_invalid(&self) {
        self.push(ViewCall::MarkInvalid);
    }

    fn clear_fields_invalid(&self) {
        self.push(ViewCall::ClearInvalid);
    }

    fn reset_form(&self) {
        self.push(ViewCall::ResetForm);
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.push(ViewCall::Notify(severity, message.to_string()));
    }
}

/// In-memory store whose writes and removals fail while `failing` is set
#[derive(Debug, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing: AtomicBool,
}

impl FlakyStorage {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Lock("storage full".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for FlakyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove_item(key)
    }
}

/// Wall clock that follows Tokio's (pausable) time from a fixed base
#[derive(Debug)]
pub struct TokioClock {
    base: DateTime<Utc>,
    started: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(base: DateTime<Utc>) -> Self {
        Self {
            base,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.started.elapsed()).unwrap();
        self.base + elapsed
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

pub struct Harness {
    pub engine: CountdownEngine,
    pub view: Arc<RecordingView>,
    pub backend: Arc<MemoryStorage>,
    pub store: CountdownStore,
}

pub fn harness() -> Harness {
    harness_with(Arc::new(MemoryStorage::new()), EngineSettings::default())
}

pub fn harness_with(backend: Arc<MemoryStorage>, settings: EngineSettings) -> Harness {
    let view = Arc::new(RecordingView::default());
    let store = CountdownStore::new(backend.clone() as Arc<dyn KeyValueStore>);
    let engine = CountdownEngine::new(
        store.clone(),
        view.clone(),
        Arc::new(TokioClock::new(base_time())),
        settings,
    );
    Harness { engine, view, backend, store }
}
