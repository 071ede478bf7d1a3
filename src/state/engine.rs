//! Countdown engine: owns the single countdown and its tick

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, error, info, warn};

use super::{
    time_remaining, CountdownRecord, EngineState, TimeRemaining, DEFAULT_TITLE, FINISHED_TITLE,
};
use crate::{
    clock::Clock,
    error::{CountdownError, ValidationError},
    storage::CountdownStore,
    tasks::countdown_ticker,
    view::{Severity, ViewController},
};

/// Timings used by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Period between ticks; the first tick comes one period after a start
    pub tick_interval: Duration,
    /// Delay before the running panel replaces the config panel
    pub reveal_delay: Duration,
    /// How long invalid fields stay marked after a rejected start
    pub invalid_highlight: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            reveal_delay: Duration::from_millis(1000),
            invalid_highlight: Duration::from_millis(3000),
        }
    }
}

/// Point-in-time view of the engine for status reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub state: EngineState,
    pub record: Option<CountdownRecord>,
    pub remaining: Option<TimeRemaining>,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    Continue,
    Finished,
    /// The tick belongs to a cancelled generation
    Stale,
}

#[derive(Debug, Clone)]
struct ActiveCountdown {
    record: CountdownRecord,
    target: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Shared {
    state: EngineState,
    active: Option<ActiveCountdown>,
    ticker: Option<JoinHandle<()>>,
    /// Identifies the live ticker; bumped on every spawn and cancel
    generation: u64,
}

/// State shared between the engine handle and its tick task
pub(crate) struct EngineCore {
    shared: Mutex<Shared>,
    store: CountdownStore,
    view: Arc<dyn ViewController>,
    clock: Arc<dyn Clock>,
    settings: EngineSettings,
}

impl EngineCore {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        // View callbacks are the only code that can panic under the lock;
        // the state itself is always left consistent
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Show the running panel if `generation` is still live
    pub(crate) fn reveal(&self, generation: u64) -> bool {
        let shared = self.lock();
        if shared.generation != generation || shared.state != EngineState::Running {
            return false;
        }
        if let Some(active) = &shared.active {
            self.view.show_running_panel(&active.record.name);
        }
        true
    }

    /// Recompute the time left and finish the countdown once it expires
    pub(crate) fn tick(&self, generation: u64) -> TickOutcome {
        let mut shared = self.lock();
        if shared.generation != generation || shared.state != EngineState::Running {
            return TickOutcome::Stale;
        }
        let Some(active) = shared.active.clone() else {
            return TickOutcome::Stale;
        };

        let remaining = time_remaining(self.clock.now(), active.target);
        self.view.update_tick(&remaining);
        if !remaining.is_expired {
            return TickOutcome::Continue;
        }

        // The record stays persisted; a restart resumes and finishes again
        shared.state = EngineState::Finished;
        shared.ticker = None;
        self.view.reset_form();
        self.view.show_finished_panel(FINISHED_TITLE, &active.record.completion_message());
        info!("Countdown '{}' finished", active.record.name);
        TickOutcome::Finished
    }

    fn cancel_ticker(shared: &mut Shared) {
        shared.generation += 1;
        if let Some(handle) = shared.ticker.take() {
            handle.abort();
            debug!("Cancelled countdown tick");
        }
    }

    fn spawn_ticker(core: &Arc<EngineCore>, shared: &mut Shared, reveal: bool) {
        Self::cancel_ticker(shared);
        let generation = shared.generation;
        let handle = tokio::spawn(countdown_ticker(Arc::clone(core), generation, reveal));
        shared.ticker = Some(handle);
        debug!("Spawned countdown tick generation {}", generation);
    }

    fn reject(&self, reason: &ValidationError) {
        warn!("Rejected countdown: {}", reason);
        self.view.mark_fields_invalid();
        self.view.notify(Severity::Warning, reason.user_message());

        let view = Arc::clone(&self.view);
        let highlight = self.settings.invalid_highlight;
        tokio::spawn(async move {
            sleep(highlight).await;
            view.clear_fields_invalid();
        });
    }
}

/// The single-countdown state machine.
///
/// Owns its state and at most one tick task. Operations that start or
/// schedule work spawn onto the current Tokio runtime and must be called
/// from within one.
pub struct CountdownEngine {
    core: Arc<EngineCore>,
}

impl CountdownEngine {
    /// Create an engine in the `Configuring` state
    pub fn new(
        store: CountdownStore,
        view: Arc<dyn ViewController>,
        clock: Arc<dyn Clock>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            core: Arc::new(EngineCore {
                shared: Mutex::new(Shared::default()),
                store,
                view,
                clock,
                settings,
            }),
        }
    }

    /// Start a countdown from form input.
    ///
    /// Validation failures mark the fields, emit one warning and leave the
    /// engine untouched. A running countdown is replaced.
    pub fn start(&self, name: &str, date: &str) -> Result<(), CountdownError> {
        let (record, target) = match CountdownRecord::from_form(name, date) {
            Ok(parsed) => parsed,
            Err(reason) => {
                self.core.reject(&reason);
                return Err(reason.into());
            }
        };

        let mut shared = self.core.lock();
        if let Err(e) = self.core.store.set(&record) {
            error!("Failed to persist countdown: {}", e);
            self.core.view.notify(Severity::Error, "Failed to save countdown");
            return Err(e);
        }

        info!("Starting countdown '{}' until {}", record.name, target);
        shared.state = EngineState::Running;
        shared.active = Some(ActiveCountdown { record, target });
        EngineCore::spawn_ticker(&self.core, &mut shared, true);
        Ok(())
    }

    /// Stop any countdown, forget the stored record and show the form again
    pub fn reset(&self) -> Result<(), CountdownError> {
        let mut shared = self.core.lock();
        EngineCore::cancel_ticker(&mut shared);
        shared.state = EngineState::Configuring;
        shared.active = None;

        self.core.view.reset_form();
        self.core.view.show_config_panel(DEFAULT_TITLE);

        if let Err(e) = self.core.store.clear() {
            error!("Failed to clear persisted countdown: {}", e);
            self.core.view.notify(Severity::Error, "Failed to clear saved countdown");
            return Err(e);
        }
        info!("Countdown reset");
        Ok(())
    }

    /// Pick up a persisted countdown at process start.
    ///
    /// Returns whether one was resumed. The stored name is not validated; a
    /// stored date that cannot be read counts as no record.
    pub fn resume(&self) -> Result<bool, CountdownError> {
        let Some(record) = self.core.store.get()? else {
            return Ok(false);
        };
        let target = match record.target_instant() {
            Ok(target) => target,
            Err(e) => {
                warn!("Ignoring persisted countdown: {}", e);
                return Ok(false);
            }
        };

        let mut shared = self.core.lock();
        info!("Resuming countdown '{}' until {}", record.name, target);
        self.core.view.show_running_panel(&record.name);
        shared.state = EngineState::Running;
        shared.active = Some(ActiveCountdown { record, target });
        EngineCore::spawn_ticker(&self.core, &mut shared, false);
        Ok(true)
    }

    pub fn state(&self) -> EngineState {
        self.core.lock().state
    }

    /// The active or just-finished countdown
    pub fn record(&self) -> Option<CountdownRecord> {
        self.core.lock().active.as_ref().map(|a| a.record.clone())
    }

    /// Time left right now, while running
    pub fn remaining(&self) -> Option<TimeRemaining> {
        let shared = self.core.lock();
        match (&shared.active, shared.state) {
            (Some(active), EngineState::Running) => {
                Some(time_remaining(self.core.clock.now(), active.target))
            }
            _ => None,
        }
    }

    /// Whether a tick task is live
    pub fn is_ticking(&self) -> bool {
        self.core
            .lock()
            .ticker
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state(),
            record: self.record(),
            remaining: self.remaining(),
        }
    }

    pub fn settings(&self) -> EngineSettings {
        self.core.settings()
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        let mut shared = self.core.lock();
        EngineCore::cancel_ticker(&mut shared);
    }
}

impl std::fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.core.lock();
        f.debug_struct("CountdownEngine")
            .field("state", &shared.state)
            .field("generation", &shared.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        storage::MemoryStorage,
        view::{Panel, WidgetView},
    };
    use chrono::TimeZone;

    fn engine() -> (CountdownEngine, Arc<WidgetView>) {
        let view = Arc::new(WidgetView::new());
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()));
        let store = CountdownStore::new(Arc::new(MemoryStorage::new()));
        let engine = CountdownEngine::new(store, view.clone(), clock, EngineSettings::default());
        (engine, view)
    }

    #[tokio::test]
    async fn new_engine_is_configuring() {
        let (engine, view) = engine();
        assert_eq!(engine.state(), EngineState::Configuring);
        assert!(!engine.is_ticking());
        assert_eq!(engine.remaining(), None);
        assert_eq!(view.snapshot().panel, Panel::Config);
    }

    #[tokio::test]
    async fn stale_generation_does_nothing() {
        let (engine, view) = engine();
        engine.start("Launch", "2099-01-01").unwrap();
        assert_eq!(engine.core.tick(0), TickOutcome::Stale);
        assert!(!engine.core.reveal(0));
        assert_eq!(view.snapshot().panel, Panel::Config);
    }

    #[tokio::test]
    async fn live_generation_ticks() {
        let (engine, view) = engine();
        engine.start("Launch", "2099-01-01").unwrap();
        let generation = engine.core.lock().generation;

        assert!(engine.core.reveal(generation));
        assert_eq!(engine.core.tick(generation), TickOutcome::Continue);
        let snapshot = view.snapshot();
        assert_eq!(snapshot.panel, Panel::Running);
        assert_ne!(snapshot.digits.days, "00");
    }

    #[tokio::test]
    async fn snapshot_reports_remaining_while_running() {
        let (engine, _view) = engine();
        engine.start("Launch", "2026-10-19").unwrap();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state, EngineState::Running);
        assert_eq!(snapshot.record, Some(CountdownRecord::new("Launch", "2026-10-19")));
        assert_eq!(snapshot.remaining.unwrap().hours, 12);
    }
}
