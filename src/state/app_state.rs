//! Application state shared with the HTTP handlers

use std::{sync::Arc, time::Instant};
use tracing::info;

use super::{form_min_date, CountdownEngine, EngineSettings};
use crate::{
    clock::Clock,
    error::CountdownError,
    storage::{CountdownStore, KeyValueStore},
    view::WidgetView,
};

/// The hosted engine plus the view it renders into
#[derive(Debug)]
pub struct AppState {
    pub engine: CountdownEngine,
    pub view: Arc<WidgetView>,
    pub clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Build the engine over `backend` with a fresh widget view
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: EngineSettings,
        port: u16,
        host: String,
    ) -> Self {
        // toasts clear on the same schedule as the field highlight
        let view = Arc::new(WidgetView::with_notification_ttl(settings.invalid_highlight));
        let engine = CountdownEngine::new(
            CountdownStore::new(backend),
            view.clone(),
            Arc::clone(&clock),
            settings,
        );

        Self {
            engine,
            view,
            clock,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Resume a persisted countdown, if any. Must run inside the runtime.
    pub fn restore(&self) -> Result<bool, CountdownError> {
        let resumed = self.engine.resume()?;
        if !resumed {
            info!("No countdown to resume, showing config panel");
        }
        Ok(resumed)
    }

    /// `min` attribute for the date input
    pub fn min_date(&self) -> String {
        form_min_date(self.clock.now())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

