//! Countdown tick background task

use std::sync::Arc;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::debug;

use crate::state::engine::{EngineCore, TickOutcome};

/// Drive one countdown generation until it finishes or is cancelled.
///
/// When `reveal` is set the running panel is shown after the configured
/// reveal delay; a tick due at the same instant runs after the reveal.
pub(crate) async fn countdown_ticker(core: Arc<EngineCore>, generation: u64, reveal: bool) {
    let settings = core.settings();
    debug!("Countdown tick generation {} started", generation);

    let mut interval = interval_at(
        Instant::now() + settings.tick_interval,
        settings.tick_interval,
    );
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let reveal_timer = sleep(settings.reveal_delay);
    tokio::pin!(reveal_timer);
    let mut revealed = !reveal;

    loop {
        tokio::select! {
            biased;

            _ = &mut reveal_timer, if !revealed => {
                revealed = true;
                if !core.reveal(generation) {
                    break;
                }
            }

            _ = interval.tick() => {
                match core.tick(generation) {
                    TickOutcome::Continue => {}
                    TickOutcome::Finished => {
                        debug!("Countdown tick generation {} finished", generation);
                        break;
                    }
                    TickOutcome::Stale => {
                        debug!("Countdown tick generation {} is stale, stopping", generation);
                        break;
                    }
                }
            }
        }
    }
}
