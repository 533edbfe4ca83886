//! Run observer trait for progress reporting and test instrumentation.

use tracing::{debug, info};

use tb_behavior::SharedContext;
use tb_core::Millis;

use crate::{StopReason, TickReport};

/// Callbacks invoked by [`Runner::run`][crate::Runner::run] and
/// [`Runner::run_ticks`][crate::Runner::run_ticks].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait RunObserver {
    /// Called before the scheduler runs.
    fn on_tick_start(&mut self, _tick: u64, _shared: &SharedContext) {}

    /// Called after the scheduler (and any idle wait) finished.
    fn on_tick_end(&mut self, _tick: u64, _report: &TickReport, _shared: &SharedContext) {}

    /// Called when no behavior activated, with the idle wait taken.
    fn on_idle(&mut self, _tick: u64, _waited_ms: Millis) {}

    /// Called once when the run ends.
    fn on_stop(&mut self, _tick: u64, _reason: &StopReason) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Logs every tick outcome at `debug` and the stop at `info`.
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_tick_end(&mut self, tick: u64, report: &TickReport, shared: &SharedContext) {
        match report {
            TickReport::Ran { name, outcome, .. } => {
                debug!(tick, behavior = %name, %outcome, status = %shared.status, "tick");
            }
            TickReport::Idle => debug!(tick, "idle tick"),
        }
    }

    fn on_stop(&mut self, tick: u64, reason: &StopReason) {
        info!(tick, %reason, "run stopped");
    }
}
