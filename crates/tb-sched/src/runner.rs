//! The `Runner` struct and its cooperative tick loop.

use std::fmt;

use tracing::info;

use tb_behavior::{Host, Outcome, SharedContext, TickContext};
use tb_core::{BotRng, Throttle, Timestamp};

use crate::{
    NoopObserver, Notification, Notifier, RunConfig, RunObserver, Scheduler, TickReport,
};

/// Why a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A behavior returned [`Outcome::Stop`].
    Fatal(String),
    /// `max_ticks` reached.
    TickLimit,
    /// The host reported a stop request.
    HostRequested,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Fatal(reason) => write!(f, "fatal: {reason}"),
            StopReason::TickLimit => f.write_str("tick limit reached"),
            StopReason::HostRequested => f.write_str("stop requested by host"),
        }
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Owns one bot run: its behaviors, state, host and RNG.
///
/// `Runner<S, H>` drives the loop described in the [crate docs][crate].  It
/// is single-threaded; only notifications leave the loop thread.
///
/// Create via [`RunnerBuilder`][crate::RunnerBuilder].
pub struct Runner<S, H: Host> {
    pub(crate) name:       String,
    pub(crate) scheduler:  Scheduler<S>,
    pub(crate) shared:     SharedContext,
    pub(crate) state:      S,
    pub(crate) host:       H,
    pub(crate) rng:        BotRng,
    pub(crate) config:     RunConfig,
    pub(crate) notifier:   Box<dyn Notifier>,
    pub(crate) tick:       u64,
    pub(crate) started_at: Option<Timestamp>,
    pub(crate) stats:      Throttle,
    pub(crate) stopped:    Option<StopReason>,
}

impl<S, H: Host> Runner<S, H> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a stop condition.  Calling `run` again on a stopped runner
    /// returns the original reason without ticking.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> StopReason {
        loop {
            if let Some(reason) = self.tick_once(observer) {
                return reason;
            }
        }
    }

    /// Run at most `n` ticks.  Returns the stop reason if the run ended
    /// before `n` ticks completed.
    pub fn run_ticks<O: RunObserver>(&mut self, n: u64, observer: &mut O) -> Option<StopReason> {
        for _ in 0..n {
            if let Some(reason) = self.tick_once(observer) {
                return Some(reason);
            }
        }
        None
    }

    /// Run one tick without an observer.
    pub fn step(&mut self) -> Option<StopReason> {
        self.tick_once(&mut NoopObserver)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shared(&self) -> &SharedContext {
        &self.shared
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stopped.as_ref()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: RunObserver>(&mut self, observer: &mut O) -> Option<StopReason> {
        if let Some(reason) = &self.stopped {
            return Some(reason.clone());
        }
        if let Some(reason) = self.stop_condition() {
            return Some(self.finish(reason, observer));
        }

        let now = self.host.now();
        if self.started_at.is_none() {
            self.start(now);
        }

        observer.on_tick_start(self.tick, &self.shared);

        let report = {
            let mut ctx = TickContext::new(
                self.tick,
                now,
                &mut self.shared,
                &mut self.state,
                &mut self.host,
                &mut self.rng,
            );
            self.scheduler.tick(&mut ctx)
        };

        if report == TickReport::Idle {
            let waited = self.rng.draw(&self.config.idle_wait);
            self.host.wait(waited);
            observer.on_idle(self.tick, waited);
        }

        observer.on_tick_end(self.tick, &report, &self.shared);
        self.tick += 1;
        self.maybe_report_stats();

        match report {
            TickReport::Ran { outcome: Outcome::Stop(reason), .. } => {
                Some(self.finish(StopReason::Fatal(reason), observer))
            }
            _ => None,
        }
    }

    fn stop_condition(&self) -> Option<StopReason> {
        if self.host.stop_requested() {
            return Some(StopReason::HostRequested);
        }
        match self.config.max_ticks {
            Some(max) if self.tick >= max => Some(StopReason::TickLimit),
            _ => None,
        }
    }

    fn start(&mut self, now: Timestamp) {
        self.started_at = Some(now);
        // Consume the throttle's first firing so stats start one interval in.
        self.stats.ready(now);
        info!(bot = %self.name, behaviors = self.scheduler.len(), "run started");
        self.notifier.notify(Notification::Started { bot: self.name.clone() });
    }

    fn runtime_ms(&self) -> u64 {
        self.started_at.map_or(0, |start| self.host.now().since(start))
    }

    fn maybe_report_stats(&mut self) {
        let now = self.host.now();
        if !self.stats.ready(now) {
            return;
        }
        self.notifier.notify(Notification::Stats {
            bot:           self.name.clone(),
            runtime_ms:    self.runtime_ms(),
            ticks:         self.tick,
            reward_events: self.shared.reward_events,
            world_changes: self.shared.world_changes,
            status:        self.shared.status.clone(),
        });
    }

    fn finish<O: RunObserver>(&mut self, reason: StopReason, observer: &mut O) -> StopReason {
        info!(bot = %self.name, ticks = self.tick, %reason, "run finished");
        observer.on_stop(self.tick, &reason);
        self.notifier.notify(Notification::Stopped {
            bot:        self.name.clone(),
            runtime_ms: self.runtime_ms(),
            reason:     reason.to_string(),
        });
        self.stopped = Some(reason.clone());
        reason
    }
}
