//! Run-wide state and the per-tick context handed to behaviors.

use tracing::debug;

use tb_core::{ActivityId, BotRng, Timestamp};

use crate::Host;

// ── SharedContext ─────────────────────────────────────────────────────────────

/// Mutable state for one bot run.
///
/// Owned by the runner and lent to behaviors each tick.  Observers only ever
/// see it through `&SharedContext`.
#[derive(Clone, Debug, Default)]
pub struct SharedContext {
    /// The activity currently pursued, for bots that alternate.
    pub activity: ActivityId,
    /// `true` while an activity is in progress (mining a rock, thieving).
    pub engaged: bool,
    /// When the last reward event was seen.
    pub last_reward_at: Option<Timestamp>,
    /// One-time setup for the current world has finished.
    pub setup_done: bool,
    /// A detector asked for evasive action; cleared when it is taken.
    pub threat_triggered: bool,
    /// Human-readable status line.
    pub status: String,
    pub reward_events: u64,
    pub world_changes: u64,
    pub last_world_change_at: Option<Timestamp>,
}

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        if status != self.status {
            debug!(%status, "status");
            self.status = status;
        }
    }

    pub fn record_reward(&mut self, now: Timestamp) {
        self.reward_events += 1;
        self.last_reward_at = Some(now);
    }

    /// Clear per-cycle flags at the start of a new work cycle.
    pub fn reset_for_new_cycle(&mut self) {
        self.engaged = false;
        self.last_reward_at = None;
        self.threat_triggered = false;
    }

    /// Clear everything tied to the world we just left.  Setup must run
    /// again.  Run totals survive.
    pub fn reset_on_world_change(&mut self, now: Timestamp) {
        self.reset_for_new_cycle();
        self.setup_done = false;
        self.world_changes += 1;
        self.last_world_change_at = Some(now);
    }
}

// ── TickContext ───────────────────────────────────────────────────────────────

/// Everything a behavior can read or change during one tick.
///
/// Built fresh by the runner each tick from disjoint borrows of its own
/// fields; `now` is sampled once at tick start.
pub struct TickContext<'a, S> {
    pub tick:   u64,
    pub now:    Timestamp,
    pub shared: &'a mut SharedContext,
    pub state:  &'a mut S,
    pub host:   &'a mut dyn Host,
    pub rng:    &'a mut BotRng,
}

impl<'a, S> TickContext<'a, S> {
    #[inline]
    pub fn new(
        tick:   u64,
        now:    Timestamp,
        shared: &'a mut SharedContext,
        state:  &'a mut S,
        host:   &'a mut dyn Host,
        rng:    &'a mut BotRng,
    ) -> Self {
        Self { tick, now, shared, state, host, rng }
    }

    /// Re-read the host clock into `now`.  Behaviors that block call this
    /// after each wait.
    #[inline]
    pub fn refresh_now(&mut self) -> Timestamp {
        self.now = self.host.now();
        self.now
    }
}
