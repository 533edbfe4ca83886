//! Two-activity alternation signal.
//!
//! A bot alternating between activities A and B leaves the active one when
//! either:
//!
//! - **Primary**: enough reward events were counted in it (targets differ
//!   per activity), or
//! - **Backup**: an observed actor (a patrolling guard, say) crossed into the
//!   active activity's watch zones.
//!
//! Primary always wins.  A primary switch suppresses the backup signal on the
//! newly active activity for `backup_cooldown_ms`: the actor that made the
//! old activity risky is usually still standing on the new activity's watch
//! line right after the switch.
//!
//! With early-warning zones attached ([`CycleSignal::with_early_warning`]) a
//! third, **preemptive** signal sits between the two.  When few events were
//! counted and an actor lingers in the active activity's early-warning zones
//! for a randomized delay, the signal leaves before the actor reaches the
//! watch line.  It ignores the backup cooldown and arms none.

use tracing::{debug, info};

use tb_core::{BotRng, Millis, Position, Timestamp};
use tb_zone::ZoneClassifier;

use crate::{CycleConfig, DetectResult};

/// One of the two alternating activities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    #[default]
    A,
    B,
}

impl Activity {
    #[inline]
    pub fn other(self) -> Activity {
        match self {
            Activity::A => Activity::B,
            Activity::B => Activity::A,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Activity::A => 0,
            Activity::B => 1,
        }
    }
}

/// Why [`CycleSignal::should_switch`] fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwitchCause {
    Primary,
    Preemptive,
    Backup,
}

/// Per-activity counters.  Zero for the inactive activity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleCounters {
    pub primary_event_count:   u32,
    pub backup_cooldown_until: Option<Timestamp>,
}

/// Early-warning zones per activity and the rng for the preemptive delay.
struct EarlyWarning {
    zones: [ZoneClassifier; 2],
    rng:   BotRng,
}

/// A running preemptive timer.
#[derive(Copy, Clone, Debug)]
struct PreemptTimer {
    since:    Timestamp,
    delay_ms: Millis,
}

// ── CycleSignal ───────────────────────────────────────────────────────────────

pub struct CycleSignal {
    config:        CycleConfig,
    watch:         [ZoneClassifier; 2],
    early_warning: Option<EarlyWarning>,
    active:        Activity,
    counters:      [CycleCounters; 2],
    assumed_at:    Option<Timestamp>,
    preempt:       Option<PreemptTimer>,
}

impl CycleSignal {
    /// `watch_a` / `watch_b` hold the watch zones checked by the backup
    /// signal while A / B is active.
    pub fn new(config: CycleConfig, watch_a: ZoneClassifier, watch_b: ZoneClassifier) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            watch: [watch_a, watch_b],
            early_warning: None,
            active: Activity::A,
            counters: Default::default(),
            assumed_at: None,
            preempt: None,
        })
    }

    /// Enable the preemptive signal with early-warning zones for A and B.
    /// `rng` draws each timer's delay from `preempt_delay`.
    pub fn with_early_warning(mut self, warn_a: ZoneClassifier, warn_b: ZoneClassifier, rng: BotRng) -> Self {
        self.early_warning = Some(EarlyWarning { zones: [warn_a, warn_b], rng });
        self
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    #[inline]
    pub fn active(&self) -> Activity {
        self.active
    }

    pub fn counters(&self, activity: Activity) -> &CycleCounters {
        &self.counters[activity.index()]
    }

    /// Events counted so far in the active activity.
    #[inline]
    pub fn count(&self) -> u32 {
        self.counters[self.active.index()].primary_event_count
    }

    /// Events needed to leave the active activity.
    #[inline]
    pub fn target(&self) -> u32 {
        self.config.targets[self.active.index()]
    }

    /// Count one reward event in the active activity.  Returns `false` if
    /// the event was absorbed by a recent [`assume_first_event`].
    ///
    /// [`assume_first_event`]: Self::assume_first_event
    pub fn record_primary_event(&mut self, now: Timestamp) -> bool {
        let counters = &mut self.counters[self.active.index()];
        if let Some(assumed) = self.assumed_at.take() {
            if counters.primary_event_count == 1 && now.since(assumed) < self.config.assume_window_ms {
                debug!(activity = ?self.active, "event matches assumed first event, not counted");
                return false;
            }
        }
        counters.primary_event_count += 1;
        debug!(
            activity = ?self.active,
            count = counters.primary_event_count,
            target = self.config.targets[self.active.index()],
            "primary event"
        );
        true
    }

    /// Count a first event the host may have missed.  No effect once
    /// anything has been counted.
    pub fn assume_first_event(&mut self, now: Timestamp) {
        let counters = &mut self.counters[self.active.index()];
        if counters.primary_event_count == 0 {
            counters.primary_event_count = 1;
            self.assumed_at = Some(now);
            debug!(activity = ?self.active, "assuming first event");
        }
    }

    pub fn in_backup_cooldown(&self, now: Timestamp) -> bool {
        self.counters[self.active.index()]
            .backup_cooldown_until
            .is_some_and(|until| now < until)
    }

    pub fn clear_cooldown(&mut self) {
        self.counters[self.active.index()].backup_cooldown_until = None;
    }

    /// `true` if any of `observed` stands in either activity's watch zones.
    pub fn any_watched(&self, observed: &[Position]) -> bool {
        self.watch
            .iter()
            .any(|zones| zones.contains_any(observed.iter().copied()))
    }

    /// When the running preemptive timer started, if any.
    pub fn preempt_since(&self) -> Option<Timestamp> {
        self.preempt.map(|timer| timer.since)
    }

    /// Advance the preemptive timer and report whether it has run out.
    fn preempt_due(&mut self, observed: &[Position], now: Timestamp) -> bool {
        let idx = self.active.index();
        let count = self.counters[idx].primary_event_count;
        let Some(warning) = self.early_warning.as_mut() else {
            return false;
        };
        let armed = self.config.preempt_max_count[idx].is_some_and(|max| count <= max);
        if !armed || !warning.zones[idx].contains_any(observed.iter().copied()) {
            if self.preempt.take().is_some() {
                debug!(activity = ?self.active, "early-warning zone clear, preemptive timer reset");
            }
            return false;
        }

        let timer = match self.preempt {
            Some(timer) => timer,
            None => {
                let timer = PreemptTimer { since: now, delay_ms: warning.rng.draw(&self.config.preempt_delay) };
                info!(activity = ?self.active, count, delay_ms = timer.delay_ms, "preemptive timer started");
                self.preempt = Some(timer);
                timer
            }
        };
        now.since(timer.since) >= timer.delay_ms
    }

    /// Decide whether to leave the active activity, and switch if so.
    ///
    /// `observed` are the watched actors' current positions.
    pub fn should_switch(&mut self, observed: &[Position], now: Timestamp) -> Option<SwitchCause> {
        let cause = if self.count() >= self.target() {
            SwitchCause::Primary
        } else if self.preempt_due(observed, now) {
            SwitchCause::Preemptive
        } else if !self.in_backup_cooldown(now)
            && self.watch[self.active.index()].contains_any(observed.iter().copied())
        {
            SwitchCause::Backup
        } else {
            return None;
        };

        let from = self.active;
        let count = self.count();
        self.reset(from.other());
        if cause == SwitchCause::Primary {
            let until = now.after(self.config.backup_cooldown_ms);
            self.counters[self.active.index()].backup_cooldown_until = Some(until);
        }
        info!(?from, to = ?self.active, ?cause, count, "activity switch");
        Some(cause)
    }

    /// Make `activity` active with all counters and cooldowns cleared.
    pub fn reset(&mut self, activity: Activity) {
        self.active = activity;
        self.counters = Default::default();
        self.assumed_at = None;
        self.preempt = None;
    }
}
