//! Debounced zone-occupancy detection.
//!
//! # Sampling
//!
//! Each call to [`ThreatDetector::sample`] takes our own position and the
//! host's batch of other actor positions (minimap dots).  The batch includes
//! us, so the first step is self-filtering:
//!
//! - one dot on another plane: clear reading
//! - one dot within `self_filter_distance` of us: self reading
//! - one dot further away: a candidate
//! - several dots: the same-plane dot nearest to us is us; every other
//!   same-plane dot is a candidate
//!
//! Candidates are classified by zone.  If none land in an EXIT or THREAT zone
//! the sample is a clear reading; otherwise it is a qualifying reading.
//!
//! # Hysteresis
//!
//! A qualifying reading starts (or escalates) the occupancy timer.  Only a
//! run of `clear_readings_to_reset` clear readings, or `self_readings_to_clear`
//! self readings, cancels it, so a single missed dot never resets progress.
//! The trigger fires on the first qualifying reading whose elapsed occupancy
//! reaches the drawn threshold.  Triggering does not clear state: the caller
//! acts (hops, retreats) and then calls [`ThreatDetector::reset`].

use tracing::{debug, info};

use tb_core::{BotRng, Millis, Position, Throttle, Timestamp};
use tb_zone::{ZoneCategory, ZoneClassifier};

use crate::{DetectResult, DetectorConfig};

/// First-seen times keyed by [`Position::key`].
#[cfg(feature = "fx-hash")]
pub type TrackedActors = rustc_hash::FxHashMap<u32, Timestamp>;

/// First-seen times keyed by [`Position::key`].
#[cfg(not(feature = "fx-hash"))]
pub type TrackedActors = std::collections::HashMap<u32, Timestamp>;

// ── Public result types ───────────────────────────────────────────────────────

/// Events that arm the post-event grace window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetEvent {
    /// We moved to another world instance.  The actor list is stale for a
    /// while afterwards.
    WorldChange,
    /// We (re)logged in.
    Login,
}

/// How one sample was interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reading {
    /// Inside a grace window; the sample was ignored.
    Grace,
    /// Our own position was unavailable; the sample was ignored.
    NoData,
    /// No other actor in a tracked zone.
    Clear,
    /// The only reported actor was us.
    SelfOnly,
    /// At least one other actor in a tracked zone.
    Occupied { category: ZoneCategory, actors: usize },
}

/// Result of [`ThreatDetector::sample`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    pub triggered: bool,
    pub reading:   Reading,
}

impl Detection {
    fn quiet(reading: Reading) -> Self {
        Self { triggered: false, reading }
    }
}

// ── DetectionState ────────────────────────────────────────────────────────────

/// The detector's mutable state.  Exposed read-only through
/// [`ThreatDetector::state`].
#[derive(Clone, Debug, Default)]
pub struct DetectionState {
    /// When the current occupancy timer started.
    pub occupied_since: Option<Timestamp>,
    /// The most severe category seen since the timer started.
    pub active_category: ZoneCategory,
    /// Threshold drawn for the running timer.
    pub current_threshold_ms: Option<Millis>,
    pub consecutive_clear_readings: u32,
    pub consecutive_self_readings: u32,
    pub tracked_actors: TrackedActors,
}

impl DetectionState {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied_since.is_some()
    }

    /// Elapsed occupancy at `now`, if a timer is running.
    pub fn elapsed(&self, now: Timestamp) -> Option<Millis> {
        self.occupied_since.map(|since| now.since(since))
    }

    fn clear(&mut self) {
        self.occupied_since = None;
        self.active_category = ZoneCategory::Outside;
        self.current_threshold_ms = None;
        self.consecutive_clear_readings = 0;
        self.consecutive_self_readings = 0;
        self.tracked_actors.clear();
    }
}

/// Self-filtered view of one batch of actor positions.
enum Filtered {
    Clear,
    SelfOnly,
    Candidates(Vec<Position>),
}

// ── ThreatDetector ────────────────────────────────────────────────────────────

/// Decides when other actors have occupied our zones for long enough that we
/// should leave.
pub struct ThreatDetector {
    config:      DetectorConfig,
    zones:       ZoneClassifier,
    rng:         BotRng,
    state:       DetectionState,
    grace_until: Option<Timestamp>,
    tracking:    Throttle,
}

impl ThreatDetector {
    pub fn new(config: DetectorConfig, zones: ZoneClassifier, rng: BotRng) -> DetectResult<Self> {
        config.validate()?;
        let tracking = Throttle::new(config.tracking_log_interval_ms);
        Ok(Self {
            config,
            zones,
            rng,
            state: DetectionState::default(),
            grace_until: None,
            tracking,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn zones(&self) -> &ZoneClassifier {
        &self.zones
    }

    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    /// Arm the grace window for `event`.  An already-armed window that ends
    /// later is kept.
    pub fn signal(&mut self, event: ResetEvent, now: Timestamp) {
        let until = now.after(self.config.grace_ms(event));
        if self.grace_until.is_none_or(|current| current < until) {
            self.grace_until = Some(until);
        }
        info!(?event, until = %until, "detection grace armed");
    }

    #[inline]
    pub fn in_grace(&self, now: Timestamp) -> bool {
        self.grace_until.is_some_and(|until| now < until)
    }

    /// Drop all occupancy state.  Called by the owner after acting on a
    /// trigger.
    pub fn reset(&mut self) {
        if self.state.is_occupied() {
            info!("detection state reset");
        }
        self.state.clear();
        self.tracking.reset();
    }

    /// Process one observation.
    ///
    /// `others` is `None` when the host could not read the actor list; that
    /// counts as a clear reading.
    pub fn sample(
        &mut self,
        me:     Option<Position>,
        others: Option<&[Position]>,
        now:    Timestamp,
    ) -> Detection {
        if self.in_grace(now) {
            return Detection::quiet(Reading::Grace);
        }
        let Some(me) = me else {
            return Detection::quiet(Reading::NoData);
        };

        let candidates = match self.filter_self(me, others.unwrap_or(&[])) {
            Filtered::Clear => return Detection::quiet(self.on_clear(now, "no other actors")),
            Filtered::SelfOnly => return Detection::quiet(self.on_self(now)),
            Filtered::Candidates(c) => c,
        };

        let hits: Vec<(Position, ZoneCategory)> = candidates
            .into_iter()
            .map(|pos| (pos, self.zones.category_of(pos)))
            .filter(|(_, category)| category.is_tracked())
            .collect();

        if hits.is_empty() {
            return Detection::quiet(self.on_clear(now, "no actors in tracked zones"));
        }
        self.on_occupied(&hits, now)
    }

    /// Immediate occupancy check without timers or debounce: `true` if any
    /// other actor stands in a tracked zone right now.  Returns `false`
    /// inside a grace window or when data is missing.
    pub fn occupied_now(&self, me: Option<Position>, others: Option<&[Position]>, now: Timestamp) -> bool {
        if self.in_grace(now) {
            debug!("skipping occupancy check inside grace window");
            return false;
        }
        let (Some(me), Some(others)) = (me, others) else {
            return false;
        };
        match self.filter_self(me, others) {
            Filtered::Candidates(c) => self.zones.contains_any(c),
            Filtered::Clear | Filtered::SelfOnly => false,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn filter_self(&self, me: Position, others: &[Position]) -> Filtered {
        match others {
            [] => Filtered::Clear,
            [only] => {
                if !only.same_plane(me) {
                    Filtered::Clear
                } else if only.distance_to(me) <= self.config.self_filter_distance {
                    Filtered::SelfOnly
                } else {
                    Filtered::Candidates(vec![*only])
                }
            }
            _ => {
                let ours = others
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.same_plane(me))
                    .min_by(|(_, a), (_, b)| a.distance_to(me).total_cmp(&b.distance_to(me)))
                    .map(|(i, _)| i);
                let candidates = others
                    .iter()
                    .enumerate()
                    .filter(|&(i, p)| Some(i) != ours && p.same_plane(me))
                    .map(|(_, p)| *p)
                    .collect();
                Filtered::Candidates(candidates)
            }
        }
    }

    fn on_clear(&mut self, now: Timestamp, why: &str) -> Reading {
        let st = &mut self.state;
        st.consecutive_clear_readings = st.consecutive_clear_readings.saturating_add(1);
        st.consecutive_self_readings = 0;

        if let Some(elapsed) = st.elapsed(now) {
            if st.consecutive_clear_readings >= self.config.clear_readings_to_reset {
                info!(
                    readings = st.consecutive_clear_readings,
                    elapsed_ms = elapsed,
                    reason = why,
                    "TIMER RESET: area clear"
                );
                st.clear();
            } else {
                debug!(count = st.consecutive_clear_readings, reason = why, "clear reading");
            }
        }
        Reading::Clear
    }

    fn on_self(&mut self, now: Timestamp) -> Reading {
        let st = &mut self.state;
        st.consecutive_self_readings = st.consecutive_self_readings.saturating_add(1);
        st.consecutive_clear_readings = st.consecutive_clear_readings.saturating_add(1);

        if let Some(elapsed) = st.elapsed(now) {
            let self_done = st.consecutive_self_readings >= self.config.self_readings_to_clear;
            let clear_done = st.consecutive_clear_readings >= self.config.clear_readings_to_reset;
            if self_done || clear_done {
                info!(
                    readings = st.consecutive_self_readings,
                    elapsed_ms = elapsed,
                    "TIMER RESET: only us in the area"
                );
                st.clear();
            } else {
                debug!(count = st.consecutive_self_readings, "self reading");
            }
        }
        Reading::SelfOnly
    }

    fn on_occupied(&mut self, hits: &[(Position, ZoneCategory)], now: Timestamp) -> Detection {
        self.state.consecutive_clear_readings = 0;
        self.state.consecutive_self_readings = 0;

        for &(pos, category) in hits {
            match self.state.occupied_since {
                None => self.start_timer(pos, category, now),
                Some(_) if category > self.state.active_category => self.escalate(pos, category),
                Some(_) => {}
            }
            self.state.tracked_actors.entry(pos.key()).or_insert(now);
        }

        let seen: Vec<u32> = hits.iter().map(|(pos, _)| pos.key()).collect();
        self.state.tracked_actors.retain(|key, _| seen.contains(key));

        let st = &self.state;
        let elapsed = st.elapsed(now).unwrap_or(0);
        let threshold = st.current_threshold_ms.unwrap_or(0);

        if self.tracking.ready(now) {
            info!(
                elapsed_ms = elapsed,
                threshold_ms = threshold,
                actors = st.tracked_actors.len(),
                "TRACKING: actor(s) in area"
            );
        }

        let triggered = elapsed >= threshold;
        if triggered {
            info!(elapsed_ms = elapsed, threshold_ms = threshold, "THREAT DETECTED");
        }

        Detection {
            triggered,
            reading: Reading::Occupied { category: st.active_category, actors: hits.len() },
        }
    }

    fn start_timer(&mut self, pos: Position, category: ZoneCategory, now: Timestamp) {
        let threshold = self.draw_threshold(category);
        let st = &mut self.state;
        st.occupied_since = Some(now);
        st.active_category = category;
        st.current_threshold_ms = Some(threshold);
        info!(%pos, %category, threshold_ms = threshold, "TIMER START");
    }

    fn escalate(&mut self, pos: Position, category: ZoneCategory) {
        let redraw = self.draw_threshold(category);
        let st = &mut self.state;
        st.active_category = category;
        match st.current_threshold_ms {
            Some(current) if redraw >= current => {
                debug!(%pos, %category, kept_ms = current, drawn_ms = redraw, "escalated, threshold kept");
            }
            previous => {
                st.current_threshold_ms = Some(redraw);
                info!(%pos, %category, from_ms = ?previous, to_ms = redraw, "threshold shortened on escalation");
            }
        }
    }

    fn draw_threshold(&mut self, category: ZoneCategory) -> Millis {
        match self.config.window(category) {
            Some(window) => self.rng.draw(window),
            None => 0,
        }
    }
}
