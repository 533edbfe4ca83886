//! Detector configuration.
//!
//! All thresholds, debounce counts, grace windows and cooldowns live here.
//! The `Default` impls carry values tuned on live runs.

use tb_core::{DelayRange, Millis};
use tb_zone::ZoneCategory;

use crate::{DetectError, DetectResult, ResetEvent};

/// The range a detection threshold is drawn from when a timer starts.
pub type ThresholdWindow = DelayRange;

// ── DetectorConfig ────────────────────────────────────────────────────────────

/// Configuration for a [`ThreatDetector`][crate::ThreatDetector].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// A lone reported actor within this many tiles of us is us.
    pub self_filter_distance: f64,

    /// Consecutive clear readings that cancel a running timer.  At least 2.
    pub clear_readings_to_reset: u32,

    /// Consecutive self-only readings that cancel a running timer.  At least 2.
    pub self_readings_to_clear: u32,

    /// Threshold window for occupancy that starts in an EXIT zone.
    pub exit_window: ThresholdWindow,

    /// Threshold window for occupancy in a THREAT zone.  Also used for the
    /// redraw on EXIT → THREAT escalation.
    pub threat_window: ThresholdWindow,

    /// Sampling is suppressed for this long after a login.
    pub login_grace_ms: Millis,

    /// Sampling is suppressed for this long after a world change.
    pub world_change_grace_ms: Millis,

    /// Minimum spacing of the periodic "tracking" log line.
    pub tracking_log_interval_ms: Millis,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            self_filter_distance:     3.0,
            clear_readings_to_reset:  10,
            self_readings_to_clear:   5,
            exit_window:              DelayRange::gaussian(15_000, 25_000, 1_500.0),
            threat_window:            DelayRange::gaussian(10_000, 16_000, 1_000.0),
            login_grace_ms:           10_000,
            world_change_grace_ms:    10_000,
            tracking_log_interval_ms: 3_000,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> DetectResult<()> {
        if !self.self_filter_distance.is_finite() || self.self_filter_distance < 0.0 {
            return Err(DetectError::Config(format!(
                "self_filter_distance must be finite and non-negative, got {}",
                self.self_filter_distance
            )));
        }
        // A single reading must never cancel a timer.
        if self.clear_readings_to_reset < 2 {
            return Err(DetectError::Config(format!(
                "clear_readings_to_reset must be at least 2, got {}",
                self.clear_readings_to_reset
            )));
        }
        if self.self_readings_to_clear < 2 {
            return Err(DetectError::Config(format!(
                "self_readings_to_clear must be at least 2, got {}",
                self.self_readings_to_clear
            )));
        }
        self.exit_window.validate()?;
        self.threat_window.validate()?;
        Ok(())
    }

    /// The window a timer for `category` draws from.  `None` for OUTSIDE.
    pub fn window(&self, category: ZoneCategory) -> Option<&ThresholdWindow> {
        match category {
            ZoneCategory::Exit => Some(&self.exit_window),
            ZoneCategory::Threat => Some(&self.threat_window),
            ZoneCategory::Outside => None,
        }
    }

    pub fn grace_ms(&self, event: ResetEvent) -> Millis {
        match event {
            ResetEvent::Login => self.login_grace_ms,
            ResetEvent::WorldChange => self.world_change_grace_ms,
        }
    }
}

// ── CycleConfig ───────────────────────────────────────────────────────────────

/// Configuration for a [`CycleSignal`][crate::CycleSignal].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CycleConfig {
    /// Primary events needed to leave activity A and activity B respectively.
    pub targets: [u32; 2],

    /// How long the backup signal stays suppressed after a primary switch.
    pub backup_cooldown_ms: Millis,

    /// A real event less than this long after an assumed first event is the
    /// same event and is not counted again.
    pub assume_window_ms: Millis,

    /// Per activity: the preemptive switch is armed only while at most this
    /// many events were counted.  `None` disables it for that activity.
    pub preempt_max_count: [Option<u32>; 2],

    /// How long an actor must stay in the early-warning zones before the
    /// preemptive switch fires.  Drawn afresh each time the timer starts.
    pub preempt_delay: DelayRange,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            targets:            [4, 2],
            backup_cooldown_ms: 5_000,
            assume_window_ms:   1_500,
            preempt_max_count:  [Some(2), None],
            // 5 to 8 game ticks of 600 ms
            preempt_delay:      DelayRange::uniform(3_000, 4_800),
        }
    }
}

impl CycleConfig {
    pub fn validate(&self) -> DetectResult<()> {
        if self.targets.contains(&0) {
            return Err(DetectError::Config(format!(
                "cycle targets must be at least 1, got {:?}",
                self.targets
            )));
        }
        self.preempt_delay.validate()?;
        Ok(())
    }
}
