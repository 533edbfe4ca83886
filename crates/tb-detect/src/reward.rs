//! Running-total to discrete-event conversion.

use tracing::debug;

/// Turns a monotonically increasing total (experience, loot value) into
/// discrete reward events.
///
/// The first reading only sets the baseline.  Each later increase is one
/// event, however large.  A decrease (tracker reset, level boundary) moves
/// the baseline without an event.
#[derive(Clone, Debug, Default)]
pub struct RewardTracker {
    baseline: Option<f64>,
    events:   u64,
}

impl RewardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current total.  `true` if it counts as a new event.
    pub fn observe(&mut self, total: f64) -> bool {
        if !total.is_finite() {
            return false;
        }
        match self.baseline {
            None => {
                self.baseline = Some(total);
                false
            }
            Some(prev) if total > prev => {
                self.baseline = Some(total);
                self.events += 1;
                true
            }
            Some(prev) if total < prev => {
                debug!(prev, total, "reward total dropped, re-baselining");
                self.baseline = Some(total);
                false
            }
            Some(_) => false,
        }
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Events seen since construction or the last [`reset`][Self::reset].
    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn reset(&mut self) {
        self.baseline = None;
        self.events = 0;
    }
}
