use tb_core::{DelayRange, Millis};

use crate::{SchedError, SchedResult};

/// Run-loop configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Stop after this many ticks.  `None` runs until a stop condition.
    pub max_ticks: Option<u64>,

    /// Wait after a tick in which no behavior activated.
    pub idle_wait: DelayRange,

    /// Spacing of stats notifications.
    pub stats_interval_ms: Millis,

    /// RNG seed.  `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks:         None,
            idle_wait:         DelayRange::uniform(500, 700),
            stats_interval_ms: 300_000,
            seed:              None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> SchedResult<()> {
        self.idle_wait.validate()?;
        if self.stats_interval_ms == 0 {
            return Err(SchedError::Config("stats_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
