//! Fluent builder for constructing a [`Runner`].

use tb_behavior::{Behavior, Host, SharedContext};
use tb_core::{BotRng, Throttle};

use crate::{NoopNotifier, Notifier, RunConfig, Runner, SchedError, SchedResult, Scheduler};

/// Fluent builder for [`Runner<S, H>`].
///
/// # Required inputs
///
/// - a bot name (used in logs and notifications)
/// - `S` — the bot's own state
/// - `H: Host` — the host to drive
/// - at least one behavior
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                   |
/// |-------------------|-------------------------------------------|
/// | `.config(c)`      | `RunConfig::default()`                    |
/// | `.rng(r)`         | seeded from `config.seed`, else entropy   |
/// | `.notifier(n)`    | `NoopNotifier`                            |
/// | `.shared(ctx)`    | `SharedContext::default()`                |
pub struct RunnerBuilder<S, H: Host> {
    name:      String,
    state:     S,
    host:      H,
    behaviors: Vec<Box<dyn Behavior<S>>>,
    config:    RunConfig,
    rng:       Option<BotRng>,
    notifier:  Option<Box<dyn Notifier>>,
    shared:    Option<SharedContext>,
}

impl<S, H: Host> RunnerBuilder<S, H> {
    pub fn new(name: impl Into<String>, state: S, host: H) -> Self {
        Self {
            name: name.into(),
            state,
            host,
            behaviors: Vec::new(),
            config:    RunConfig::default(),
            rng:       None,
            notifier:  None,
            shared:    None,
        }
    }

    /// Append a behavior.  Earlier behaviors take priority.
    pub fn behavior(mut self, behavior: impl Behavior<S> + 'static) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Append already-boxed behaviors, in priority order.
    pub fn behaviors(mut self, behaviors: Vec<Box<dyn Behavior<S>>>) -> Self {
        self.behaviors.extend(behaviors);
        self
    }

    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rng(mut self, rng: BotRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn shared(mut self, shared: SharedContext) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Validate inputs and return a ready-to-run [`Runner`].
    pub fn build(self) -> SchedResult<Runner<S, H>> {
        if self.behaviors.is_empty() {
            return Err(SchedError::NoBehaviors);
        }
        self.config.validate()?;

        let rng = match (self.rng, self.config.seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => BotRng::new(seed),
            (None, None) => BotRng::from_entropy(),
        };

        Ok(Runner {
            name:       self.name,
            scheduler:  Scheduler::new(self.behaviors),
            shared:     self.shared.unwrap_or_default(),
            state:      self.state,
            host:       self.host,
            rng,
            stats:      Throttle::new(self.config.stats_interval_ms),
            config:     self.config,
            notifier:   self.notifier.unwrap_or_else(|| Box::new(NoopNotifier)),
            tick:       0,
            started_at: None,
            stopped:    None,
        })
    }
}
