//! The `Behavior` trait — the main extension point for bot code.

use std::fmt;

use crate::TickContext;

/// Result of running a behavior for one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The behavior did its work.
    Completed,
    /// It could not finish (action failed, abort condition came up).  The
    /// next tick re-evaluates from the top.
    NotCompleted,
    /// Unrecoverable; the run ends.
    Stop(String),
}

impl Outcome {
    pub fn stop(reason: impl Into<String>) -> Self {
        Outcome::Stop(reason.into())
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self, Outcome::Stop(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => f.write_str("completed"),
            Outcome::NotCompleted => f.write_str("not completed"),
            Outcome::Stop(reason) => write!(f, "stop: {reason}"),
        }
    }
}

/// A named unit of bot logic.
///
/// Each tick the scheduler calls [`activate`][Self::activate] on behaviors in
/// list order and [`run`][Self::run]s the first that returns `true`.  List
/// position is the only priority, so put abort conditions (hop, retreat)
/// first and the catch-all work last.
///
/// Behaviors may keep private fields (cooldown timestamps, a one-shot flag).
/// Anything other behaviors need to see belongs in `ctx.shared` or
/// `ctx.state`.
///
/// # Example
///
/// ```rust,ignore
/// struct Bank;
///
/// impl Behavior<MinerState> for Bank {
///     fn name(&self) -> &str { "bank" }
///
///     fn activate(&mut self, ctx: &mut TickContext<'_, MinerState>) -> bool {
///         ctx.state.inventory_full
///     }
///
///     fn run(&mut self, ctx: &mut TickContext<'_, MinerState>) -> Outcome {
///         if !ctx.host.perform_action("deposit box", "deposit-all") {
///             return Outcome::NotCompleted;
///         }
///         ctx.state.inventory_full = false;
///         Outcome::Completed
///     }
/// }
/// ```
pub trait Behavior<S> {
    fn name(&self) -> &str;

    /// Cheap check; may read perception through `ctx.host`.
    fn activate(&mut self, ctx: &mut TickContext<'_, S>) -> bool;

    /// Do the work.  May block on `ctx.host` waits, each bounded by a
    /// timeout.
    fn run(&mut self, ctx: &mut TickContext<'_, S>) -> Outcome;
}
