//! The host interface: everything a bot can sense or do.
//!
//! A host wraps the closed perception/action API the bot runs on.  Bots never
//! see anything else, so swapping in a scripted host gives fully
//! deterministic runs.

use tb_core::{Millis, Position, Timestamp};

/// Perception, actions, time, and bounded waiting.
///
/// Object-safe: behaviors receive it as `&mut dyn Host`.
///
/// # Failure model
///
/// Perception may fail transiently and return `None`; callers treat that as
/// "no data this tick".  Actions report success as a `bool`.  Nothing here
/// panics or returns an error.
pub trait Host {
    /// Our own tile position, if it could be read.
    fn self_position(&mut self) -> Option<Position>;

    /// Approximate positions of every player-controlled actor nearby,
    /// including us.  `None` if the list could not be read.
    fn other_actor_positions(&mut self) -> Option<Vec<Position>>;

    /// Repeatedly evaluate `condition` until it returns `true` or
    /// `timeout_ms` elapses.  Returns whether the condition was met.
    ///
    /// The condition receives the host so it can re-read perception between
    /// polls.
    fn poll_until(&mut self, condition: &mut dyn FnMut(&mut dyn Host) -> bool, timeout_ms: Millis) -> bool;

    /// Interact with a named target (`"rocks"`, `"stall"`, `"world"`) using
    /// a named action (`"mine"`, `"steal-from"`, `"hop"`).
    fn perform_action(&mut self, target: &str, action: &str) -> bool;

    /// Current monotonic time.
    fn now(&self) -> Timestamp;

    /// Running reward total (experience, loot value), if the host tracks
    /// one.  Feed it to a `RewardTracker` to get discrete events.
    fn reward_total(&mut self) -> Option<f64> {
        None
    }

    /// Block for `ms`.
    fn wait(&mut self, ms: Millis) {
        self.poll_until(&mut |_| false, ms);
    }

    /// `true` once the operator asked the bot to stop.
    fn stop_requested(&self) -> bool {
        false
    }
}
