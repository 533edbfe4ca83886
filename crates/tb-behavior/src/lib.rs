//! `tb-behavior` — behaviors and the world they act on.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`host`]     | `Host` trait — perception, actions, clock, bounded waits      |
//! | [`context`]  | `SharedContext` (per-run state), `TickContext<'a, S>`         |
//! | [`behavior`] | `Behavior<S>` trait, `Outcome`                                |
//! | [`idle`]     | `Idle` — catch-all behavior that waits a random delay         |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! A bot is an ordered list of behaviors.  Every tick the scheduler in
//! `tb-sched` asks each behavior in turn whether it wants to run
//! (`activate`) and runs the first that says yes.  Everything a behavior may
//! touch arrives through one `&mut TickContext`:
//!
//! - `shared`: the run-wide [`SharedContext`] (flags, counters, status line)
//! - `state`: the bot's own state type `S` (detectors, per-bot settings)
//! - `host`: the [`Host`] the bot drives
//! - `rng`: the run's [`BotRng`][tb_core::BotRng]
//!
//! There are no globals: two runners in one process never share state.

pub mod behavior;
pub mod context;
pub mod error;
pub mod host;
pub mod idle;


pub use behavior::{Behavior, Outcome};
pub use context::{SharedContext, TickContext};
pub use error::{BehaviorError, BehaviorResult};
pub use host::Host;
pub use idle::Idle;
