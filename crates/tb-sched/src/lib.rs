//! `tb-sched` — the run loop.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   ① Stop check — host stop request or tick limit ends the run.
//!   ② Schedule   — ask behaviors in list order whether to activate;
//!                  run the first that does.  Nothing else runs.
//!   ③ Idle       — if nothing activated, wait a random idle delay.
//!   ④ Outcome    — Stop(reason) ends the run; anything else loops.
//!   ⑤ Stats      — every `stats_interval_ms`, hand a stats notification
//!                  to the notifier (delivered off-thread).
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`scheduler`] | `Scheduler<S>`, `TickReport`                              |
//! | [`runner`]    | `Runner<S, H>`, `StopReason`                              |
//! | [`builder`]   | `RunnerBuilder<S, H>`                                     |
//! | [`config`]    | `RunConfig`                                               |
//! | [`observer`]  | `RunObserver`, `NoopObserver`, `TracingObserver`          |
//! | [`notify`]    | `Notification`, `Notifier`, `DetachedNotifier`, sinks     |
//! | [`error`]     | `SchedError`, `SchedResult<T>`, `NotifyError`             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut runner = RunnerBuilder::new("gem-miner", MinerState::new(detector), host)
//!     .behavior(HopWorld::default())
//!     .behavior(Setup)
//!     .behavior(Mine)
//!     .config(RunConfig { seed: Some(42), ..RunConfig::default() })
//!     .build()?;
//! let reason = runner.run(&mut TracingObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod notify;
pub mod observer;
pub mod runner;
pub mod scheduler;


pub use builder::RunnerBuilder;
pub use config::RunConfig;
pub use error::{NotifyError, SchedError, SchedResult};
pub use notify::{DetachedNotifier, LogSink, NoopNotifier, Notification, NotificationSink, Notifier};
pub use observer::{NoopObserver, RunObserver, TracingObserver};
pub use runner::{Runner, StopReason};
pub use scheduler::{Scheduler, TickReport};
