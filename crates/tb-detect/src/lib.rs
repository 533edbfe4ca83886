//! `tb-detect` — turning noisy per-sample observations into stable decisions.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`config`] | `DetectorConfig`, `CycleConfig`, `ThresholdWindow`           |
//! | [`threat`] | `ThreatDetector`, `DetectionState`, `Detection`, `Reading`   |
//! | [`cycle`]  | `CycleSignal`, `CycleCounters`, `Activity`, `SwitchCause`    |
//! | [`reward`] | `RewardTracker` — running total to discrete events           |
//! | [`error`]  | `DetectError`, `DetectResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` on config types.                |
//! | `fx-hash` | `FxHashMap` for the tracked-actor map.                    |

pub mod config;
pub mod cycle;
pub mod error;
pub mod reward;
pub mod threat;


pub use config::{CycleConfig, DetectorConfig, ThresholdWindow};
pub use cycle::{Activity, CycleCounters, CycleSignal, SwitchCause};
pub use error::{DetectError, DetectResult};
pub use reward::RewardTracker;
pub use threat::{Detection, DetectionState, Reading, ResetEvent, ThreatDetector, TrackedActors};
