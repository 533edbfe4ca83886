//! `tb-core` — foundational types for the `tickbot` framework.
//!
//! This crate is a dependency of every other `tb-*` crate.  It intentionally
//! has no `tb-*` dependencies and minimal external ones (`rand`, `rand_distr`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `ActivityId`, `ZoneId`                                   |
//! | [`geo`]         | `Position` (tile coordinates + plane), packed keys       |
//! | [`time`]        | `Timestamp`, `Clock`, `SystemClock`, `ManualClock`, `Throttle` |
//! | [`rng`]         | `BotRng`, `DelayRange`, `Spread`                         |
//! | [`error`]       | `TbError`, `TbResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TbError, TbResult};
pub use geo::Position;
pub use ids::{ActivityId, ZoneId};
pub use rng::{BotRng, DelayRange, Spread};
pub use time::{Clock, ManualClock, Millis, SystemClock, Throttle, Timestamp};
