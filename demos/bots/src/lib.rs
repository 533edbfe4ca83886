//! bots — two complete bots built on the tickbot crates, driven by a
//! scripted host so they run anywhere.
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`host`]        | `ScriptedHost` — clock, actor timeline, rewards, worlds    |
//! | [`gem_miner`]   | Mines until another player lingers in the mine, then hops  |
//! | [`stall_thief`] | Alternates two stalls on reward count or guard approach    |
//! | [`support`]     | Logging setup, JSON config loading, JSON-lines sink        |

pub mod gem_miner;
pub mod host;
pub mod stall_thief;
pub mod support;

#[cfg(test)]
mod tests;
