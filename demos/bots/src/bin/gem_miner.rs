//! Gem miner over the built-in scripted mine.  Hops worlds when another player
//! lingers in the mine.
//!
//! Usage: `gem_miner [config.json]`.  Notifications are printed to stdout as JSON
//! lines; logs go through `tracing` (`RUST_LOG` to tune).

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use bots::gem_miner::{build_runner, GemMinerConfig};
use bots::support::{init_tracing, load_config, JsonLinesSink};
use tb_sched::{DetachedNotifier, TracingObserver};

fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args().nth(1).map(PathBuf::from);
    let config: GemMinerConfig = load_config(path.as_deref())?;

    let mut runner = build_runner(&config, DetachedNotifier::new(JsonLinesSink))?;
    let reason = runner.run(&mut TracingObserver);

    let shared = runner.shared();
    info!(
        %reason,
        ticks = runner.ticks(),
        rewards = shared.reward_events,
        world_changes = shared.world_changes,
        status = %shared.status,
        "summary"
    );
    Ok(())
}
