//! Gem miner: mines in a shared mine and hops worlds once another player has
//! lingered inside it long enough to look like a crasher.
//!
//! Behaviors, highest priority first:
//!
//! | Behavior   | Activates when                                          |
//! |------------|---------------------------------------------------------|
//! | `HopWorld` | the detector triggered and the hop cooldown has passed  |
//! | `Setup`    | setup for this world has not run yet                    |
//! | `Mine`     | setup is done and nothing is pending                    |

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tb_behavior::{Behavior, Host, Outcome, TickContext};
use tb_core::{BotRng, DelayRange, Millis, Position, Timestamp};
use tb_detect::{DetectorConfig, ResetEvent, RewardTracker, ThreatDetector};
use tb_sched::{Notifier, RunConfig, Runner, RunnerBuilder};
use tb_zone::{load_zones_csv, load_zones_reader, ZoneClassifier};

use crate::host::{Frame, Place, RewardRule, Scenario, ScriptedHost};

pub const BOT_NAME: &str = "gem_miner";

/// Zones around the gem rocks.  The ladder and deposit box are exits; the
/// rest of the mine is the threat area.
pub const MINE_ZONES_CSV: &str = "\
name,category,plane,shape,points
ladder,exit,0,rect,2838:9387 2840:9389
deposit,exit,0,rect,2841:9382 2844:9385
mine,threat,0,rect,2825:9377 2851:9401
";

/// The mining spot inside the mine.
pub const MINE_SPOT: Position = Position::new(2830, 9390, 0);

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GemMinerConfig {
    pub run:             RunConfig,
    pub detector:        DetectorConfig,
    /// Whether a world-hop profile is configured.  Without one a trigger
    /// ends the run.
    pub hop:             bool,
    /// Minimum spacing between two hops.
    pub hop_cooldown:    DelayRange,
    /// Wait after a hop before doing anything else.
    pub stabilize:       DelayRange,
    /// Give up on one mining attempt after this long.
    pub mine_timeout_ms: Millis,
    /// Zone CSV; the built-in mine layout when absent.
    pub zones_csv:       Option<PathBuf>,
    pub scenario:        Scenario,
}

impl Default for GemMinerConfig {
    fn default() -> Self {
        Self {
            run:             RunConfig::default(),
            detector:        DetectorConfig::default(),
            hop:             true,
            hop_cooldown:    DelayRange::gaussian(7_000, 10_000, 750.0),
            stabilize:       DelayRange::gaussian(8_000, 12_000, 1_000.0),
            mine_timeout_ms: 10_000,
            zones_csv:       None,
            scenario:        demo_scenario(),
        }
    }
}

/// A world where a second player walks into the mine 40 s in and stays.
pub fn demo_scenario() -> Scenario {
    Scenario {
        start: MINE_SPOT,
        frames: vec![Frame {
            world:   0,
            from_ms: 40_000,
            actors:  vec![Position::new(2834, 9395, 0)],
        }],
        rewards: vec![RewardRule {
            target:   "rocks".into(),
            action:   "mine".into(),
            amount:   65.0,
            delay_ms: 3_000,
        }],
        places: vec![Place { name: "mine".into(), position: MINE_SPOT }],
        stop_at_ms: Some(180_000),
        ..Scenario::default()
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct MinerState {
    pub detector:        ThreatDetector,
    pub rewards:         RewardTracker,
    pub hop:             bool,
    pub hop_cooldown:    DelayRange,
    pub stabilize:       DelayRange,
    pub mine_timeout_ms: Millis,
    /// Earliest time the next hop may happen.
    pub next_hop_at:     Option<Timestamp>,
}

impl MinerState {
    pub fn new(config: &GemMinerConfig, zones: ZoneClassifier, rng: BotRng) -> Result<Self> {
        config.hop_cooldown.validate()?;
        config.stabilize.validate()?;
        let detector = ThreatDetector::new(config.detector.clone(), zones, rng)?;
        Ok(Self {
            detector,
            rewards:         RewardTracker::new(),
            hop:             config.hop,
            hop_cooldown:    config.hop_cooldown,
            stabilize:       config.stabilize,
            mine_timeout_ms: config.mine_timeout_ms,
            next_hop_at:     None,
        })
    }

    fn hop_ready(&self, now: Timestamp) -> bool {
        self.next_hop_at.is_none_or(|at| now >= at)
    }
}

/// Feed one observation from `ctx.host` to the detector.
fn sample(ctx: &mut TickContext<'_, MinerState>) -> bool {
    let me = ctx.host.self_position();
    let others = ctx.host.other_actor_positions();
    ctx.state.detector.sample(me, others.as_deref(), ctx.now).triggered
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

pub struct HopWorld;

impl Behavior<MinerState> for HopWorld {
    fn name(&self) -> &str {
        "HopWorld"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, MinerState>) -> bool {
        if ctx.shared.setup_done && !ctx.shared.threat_triggered && sample(ctx) {
            ctx.shared.threat_triggered = true;
        }
        ctx.shared.threat_triggered && ctx.state.hop_ready(ctx.now)
    }

    fn run(&mut self, ctx: &mut TickContext<'_, MinerState>) -> Outcome {
        ctx.state.detector.reset();
        if !ctx.state.hop {
            return Outcome::stop("mine occupied and no world hop profile configured");
        }

        ctx.shared.set_status("hopping");
        if !ctx.host.perform_action("world", "hop") {
            warn!("world hop failed, retrying next tick");
            return Outcome::NotCompleted;
        }

        let now = ctx.refresh_now();
        ctx.state.detector.signal(ResetEvent::WorldChange, now);
        ctx.state.rewards.reset();
        let cooldown = ctx.rng.draw(&ctx.state.hop_cooldown);
        ctx.state.next_hop_at = Some(now.after(cooldown));

        let settle = ctx.rng.draw(&ctx.state.stabilize);
        info!(settle_ms = settle, cooldown_ms = cooldown, "hopped world, stabilising");
        ctx.host.wait(settle);

        let now = ctx.refresh_now();
        ctx.shared.reset_on_world_change(now);
        Outcome::Completed
    }
}

pub struct Setup;

impl Behavior<MinerState> for Setup {
    fn name(&self) -> &str {
        "Setup"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, MinerState>) -> bool {
        !ctx.shared.setup_done && !ctx.shared.threat_triggered
    }

    fn run(&mut self, ctx: &mut TickContext<'_, MinerState>) -> Outcome {
        ctx.shared.set_status("setting up");
        let me = ctx.host.self_position();
        let others = ctx.host.other_actor_positions();
        if ctx.state.detector.occupied_now(me, others.as_deref(), ctx.now) {
            info!("mine already occupied, hopping");
            ctx.shared.threat_triggered = true;
            return Outcome::Completed;
        }

        if !ctx.host.perform_action("mine", "walk-to") {
            return Outcome::NotCompleted;
        }
        if let Some(total) = ctx.host.reward_total() {
            ctx.state.rewards.observe(total);
        }
        ctx.shared.setup_done = true;
        ctx.shared.set_status("mining");
        Outcome::Completed
    }
}

pub struct Mine;

impl Behavior<MinerState> for Mine {
    fn name(&self) -> &str {
        "Mine"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, MinerState>) -> bool {
        ctx.shared.setup_done && !ctx.shared.threat_triggered
    }

    fn run(&mut self, ctx: &mut TickContext<'_, MinerState>) -> Outcome {
        if !ctx.host.perform_action("rocks", "mine") {
            return Outcome::NotCompleted;
        }
        ctx.shared.engaged = true;

        let timeout = ctx.state.mine_timeout_ms;
        let state = &mut *ctx.state;
        let mut triggered = false;
        let mut rewarded = false;
        ctx.host.poll_until(
            &mut |h| {
                let now = h.now();
                let me = h.self_position();
                let others = h.other_actor_positions();
                if state.detector.sample(me, others.as_deref(), now).triggered {
                    triggered = true;
                    return true;
                }
                if h.reward_total().is_some_and(|total| state.rewards.observe(total)) {
                    rewarded = true;
                    return true;
                }
                false
            },
            timeout,
        );

        let now = ctx.refresh_now();
        ctx.shared.engaged = false;
        if triggered {
            ctx.shared.threat_triggered = true;
            ctx.shared.set_status("threat detected");
            return Outcome::NotCompleted;
        }
        if rewarded {
            ctx.shared.record_reward(now);
            return Outcome::Completed;
        }
        Outcome::NotCompleted
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// Zones from `config.zones_csv`, or the built-in mine layout.
pub fn load_zones(config: &GemMinerConfig) -> Result<ZoneClassifier> {
    match &config.zones_csv {
        Some(path) => load_zones_csv(path).with_context(|| format!("loading zones from {}", path.display())),
        None => Ok(load_zones_reader(MINE_ZONES_CSV.as_bytes())?),
    }
}

/// Build a ready-to-run gem miner over a scripted host.
pub fn build_runner(
    config: &GemMinerConfig,
    notifier: impl Notifier + 'static,
) -> Result<Runner<MinerState, ScriptedHost>> {
    let mut rng = match config.run.seed {
        Some(seed) => BotRng::new(seed),
        None => BotRng::from_entropy(),
    };
    let host = ScriptedHost::new(config.scenario.clone());
    let mut state = MinerState::new(config, load_zones(config)?, rng.child(1))?;
    // We start freshly logged in.
    state.detector.signal(ResetEvent::Login, host.now());

    let runner = RunnerBuilder::new(BOT_NAME, state, host)
        .behavior(HopWorld)
        .behavior(Setup)
        .behavior(Mine)
        .config(config.run.clone())
        .rng(rng)
        .notifier(notifier)
        .build()?;
    Ok(runner)
}
