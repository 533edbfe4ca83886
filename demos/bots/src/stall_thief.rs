//! Stall thief: steals from one of two stalls until it has enough loot
//! there, then moves to the other.  A guard stepping onto a watch line sends
//! it to a safe spot until both lines are clear, then to the other stall.  A
//! guard lingering on stall A's early-warning tile while little was stolen
//! moves it to stall B ahead of time.
//!
//! Behaviors, highest priority first:
//!
//! | Behavior       | Activates when                                     |
//! |----------------|----------------------------------------------------|
//! | `SwitchStall`  | set up and the cycle signal says leave             |
//! | `WaitAtSafety` | retreated to the safe spot                         |
//! | `Setup`        | not yet at the active stall                        |
//! | `Steal`        | set up at the active stall                         |

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use tb_behavior::{Behavior, Host, Outcome, TickContext};
use tb_core::{ActivityId, BotRng, Millis, Position};
use tb_detect::{Activity, CycleConfig, CycleSignal, RewardTracker, SwitchCause};
use tb_sched::{Notifier, RunConfig, Runner, RunnerBuilder};
use tb_zone::{load_zones_csv, load_zones_reader, ZoneClassifier};

use crate::host::{Frame, Place, RewardRule, Scenario, ScriptedHost};

pub const BOT_NAME: &str = "stall_thief";

pub const STALL_A_WATCH_CSV: &str = "\
name,category,plane,shape,points
guard-line-a,threat,0,rect,2998:3002 3002:3004
";

pub const STALL_B_WATCH_CSV: &str = "\
name,category,plane,shape,points
guard-line-b,threat,0,rect,3008:3002 3012:3004
";

/// The tile the guard passes just before stall A's watch line.
pub const STALL_A_WARN_CSV: &str = "\
name,category,plane,shape,points
guard-warn-a,threat,0,rect,2996:3003 2996:3003
";

/// Stall B has no early warning.
pub const STALL_B_WARN_CSV: &str = "\
name,category,plane,shape,points
";

pub const SAFE_SPOT: &str = "safe-spot";

/// Host target name of each activity's stall.
pub fn stall(activity: Activity) -> &'static str {
    match activity {
        Activity::A => "stall-a",
        Activity::B => "stall-b",
    }
}

fn activity_id(activity: Activity) -> ActivityId {
    ActivityId(activity.index() as u16)
}

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StallThiefConfig {
    pub run:               RunConfig,
    pub cycle:             CycleConfig,
    /// How long to wait for loot after one steal.
    pub steal_timeout_ms:  Millis,
    /// Longest single wait at the safe spot for the watch lines to clear.
    /// Waiting resumes next tick if they are still occupied.
    pub safety_timeout_ms: Millis,
    /// Watch-line CSVs; the built-in lines when absent.
    pub watch_a_csv:       Option<PathBuf>,
    pub watch_b_csv:       Option<PathBuf>,
    /// Early-warning CSVs; the built-in tiles when absent.
    pub warn_a_csv:        Option<PathBuf>,
    pub warn_b_csv:        Option<PathBuf>,
    pub scenario:          Scenario,
}

impl Default for StallThiefConfig {
    fn default() -> Self {
        Self {
            run:               RunConfig::default(),
            cycle:             CycleConfig::default(),
            steal_timeout_ms:  3_000,
            safety_timeout_ms: 10_000,
            watch_a_csv:       None,
            watch_b_csv:       None,
            warn_a_csv:        None,
            warn_b_csv:        None,
            scenario:          demo_scenario(),
        }
    }
}

pub const STALL_A_SPOT: Position = Position::new(3000, 3000, 0);
pub const STALL_B_SPOT: Position = Position::new(3010, 3000, 0);

/// Two stalls; a guard passes stall A's early-warning tile 26 s in, stands
/// on its watch line from 30 s and leaves again at 60 s.
pub fn demo_scenario() -> Scenario {
    let guard_away = Position::new(2990, 2990, 0);
    Scenario {
        start: Position::new(3005, 2995, 0),
        frames: vec![
            Frame { world: 0, from_ms: 0, actors: vec![guard_away] },
            Frame { world: 0, from_ms: 26_000, actors: vec![Position::new(2996, 3003, 0)] },
            Frame { world: 0, from_ms: 30_000, actors: vec![Position::new(3001, 3003, 0)] },
            Frame { world: 0, from_ms: 60_000, actors: vec![guard_away] },
        ],
        rewards: vec![
            RewardRule { target: "stall-a".into(), action: "steal-from".into(), amount: 20.0, delay_ms: 1_200 },
            RewardRule { target: "stall-b".into(), action: "steal-from".into(), amount: 35.0, delay_ms: 1_200 },
        ],
        places: vec![
            Place { name: "stall-a".into(), position: STALL_A_SPOT },
            Place { name: "stall-b".into(), position: STALL_B_SPOT },
            Place { name: SAFE_SPOT.into(), position: Position::new(3005, 2990, 0) },
        ],
        stop_at_ms: Some(150_000),
        ..Scenario::default()
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct ThiefState {
    pub signal:            CycleSignal,
    pub rewards:           RewardTracker,
    pub steal_timeout_ms:  Millis,
    pub safety_timeout_ms: Millis,
    /// At the safe spot, waiting for the watch lines to clear.
    pub retreating:        bool,
    /// Set by `SwitchStall::activate`, consumed by its `run`.
    pending:               Option<SwitchCause>,
}

impl ThiefState {
    pub fn new(config: &StallThiefConfig, signal: CycleSignal) -> Self {
        Self {
            signal,
            rewards:           RewardTracker::new(),
            steal_timeout_ms:  config.steal_timeout_ms,
            safety_timeout_ms: config.safety_timeout_ms,
            retreating:        false,
            pending:           None,
        }
    }
}

/// Every other actor the host reports.
fn others(host: &mut dyn Host) -> Vec<Position> {
    let me = host.self_position();
    host.other_actor_positions()
        .unwrap_or_default()
        .into_iter()
        .filter(|p| Some(*p) != me)
        .collect()
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

pub struct SwitchStall;

impl Behavior<ThiefState> for SwitchStall {
    fn name(&self) -> &str {
        "SwitchStall"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> bool {
        if !ctx.shared.setup_done {
            return false;
        }
        let observed = others(&mut *ctx.host);
        ctx.state.pending = ctx.state.signal.should_switch(&observed, ctx.now);
        ctx.state.pending.is_some()
    }

    fn run(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> Outcome {
        let Some(cause) = ctx.state.pending.take() else {
            return Outcome::NotCompleted;
        };
        let next = ctx.state.signal.active();
        ctx.shared.activity = activity_id(next);
        ctx.shared.reset_for_new_cycle();
        ctx.shared.setup_done = false;

        if cause == SwitchCause::Backup {
            ctx.shared.set_status("guard spotted, retreating");
            ctx.state.retreating = ctx.host.perform_action(SAFE_SPOT, "walk-to");
        }
        info!(to = stall(next), ?cause, "switching stall");
        Outcome::Completed
    }
}

pub struct WaitAtSafety;

impl Behavior<ThiefState> for WaitAtSafety {
    fn name(&self) -> &str {
        "WaitAtSafety"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> bool {
        ctx.state.retreating
    }

    fn run(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> Outcome {
        ctx.shared.set_status("waiting for the watch lines to clear");
        let timeout = ctx.state.safety_timeout_ms;
        let signal = &ctx.state.signal;
        let clear = ctx.host.poll_until(&mut |h| !signal.any_watched(&others(h)), timeout);
        if !clear {
            info!(timeout_ms = timeout, "watch lines still occupied, waiting on");
            return Outcome::NotCompleted;
        }
        ctx.state.retreating = false;
        info!("watch lines clear, returning");
        Outcome::Completed
    }
}

pub struct Setup;

impl Behavior<ThiefState> for Setup {
    fn name(&self) -> &str {
        "Setup"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> bool {
        !ctx.shared.setup_done
    }

    fn run(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> Outcome {
        let active = ctx.state.signal.active();
        ctx.shared.set_status(format!("walking to {}", stall(active)));
        if !ctx.host.perform_action(stall(active), "walk-to") {
            return Outcome::NotCompleted;
        }
        ctx.state.rewards.reset();
        if let Some(total) = ctx.host.reward_total() {
            ctx.state.rewards.observe(total);
        }
        ctx.shared.activity = activity_id(active);
        ctx.shared.setup_done = true;
        ctx.shared.set_status(format!("thieving at {}", stall(active)));
        Outcome::Completed
    }
}

pub struct Steal;

impl Behavior<ThiefState> for Steal {
    fn name(&self) -> &str {
        "Steal"
    }

    fn activate(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> bool {
        ctx.shared.setup_done
    }

    fn run(&mut self, ctx: &mut TickContext<'_, ThiefState>) -> Outcome {
        let target = stall(ctx.state.signal.active());
        if !ctx.host.perform_action(target, "steal-from") {
            return Outcome::NotCompleted;
        }
        ctx.shared.engaged = true;

        let timeout = ctx.state.steal_timeout_ms;
        let rewards = &mut ctx.state.rewards;
        let looted = ctx.host.poll_until(
            &mut |h| h.reward_total().is_some_and(|total| rewards.observe(total)),
            timeout,
        );

        let now = ctx.refresh_now();
        ctx.shared.engaged = false;
        if looted {
            ctx.state.signal.record_primary_event(now);
            ctx.shared.record_reward(now);
            return Outcome::Completed;
        }
        if ctx.state.signal.count() == 0 {
            // The first loot of a visit is easy to miss.
            ctx.state.signal.assume_first_event(now);
        }
        Outcome::NotCompleted
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

fn load_watch(path: Option<&PathBuf>, builtin: &str) -> Result<ZoneClassifier> {
    match path {
        Some(path) => load_zones_csv(path).with_context(|| format!("loading watch line from {}", path.display())),
        None => Ok(load_zones_reader(builtin.as_bytes())?),
    }
}

/// Build a ready-to-run stall thief over a scripted host.
pub fn build_runner(
    config: &StallThiefConfig,
    notifier: impl Notifier + 'static,
) -> Result<Runner<ThiefState, ScriptedHost>> {
    let mut rng = match config.run.seed {
        Some(seed) => BotRng::new(seed),
        None => BotRng::from_entropy(),
    };
    let watch_a = load_watch(config.watch_a_csv.as_ref(), STALL_A_WATCH_CSV)?;
    let watch_b = load_watch(config.watch_b_csv.as_ref(), STALL_B_WATCH_CSV)?;
    let warn_a = load_watch(config.warn_a_csv.as_ref(), STALL_A_WARN_CSV)?;
    let warn_b = load_watch(config.warn_b_csv.as_ref(), STALL_B_WARN_CSV)?;
    let signal = CycleSignal::new(config.cycle.clone(), watch_a, watch_b)?
        .with_early_warning(warn_a, warn_b, rng.child(1));
    let state = ThiefState::new(config, signal);
    let host = ScriptedHost::new(config.scenario.clone());

    let runner = RunnerBuilder::new(BOT_NAME, state, host)
        .behavior(SwitchStall)
        .behavior(WaitAtSafety)
        .behavior(Setup)
        .behavior(Steal)
        .config(config.run.clone())
        .rng(rng)
        .notifier(notifier)
        .build()?;
    Ok(runner)
}
