//! Unit and end-to-end tests for the bots.

use tb_core::{Position, Timestamp};
use tb_sched::{NoopNotifier, NoopObserver, StopReason};

use crate::host::{Frame, Place, RewardRule, Scenario, ScriptedHost};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rule(target: &str, action: &str, amount: f64, delay_ms: u64) -> RewardRule {
    RewardRule { target: target.into(), action: action.into(), amount, delay_ms }
}

fn place(name: &str, position: Position) -> Place {
    Place { name: name.into(), position }
}

/// Actions matching `suffix`, in order.
fn actions_ending(host: &ScriptedHost, suffix: &str) -> Vec<String> {
    host.actions().iter().filter(|a| a.ends_with(suffix)).cloned().collect()
}

// ── ScriptedHost ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod host {
    use tb_behavior::Host;

    use super::*;

    #[test]
    fn rewards_arrive_after_delay() {
        let mut host = ScriptedHost::new(Scenario {
            rewards: vec![rule("rocks", "mine", 50.0, 1_000)],
            ..Scenario::default()
        });
        assert_eq!(host.reward_total(), Some(0.0));
        assert!(host.perform_action("rocks", "mine"));

        let got = host.poll_until(&mut |h| h.reward_total() == Some(50.0), 5_000);
        assert!(got);
        // 600 ms steps: the first poll at or past 1 000 ms is 1 200 ms.
        assert_eq!(host.now(), Timestamp(1_200));
    }

    #[test]
    fn unmatched_action_gives_nothing() {
        let mut host = ScriptedHost::new(Scenario {
            rewards: vec![rule("rocks", "mine", 50.0, 0)],
            ..Scenario::default()
        });
        assert!(host.perform_action("rocks", "prospect"));
        host.wait(1_000);
        assert_eq!(host.reward_total(), Some(0.0));
    }

    #[test]
    fn walk_to_known_place_only() {
        let spot = Position::new(5, 6, 0);
        let mut host = ScriptedHost::new(Scenario {
            places: vec![place("bank", spot)],
            ..Scenario::default()
        });
        assert!(!host.perform_action("nowhere", "walk-to"));
        assert!(host.perform_action("bank", "walk-to"));
        assert_eq!(host.self_position(), Some(spot));
    }

    #[test]
    fn frames_follow_world_and_time() {
        let a = Position::new(1, 1, 0);
        let b = Position::new(2, 2, 0);
        let mut host = ScriptedHost::new(Scenario {
            frames: vec![
                Frame { world: 0, from_ms: 0, actors: vec![a] },
                Frame { world: 0, from_ms: 1_000, actors: vec![b] },
                Frame { world: 1, from_ms: 0, actors: Vec::new() },
            ],
            ..Scenario::default()
        });
        let me = host.position();
        assert_eq!(host.other_actor_positions(), Some(vec![me, a]));
        host.wait(1_000);
        assert_eq!(host.other_actor_positions(), Some(vec![me, b]));

        assert!(host.perform_action("world", "hop"));
        assert_eq!(host.world(), 1);
        assert_eq!(host.other_actor_positions(), Some(vec![me]));
    }

    #[test]
    fn hop_drops_pending_rewards() {
        let mut host = ScriptedHost::new(Scenario {
            rewards: vec![rule("rocks", "mine", 10.0, 500)],
            ..Scenario::default()
        });
        host.perform_action("rocks", "mine");
        host.perform_action("world", "hop");
        host.wait(1_000);
        assert_eq!(host.total(), 0.0);
    }

    #[test]
    fn disabled_hop_fails() {
        let mut host = ScriptedHost::new(Scenario { hop_enabled: false, ..Scenario::default() });
        assert!(!host.perform_action("world", "hop"));
        assert_eq!(host.world(), 0);
        assert_eq!(host.actions(), ["world:hop".to_owned()]);
    }

    #[test]
    fn stop_requested_at_time() {
        let mut host = ScriptedHost::new(Scenario { stop_at_ms: Some(2_000), ..Scenario::default() });
        assert!(!host.stop_requested());
        host.wait(2_000);
        assert!(host.stop_requested());
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

#[cfg(test)]
mod support {
    use std::io::Write;

    use crate::gem_miner::GemMinerConfig;
    use crate::support::load_config;

    #[test]
    fn no_path_gives_defaults() {
        let config: GemMinerConfig = load_config(None).unwrap();
        assert!(config.hop);
        assert_eq!(config.mine_timeout_ms, 10_000);
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "hop": false, "run": {{ "seed": 9 }}, "detector": {{ "clear_readings_to_reset": 4 }} }}"#)
            .unwrap();

        let config: GemMinerConfig = load_config(Some(file.path())).unwrap();
        assert!(!config.hop);
        assert_eq!(config.run.seed, Some(9));
        assert_eq!(config.run.stats_interval_ms, 300_000);
        assert_eq!(config.detector.clear_readings_to_reset, 4);
        assert_eq!(config.detector.self_readings_to_clear, 5);
    }

    #[test]
    fn bad_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_config::<GemMinerConfig>(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config::<GemMinerConfig>(Some(std::path::Path::new("/nonexistent/bot.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}

// ── Gem miner ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gem_miner {
    use tb_behavior::{Behavior, SharedContext, TickContext};
    use tb_core::BotRng;

    use super::*;
    use crate::gem_miner::{build_runner, demo_scenario, load_zones, GemMinerConfig, MinerState, Setup};

    /// A player walks into the mine 5 s in and never leaves world 0.
    fn crasher_config(seed: u64) -> GemMinerConfig {
        let mut config = GemMinerConfig::default();
        config.run.seed = Some(seed);
        config.run.max_ticks = Some(60);
        config.scenario = Scenario {
            frames: vec![Frame { world: 0, from_ms: 5_000, actors: vec![Position::new(2834, 9395, 0)] }],
            stop_at_ms: None,
            ..demo_scenario()
        };
        config
    }

    #[test]
    fn builtin_zones_load() {
        let zones = load_zones(&GemMinerConfig::default()).unwrap();
        assert_eq!(zones.len(), 3);
    }

    #[test]
    fn setup_flags_an_occupied_mine() {
        let config = crasher_config(1);
        let mut state = MinerState::new(&config, load_zones(&config).unwrap(), BotRng::new(1)).unwrap();
        let mut host = ScriptedHost::new(Scenario {
            frames: vec![Frame { world: 0, from_ms: 0, actors: vec![Position::new(2840, 9395, 0)] }],
            ..demo_scenario()
        });
        let mut shared = SharedContext::new();
        let mut rng = BotRng::new(2);
        let mut ctx = TickContext::new(0, Timestamp::ZERO, &mut shared, &mut state, &mut host, &mut rng);

        Setup.run(&mut ctx);
        assert!(shared.threat_triggered);
        assert!(!shared.setup_done);
    }

    #[test]
    fn setup_walks_to_an_empty_mine() {
        let config = crasher_config(1);
        let mut state = MinerState::new(&config, load_zones(&config).unwrap(), BotRng::new(1)).unwrap();
        let mut host = ScriptedHost::new(Scenario { start: Position::new(0, 0, 0), ..demo_scenario() });
        let mut shared = SharedContext::new();
        let mut rng = BotRng::new(2);
        let mut ctx = TickContext::new(0, Timestamp::ZERO, &mut shared, &mut state, &mut host, &mut rng);

        Setup.run(&mut ctx);
        assert!(shared.setup_done);
        assert!(!shared.threat_triggered);
        assert_eq!(state.rewards.baseline(), Some(0.0));
        assert_eq!(host.position(), crate::gem_miner::MINE_SPOT);
    }

    #[test]
    fn hops_once_when_a_player_lingers() {
        let mut runner = build_runner(&crasher_config(11), NoopNotifier).unwrap();
        let reason = runner.run(&mut NoopObserver);

        assert_eq!(reason, StopReason::TickLimit);
        assert_eq!(runner.host().world(), 1);
        assert_eq!(runner.shared().world_changes, 1);
        assert!(runner.shared().setup_done);
        assert!(runner.shared().reward_events > 5);
        assert_eq!(actions_ending(runner.host(), ":hop").len(), 1);
    }

    #[test]
    fn trigger_respects_threshold_window() {
        let mut runner = build_runner(&crasher_config(3), NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);
        let hopped_at = runner.shared().last_world_change_at.unwrap();
        // Login grace ends at 10 s; the threat window is at most 16 s, then
        // the hop itself adds a stabilising wait of up to 12 s.
        assert!(hopped_at >= Timestamp(10_000 + 10_000));
        assert!(hopped_at <= Timestamp(10_000 + 16_000 + 3_000 + 12_000));
    }

    #[test]
    fn quiet_mine_never_hops() {
        let mut config = crasher_config(5);
        config.scenario.frames.clear();
        let mut runner = build_runner(&config, NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        assert_eq!(runner.host().world(), 0);
        assert_eq!(runner.shared().world_changes, 0);
        assert_eq!(runner.shared().reward_events, 59);
    }

    #[test]
    fn stops_without_hop_profile() {
        let mut config = crasher_config(11);
        config.hop = false;
        let mut runner = build_runner(&config, NoopNotifier).unwrap();
        let reason = runner.run(&mut NoopObserver);

        assert!(matches!(reason, StopReason::Fatal(ref why) if why.contains("hop profile")));
        assert_eq!(runner.host().world(), 0);
        assert!(actions_ending(runner.host(), ":hop").is_empty());
    }

    #[test]
    fn operator_stop_ends_run() {
        let mut config = crasher_config(2);
        config.run.max_ticks = None;
        config.scenario.stop_at_ms = Some(30_000);
        let mut runner = build_runner(&config, NoopNotifier).unwrap();
        assert_eq!(runner.run(&mut NoopObserver), StopReason::HostRequested);
    }

    #[test]
    fn invalid_stabilize_rejected() {
        let mut config = GemMinerConfig::default();
        config.stabilize = tb_core::DelayRange::uniform(5, 1);
        assert!(build_runner(&config, NoopNotifier).is_err());
    }
}

// ── Stall thief ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod stall_thief {
    use tb_behavior::Host;
    use tb_core::{ActivityId, DelayRange};

    use super::*;
    use crate::stall_thief::{build_runner, demo_scenario, StallThiefConfig, STALL_B_SPOT};

    const ON_LINE_A: Position = Position::new(3001, 3003, 0);
    const WARN_A: Position = Position::new(2996, 3003, 0);

    fn config(frames: Vec<Frame>, max_ticks: u64) -> StallThiefConfig {
        let mut config = StallThiefConfig::default();
        config.run.seed = Some(4);
        config.run.max_ticks = Some(max_ticks);
        config.scenario = Scenario { frames, stop_at_ms: None, ..demo_scenario() };
        config
    }

    fn steals(host: &ScriptedHost) -> Vec<String> {
        actions_ending(host, ":steal-from")
    }

    #[test]
    fn alternates_on_loot_count() {
        let mut runner = build_runner(&config(Vec::new(), 14), NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        let steals = steals(runner.host());
        let expected = [
            "stall-a", "stall-a", "stall-a", "stall-a", "stall-b", "stall-b", "stall-a",
        ]
        .map(|s| format!("{s}:steal-from"));
        assert!(steals.len() >= expected.len());
        assert_eq!(steals[..expected.len()], expected);
    }

    #[test]
    fn guard_sends_us_to_the_safe_spot_first() {
        let frames = vec![
            Frame { world: 0, from_ms: 0, actors: vec![ON_LINE_A] },
            Frame { world: 0, from_ms: 5_000, actors: vec![Position::new(2990, 2990, 0)] },
        ];
        let mut runner = build_runner(&config(frames, 5), NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        let actions = runner.host().actions();
        assert_eq!(
            actions[..4],
            ["stall-a:walk-to", "safe-spot:walk-to", "stall-b:walk-to", "stall-b:steal-from"].map(String::from)
        );
        assert_eq!(runner.shared().activity, ActivityId(1));
        assert_eq!(runner.host().position(), STALL_B_SPOT);
        assert!(!runner.state().retreating);
    }

    #[test]
    fn waits_at_safe_spot_while_line_is_occupied() {
        let guard = Frame { world: 0, from_ms: 0, actors: vec![ON_LINE_A] };
        let mut runner = build_runner(&config(vec![guard], 4), NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        assert_eq!(runner.host().actions(), ["stall-a:walk-to", "safe-spot:walk-to"].map(String::from));
        assert!(runner.state().retreating);
        // Two bounded waits of 10 s each.
        assert_eq!(runner.host().now(), Timestamp(20_000));
    }

    #[test]
    fn lingering_guard_triggers_early_switch() {
        let guard = Frame { world: 0, from_ms: 0, actors: vec![WARN_A] };
        let mut config = config(vec![guard], 6);
        config.cycle.preempt_delay = DelayRange::fixed(4_000);
        config.scenario.rewards = vec![
            rule("stall-a", "steal-from", 20.0, 2_500),
            rule("stall-b", "steal-from", 35.0, 1_200),
        ];
        let mut runner = build_runner(&config, NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        // Loot lands at 3 s and 6 s; the 4 s timer fires on the check at 6 s.
        let steals = steals(runner.host());
        assert_eq!(steals, ["stall-a", "stall-a", "stall-b"].map(|s| format!("{s}:steal-from")));
        assert!(actions_ending(runner.host(), "safe-spot:walk-to").is_empty());
        assert_eq!(runner.shared().activity, ActivityId(1));
    }

    #[test]
    fn guard_elsewhere_is_ignored() {
        let guard = Frame { world: 0, from_ms: 0, actors: vec![Position::new(2990, 2990, 0)] };
        let mut runner = build_runner(&config(vec![guard], 4), NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        assert!(actions_ending(runner.host(), "safe-spot:walk-to").is_empty());
        assert_eq!(steals(runner.host()).len(), 3);
    }

    #[test]
    fn missed_first_loot_is_assumed() {
        let mut config = config(Vec::new(), 3);
        config.scenario.rewards = vec![rule("stall-a", "steal-from", 20.0, 10_000)];
        let mut runner = build_runner(&config, NoopNotifier).unwrap();
        runner.run(&mut NoopObserver);

        assert_eq!(runner.state().signal.count(), 1);
        assert_eq!(runner.shared().reward_events, 0);
    }

    #[test]
    fn zero_target_rejected() {
        let mut config = StallThiefConfig::default();
        config.cycle.targets = [0, 2];
        assert!(build_runner(&config, NoopNotifier).is_err());
    }
}
