//! A deterministic, scripted [`Host`].
//!
//! Time only moves inside `poll_until`, in `poll_step_ms` increments.  Other
//! actors follow a timeline of frames per world; rewards arrive a fixed delay
//! after a matching action; `walk-to` teleports to a named place and `hop` on
//! target `world` moves to the next world.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tb_behavior::Host;
use tb_core::{Clock, ManualClock, Millis, Position, Timestamp};

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Other actors visible from `from_ms` onward in `world`, until a later frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub world:   u32,
    pub from_ms: Millis,
    pub actors:  Vec<Position>,
}

/// `amount` reward `delay_ms` after a successful `action` on `target`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardRule {
    pub target:   String,
    pub action:   String,
    pub amount:   f64,
    pub delay_ms: Millis,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name:     String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub start:        Position,
    pub poll_step_ms: Millis,
    pub frames:       Vec<Frame>,
    pub rewards:      Vec<RewardRule>,
    pub places:       Vec<Place>,
    /// `false` makes every world hop fail.
    pub hop_enabled:  bool,
    /// Simulated operator stop.
    pub stop_at_ms:   Option<Millis>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            start:        Position::new(0, 0, 0),
            poll_step_ms: 600,
            frames:       Vec::new(),
            rewards:      Vec::new(),
            places:       Vec::new(),
            hop_enabled:  true,
            stop_at_ms:   None,
        }
    }
}

// ── ScriptedHost ──────────────────────────────────────────────────────────────

pub struct ScriptedHost {
    scenario: Scenario,
    clock:    ManualClock,
    me:       Position,
    world:    u32,
    total:    f64,
    pending:  Vec<(Timestamp, f64)>,
    actions:  Vec<String>,
}

impl ScriptedHost {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            me:       scenario.start,
            clock:    ManualClock::default(),
            world:    0,
            total:    0.0,
            pending:  Vec::new(),
            actions:  Vec::new(),
            scenario,
        }
    }

    pub fn world(&self) -> u32 {
        self.world
    }

    pub fn position(&self) -> Position {
        self.me
    }

    /// Every action performed, as `target:action`.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Rewards delivered so far.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Move rewards whose delay has passed into the total.
    fn settle(&mut self) {
        let now = self.clock.now();
        let mut arrived = 0.0;
        self.pending.retain(|&(at, amount)| {
            if at <= now {
                arrived += amount;
                false
            } else {
                true
            }
        });
        self.total += arrived;
    }

    fn visible_actors(&self) -> Vec<Position> {
        let now = self.clock.now().0;
        self.scenario
            .frames
            .iter()
            .filter(|f| f.world == self.world && f.from_ms <= now)
            .max_by_key(|f| f.from_ms)
            .map(|f| f.actors.clone())
            .unwrap_or_default()
    }
}

impl Host for ScriptedHost {
    fn self_position(&mut self) -> Option<Position> {
        Some(self.me)
    }

    fn other_actor_positions(&mut self) -> Option<Vec<Position>> {
        let mut dots = vec![self.me];
        dots.extend(self.visible_actors());
        Some(dots)
    }

    fn poll_until(&mut self, condition: &mut dyn FnMut(&mut dyn Host) -> bool, timeout_ms: Millis) -> bool {
        let deadline = self.clock.now().after(timeout_ms);
        let step = self.scenario.poll_step_ms.max(1);
        loop {
            self.settle();
            if condition(self) {
                return true;
            }
            let now = self.clock.now();
            if now >= deadline {
                return false;
            }
            self.clock.advance(deadline.since(now).min(step));
        }
    }

    fn perform_action(&mut self, target: &str, action: &str) -> bool {
        self.actions.push(format!("{target}:{action}"));
        match (target, action) {
            ("world", "hop") => {
                if !self.scenario.hop_enabled {
                    return false;
                }
                self.world += 1;
                self.pending.clear();
                debug!(world = self.world, "hopped");
                true
            }
            (_, "walk-to") => match self.scenario.places.iter().find(|p| p.name == target) {
                Some(place) => {
                    self.me = place.position;
                    true
                }
                None => false,
            },
            _ => {
                let now = self.clock.now();
                let due: Vec<(Timestamp, f64)> = self
                    .scenario
                    .rewards
                    .iter()
                    .filter(|r| r.target == target && r.action == action)
                    .map(|r| (now.after(r.delay_ms), r.amount))
                    .collect();
                self.pending.extend(due);
                true
            }
        }
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn reward_total(&mut self) -> Option<f64> {
        self.settle();
        Some(self.total)
    }

    fn stop_requested(&self) -> bool {
        self.scenario
            .stop_at_ms
            .is_some_and(|at| self.clock.now().0 >= at)
    }
}
