//! A catch-all behavior that only waits.

use tb_core::DelayRange;

use crate::{Behavior, BehaviorResult, Outcome, TickContext};

/// Always activates; waits a random delay and completes.
///
/// Place last in a behavior list to keep the bot polling at a human pace
/// when nothing else applies.
pub struct Idle {
    delay: DelayRange,
}

impl Idle {
    pub fn new(delay: DelayRange) -> BehaviorResult<Self> {
        delay.validate()?;
        Ok(Self { delay })
    }
}

impl<S> Behavior<S> for Idle {
    fn name(&self) -> &str {
        "idle"
    }

    fn activate(&mut self, _ctx: &mut TickContext<'_, S>) -> bool {
        true
    }

    fn run(&mut self, ctx: &mut TickContext<'_, S>) -> Outcome {
        let ms = ctx.rng.draw(&self.delay);
        ctx.host.wait(ms);
        ctx.refresh_now();
        Outcome::Completed
    }
}
