//! Single-activation behavior scheduler.

use tb_behavior::{Behavior, Outcome, TickContext};

/// What happened in one scheduler tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickReport {
    /// The behavior at `index` activated and ran.
    Ran { index: usize, name: String, outcome: Outcome },
    /// No behavior activated.
    Idle,
}

impl TickReport {
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            TickReport::Ran { outcome, .. } => Some(outcome),
            TickReport::Idle => None,
        }
    }
}

/// An ordered list of behaviors.  List position is priority.
pub struct Scheduler<S> {
    behaviors: Vec<Box<dyn Behavior<S>>>,
}

impl<S> Scheduler<S> {
    pub fn new(behaviors: Vec<Box<dyn Behavior<S>>>) -> Self {
        Self { behaviors }
    }

    /// Append a behavior at the lowest priority.
    pub fn push(&mut self, behavior: Box<dyn Behavior<S>>) {
        self.behaviors.push(behavior);
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.iter().map(|b| b.name())
    }

    /// Run the first behavior whose `activate` returns `true`.  Behaviors
    /// after it are not consulted.
    pub fn tick(&mut self, ctx: &mut TickContext<'_, S>) -> TickReport {
        for (index, behavior) in self.behaviors.iter_mut().enumerate() {
            if behavior.activate(ctx) {
                let outcome = behavior.run(ctx);
                return TickReport::Ran { index, name: behavior.name().to_owned(), outcome };
            }
        }
        TickReport::Idle
    }
}
