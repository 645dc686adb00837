use std::fmt::Debug;
use std::time::Duration;

/// Outcome of one tick: the state after the step and what the step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick<S, K> {
    pub snapshot: S,
    pub step: K,
}

/// A deterministic simulation advanced one discrete step at a time.
///
/// Engines own no timer. Whoever drives them decides when `tick` is called;
/// `TICK_INTERVAL` is only the cadence the reference presentation uses.
pub trait Engine {
    type Policy: Copy + Debug;
    type Snapshot: Clone + Debug;
    type Step: Clone + Debug;

    const TICK_INTERVAL: Duration;

    fn tick(&mut self, policy: Self::Policy) -> Tick<Self::Snapshot, Self::Step>;
    fn reset(&mut self);
    fn is_complete(&self) -> bool;
    fn snapshot(&self) -> Self::Snapshot;

    // Lets an engine refresh anything derived from the policy before the next tick.
    fn policy_changed(&mut self, _policy: Self::Policy) {}
}
