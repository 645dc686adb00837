pub mod driver;
pub mod engine;


use crate::simulation::engine::{Engine, Tick};
use slog::Logger;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Play/pause/reset control around an engine.
///
/// `advance` only ticks the engine while `Running`, and the simulation moves to
/// `Completed` as soon as the engine has nothing left to process. The policy may be
/// changed at any point, including halfway through a run.
pub struct Simulation<E: Engine> {
    engine: E,
    policy: E::Policy,
    status: Status,
    logger: Logger,
}

impl<E: Engine> Simulation<E> {
    pub fn new(engine: E, policy: E::Policy, logger: &Logger) -> Self {
        Self {
            engine,
            policy,
            status: Status::Idle,
            logger: logger.clone(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
    pub fn policy(&self) -> E::Policy {
        self.policy
    }
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn start(&mut self) {
        match self.status {
            Status::Idle | Status::Paused if self.engine.is_complete() => {
                self.transition(Status::Completed)
            }
            Status::Idle | Status::Paused => self.transition(Status::Running),
            Status::Running | Status::Completed => {}
        }
    }

    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.transition(Status::Paused);
        }
    }

    // play/pause button
    pub fn toggle(&mut self) {
        if self.status == Status::Running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.transition(Status::Idle);
    }

    pub fn set_policy(&mut self, policy: E::Policy) {
        debug!(self.logger, "policy {:?} -> {:?}", self.policy, policy);
        self.policy = policy;
        self.engine.policy_changed(policy);
    }

    pub fn advance(&mut self) -> Option<Tick<E::Snapshot, E::Step>> {
        if self.status != Status::Running {
            return None;
        }
        let tick = self.engine.tick(self.policy);
        if self.engine.is_complete() {
            self.transition(Status::Completed);
        }
        Some(tick)
    }

    fn transition(&mut self, status: Status) {
        if self.status != status {
            info!(self.logger, "simulation {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }
}
