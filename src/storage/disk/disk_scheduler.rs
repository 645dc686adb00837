use crate::errors::{InvalidConfig, Result};
use crate::simulation::engine::{Engine, Tick};
use crate::storage::disk::request::{Request, RequestStatus};
use crate::storage::disk::schedule::{Direction, SchedulingPolicy};
use crate::{
    RequestId, TrackPosition, DEFAULT_HEAD_POSITION, DEFAULT_REQUESTS, DISK_TICK_INTERVAL_MS,
    TRACK_MAX, TRACK_MIN,
};
use slog::Logger;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskSchedulingConfig {
    pub initial_head_position: TrackPosition,
    pub requests: Vec<TrackPosition>,
}

impl DiskSchedulingConfig {
    pub fn validate(&self) -> Result<()> {
        let on_track = |position: TrackPosition| (TRACK_MIN..=TRACK_MAX).contains(&position);

        if !on_track(self.initial_head_position) {
            bail!(InvalidConfig::HeadOutOfRange(self.initial_head_position))
        }
        if self.requests.is_empty() {
            bail!(InvalidConfig::EmptyRequestSet)
        }
        if let Some((index, &position)) = self
            .requests
            .iter()
            .enumerate()
            .find(|&(_, &position)| !on_track(position))
        {
            bail!(InvalidConfig::RequestOutOfRange { index, position })
        }
        Ok(())
    }
}

impl Default for DiskSchedulingConfig {
    fn default() -> Self {
        Self {
            initial_head_position: DEFAULT_HEAD_POSITION,
            requests: DEFAULT_REQUESTS.to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiskStep {
    Moved {
        from: TrackPosition,
        to: TrackPosition,
        // serviced by this tick, the "in progress" highlight for a renderer
        reached: Vec<RequestId>,
    },
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskSchedulingState {
    requests: Vec<Request>,
    head_position: TrackPosition,
    direction: Direction,
    total_seek_distance: u64,
}

impl DiskSchedulingState {
    fn new(config: &DiskSchedulingConfig) -> Self {
        Self {
            requests: config
                .requests
                .iter()
                .enumerate()
                .map(|(id, &position)| Request::new(id, position))
                .collect(),
            head_position: config.initial_head_position,
            direction: Direction::Up,
            total_seek_distance: 0,
        }
    }
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }
    pub fn head_position(&self) -> TrackPosition {
        self.head_position
    }
    pub fn direction(&self) -> Direction {
        self.direction
    }
    pub fn total_seek_distance(&self) -> u64 {
        self.total_seek_distance
    }
    pub fn pending_count(&self) -> usize {
        self.requests.iter().filter(|r| r.is_pending()).count()
    }
    pub fn serviced_count(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.get_status() == RequestStatus::Serviced)
            .count()
    }
    pub fn has_pending(&self) -> bool {
        self.requests.iter().any(Request::is_pending)
    }
}

// DiskSchedulingEngine moves a single disk head over a [0, 100] track and services a
// fixed batch of seek requests in the order the chosen policy dictates.
pub struct DiskSchedulingEngine {
    config: DiskSchedulingConfig,
    state: DiskSchedulingState,
    logger: Logger,
}

impl DiskSchedulingEngine {
    pub fn new(config: DiskSchedulingConfig, logger: &Logger) -> Result<Self> {
        config.validate()?;
        debug!(
            logger,
            "head: {}, requests: {:?}", config.initial_head_position, config.requests
        );

        Ok(Self {
            state: DiskSchedulingState::new(&config),
            config,
            logger: logger.clone(),
        })
    }

    pub fn config(&self) -> &DiskSchedulingConfig {
        &self.config
    }
    pub fn state(&self) -> &DiskSchedulingState {
        &self.state
    }
    pub fn is_complete(&self) -> bool {
        !self.state.has_pending()
    }

    pub fn tick(&mut self, policy: SchedulingPolicy) -> Tick<DiskSchedulingState, DiskStep> {
        let (next, step) = self.transition(&self.state, policy);
        if let DiskStep::Moved { from, to, reached } = &step {
            debug!(
                self.logger,
                "[{:?}] head {} -> {}, reached: {:?}", policy, from, to, reached
            );
        }
        if next.direction != self.state.direction {
            debug!(
                self.logger,
                "head reversed to {:?} at {}", next.direction, next.head_position
            );
        }
        self.state = next;

        Tick {
            snapshot: self.state.clone(),
            step,
        }
    }

    pub fn reset(&mut self) {
        debug!(self.logger, "reset with head at {}", self.state.head_position);
        self.state = DiskSchedulingState::new(&self.config);
    }

    // Pure step. With nothing pending the state is returned untouched.
    fn transition(
        &self,
        state: &DiskSchedulingState,
        policy: SchedulingPolicy,
    ) -> (DiskSchedulingState, DiskStep) {
        if !state.has_pending() {
            return (state.clone(), DiskStep::Exhausted);
        }

        let movement =
            policy
                .scheduler()
                .schedule(state.head_position, state.direction, &state.requests);
        let mut next = state.clone();
        for request in next
            .requests
            .iter_mut()
            .filter(|request| movement.reached.contains(&request.get_id()))
        {
            request.service();
        }

        let from = state.head_position;
        next.total_seek_distance += u64::from(movement.head.abs_diff(from));
        next.head_position = movement.head;
        next.direction = movement.direction;

        (
            next,
            DiskStep::Moved {
                from,
                to: movement.head,
                reached: movement.reached,
            },
        )
    }
}

impl Engine for DiskSchedulingEngine {
    type Policy = SchedulingPolicy;
    type Snapshot = DiskSchedulingState;
    type Step = DiskStep;

    const TICK_INTERVAL: Duration = Duration::from_millis(DISK_TICK_INTERVAL_MS);

    fn tick(&mut self, policy: SchedulingPolicy) -> Tick<DiskSchedulingState, DiskStep> {
        DiskSchedulingEngine::tick(self, policy)
    }
    fn reset(&mut self) {
        DiskSchedulingEngine::reset(self)
    }
    fn is_complete(&self) -> bool {
        DiskSchedulingEngine::is_complete(self)
    }
    fn snapshot(&self) -> DiskSchedulingState {
        self.state.clone()
    }
}
