use crate::storage::disk::request::Request;
use crate::{RequestId, TrackPosition, SCAN_STEP, SWEEP_BAND, TRACK_MAX, TRACK_MIN};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Up
    }
}

/// Where the head ends up after one scheduling decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    pub head: TrackPosition,
    pub direction: Direction,
    pub reached: Vec<RequestId>,
}

pub trait Scheduler {
    fn schedule(
        &self,
        head: TrackPosition,
        direction: Direction,
        requests: &[Request],
    ) -> Movement;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    Fcfs,
    Sstf,
    Scan,
}

impl SchedulingPolicy {
    pub fn scheduler(self) -> &'static dyn Scheduler {
        match self {
            SchedulingPolicy::Fcfs => &FcfsScheduler,
            SchedulingPolicy::Sstf => &SstfScheduler,
            SchedulingPolicy::Scan => &ScanScheduler,
        }
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        SchedulingPolicy::Fcfs
    }
}

// Jump straight to the chosen request, or stay put if nothing is pending.
fn jump_to(head: TrackPosition, direction: Direction, target: Option<&Request>) -> Movement {
    match target {
        Some(request) => Movement {
            head: request.get_position(),
            direction,
            reached: vec![request.get_id()],
        },
        None => Movement {
            head,
            direction,
            reached: vec![],
        },
    }
}

// Serve in arrival order, wherever the requests are.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn schedule(
        &self,
        head: TrackPosition,
        direction: Direction,
        requests: &[Request],
    ) -> Movement {
        let next = requests
            .iter()
            .filter(|request| request.is_pending())
            .min_by_key(|request| request.get_id());
        jump_to(head, direction, next)
    }
}

// Serve the closest pending request; equal distances go to the earlier arrival.
pub struct SstfScheduler;

impl Scheduler for SstfScheduler {
    fn schedule(
        &self,
        head: TrackPosition,
        direction: Direction,
        requests: &[Request],
    ) -> Movement {
        let next = requests
            .iter()
            .filter(|request| request.is_pending())
            .min_by_key(|request| (request.distance_from(head), request.get_id()));
        jump_to(head, direction, next)
    }
}

// Elevator sweep. The head moves SCAN_STEP per tick and picks up every pending request
// closer than SWEEP_BAND to the swept position. Passing either end of the track clamps
// the head one step inside it and reverses the direction.
pub struct ScanScheduler;

impl Scheduler for ScanScheduler {
    fn schedule(
        &self,
        head: TrackPosition,
        direction: Direction,
        requests: &[Request],
    ) -> Movement {
        let step = i64::from(SCAN_STEP);
        let swept = match direction {
            Direction::Up => i64::from(head) + step,
            Direction::Down => i64::from(head) - step,
        };

        let reached = requests
            .iter()
            .filter(|request| request.is_pending())
            .filter(|request| {
                (i64::from(request.get_position()) - swept).abs() < i64::from(SWEEP_BAND)
            })
            .map(Request::get_id)
            .collect();

        let (head, direction) = if swept >= i64::from(TRACK_MAX) {
            (TRACK_MAX - SCAN_STEP, Direction::Down)
        } else if swept <= i64::from(TRACK_MIN) {
            (TRACK_MIN + SCAN_STEP, Direction::Up)
        } else {
            (swept as TrackPosition, direction)
        };

        Movement {
            head,
            direction,
            reached,
        }
    }
}
