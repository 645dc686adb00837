mod buffer;
mod simulation;
mod storage;

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;

pub use self::buffer::page_replacement_engine::{
    PageReplacementConfig, PageReplacementEngine, PageReplacementState, PageStep,
};
pub use self::buffer::replace::ReplacementPolicy;
pub use self::simulation::driver::{Command, Driver, Update};
pub use self::simulation::engine::{Engine, Tick};
pub use self::simulation::{Simulation, Status};
pub use self::storage::disk::disk_scheduler::{
    DiskSchedulingConfig, DiskSchedulingEngine, DiskSchedulingState, DiskStep,
};
pub use self::storage::disk::request::{Request, RequestStatus};
pub use self::storage::disk::schedule::{Direction, SchedulingPolicy};
pub use self::storage::page::Page;

pub mod errors {
    pub use anyhow::Error;
    pub use anyhow::Result;

    use crate::TrackPosition;

    /// Reasons an engine refuses to be created.
    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    pub enum InvalidConfig {
        #[error("frame capacity must be positive")]
        ZeroFrameCapacity,
        #[error("reference string is empty")]
        EmptyReferenceString,
        #[error("request list is empty")]
        EmptyRequestSet,
        #[error("initial head position {0} is off the track")]
        HeadOutOfRange(TrackPosition),
        #[error("request #{index} at position {position} is off the track")]
        RequestOutOfRange {
            index: usize,
            position: TrackPosition,
        },
    }
}

pub fn default_logger() -> slog::Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, o!())
}

const TRACK_MIN: TrackPosition = 0;
const TRACK_MAX: TrackPosition = 100;
// SCAN moves the head this far per tick and services anything closer than SWEEP_BAND
const SCAN_STEP: TrackPosition = 5;
const SWEEP_BAND: TrackPosition = 5;

const PAGE_TICK_INTERVAL_MS: u64 = 1000;
const DISK_TICK_INTERVAL_MS: u64 = 500;

const DEFAULT_FRAME_CAPACITY: usize = 4;
const DEFAULT_REFERENCE_STRING: [PageId; 20] =
    [1, 2, 3, 4, 2, 1, 5, 6, 2, 1, 2, 3, 7, 6, 3, 2, 1, 2, 3, 6];
const DEFAULT_HEAD_POSITION: TrackPosition = 50;
const DEFAULT_REQUESTS: [TrackPosition; 6] = [90, 30, 70, 20, 50, 85];

pub type PageId = u32;
pub type SlotId = usize;
pub type Timestamp = u64;
pub type RequestId = usize;
pub type TrackPosition = u32;
