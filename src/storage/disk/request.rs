use crate::{RequestId, TrackPosition};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Pending,
    Serviced,
}

// A seek request. `id` is its insertion index and never changes, positions may repeat.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Request {
    id: RequestId,
    position: TrackPosition,
    status: RequestStatus,
}

impl Request {
    pub fn new(id: RequestId, position: TrackPosition) -> Self {
        Self {
            id,
            position,
            status: RequestStatus::Pending,
        }
    }
    pub fn get_id(&self) -> RequestId {
        self.id
    }
    pub fn get_position(&self) -> TrackPosition {
        self.position
    }
    pub fn get_status(&self) -> RequestStatus {
        self.status
    }
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
    pub fn distance_from(&self, head: TrackPosition) -> TrackPosition {
        self.position.abs_diff(head)
    }
    pub fn service(&mut self) {
        self.status = RequestStatus::Serviced;
    }
}
