use crate::{PageId, SlotId, Timestamp};

// A page resident in one frame slot. The slot doubles as the frame's position in the
// resident set, so `slot` always equals the record's index in the frames vector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Page {
    page_id: PageId,
    last_access: Timestamp,
    slot: SlotId,
}

impl Page {
    pub fn new(page_id: PageId, slot: SlotId, now: Timestamp) -> Self {
        Self {
            page_id,
            last_access: now,
            slot,
        }
    }
    pub fn get_id(&self) -> PageId {
        self.page_id
    }
    pub fn get_slot(&self) -> SlotId {
        self.slot
    }
    pub fn get_last_access(&self) -> Timestamp {
        self.last_access
    }
    pub fn set_slot(&mut self, slot: SlotId) {
        self.slot = slot;
    }
    pub fn touch(&mut self, now: Timestamp) {
        self.last_access = now;
    }
    // Load another page into this frame, keeping the slot.
    pub fn load(&mut self, page_id: PageId, now: Timestamp) {
        self.page_id = page_id;
        self.last_access = now;
    }
}
