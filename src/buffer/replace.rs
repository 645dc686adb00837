use crate::buffer::fifo_replacer::FifoReplacer;
use crate::buffer::lru_replacer::LruReplacer;
use crate::storage::page::Page;
use crate::{PageId, SlotId, Timestamp};

pub trait Replacer {
    // Called when a resident page is referenced again.
    fn record_access(&self, page: &mut Page, now: Timestamp);
    // Slot that a replacement fault would evict, `None` when nothing is resident.
    fn victim(&self, frames: &[Page]) -> Option<SlotId>;
    // Evict the page at `victim` and load `page_id`, returning the slot it landed in.
    fn replace(
        &self,
        frames: &mut Vec<Page>,
        victim: SlotId,
        page_id: PageId,
        now: Timestamp,
    ) -> SlotId;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReplacementPolicy {
    Lru,
    Fifo,
}

impl ReplacementPolicy {
    pub fn replacer(self) -> &'static dyn Replacer {
        match self {
            ReplacementPolicy::Lru => &LruReplacer,
            ReplacementPolicy::Fifo => &FifoReplacer,
        }
    }
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        ReplacementPolicy::Lru
    }
}
