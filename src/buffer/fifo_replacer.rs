use crate::buffer::replace::Replacer;
use crate::storage::page::Page;
use crate::{PageId, SlotId, Timestamp};

// First in, first out: slot 0 always holds the oldest arrival. Evicting it shifts
// every other page down one slot and the newcomer takes the last slot.
pub struct FifoReplacer;

impl Replacer for FifoReplacer {
    // recency is irrelevant to arrival order
    fn record_access(&self, _page: &mut Page, _now: Timestamp) {}

    fn victim(&self, frames: &[Page]) -> Option<SlotId> {
        frames
            .iter()
            .find(|page| page.get_slot() == 0)
            .map(Page::get_slot)
    }

    fn replace(
        &self,
        frames: &mut Vec<Page>,
        victim: SlotId,
        page_id: PageId,
        now: Timestamp,
    ) -> SlotId {
        frames.retain(|page| page.get_slot() != victim);
        for (slot, page) in frames.iter_mut().enumerate() {
            page.set_slot(slot);
        }
        let slot = frames.len();
        frames.push(Page::new(page_id, slot, now));
        slot
    }
}
