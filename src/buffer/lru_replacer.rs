use crate::buffer::replace::Replacer;
use crate::storage::page::Page;
use crate::{PageId, SlotId, Timestamp};

// Least recently used: the victim is the page with the oldest access stamp, the
// lowest slot winning ties. Replacement happens in place.
pub struct LruReplacer;

impl Replacer for LruReplacer {
    fn record_access(&self, page: &mut Page, now: Timestamp) {
        page.touch(now);
    }

    fn victim(&self, frames: &[Page]) -> Option<SlotId> {
        frames
            .iter()
            .min_by_key(|page| (page.get_last_access(), page.get_slot()))
            .map(Page::get_slot)
    }

    fn replace(
        &self,
        frames: &mut Vec<Page>,
        victim: SlotId,
        page_id: PageId,
        now: Timestamp,
    ) -> SlotId {
        if let Some(page) = frames.iter_mut().find(|page| page.get_slot() == victim) {
            page.load(page_id, now);
        }
        victim
    }
}
