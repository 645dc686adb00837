use crate::buffer::replace::ReplacementPolicy;
use crate::errors::{InvalidConfig, Result};
use crate::simulation::engine::{Engine, Tick};
use crate::storage::page::Page;
use crate::{
    PageId, SlotId, Timestamp, DEFAULT_FRAME_CAPACITY, DEFAULT_REFERENCE_STRING,
    PAGE_TICK_INTERVAL_MS,
};
use slog::Logger;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageReplacementConfig {
    pub frame_capacity: usize,
    pub reference_string: Vec<PageId>,
}

impl PageReplacementConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frame_capacity == 0 {
            bail!(InvalidConfig::ZeroFrameCapacity)
        }
        if self.reference_string.is_empty() {
            bail!(InvalidConfig::EmptyReferenceString)
        }
        Ok(())
    }
}

impl Default for PageReplacementConfig {
    fn default() -> Self {
        Self {
            frame_capacity: DEFAULT_FRAME_CAPACITY,
            reference_string: DEFAULT_REFERENCE_STRING.to_vec(),
        }
    }
}

/// What a single tick did to the resident set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageStep {
    Hit {
        page_id: PageId,
        slot: SlotId,
    },
    // filled a free frame, nothing evicted
    ColdFault {
        page_id: PageId,
        slot: SlotId,
    },
    ReplacementFault {
        page_id: PageId,
        evicted: PageId,
        victim_slot: SlotId,
        slot: SlotId,
    },
    Exhausted,
}

impl PageStep {
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            PageStep::ColdFault { .. } | PageStep::ReplacementFault { .. }
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageReplacementState {
    frames: Vec<Page>,
    cursor: usize,
    clock: Timestamp,
    // slot the next reference would evict, judged by the most recent tick's policy or the
    // policy passed to `refresh_pending_eviction`
    pending_eviction_slot: Option<SlotId>,
    hits: usize,
    faults: usize,
}

impl PageReplacementState {
    pub fn frames(&self) -> &[Page] {
        &self.frames
    }
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.frames.iter().map(Page::get_id).collect()
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn clock(&self) -> Timestamp {
        self.clock
    }
    pub fn pending_eviction_slot(&self) -> Option<SlotId> {
        self.pending_eviction_slot
    }
    pub fn hits(&self) -> usize {
        self.hits
    }
    pub fn faults(&self) -> usize {
        self.faults
    }
    fn slot_of(&self, page_id: PageId) -> Option<SlotId> {
        self.frames
            .iter()
            .find(|page| page.get_id() == page_id)
            .map(Page::get_slot)
    }
}

// PageReplacementEngine feeds a reference string through a fixed number of frames and
// decides, per reference, whether it hits, fills a free frame, or evicts a resident page.
pub struct PageReplacementEngine {
    frame_capacity: usize,
    reference_string: Vec<PageId>,
    state: PageReplacementState,
    logger: Logger,
}

impl PageReplacementEngine {
    pub fn new(config: PageReplacementConfig, logger: &Logger) -> Result<Self> {
        config.validate()?;
        debug!(
            logger,
            "frame_capacity: {}, references: {}",
            config.frame_capacity,
            config.reference_string.len()
        );

        Ok(Self {
            frame_capacity: config.frame_capacity,
            reference_string: config.reference_string,
            state: PageReplacementState::default(),
            logger: logger.clone(),
        })
    }

    pub fn frame_capacity(&self) -> usize {
        self.frame_capacity
    }
    pub fn reference_string(&self) -> &[PageId] {
        &self.reference_string
    }
    pub fn state(&self) -> &PageReplacementState {
        &self.state
    }
    pub fn is_complete(&self) -> bool {
        self.state.cursor >= self.reference_string.len()
    }

    pub fn tick(&mut self, policy: ReplacementPolicy) -> Tick<PageReplacementState, PageStep> {
        let (next, step) = self.transition(&self.state, policy);
        match step {
            PageStep::ReplacementFault {
                page_id,
                evicted,
                victim_slot,
                ..
            } => debug!(
                self.logger,
                "[{:?}] evicted page {} from slot {} for page {}",
                policy,
                evicted,
                victim_slot,
                page_id
            ),
            PageStep::Exhausted => debug!(self.logger, "reference string exhausted"),
            _ => debug!(self.logger, "[{:?}] {:?}", policy, step),
        }
        self.state = next;

        Tick {
            snapshot: self.state.clone(),
            step,
        }
    }

    /// Recomputes the upcoming victim under `policy` without consuming a reference.
    pub fn refresh_pending_eviction(&mut self, policy: ReplacementPolicy) {
        self.state.pending_eviction_slot = self.upcoming_victim(&self.state, policy);
    }

    pub fn reset(&mut self) {
        debug!(self.logger, "reset at cursor {}", self.state.cursor);
        self.state = PageReplacementState::default();
    }

    // Pure step: reads `state`, builds the successor, never touches `self.state`.
    fn transition(
        &self,
        state: &PageReplacementState,
        policy: ReplacementPolicy,
    ) -> (PageReplacementState, PageStep) {
        let page_id = match self.reference_string.get(state.cursor) {
            Some(&page_id) => page_id,
            None => {
                let mut next = state.clone();
                next.pending_eviction_slot = None;
                return (next, PageStep::Exhausted);
            }
        };

        let replacer = policy.replacer();
        let now = state.clock;
        let mut next = state.clone();

        let step = if let Some(slot) = state.slot_of(page_id) {
            replacer.record_access(&mut next.frames[slot], now);
            next.hits += 1;
            PageStep::Hit { page_id, slot }
        } else if next.frames.len() < self.frame_capacity {
            let slot = next.frames.len();
            next.frames.push(Page::new(page_id, slot, now));
            next.faults += 1;
            PageStep::ColdFault { page_id, slot }
        } else {
            // frames are full and non-empty, so a victim always exists
            let victim_slot = replacer.victim(&next.frames).unwrap_or(0);
            let evicted = next.frames[victim_slot].get_id();
            let slot = replacer.replace(&mut next.frames, victim_slot, page_id, now);
            next.faults += 1;
            PageStep::ReplacementFault {
                page_id,
                evicted,
                victim_slot,
                slot,
            }
        };

        next.cursor += 1;
        next.clock += 1;
        next.pending_eviction_slot = self.upcoming_victim(&next, policy);

        (next, step)
    }

    // Slot the next reference would evict, if it is going to be a replacement fault.
    fn upcoming_victim(
        &self,
        state: &PageReplacementState,
        policy: ReplacementPolicy,
    ) -> Option<SlotId> {
        let page_id = *self.reference_string.get(state.cursor)?;
        if state.slot_of(page_id).is_some() || state.frames.len() < self.frame_capacity {
            return None;
        }
        policy.replacer().victim(&state.frames)
    }
}

impl Engine for PageReplacementEngine {
    type Policy = ReplacementPolicy;
    type Snapshot = PageReplacementState;
    type Step = PageStep;

    const TICK_INTERVAL: Duration = Duration::from_millis(PAGE_TICK_INTERVAL_MS);

    fn tick(&mut self, policy: ReplacementPolicy) -> Tick<PageReplacementState, PageStep> {
        PageReplacementEngine::tick(self, policy)
    }
    fn reset(&mut self) {
        PageReplacementEngine::reset(self)
    }
    fn is_complete(&self) -> bool {
        PageReplacementEngine::is_complete(self)
    }
    fn snapshot(&self) -> PageReplacementState {
        self.state.clone()
    }
    fn policy_changed(&mut self, policy: ReplacementPolicy) {
        self.refresh_pending_eviction(policy)
    }
}
