use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::engine::PropagatorId;

/// The propagators which still have to run, in the order in which they were first enqueued.
///
/// A propagator is in the queue at most once; enqueueing it again before it runs has no effect.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropagatorQueue {
    queue: VecDeque<PropagatorId>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
}

impl PropagatorQueue {
    pub(crate) fn enqueue(&mut self, propagator_id: PropagatorId) {
        if self.is_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.accomodate(propagator_id, false);
        self.is_enqueued[propagator_id] = true;
        self.queue.push_back(propagator_id);
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let propagator_id = self.queue.pop_front()?;
        self.is_enqueued[propagator_id] = false;
        Some(propagator_id)
    }

    /// Drops every enqueued propagator, e.g. after a propagator failed.
    pub(crate) fn clear(&mut self) {
        for propagator_id in self.queue.drain(..) {
            self.is_enqueued[propagator_id] = false;
        }
    }

    pub(crate) fn is_enqueued(&self, propagator_id: PropagatorId) -> bool {
        propagator_id.0 < self.is_enqueued.len() as u32 && self.is_enqueued[propagator_id]
    }
}
