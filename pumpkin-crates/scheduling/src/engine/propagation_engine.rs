use std::fmt::Debug;
use std::fmt::Formatter;

use log::debug;

use super::Propagator;
use super::PropagatorConstructor;
use super::PropagatorConstructorContext;
use super::PropagatorId;
use super::PropagatorQueue;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::intervals::IntervalBounds;
use crate::intervals::IntervalDomains;
use crate::intervals::IntervalId;
use crate::intervals::IntervalStore;
use crate::print_pumpkin_assert_warning_message;
use crate::pumpkin_assert_simple;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(EngineStatistics {
    num_propagators_called: usize,
    num_conflicts: usize,
});

/// Owns the intervals and the propagators which constrain them, and runs the propagators until
/// none of them can tighten a bound.
///
/// Bounds which are narrowed from outside (through [`PropagationEngine::set_start_min`] and
/// [`PropagationEngine::set_end_max`]) only take effect on the propagators at the next call to
/// [`PropagationEngine::propagate`]. After a failed propagation the bounds are left as they were
/// when the failure was detected; the caller is expected to restore a checkpoint (see
/// [`PropagationEngine::new_checkpoint`]).
pub struct PropagationEngine {
    intervals: IntervalStore,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    /// For every interval, the propagators which are enqueued when its bounds change.
    watch_lists: KeyedVec<IntervalId, Vec<PropagatorId>>,
    propagator_queue: PropagatorQueue,
    statistics: EngineStatistics,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        print_pumpkin_assert_warning_message!();

        PropagationEngine {
            intervals: IntervalStore::default(),
            propagators: KeyedVec::default(),
            watch_lists: KeyedVec::default(),
            propagator_queue: PropagatorQueue::default(),
            statistics: EngineStatistics::default(),
        }
    }
}

impl Debug for PropagationEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationEngine")
            .field("intervals", &self.intervals)
            .field(
                "propagators",
                &self
                    .propagators
                    .iter()
                    .map(|propagator| propagator.name())
                    .collect::<Vec<_>>(),
            )
            .field("propagator_queue", &self.propagator_queue)
            .finish_non_exhaustive()
    }
}

impl PropagationEngine {
    pub fn new_interval(&mut self, bounds: IntervalBounds) -> Result<IntervalId, EmptyDomain> {
        let interval = self.intervals.new_interval(bounds)?;
        self.watch_lists.accomodate(interval, vec![]);
        Ok(interval)
    }

    pub fn intervals(&self) -> &IntervalStore {
        &self.intervals
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    /// Adds the propagator created by `constructor` and propagates until a fixpoint is reached.
    ///
    /// The propagator stays part of the engine when the propagation fails.
    pub fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, Inconsistency> {
        let propagator_id = PropagatorId(self.propagators.len() as u32);
        let propagator = constructor.create(PropagatorConstructorContext::new(
            propagator_id,
            &mut self.watch_lists,
        ));

        let new_propagator_id = self.propagators.push(Box::new(propagator));
        pumpkin_assert_simple!(new_propagator_id == propagator_id);

        self.propagator_queue.enqueue(propagator_id);
        self.propagate()?;

        Ok(propagator_id)
    }

    pub fn set_start_min(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain> {
        self.intervals.set_start_min(interval, value)
    }

    pub fn set_end_max(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain> {
        self.intervals.set_end_max(interval, value)
    }

    /// Runs the enqueued propagators, and those watching the intervals which changed since the
    /// last call, until none is left.
    pub fn propagate(&mut self) -> PropagationStatus {
        self.enqueue_watchers(None);

        while let Some(propagator_id) = self.propagator_queue.pop() {
            self.statistics.num_propagators_called += 1;

            let result = self.propagators[propagator_id].propagate(&mut self.intervals);
            if let Err(inconsistency) = result {
                debug!(
                    "{} ({propagator_id}) failed: {inconsistency}",
                    self.propagators[propagator_id].name()
                );
                self.statistics.num_conflicts += 1;
                self.propagator_queue.clear();
                self.intervals.clear_events();
                return Err(inconsistency);
            }

            self.enqueue_watchers(Some(propagator_id));
        }

        Ok(())
    }

    /// Enqueues the watchers of the intervals which changed, except for `source`.
    fn enqueue_watchers(&mut self, source: Option<PropagatorId>) {
        for interval in self.intervals.drain_events() {
            for &propagator_id in self.watch_lists[interval].iter() {
                if Some(propagator_id) == source {
                    continue;
                }
                self.propagator_queue.enqueue(propagator_id);
            }
        }
    }

    pub fn new_checkpoint(&mut self) {
        self.intervals.new_checkpoint()
    }

    pub fn checkpoint(&self) -> usize {
        self.intervals.checkpoint()
    }

    /// Restores the bounds as they were when `checkpoint` was created.
    pub fn restore(&mut self, checkpoint: usize) {
        self.propagator_queue.clear();
        self.intervals.restore(checkpoint)
    }

    /// Logs the statistics of the engine and of every propagator, if statistic logging is
    /// configured.
    pub fn log_statistics(&self) {
        // We first check whether the statistics will/should be logged to prevent unnecessarily
        // going through all the propagators
        if !should_log_statistics() {
            return;
        }

        log_statistic("intervals", self.intervals.num_intervals());
        log_statistic("propagators", self.propagators.len());
        self.statistics.log(StatisticLogger::new(["engine"]));
        for (index, propagator) in self.propagators.iter().enumerate() {
            propagator.log_statistics(StatisticLogger::new([
                propagator.name(),
                "number",
                index.to_string().as_str(),
            ]));
        }
        log_statistic_postfix();
    }
}
