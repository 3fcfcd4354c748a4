use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::intervals::IntervalDomains;
use crate::intervals::IntervalId;
use crate::statistics::StatisticLogger;

/// A propagator removes start and end times from intervals which cannot be part of any solution
/// of its constraint.
///
/// A propagator is expected to reach its own fixpoint in a single call to
/// [`Propagator::propagate`]; the [`PropagationEngine`] does not re-run a propagator because of
/// the changes which it made itself.
///
/// [`PropagationEngine`]: crate::engine::PropagationEngine
pub trait Propagator {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Tightens the bounds of the intervals; fails when the bounds admit no solution.
    ///
    /// On failure, the bounds may have been changed partially; the caller is expected to restore
    /// a checkpoint.
    fn propagate(&mut self, domains: &mut dyn IntervalDomains) -> PropagationStatus;

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    ///
    /// [`create_statistics_struct!`]: crate::create_statistics_struct
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// An identifier to a propagator instance within the engine.
/// Each propagator is assigned a unique identifier at runtime.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PropagatorId(pub(crate) u32);

impl std::fmt::Display for PropagatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PropagatorId({})", self.0)
    }
}

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

/// A constructor creates a [`Propagator`] and registers the intervals which it reads.
pub trait PropagatorConstructor {
    /// The propagator which is produced by this constructor.
    type PropagatorImpl: Propagator + 'static;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// It allows a propagator to register the intervals whose changes cause it to be enqueued.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    watch_lists: &'a mut KeyedVec<IntervalId, Vec<PropagatorId>>,
    pub(crate) propagator_id: PropagatorId,
}

impl PropagatorConstructorContext<'_> {
    pub(crate) fn new(
        propagator_id: PropagatorId,
        watch_lists: &mut KeyedVec<IntervalId, Vec<PropagatorId>>,
    ) -> PropagatorConstructorContext<'_> {
        PropagatorConstructorContext {
            watch_lists,
            propagator_id,
        }
    }

    /// Subscribes the propagator to changes of the bounds of `interval`.
    ///
    /// Registering an interval more than once has no additional effect.
    pub fn register(&mut self, interval: IntervalId) {
        self.watch_lists.accomodate(interval, vec![]);
        let watchers = &mut self.watch_lists[interval];
        if !watchers.contains(&self.propagator_id) {
            watchers.push(self.propagator_id);
        }
    }
}
