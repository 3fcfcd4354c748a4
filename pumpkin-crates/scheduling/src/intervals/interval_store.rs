use super::IntervalDomains;
use super::IntervalId;
use super::ReadIntervals;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::pumpkin_assert_moderate;
use crate::pumpkin_assert_simple;

/// Whether an interval is part of the schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Performed {
    #[default]
    Must,
    May,
    Never,
}

/// The bounds of a single interval variable.
///
/// The bounds are kept consistent with each other: the end window is implied by the start window
/// and the duration, and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntervalBounds {
    pub start_min: i64,
    pub start_max: i64,
    pub duration_min: i64,
    pub duration_max: i64,
    pub end_min: i64,
    pub end_max: i64,
    pub performed: Performed,
}

impl IntervalBounds {
    /// An interval which starts in `[start_min, start_max]` and has a duration in
    /// `[duration_min, duration_max]`.
    pub fn new(start_min: i64, start_max: i64, duration_min: i64, duration_max: i64) -> Self {
        IntervalBounds {
            start_min,
            start_max,
            duration_min,
            duration_max,
            end_min: start_min.saturating_add(duration_min),
            end_max: start_max.saturating_add(duration_max),
            performed: Performed::Must,
        }
    }

    pub fn fixed_duration(start_min: i64, start_max: i64, duration: i64) -> Self {
        IntervalBounds::new(start_min, start_max, duration, duration)
    }

    pub fn with_performed(self, performed: Performed) -> Self {
        IntervalBounds { performed, ..self }
    }

    fn is_empty(&self) -> bool {
        self.start_min > self.start_max
            || self.end_min > self.end_max
            || self.duration_min > self.duration_max
    }

    /// Re-establishes the relations between the start, duration and end bounds.
    fn normalise(&mut self) {
        loop {
            let before = *self;

            self.start_min = self
                .start_min
                .max(self.end_min.saturating_sub(self.duration_max));
            self.start_max = self
                .start_max
                .min(self.end_max.saturating_sub(self.duration_min));
            self.end_min = self
                .end_min
                .max(self.start_min.saturating_add(self.duration_min));
            self.end_max = self
                .end_max
                .min(self.start_max.saturating_add(self.duration_max));
            self.duration_max = self
                .duration_max
                .min(self.end_max.saturating_sub(self.start_min));

            if *self == before || self.is_empty() {
                return;
            }
        }
    }
}

/// Owns the bounds of interval variables and implements [`IntervalDomains`] over them.
///
/// Every change is recorded on a trail, so that the bounds can be restored to an earlier
/// checkpoint, and as an event which the [`PropagationEngine`] uses to schedule propagators.
///
/// [`PropagationEngine`]: crate::engine::PropagationEngine
#[derive(Debug, Default, Clone)]
pub struct IntervalStore {
    bounds: KeyedVec<IntervalId, IntervalBounds>,
    trail: Trail<(IntervalId, IntervalBounds)>,
    events: Vec<IntervalId>,
    is_pending: KeyedVec<IntervalId, bool>,
}

impl IntervalStore {
    /// Adds a new interval to the store.
    ///
    /// The bounds are normalised before they are stored. An interval which must be performed
    /// but has no feasible placement results in an [`EmptyDomain`]; an optional one is stored as
    /// [`Performed::Never`].
    pub fn new_interval(&mut self, bounds: IntervalBounds) -> Result<IntervalId, EmptyDomain> {
        let mut normalised = bounds;
        normalised.normalise();

        if normalised.is_empty() {
            match bounds.performed {
                Performed::Must => return Err(EmptyDomain),
                Performed::May | Performed::Never => {
                    normalised = bounds.with_performed(Performed::Never)
                }
            }
        }

        let _ = self.is_pending.push(false);
        Ok(self.bounds.push(normalised))
    }

    pub fn num_intervals(&self) -> usize {
        self.bounds.len()
    }

    pub fn intervals(&self) -> impl Iterator<Item = IntervalId> {
        self.bounds.keys()
    }

    pub fn bounds(&self, interval: IntervalId) -> &IntervalBounds {
        &self.bounds[interval]
    }

    pub fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    /// The currently active checkpoint; `0` before any checkpoint is created.
    pub fn checkpoint(&self) -> usize {
        self.trail.checkpoint()
    }

    /// Undoes every change made since `checkpoint` was created and discards pending events.
    pub fn restore(&mut self, checkpoint: usize) {
        pumpkin_assert_simple!(
            checkpoint < self.trail.checkpoint(),
            "Expected to restore to checkpoint {checkpoint} which is before the current checkpoint {}",
            self.trail.checkpoint()
        );

        for (interval, previous_bounds) in self.trail.restore(checkpoint) {
            self.bounds[interval] = previous_bounds;
        }

        self.clear_events();
    }

    /// Returns the intervals which changed since the last call, in order of their first change.
    pub fn drain_events(&mut self) -> Vec<IntervalId> {
        for &interval in &self.events {
            self.is_pending[interval] = false;
        }
        std::mem::take(&mut self.events)
    }

    pub fn clear_events(&mut self) {
        let _ = self.drain_events();
    }

    fn narrow(
        &mut self,
        interval: IntervalId,
        narrow: impl FnOnce(&mut IntervalBounds),
    ) -> Result<(), EmptyDomain> {
        let current = self.bounds[interval];
        if current.performed == Performed::Never {
            return Ok(());
        }

        let mut narrowed = current;
        narrow(&mut narrowed);
        narrowed.normalise();

        if narrowed.is_empty() {
            match current.performed {
                Performed::Must => return Err(EmptyDomain),
                Performed::May => narrowed = current.with_performed(Performed::Never),
                Performed::Never => unreachable!("absent intervals are never narrowed"),
            }
        }

        if narrowed == current {
            return Ok(());
        }

        pumpkin_assert_moderate!(
            narrowed.performed == Performed::Never
                || (narrowed.start_min >= current.start_min && narrowed.end_max <= current.end_max),
            "narrowing {interval} must never widen its bounds"
        );

        self.trail.push((interval, current));
        self.bounds[interval] = narrowed;

        if !self.is_pending[interval] {
            self.is_pending[interval] = true;
            self.events.push(interval);
        }

        Ok(())
    }
}

impl ReadIntervals for IntervalStore {
    fn start_min(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].start_min
    }

    fn start_max(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].start_max
    }

    fn end_min(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].end_min
    }

    fn end_max(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].end_max
    }

    fn duration_min(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].duration_min
    }

    fn duration_max(&self, interval: IntervalId) -> i64 {
        self.bounds[interval].duration_max
    }

    fn may_be_performed(&self, interval: IntervalId) -> bool {
        self.bounds[interval].performed != Performed::Never
    }

    fn must_be_performed(&self, interval: IntervalId) -> bool {
        self.bounds[interval].performed == Performed::Must
    }
}

impl IntervalDomains for IntervalStore {
    fn set_start_min(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain> {
        if value <= self.bounds[interval].start_min {
            return Ok(());
        }

        self.narrow(interval, |bounds| bounds.start_min = value)
    }

    fn set_end_max(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain> {
        if value >= self.bounds[interval].end_max {
            return Ok(());
        }

        self.narrow(interval, |bounds| bounds.end_max = value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(bounds: IntervalBounds) -> (IntervalStore, IntervalId) {
        let mut store = IntervalStore::default();
        let interval = store.new_interval(bounds).expect("non-empty interval");
        (store, interval)
    }

    #[test]
    fn new_interval_derives_end_window() {
        let (store, interval) = store_with(IntervalBounds::new(2, 10, 3, 5));

        assert_eq!(store.end_min(interval), 5);
        assert_eq!(store.end_max(interval), 15);
        assert!(store.must_be_performed(interval));
    }

    #[test]
    fn raising_start_min_raises_end_min() {
        let (mut store, interval) = store_with(IntervalBounds::fixed_duration(0, 10, 4));

        store.set_start_min(interval, 3).expect("feasible");

        assert_eq!(store.start_min(interval), 3);
        assert_eq!(store.end_min(interval), 7);
        assert_eq!(store.drain_events(), vec![interval]);
    }

    #[test]
    fn lowering_end_max_lowers_start_max() {
        let (mut store, interval) = store_with(IntervalBounds::fixed_duration(0, 10, 4));

        store.set_end_max(interval, 8).expect("feasible");

        assert_eq!(store.start_max(interval), 4);
        assert_eq!(store.end_max(interval), 8);
    }

    #[test]
    fn variable_duration_shrinks_when_window_closes() {
        let (mut store, interval) = store_with(IntervalBounds::new(0, 10, 2, 6));

        store.set_start_min(interval, 4).expect("feasible");
        store.set_end_max(interval, 7).expect("feasible");

        assert_eq!(store.duration_max(interval), 3);
        assert_eq!(store.start_max(interval), 5);
    }

    #[test]
    fn widening_is_a_no_op() {
        let (mut store, interval) = store_with(IntervalBounds::fixed_duration(3, 10, 4));

        store.set_start_min(interval, 1).expect("no-op");
        store.set_end_max(interval, 20).expect("no-op");

        assert_eq!(*store.bounds(interval), IntervalBounds::fixed_duration(3, 10, 4));
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn emptying_a_mandatory_interval_fails_without_change() {
        let (mut store, interval) = store_with(IntervalBounds::fixed_duration(0, 5, 4));

        let result = store.set_start_min(interval, 6);

        assert_eq!(result, Err(EmptyDomain));
        assert_eq!(store.start_min(interval), 0);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn emptying_an_optional_interval_makes_it_absent() {
        let (mut store, interval) = store_with(
            IntervalBounds::fixed_duration(0, 5, 4).with_performed(Performed::May),
        );

        store.set_end_max(interval, 2).expect("optional intervals do not fail");

        assert!(!store.may_be_performed(interval));
        assert_eq!(store.end_max(interval), 9);
    }

    #[test]
    fn restore_undoes_changes_after_checkpoint() {
        let (mut store, interval) = store_with(IntervalBounds::fixed_duration(0, 10, 2));

        store.set_start_min(interval, 1).expect("feasible");
        store.new_checkpoint();
        store.set_start_min(interval, 4).expect("feasible");
        store.set_end_max(interval, 9).expect("feasible");

        store.restore(0);

        assert_eq!(store.start_min(interval), 1);
        assert_eq!(store.end_max(interval), 12);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn infeasible_new_interval_is_rejected() {
        let mut store = IntervalStore::default();
        assert_eq!(
            store.new_interval(IntervalBounds::new(5, 4, 1, 1)),
            Err(EmptyDomain)
        );
    }
}
