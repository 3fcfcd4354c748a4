use super::IntervalId;
use super::ReadIntervals;

/// A snapshot of the bounds of one task on a resource.
///
/// Views are read again every time a propagator runs; the interval layer stays the source of
/// truth for the bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskView {
    pub start_min: i64,
    pub start_max: i64,
    pub end_min: i64,
    pub end_max: i64,
    pub duration_min: i64,
    pub duration_max: i64,
    /// The amount of the resource used while the task executes; `1` on a disjunctive resource.
    pub demand: i64,
    pub may_be_performed: bool,
    pub must_be_performed: bool,
}

impl TaskView {
    pub fn read<Domains: ReadIntervals + ?Sized>(
        domains: &Domains,
        interval: IntervalId,
        demand: i64,
    ) -> TaskView {
        TaskView {
            start_min: domains.start_min(interval),
            start_max: domains.start_max(interval),
            end_min: domains.end_min(interval),
            end_max: domains.end_max(interval),
            duration_min: domains.duration_min(interval),
            duration_max: domains.duration_max(interval),
            demand,
            may_be_performed: domains.may_be_performed(interval),
            must_be_performed: domains.must_be_performed(interval),
        }
    }

    /// The same task on a negated time axis; its earliest start is minus the latest end.
    pub fn mirrored(self) -> TaskView {
        TaskView {
            start_min: -self.end_max,
            start_max: -self.end_min,
            end_min: -self.start_max,
            end_max: -self.start_min,
            ..self
        }
    }

    /// The minimal energy of the task, i.e. `duration_min · demand`.
    pub fn energy_min(&self) -> i64 {
        self.duration_min.saturating_mul(self.demand)
    }
}
