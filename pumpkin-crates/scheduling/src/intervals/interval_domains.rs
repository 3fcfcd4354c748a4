use crate::basic_types::EmptyDomain;
use crate::containers::StorageKey;

/// Identifies an interval variable owned by an [`IntervalDomains`] implementation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct IntervalId(u32);

impl StorageKey for IntervalId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        IntervalId(index as u32)
    }
}

impl std::fmt::Display for IntervalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// Read access to the current bounds of interval variables.
pub trait ReadIntervals {
    fn start_min(&self, interval: IntervalId) -> i64;
    fn start_max(&self, interval: IntervalId) -> i64;
    fn end_min(&self, interval: IntervalId) -> i64;
    fn end_max(&self, interval: IntervalId) -> i64;
    fn duration_min(&self, interval: IntervalId) -> i64;
    fn duration_max(&self, interval: IntervalId) -> i64;

    /// Returns false once the interval is known to be absent from the schedule.
    fn may_be_performed(&self, interval: IntervalId) -> bool;
    /// Returns true if the interval is known to be present in the schedule.
    fn must_be_performed(&self, interval: IntervalId) -> bool;
}

/// The narrowing operations which a propagator may perform on interval variables.
///
/// Both operations only ever tighten a bound; proposing a value which is not tighter than the
/// current bound leaves the interval untouched. An [`EmptyDomain`] error is returned when the
/// interval must be performed and the narrowing would leave it without a feasible placement.
pub trait IntervalDomains: ReadIntervals {
    fn set_start_min(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain>;
    fn set_end_max(&mut self, interval: IntervalId, value: i64) -> Result<(), EmptyDomain>;
}
