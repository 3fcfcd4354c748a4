use thiserror::Error;

use crate::propagators::LocalId;

/// The result of invoking a resource propagator. The propagation can either succeed or detect
/// that the current bounds admit no schedule.
pub type PropagationStatus = Result<(), Inconsistency>;

/// Returned when a bound update would leave an interval without any feasible start.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
#[error("the domain of an interval became empty")]
pub struct EmptyDomain;

/// A set of tasks which cannot all complete before their shared deadline.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "tasks {tasks:?} cannot finish by {deadline}; their earliest completion is {earliest_completion}"
)]
pub struct ResourceOverload {
    /// The tasks which together overload the resource.
    pub tasks: Vec<LocalId>,
    /// The latest end of the overloaded set.
    pub deadline: i64,
    /// The earliest time at which the overloaded set can complete.
    pub earliest_completion: i64,
}

/// The reason why propagation failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Inconsistency {
    #[error(transparent)]
    EmptyDomain(#[from] EmptyDomain),
    #[error(transparent)]
    ResourceOverload(#[from] ResourceOverload),
}
