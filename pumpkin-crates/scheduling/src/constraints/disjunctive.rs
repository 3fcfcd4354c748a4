use super::Constraint;
use crate::propagators::ArgTask;
use crate::propagators::DisjunctiveOptions;
use crate::propagators::DisjunctivePropagator;

/// Creates the [Disjunctive](https://sofdem.github.io/gccat/gccat/Cdisjunctive.html)
/// [`Constraint`]: no two of the tasks overlap in time. The demands of the tasks are ignored.
///
/// Tasks with a duration of zero may be placed anywhere, including in the middle of another task;
/// see [`disjunctive_strict`] for the variant in which they may not.
///
/// Only tasks which must be performed are taken into account.
pub fn disjunctive(tasks: impl IntoIterator<Item = ArgTask>) -> impl Constraint {
    DisjunctivePropagator::new(tasks, DisjunctiveOptions { strict: false })
}

/// Creates the [Disjunctive](https://sofdem.github.io/gccat/gccat/Cdisjunctive.html)
/// [`Constraint`] in which tasks with a duration of zero also take up the resource (see
/// [`disjunctive`]).
pub fn disjunctive_strict(tasks: impl IntoIterator<Item = ArgTask>) -> impl Constraint {
    DisjunctivePropagator::new(tasks, DisjunctiveOptions { strict: true })
}
