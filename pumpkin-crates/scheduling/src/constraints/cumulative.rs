use super::Constraint;
use crate::propagators::ArgTask;
use crate::propagators::CumulativeOptions;
use crate::propagators::CumulativePropagator;
use crate::pumpkin_assert_simple;

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) [`Constraint`].
///
/// This constraint ensures that at no point in time, the cumulative resource usage of the tasks
/// exceeds `capacity`.
///
/// The implementation uses energetic overload checking and edge-finding (see
/// [`CumulativePropagator`]). It is possible to specify certain options for the cumulative (such
/// as the tree which is used by edge-finding) using [`cumulative_with_options`].
///
/// The capacity and the demands should be non-negative; if this is not the case then this method
/// will panic.
pub fn cumulative(tasks: impl IntoIterator<Item = ArgTask>, capacity: i64) -> impl Constraint {
    cumulative_with_options(tasks, capacity, CumulativeOptions::default())
}

/// Creates the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html) [`Constraint`]
/// with the provided [`CumulativeOptions`].
///
/// See the documentation of [`cumulative`] for more information about the constraint.
pub fn cumulative_with_options(
    tasks: impl IntoIterator<Item = ArgTask>,
    capacity: i64,
    options: CumulativeOptions,
) -> impl Constraint {
    let tasks = tasks.into_iter().collect::<Vec<_>>();

    pumpkin_assert_simple!(
        capacity >= 0,
        "The capacity of a cumulative should be non-negative"
    );
    pumpkin_assert_simple!(
        tasks.iter().all(|task| task.demand >= 0),
        "The demands of a cumulative should be non-negative"
    );

    CumulativePropagator::new(tasks, capacity, options)
}
