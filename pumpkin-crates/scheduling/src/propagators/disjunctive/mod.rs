//! The unary resource: no two tasks may overlap in time.
//!
//! Every algorithm in this module works on a snapshot of the tasks (see [`IndexedTasks`]) and
//! returns the bounds it would tighten instead of applying them; the
//! [`SequencePropagationLoop`] applies them and decides which algorithm runs next.
//!
//! [`IndexedTasks`]: crate::propagators::IndexedTasks
mod detectable_precedences;
mod disjunctive_propagator;
mod edge_finding;
mod not_last;
mod overload_checking;
mod sequence_propagation_loop;

pub(crate) use detectable_precedences::detectable_precedences;
pub use disjunctive_propagator::DisjunctivePropagator;
pub(crate) use edge_finding::edge_finding;
pub(crate) use not_last::not_last;
pub(crate) use overload_checking::overload_checking;
pub(crate) use sequence_propagation_loop::SequencePropagationLoop;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::intervals::TaskView;
    use crate::propagators::IndexedTasks;
    use crate::propagators::LocalId;

    /// Creates must-be-performed tasks with a fixed duration from `(start_min, start_max,
    /// duration)`; the local id of a task is its position in `bounds`.
    pub(crate) fn tasks(bounds: &[(i64, i64, i64)]) -> IndexedTasks {
        IndexedTasks::new(bounds.iter().enumerate().map(
            |(index, &(start_min, start_max, duration))| {
                (
                    LocalId::from(index as u32),
                    TaskView {
                        start_min,
                        start_max,
                        end_min: start_min + duration,
                        end_max: start_max + duration,
                        duration_min: duration,
                        duration_max: duration,
                        demand: 1,
                        may_be_performed: true,
                        must_be_performed: true,
                    },
                )
            },
        ))
    }
}
