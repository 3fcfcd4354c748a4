use log::debug;

use crate::basic_types::ResourceOverload;
use crate::math::NumExt;
use crate::propagators::IndexedTasks;
use crate::trees::ThetaLambdaTree;

/// Detects whether the tasks cannot all be processed on a resource with the given capacity.
///
/// A task which on its own asks for more than the capacity overloads the resource; such an
/// overload has no finite earliest completion and is reported with [`i64::MAX`]. Otherwise the
/// tasks are added by non-decreasing latest end and the resource is overloaded as soon as the
/// energetic end min of the added tasks exceeds `capacity · end_max` of the last added task \[1\].
///
/// The reported tasks are the added tasks which start no earlier than the latest start min from
/// which the added energy still overloads the resource; tasks which could be processed before
/// that point are left out of the explanation.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Max energy filtering algorithm for discrete cumulative resources’, CPAIOR 2009.
pub(crate) fn overload_checking(
    tasks: &IndexedTasks,
    capacity: i64,
) -> Result<(), ResourceOverload> {
    if let Some(task) = tasks.iter().find(|task| task.view.demand > capacity) {
        debug!(
            "Overload: demand {} of {} exceeds capacity {capacity}",
            task.view.demand, task.id
        );
        return Err(ResourceOverload {
            tasks: vec![task.id],
            deadline: task.view.end_max,
            earliest_completion: i64::MAX,
        });
    }

    let by_end_max = tasks.sorted_by(|view| view.end_max);
    let mut theta_lambda_tree = ThetaLambdaTree::new(tasks.len());

    for (index, &slot) in by_end_max.iter().enumerate() {
        let task = &tasks[slot];
        let energy = task.view.energy_min();
        theta_lambda_tree.add_or_update_event(
            slot,
            capacity.saturating_mul(task.view.start_min),
            energy,
            energy,
        );

        let threshold = capacity.saturating_mul(task.view.end_max);
        let Some(critical) = theta_lambda_tree.max_event_with_envelope_greater_than(threshold)
        else {
            continue;
        };

        let envelope = theta_lambda_tree.envelope_of(critical);
        debug!(
            "Overload: energetic end min {envelope} of the tasks starting from {} exceeds \
             {capacity} · {}",
            tasks[critical].view.start_min, task.view.end_max,
        );
        return Err(ResourceOverload {
            tasks: tasks.ids(
                by_end_max[..=index]
                    .iter()
                    .copied()
                    .filter(|&added| added >= critical),
            ),
            deadline: task.view.end_max,
            earliest_completion: NumExt::div_ceil(envelope, capacity),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::cumulative::test_utils::tasks;
    use crate::propagators::LocalId;

    #[test]
    fn energy_beyond_the_deadline_is_an_overload() {
        // Both tasks need the full capacity for 5 units within [0, 9]
        let tasks = tasks(&[(0, 4, 5, 2), (0, 4, 5, 2)]);

        let result = overload_checking(&tasks, 2);

        assert_eq!(
            result,
            Err(ResourceOverload {
                tasks: vec![LocalId::from(0), LocalId::from(1)],
                deadline: 9,
                earliest_completion: 10,
            })
        );
    }

    #[test]
    fn tasks_which_can_run_before_the_overload_are_left_out() {
        // The first task is done long before the other two compete for [5, 10]
        let tasks = tasks(&[(0, 0, 1, 1), (5, 5, 5, 2), (5, 5, 5, 2)]);

        let result = overload_checking(&tasks, 2);

        assert_eq!(
            result,
            Err(ResourceOverload {
                tasks: vec![LocalId::from(1), LocalId::from(2)],
                deadline: 10,
                earliest_completion: 15,
            })
        );
    }

    #[test]
    fn tasks_sharing_the_capacity_fit() {
        let tasks = tasks(&[(0, 0, 4, 1), (0, 0, 4, 1), (2, 6, 3, 2)]);

        assert_eq!(overload_checking(&tasks, 2), Ok(()));
    }

    #[test]
    fn demand_above_the_capacity_is_an_overload() {
        let tasks = tasks(&[(0, 10, 2, 1), (0, 10, 2, 4)]);

        let overload = overload_checking(&tasks, 3).expect_err("demand 4 exceeds capacity 3");

        assert_eq!(overload.tasks, vec![LocalId::from(1)]);
        assert_eq!(overload.earliest_completion, i64::MAX);
    }
}
