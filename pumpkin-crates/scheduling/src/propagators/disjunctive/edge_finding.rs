use crate::propagators::BoundUpdate;
use crate::propagators::IndexedTasks;
use crate::pumpkin_assert_moderate;
use crate::trees::LambdaThetaTree;

/// Performs the edge-finding algorithm of \[1\].
///
/// The reasoning of this approach is based on finding a task i and a subset of tasks for which it
/// holds that if we were to schedule i at its earliest start time then it would overflow the
/// resource capacity and thus i should be scheduled after all activities from this set.
///
/// Assumes that the tasks are not overloaded.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
pub(crate) fn edge_finding(tasks: &IndexedTasks) -> Vec<BoundUpdate> {
    if tasks.is_empty() {
        return vec![];
    }

    let by_end_max = tasks.sorted_by(|view| view.end_max);

    // Initially all tasks are in Theta
    let mut lambda_theta_tree = LambdaThetaTree::disjunctive(tasks.len());
    for task in tasks.iter() {
        lambda_theta_tree.insert(task.slot, task.view.start_min, task.view.duration_min);
    }

    let mut new_start_min = vec![i64::MIN; tasks.len()];
    for index in (0..tasks.len() - 1).rev() {
        // Theta is now exactly the tasks with the `index + 1` smallest latest ends
        let greyed = &tasks[by_end_max[index + 1]];
        lambda_theta_tree.grey(greyed.slot, greyed.view.start_min, greyed.view.duration_min);

        let end_max = tasks[by_end_max[index]].view.end_max;
        pumpkin_assert_moderate!(
            lambda_theta_tree.ect() <= end_max,
            "edge-finding expects the resource not to be overloaded"
        );

        while lambda_theta_tree.ect_opt() > end_max {
            let Some(responsible) = lambda_theta_tree.responsible_opt() else {
                break;
            };

            // The responsible task has to be processed after all of Theta
            new_start_min[responsible] = new_start_min[responsible].max(lambda_theta_tree.ect());
            lambda_theta_tree.reset(responsible);
        }
    }

    tasks
        .iter()
        .filter(|task| new_start_min[task.slot] > task.view.start_min)
        .map(|task| BoundUpdate::StartMin {
            task: task.id,
            value: new_start_min[task.slot],
        })
        .collect()
}
