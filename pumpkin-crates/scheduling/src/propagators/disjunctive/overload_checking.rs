use log::debug;

use crate::basic_types::ResourceOverload;
use crate::propagators::IndexedTasks;
use crate::trees::ThetaTree;

/// Detects whether the tasks cannot all be processed on a unary resource.
///
/// The tasks are added to a [`ThetaTree`] by non-decreasing latest end; the resource is overloaded
/// as soon as the earliest completion time of the added tasks exceeds the latest end of the last
/// added task.
pub(crate) fn overload_checking(tasks: &IndexedTasks) -> Result<(), ResourceOverload> {
    let by_end_max = tasks.sorted_by(|view| view.end_max);
    let mut theta_tree = ThetaTree::new(tasks.len());

    for (index, &slot) in by_end_max.iter().enumerate() {
        let task = &tasks[slot];
        theta_tree.insert(slot, task.view.start_min, task.view.duration_min);

        if theta_tree.ect() > task.view.end_max {
            debug!(
                "Overload: ECT {} of {} tasks exceeds end max {} of {}",
                theta_tree.ect(),
                index + 1,
                task.view.end_max,
                task.id
            );
            return Err(ResourceOverload {
                tasks: tasks.ids(by_end_max[..=index].iter().copied()),
                deadline: task.view.end_max,
                earliest_completion: theta_tree.ect(),
            });
        }
    }

    Ok(())
}
