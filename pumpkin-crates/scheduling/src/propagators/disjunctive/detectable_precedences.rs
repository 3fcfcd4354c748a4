use crate::propagators::BoundUpdate;
use crate::propagators::IndexedTasks;
use crate::trees::ThetaTree;

/// Raises start mins based on detectable precedences \[1\].
///
/// A task `j` is detectably before `i` when `start_max(j) < end_min(i)`: `i` cannot start before
/// `j` without ending after the latest start of `j`. The start min of `i` is then at least the
/// ECT of all tasks which are detectably before it.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘O(n log n) filtering algorithms for unary resource constraint’, CPAIOR 2004.
pub(crate) fn detectable_precedences(tasks: &IndexedTasks) -> Vec<BoundUpdate> {
    let by_end_min = tasks.sorted_by(|view| view.end_min);
    let by_start_max = tasks.sorted_by(|view| view.start_max);
    let mut theta_tree = ThetaTree::new(tasks.len());

    let mut updates = vec![];
    let mut next_start_max = 0;
    for &slot in &by_end_min {
        let task = &tasks[slot];

        while next_start_max < by_start_max.len()
            && task.view.end_min > tasks[by_start_max[next_start_max]].view.start_max
        {
            let before = &tasks[by_start_max[next_start_max]];
            theta_tree.insert(before.slot, before.view.start_min, before.view.duration_min);
            next_start_max += 1;
        }

        let inserted = theta_tree.is_inserted(slot);
        if inserted {
            theta_tree.remove(slot);
        }
        let ect_without_task = theta_tree.ect();
        if inserted {
            theta_tree.insert(slot, task.view.start_min, task.view.duration_min);
        }

        if ect_without_task > task.view.start_min {
            updates.push(BoundUpdate::StartMin {
                task: task.id,
                value: ect_without_task,
            });
        }
    }

    updates
}
