use crate::propagators::BoundUpdate;
use crate::propagators::IndexedTasks;
use crate::trees::ThetaTree;

/// Lowers end maxes based on the not-last rule \[1\].
///
/// If the tasks Ω which have to start before `start_max(i)` cannot all be completed before
/// `start_max(i)`, then `i` cannot be processed after all of them and it has to end before the
/// latest start of the last of them.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘O(n log n) filtering algorithms for unary resource constraint’, CPAIOR 2004.
pub(crate) fn not_last(tasks: &IndexedTasks) -> Vec<BoundUpdate> {
    let by_start_max = tasks.sorted_by(|view| view.start_max);
    let by_end_max = tasks.sorted_by(|view| view.end_max);
    let mut theta_tree = ThetaTree::new(tasks.len());

    let mut new_end_max = tasks.iter().map(|task| task.view.end_max).collect::<Vec<_>>();

    let mut next_start_max = 0;
    for &slot in &by_end_max {
        let task = &tasks[slot];

        while next_start_max < by_start_max.len()
            && task.view.end_max > tasks[by_start_max[next_start_max]].view.start_max
        {
            let candidate = &tasks[by_start_max[next_start_max]];
            if next_start_max > 0 && theta_tree.ect() > candidate.view.start_max {
                let previous_start_max = tasks[by_start_max[next_start_max - 1]].view.start_max;
                new_end_max[candidate.slot] = new_end_max[candidate.slot].min(previous_start_max);
            }

            theta_tree.insert(
                candidate.slot,
                candidate.view.start_min,
                candidate.view.duration_min,
            );
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

        if next_start_max > 0 && ect_without_task > task.view.start_max {
            let previous_start_max = tasks[by_start_max[next_start_max - 1]].view.start_max;
            new_end_max[slot] = new_end_max[slot].min(previous_start_max);
        }
    }

    tasks
        .iter()
        .filter(|task| new_end_max[task.slot] < task.view.end_max)
        .map(|task| BoundUpdate::EndMax {
            task: task.id,
            value: new_end_max[task.slot],
        })
        .collect()
}
