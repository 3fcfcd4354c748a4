use log::trace;

use crate::containers::HashMap;
use crate::math::NumExt;
use crate::propagators::BoundUpdate;
use crate::propagators::CumulativeEdgeFindingTree;
use crate::propagators::IndexedTasks;
use crate::pumpkin_assert_moderate;
use crate::trees::DualCapacityThetaTree;
use crate::trees::LambdaThetaTree;
use crate::trees::ThetaLambdaTree;

/// Performs the cumulative edge-finding algorithm of \[1\] and returns the tightened earliest
/// starts.
///
/// Two kinds of precedences are detected:
/// - a task `i` ends after every task `j` with `end_max(j) <= end_min(i)`;
/// - a task `i` ends after a set of tasks `LCut(j)` (the tasks with the `j + 1` smallest latest
///   ends) if the set together with `i` cannot be processed before the latest end of the set.
///
/// In both cases the earliest start of `i` is raised to its conditional start min (see
/// [`ConditionalStartMins`]).
///
/// Assumes that the tasks are not overloaded.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in
/// O(kn log n)’, CP 2009.
pub(crate) fn edge_finding(
    tasks: &IndexedTasks,
    capacity: i64,
    tree: CumulativeEdgeFindingTree,
) -> Vec<BoundUpdate> {
    if tasks.is_empty() {
        return vec![];
    }

    let by_end_max = tasks.sorted_by(|view| view.end_max);
    let mut conditional_start_mins = ConditionalStartMins::new(tasks, &by_end_max, capacity);
    let mut new_start_min = vec![i64::MIN; tasks.len()];

    end_min_precedences(
        tasks,
        &by_end_max,
        &mut conditional_start_mins,
        &mut new_start_min,
    );
    match tree {
        CumulativeEdgeFindingTree::Incremental => energy_precedences_incremental(
            tasks,
            &by_end_max,
            capacity,
            &mut conditional_start_mins,
            &mut new_start_min,
        ),
        CumulativeEdgeFindingTree::Batch => energy_precedences_batch(
            tasks,
            &by_end_max,
            capacity,
            &mut conditional_start_mins,
            &mut new_start_min,
        ),
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

/// Each task ends after all tasks whose latest end is at most its earliest end.
fn end_min_precedences(
    tasks: &IndexedTasks,
    by_end_max: &[usize],
    conditional_start_mins: &mut ConditionalStartMins,
    new_start_min: &mut [i64],
) {
    let by_end_min = tasks.sorted_by(|view| view.end_min);

    let mut end_max_index = 0;
    let mut max_start_min = i64::MIN;
    for &slot in by_end_min.iter() {
        let task = &tasks[slot];
        while end_max_index < by_end_max.len()
            && tasks[by_end_max[end_max_index]].view.end_max <= task.view.end_min
        {
            max_start_min = max_start_min.max(tasks[by_end_max[end_max_index]].view.start_min);
            end_max_index += 1;
        }

        if end_max_index > 0
            && task.view.start_min <= max_start_min
            && task.view.end_max > task.view.end_min
        {
            let update = conditional_start_mins.get(task.view.demand, end_max_index - 1);
            new_start_min[slot] = new_start_min[slot].max(update);
        }
    }
}

fn energy_precedences_incremental(
    tasks: &IndexedTasks,
    by_end_max: &[usize],
    capacity: i64,
    conditional_start_mins: &mut ConditionalStartMins,
    new_start_min: &mut [i64],
) {
    let mut lambda_theta_tree = LambdaThetaTree::cumulative(tasks.len(), capacity);
    for task in tasks.iter() {
        lambda_theta_tree.insert(task.slot, task.view.start_min, task.view.energy_min());
    }

    for index in (0..tasks.len() - 1).rev() {
        let greyed = &tasks[by_end_max[index + 1]];
        lambda_theta_tree.grey(greyed.slot, greyed.view.start_min, greyed.view.energy_min());

        let threshold = capacity.saturating_mul(tasks[by_end_max[index]].view.end_max);
        pumpkin_assert_moderate!(
            lambda_theta_tree.energetic_end_min() <= threshold,
            "edge-finding expects the resource not to be overloaded"
        );

        while lambda_theta_tree.energetic_end_min_opt() > threshold {
            let Some(responsible) = lambda_theta_tree.responsible_opt() else {
                break;
            };

            let update = conditional_start_mins.get(tasks[responsible].view.demand, index);
            new_start_min[responsible] = new_start_min[responsible].max(update);
            lambda_theta_tree.reset(responsible);
        }
    }
}

fn energy_precedences_batch(
    tasks: &IndexedTasks,
    by_end_max: &[usize],
    capacity: i64,
    conditional_start_mins: &mut ConditionalStartMins,
    new_start_min: &mut [i64],
) {
    let initial_envelope = |start_min: i64| capacity.saturating_mul(start_min);

    let mut theta_lambda_tree = ThetaLambdaTree::new(tasks.len());
    for task in tasks.iter() {
        let energy = task.view.energy_min();
        theta_lambda_tree.delayed_add_or_update_event(
            task.slot,
            initial_envelope(task.view.start_min),
            energy,
            energy,
        );
    }
    theta_lambda_tree.recompute_tree_for_delayed_operations();

    for index in (0..tasks.len() - 1).rev() {
        let greyed = &tasks[by_end_max[index + 1]];
        theta_lambda_tree.add_or_update_optional_event(
            greyed.slot,
            initial_envelope(greyed.view.start_min),
            greyed.view.energy_min(),
        );

        let threshold = capacity.saturating_mul(tasks[by_end_max[index]].view.end_max);
        while let Some(witness) =
            theta_lambda_tree.events_with_optional_envelope_greater_than(threshold)
        {
            let responsible = witness.optional_event;
            pumpkin_assert_moderate!(
                witness.critical_event <= responsible
                    && witness.available_energy < tasks[responsible].view.energy_min(),
                "the responsible task cannot fit its energy after the critical tasks"
            );
            trace!(
                "{} ends after the tasks starting from {} (room for {} of its energy before {})",
                tasks[responsible].id,
                tasks[witness.critical_event].view.start_min,
                witness.available_energy,
                tasks[by_end_max[index]].view.end_max,
            );

            let update = conditional_start_mins.get(tasks[responsible].view.demand, index);
            new_start_min[responsible] = new_start_min[responsible].max(update);
            theta_lambda_tree.remove_event(responsible);
        }
    }
}

/// The earliest start of a task with demand `c` which ends after all tasks in `LCut(j)`:
///
/// `max over j' <= j, Ω ⊆ LCut(j') of ceil((C · est(Ω) + e(Ω) - (C - c) · end_max(j')) / c)`
///
/// where only the sets Ω which cannot be processed within `[est(Ω), end_max(j')]` on the capacity
/// `C - c` contribute. The values for a demand are computed on first use, for every `j` at once.
#[derive(Debug)]
struct ConditionalStartMins<'a> {
    tasks: &'a IndexedTasks,
    by_end_max: &'a [usize],
    capacity: i64,
    updates_per_demand: HashMap<i64, Vec<i64>>,
}

impl<'a> ConditionalStartMins<'a> {
    fn new(tasks: &'a IndexedTasks, by_end_max: &'a [usize], capacity: i64) -> Self {
        ConditionalStartMins {
            tasks,
            by_end_max,
            capacity,
            updates_per_demand: HashMap::default(),
        }
    }

    /// Returns the conditional start min of a task with `demand` after `LCut(index)`;
    /// [`i64::MIN`] if no set forces the task to start later.
    fn get(&mut self, demand: i64, index: usize) -> i64 {
        let (tasks, by_end_max, capacity) = (self.tasks, self.by_end_max, self.capacity);
        self.updates_per_demand
            .entry(demand)
            .or_insert_with(|| compute_updates(tasks, by_end_max, capacity, demand))[index]
    }
}

fn compute_updates(
    tasks: &IndexedTasks,
    by_end_max: &[usize],
    capacity: i64,
    demand: i64,
) -> Vec<i64> {
    pumpkin_assert_moderate!(0 < demand && demand <= capacity);
    let residual_capacity = capacity - demand;
    let mut tree = DualCapacityThetaTree::new(tasks.len(), capacity, residual_capacity);

    let mut update = i64::MIN;
    by_end_max
        .iter()
        .map(|&slot| {
            let task = &tasks[slot];
            tree.insert(slot, task.view.start_min, task.view.energy_min());

            let threshold = residual_capacity.saturating_mul(task.view.end_max);
            if let Some(envelope) = tree.envelope_for_demand(threshold) {
                update = update.max(NumExt::div_ceil(envelope - threshold, demand));
            }
            update
        })
        .collect()
}
