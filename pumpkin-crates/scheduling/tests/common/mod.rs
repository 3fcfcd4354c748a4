#![allow(dead_code, reason = "not every test file uses every helper")]

use pumpkin_scheduling::engine::PropagationEngine;
use pumpkin_scheduling::intervals::IntervalBounds;
use pumpkin_scheduling::intervals::IntervalId;
use pumpkin_scheduling::intervals::ReadIntervals;
use pumpkin_scheduling::propagators::ArgTask;
use rand::rngs::SmallRng;
use rand::Rng;

/// A task with a fixed duration: `(start_min, start_max, duration, demand)`.
pub(crate) type Task = (i64, i64, i64, i64);

pub(crate) fn random_tasks(rng: &mut SmallRng, num_tasks: usize, max_demand: i64) -> Vec<Task> {
    (0..num_tasks)
        .map(|_| {
            let start_min = rng.gen_range(0..6);
            (
                start_min,
                start_min + rng.gen_range(0..5),
                rng.gen_range(1..=4),
                rng.gen_range(1..=max_demand),
            )
        })
        .collect()
}

/// Creates the intervals of the tasks in a fresh engine.
pub(crate) fn set_up_engine(tasks: &[Task]) -> (PropagationEngine, Vec<ArgTask>) {
    let mut engine = PropagationEngine::default();
    let args = tasks
        .iter()
        .map(|&(start_min, start_max, duration, demand)| ArgTask {
            interval: engine
                .new_interval(IntervalBounds::fixed_duration(start_min, start_max, duration))
                .expect("non-empty interval"),
            demand,
        })
        .collect();
    (engine, args)
}

/// The start min and end max of every task.
pub(crate) fn windows(engine: &PropagationEngine, tasks: &[ArgTask]) -> Vec<(i64, i64)> {
    tasks
        .iter()
        .map(|task| {
            (
                engine.intervals().start_min(task.interval),
                engine.intervals().end_max(task.interval),
            )
        })
        .collect()
}

pub(crate) fn interval_ids(tasks: &[ArgTask]) -> Vec<IntervalId> {
    tasks.iter().map(|task| task.interval).collect()
}

/// Whether no two tasks overlap when started at `starts`.
pub(crate) fn is_sequence(tasks: &[Task], starts: &[i64]) -> bool {
    (0..tasks.len()).all(|i| {
        (i + 1..tasks.len()).all(|j| {
            starts[i] + tasks[i].2 <= starts[j] || starts[j] + tasks[j].2 <= starts[i]
        })
    })
}

/// Whether the demands of the running tasks never exceed `capacity` when started at `starts`.
pub(crate) fn fits_capacity(tasks: &[Task], capacity: i64, starts: &[i64]) -> bool {
    let horizon = tasks
        .iter()
        .zip(starts)
        .map(|(task, start)| start + task.2)
        .max()
        .unwrap_or(0);
    (0..horizon).all(|time| {
        tasks
            .iter()
            .zip(starts)
            .filter(|&(task, &start)| start <= time && time < start + task.2)
            .map(|(task, _)| task.3)
            .sum::<i64>()
            <= capacity
    })
}

/// The earliest start and latest end of every task over all feasible schedules; [`None`] if there
/// is no feasible schedule.
pub(crate) fn feasible_windows(
    tasks: &[Task],
    is_feasible: impl Fn(&[i64]) -> bool,
) -> Option<Vec<(i64, i64)>> {
    let mut windows: Option<Vec<(i64, i64)>> = None;
    let mut starts = tasks.iter().map(|task| task.0).collect::<Vec<_>>();

    loop {
        if is_feasible(&starts) {
            let windows = windows.get_or_insert_with(|| vec![(i64::MAX, i64::MIN); tasks.len()]);
            for (index, task) in tasks.iter().enumerate() {
                windows[index].0 = windows[index].0.min(starts[index]);
                windows[index].1 = windows[index].1.max(starts[index] + task.2);
            }
        }

        // Advance to the next combination of starts
        let Some(position) = (0..tasks.len()).find(|&index| starts[index] < tasks[index].1)
        else {
            return windows;
        };
        starts[position] += 1;
        for index in 0..position {
            starts[index] = tasks[index].0;
        }
    }
}

/// Checks that the propagated windows contain every feasible schedule, and that propagation only
/// fails when there is none.
pub(crate) fn assert_sound(
    tasks: &[Task],
    propagated: Option<Vec<(i64, i64)>>,
    feasible: Option<Vec<(i64, i64)>>,
) {
    match (propagated, feasible) {
        (None, Some(feasible)) => {
            panic!("propagation failed on {tasks:?} which has a schedule with windows {feasible:?}")
        }
        (Some(propagated), Some(feasible)) => {
            for (index, (propagated, feasible)) in propagated.iter().zip(&feasible).enumerate() {
                assert!(
                    propagated.0 <= feasible.0 && propagated.1 >= feasible.1,
                    "task {index} of {tasks:?} was narrowed to {propagated:?} which excludes \
                     the feasible window {feasible:?}"
                );
            }
        }
        (_, None) => {}
    }
}
