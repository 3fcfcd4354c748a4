use std::ops::Index;

use super::LocalId;
use crate::basic_types::EmptyDomain;
use crate::intervals::IntervalDomains;
use crate::intervals::IntervalId;
use crate::intervals::ReadIntervals;
use crate::intervals::TaskView;

/// A task which is passed to a resource constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgTask {
    pub interval: IntervalId,
    /// The amount of the resource which the task uses; ignored by disjunctive resources.
    pub demand: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResourceTask {
    pub(crate) interval: IntervalId,
    pub(crate) demand: i64,
    pub(crate) id: LocalId,
}

impl ResourceTask {
    pub(crate) fn from_args(tasks: impl IntoIterator<Item = ArgTask>) -> Box<[ResourceTask]> {
        tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| ResourceTask {
                interval: task.interval,
                demand: task.demand,
                id: LocalId::from(index as u32),
            })
            .collect()
    }
}

/// The time frame in which a resource algorithm runs.
///
/// An algorithm which pushes tasks to the right produces the symmetric propagation when it is run
/// on the mirrored tasks: a raised start min in the mirrored frame is a lowered end max in the
/// straight frame, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Straight,
    Mirrored,
}

impl Direction {
    pub(crate) fn view<Domains: ReadIntervals + ?Sized>(
        self,
        domains: &Domains,
        task: &ResourceTask,
    ) -> TaskView {
        let view = TaskView::read(domains, task.interval, task.demand);
        match self {
            Direction::Straight => view,
            Direction::Mirrored => view.mirrored(),
        }
    }

    /// Applies an update which was computed in this frame to the interval of `task`.
    pub(crate) fn apply(
        self,
        domains: &mut dyn IntervalDomains,
        task: &ResourceTask,
        update: BoundUpdate,
    ) -> Result<(), EmptyDomain> {
        match (self, update) {
            (Direction::Straight, BoundUpdate::StartMin { value, .. }) => {
                domains.set_start_min(task.interval, value)
            }
            (Direction::Straight, BoundUpdate::EndMax { value, .. }) => {
                domains.set_end_max(task.interval, value)
            }
            (Direction::Mirrored, BoundUpdate::StartMin { value, .. }) => {
                domains.set_end_max(task.interval, -value)
            }
            (Direction::Mirrored, BoundUpdate::EndMax { value, .. }) => {
                domains.set_start_min(task.interval, -value)
            }
        }
    }
}

/// A tightened bound proposed by one of the resource algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundUpdate {
    StartMin { task: LocalId, value: i64 },
    EndMax { task: LocalId, value: i64 },
}

impl BoundUpdate {
    pub(crate) fn task(&self) -> LocalId {
        match self {
            BoundUpdate::StartMin { task, .. } | BoundUpdate::EndMax { task, .. } => *task,
        }
    }
}

/// A participating task together with its leaf in the trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexedTask {
    pub(crate) id: LocalId,
    pub(crate) slot: usize,
    pub(crate) view: TaskView,
}

/// The tasks which take part in one run of a resource algorithm, sorted by earliest start.
///
/// The position of a task in this order is its slot, i.e. the leaf which represents it in the
/// trees. Slots are assigned anew every time the tasks are read.
#[derive(Debug, Clone, Default)]
pub(crate) struct IndexedTasks {
    tasks: Vec<IndexedTask>,
}

impl IndexedTasks {
    pub(crate) fn new(tasks: impl IntoIterator<Item = (LocalId, TaskView)>) -> Self {
        let mut tasks = tasks.into_iter().collect::<Vec<_>>();
        tasks.sort_by_key(|(id, view)| (view.start_min, view.duration_min, *id));

        IndexedTasks {
            tasks: tasks
                .into_iter()
                .enumerate()
                .map(|(slot, (id, view))| IndexedTask { id, slot, view })
                .collect(),
        }
    }

    /// Reads the tasks in the given direction and keeps those for which `participates` holds.
    pub(crate) fn read<Domains: ReadIntervals + ?Sized>(
        tasks: &[ResourceTask],
        domains: &Domains,
        direction: Direction,
        participates: impl Fn(&TaskView) -> bool,
    ) -> Self {
        IndexedTasks::new(
            tasks
                .iter()
                .map(|task| (task.id, direction.view(domains, task)))
                .filter(|(_, view)| participates(view)),
        )
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &IndexedTask> + '_ {
        self.tasks.iter()
    }

    /// Returns the slots of the tasks sorted by `key`; ties are ordered by slot.
    pub(crate) fn sorted_by(&self, key: impl Fn(&TaskView) -> i64) -> Vec<usize> {
        let mut slots = (0..self.tasks.len()).collect::<Vec<_>>();
        slots.sort_by_key(|&slot| key(&self.tasks[slot].view));
        slots
    }

    pub(crate) fn ids(&self, slots: impl IntoIterator<Item = usize>) -> Vec<LocalId> {
        slots.into_iter().map(|slot| self.tasks[slot].id).collect()
    }
}

impl Index<usize> for IndexedTasks {
    type Output = IndexedTask;

    fn index(&self, slot: usize) -> &Self::Output {
        &self.tasks[slot]
    }
}
