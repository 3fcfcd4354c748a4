use log::debug;
use log::trace;

use super::edge_finding;
use super::overload_checking;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::engine::Propagator;
use crate::engine::PropagatorConstructor;
use crate::engine::PropagatorConstructorContext;
use crate::intervals::IntervalDomains;
use crate::intervals::TaskView;
use crate::propagators::disjunctive::SequencePropagationLoop;
use crate::propagators::ArgTask;
use crate::propagators::CumulativeOptions;
use crate::propagators::Direction;
use crate::propagators::IndexedTasks;
use crate::propagators::LocalId;
use crate::propagators::ResourceTask;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(CumulativeStatistics {
    num_calls: usize,
    num_fixpoint_iterations: usize,
    num_overloads: usize,
    num_edge_finding_updates: usize,
    num_high_demand_calls: usize,
});

/// The tasks of which no two fit next to each other on the resource, together with the ids which
/// they have in the cumulative.
#[derive(Debug, Clone)]
struct HighDemandTasks {
    sequence: SequencePropagationLoop,
    ids: Box<[LocalId]>,
}

/// [`Propagator`] for the [Cumulative](https://sofdem.github.io/gccat/gccat/Ccumulative.html)
/// constraint with a constant capacity and constant demands.
///
/// The propagator performs energetic overload checking \[1\] and edge-finding \[2\]. Optionally,
/// the tasks whose demand is more than half the capacity are additionally propagated as a
/// disjunctive resource (see [`CumulativeOptions::decompose_high_demand_tasks`]).
///
/// Only tasks which must be performed and have a non-zero energy take part.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Max energy filtering algorithm for discrete cumulative resources’, CPAIOR 2009.
///
/// \[2\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in
/// O(kn log n)’, CP 2009.
#[derive(Debug, Clone)]
pub struct CumulativePropagator {
    tasks: Box<[ResourceTask]>,
    capacity: i64,
    options: CumulativeOptions,
    high_demand_tasks: Option<HighDemandTasks>,
    statistics: CumulativeStatistics,
}

impl CumulativePropagator {
    pub fn new(
        tasks: impl IntoIterator<Item = ArgTask>,
        capacity: i64,
        options: CumulativeOptions,
    ) -> Self {
        let tasks = ResourceTask::from_args(tasks);

        let high_demand_tasks = options
            .decompose_high_demand_tasks
            .then(|| {
                tasks
                    .iter()
                    .filter(|task| task.demand.saturating_mul(2) > capacity)
                    .collect::<Vec<_>>()
            })
            .filter(|high_demand| high_demand.len() > 1)
            .map(|high_demand| HighDemandTasks {
                sequence: SequencePropagationLoop::new(
                    ResourceTask::from_args(high_demand.iter().map(|task| ArgTask {
                        interval: task.interval,
                        demand: task.demand,
                    })),
                    false,
                ),
                ids: high_demand.iter().map(|task| task.id).collect(),
            });

        CumulativePropagator {
            tasks,
            capacity,
            options,
            high_demand_tasks,
            statistics: CumulativeStatistics::default(),
        }
    }

    fn read(&self, domains: &dyn IntervalDomains, direction: Direction) -> IndexedTasks {
        IndexedTasks::read(&self.tasks, domains, direction, |view: &TaskView| {
            view.must_be_performed && view.energy_min() > 0
        })
    }

    fn overload_checking(&mut self, domains: &dyn IntervalDomains) -> Result<(), Inconsistency> {
        let tasks = self.read(domains, Direction::Straight);
        overload_checking(&tasks, self.capacity).map_err(|overload| {
            self.statistics.num_overloads += 1;
            overload.into()
        })
    }

    /// Runs edge-finding in the given direction; returns whether any bound was tightened.
    fn edge_finding(
        &mut self,
        direction: Direction,
        domains: &mut dyn IntervalDomains,
    ) -> Result<bool, EmptyDomain> {
        let tasks = self.read(domains, direction);
        let updates = edge_finding(&tasks, self.capacity, self.options.edge_finding_tree);

        if updates.is_empty() {
            trace!("EdgeFinding ({direction:?}) on {} tasks: no updates", tasks.len());
            return Ok(false);
        }

        debug!("EdgeFinding ({direction:?}): {updates:?}");
        self.statistics.num_edge_finding_updates += updates.len();

        for update in updates {
            let task = &self.tasks[update.task().index()];
            direction.apply(domains, task, update)?;
        }

        Ok(true)
    }

    /// Propagates the high-demand tasks as a disjunctive resource; returns whether any bound was
    /// tightened.
    fn propagate_high_demand_tasks(
        &mut self,
        domains: &mut dyn IntervalDomains,
    ) -> Result<bool, Inconsistency> {
        let Some(high_demand_tasks) = self.high_demand_tasks.as_mut() else {
            return Ok(false);
        };
        self.statistics.num_high_demand_calls += 1;

        high_demand_tasks
            .sequence
            .propagate(domains)
            .map_err(|inconsistency| match inconsistency {
                // Report the overloaded tasks by their ids in this propagator
                Inconsistency::ResourceOverload(mut overload) => {
                    self.statistics.num_overloads += 1;
                    overload
                        .tasks
                        .iter_mut()
                        .for_each(|task| *task = high_demand_tasks.ids[task.index()]);
                    Inconsistency::ResourceOverload(overload)
                }
                empty_domain @ Inconsistency::EmptyDomain(_) => empty_domain,
            })
    }
}

impl PropagatorConstructor for CumulativePropagator {
    type PropagatorImpl = Self;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        self.tasks
            .iter()
            .for_each(|task| context.register(task.interval));

        self
    }
}

impl Propagator for CumulativePropagator {
    fn name(&self) -> &str {
        "Cumulative"
    }

    fn propagate(&mut self, domains: &mut dyn IntervalDomains) -> PropagationStatus {
        self.statistics.num_calls += 1;

        loop {
            loop {
                self.statistics.num_fixpoint_iterations += 1;
                self.overload_checking(domains)?;

                if !(self.edge_finding(Direction::Straight, domains)?
                    || self.edge_finding(Direction::Mirrored, domains)?)
                {
                    break;
                }
            }

            if !self.propagate_high_demand_tasks(domains)? {
                break;
            }
        }

        Ok(())
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        if let Some(high_demand_tasks) = &self.high_demand_tasks {
            high_demand_tasks
                .sequence
                .log_statistics(statistic_logger.attach_to_prefix("high_demand"));
        }
    }
}
