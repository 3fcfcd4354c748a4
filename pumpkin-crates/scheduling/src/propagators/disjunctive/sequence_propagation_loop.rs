use log::debug;
use log::trace;

use super::detectable_precedences;
use super::edge_finding;
use super::not_last;
use super::overload_checking;
use crate::basic_types::EmptyDomain;
use crate::basic_types::Inconsistency;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::intervals::IntervalDomains;
use crate::intervals::TaskView;
use crate::propagators::Direction;
use crate::propagators::IndexedTasks;
use crate::propagators::ResourceTask;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of the algorithms run on a unary resource.
    SequenceStatistics {
        num_calls: usize,
        num_fixpoint_iterations: usize,
        num_overloads: usize,
        num_detectable_precedences_updates: usize,
        num_not_last_updates: usize,
        num_edge_finding_updates: usize,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    DetectablePrecedences,
    NotLast,
    EdgeFinding,
}

/// Runs the unary resource algorithms on a set of tasks until none of them tightens a bound.
///
/// The algorithms which tighten bounds are run both on the tasks and on their mirror image, the
/// latter tightens end maxes (or, for not-last, start mins). Overload checking is symmetric and
/// only runs on the tasks themselves.
#[derive(Debug, Clone)]
pub(crate) struct SequencePropagationLoop {
    tasks: Box<[ResourceTask]>,
    /// Whether tasks with a duration of zero take part.
    strict: bool,
    statistics: SequenceStatistics,
}

impl SequencePropagationLoop {
    pub(crate) fn new(tasks: Box<[ResourceTask]>, strict: bool) -> Self {
        SequencePropagationLoop {
            tasks,
            strict,
            statistics: SequenceStatistics::default(),
        }
    }

    pub(crate) fn tasks(&self) -> &[ResourceTask] {
        &self.tasks
    }

    /// Propagates until a fixpoint is reached; returns whether any bound was tightened.
    pub(crate) fn propagate(
        &mut self,
        domains: &mut dyn IntervalDomains,
    ) -> Result<bool, Inconsistency> {
        use Algorithm::*;
        use Direction::*;

        self.statistics.num_calls += 1;

        let mut changed = false;
        loop {
            loop {
                loop {
                    self.statistics.num_fixpoint_iterations += 1;
                    self.overload_checking(domains)?;

                    if !(self.run(DetectablePrecedences, Straight, domains)?
                        || self.run(DetectablePrecedences, Mirrored, domains)?)
                    {
                        break;
                    }
                    changed = true;
                }

                if !(self.run(NotLast, Straight, domains)? || self.run(NotLast, Mirrored, domains)?)
                {
                    break;
                }
                changed = true;
            }

            if !(self.run(EdgeFinding, Straight, domains)?
                || self.run(EdgeFinding, Mirrored, domains)?)
            {
                break;
            }
            changed = true;
        }

        Ok(changed)
    }

    pub(crate) fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger)
    }

    fn read(&self, domains: &dyn IntervalDomains, direction: Direction) -> IndexedTasks {
        let strict = self.strict;
        IndexedTasks::read(&self.tasks, domains, direction, |view: &TaskView| {
            view.must_be_performed && (strict || view.duration_min > 0)
        })
    }

    fn overload_checking(&mut self, domains: &dyn IntervalDomains) -> Result<(), Inconsistency> {
        let tasks = self.read(domains, Direction::Straight);
        overload_checking(&tasks).map_err(|overload| {
            self.statistics.num_overloads += 1;
            overload.into()
        })
    }

    /// Runs a single algorithm and applies its updates; returns whether any bound was tightened.
    fn run(
        &mut self,
        algorithm: Algorithm,
        direction: Direction,
        domains: &mut dyn IntervalDomains,
    ) -> Result<bool, EmptyDomain> {
        let tasks = self.read(domains, direction);
        let updates = match algorithm {
            Algorithm::DetectablePrecedences => detectable_precedences(&tasks),
            Algorithm::NotLast => not_last(&tasks),
            Algorithm::EdgeFinding => edge_finding(&tasks),
        };

        if updates.is_empty() {
            trace!("{algorithm:?} ({direction:?}) on {} tasks: no updates", tasks.len());
            return Ok(false);
        }

        debug!("{algorithm:?} ({direction:?}): {updates:?}");
        let counter = match algorithm {
            Algorithm::DetectablePrecedences => {
                &mut self.statistics.num_detectable_precedences_updates
            }
            Algorithm::NotLast => &mut self.statistics.num_not_last_updates,
            Algorithm::EdgeFinding => &mut self.statistics.num_edge_finding_updates,
        };
        *counter += updates.len();

        for update in updates {
            let task = &self.tasks[update.task().index()];
            direction.apply(domains, task, update)?;
        }

        Ok(true)
    }
}
