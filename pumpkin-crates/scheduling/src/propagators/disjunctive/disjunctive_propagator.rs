use super::SequencePropagationLoop;
use crate::basic_types::PropagationStatus;
use crate::engine::Propagator;
use crate::engine::PropagatorConstructor;
use crate::engine::PropagatorConstructorContext;
use crate::intervals::IntervalDomains;
use crate::propagators::ArgTask;
use crate::propagators::DisjunctiveOptions;
use crate::propagators::ResourceTask;
use crate::statistics::StatisticLogger;

/// [`Propagator`] responsible for using disjunctive reasoning to propagate the [Disjunctive](https://sofdem.github.io/gccat/gccat/Cdisjunctive.html) constraint.
///
/// The propagator combines overload checking, detectable precedences, not-last and edge-finding
/// as described in \[1\]; each algorithm tightens both the earliest starts and (on the mirrored
/// tasks) the latest ends, and the algorithms are repeated until none of them tightens a bound.
///
/// Only tasks which must be performed take part. The demands of the tasks are ignored.
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
#[derive(Debug, Clone)]
pub struct DisjunctivePropagator {
    sequence: SequencePropagationLoop,
}

impl DisjunctivePropagator {
    pub fn new(tasks: impl IntoIterator<Item = ArgTask>, options: DisjunctiveOptions) -> Self {
        DisjunctivePropagator {
            sequence: SequencePropagationLoop::new(ResourceTask::from_args(tasks), options.strict),
        }
    }
}

impl PropagatorConstructor for DisjunctivePropagator {
    type PropagatorImpl = Self;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        self.sequence
            .tasks()
            .iter()
            .for_each(|task| context.register(task.interval));

        self
    }
}

impl Propagator for DisjunctivePropagator {
    fn name(&self) -> &str {
        "Disjunctive"
    }

    fn propagate(&mut self, domains: &mut dyn IntervalDomains) -> PropagationStatus {
        let _ = self.sequence.propagate(domains)?;
        Ok(())
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.sequence.log_statistics(statistic_logger)
    }
}
