//! Defines the resource constraints which can be added to a [`PropagationEngine`].
//!
//! A constraint is a relation over intervals. In the engine, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
//!
//! # Example
//! ```
//! # use pumpkin_scheduling::constraints;
//! # use pumpkin_scheduling::constraints::Constraint;
//! # use pumpkin_scheduling::engine::PropagationEngine;
//! # use pumpkin_scheduling::intervals::IntervalBounds;
//! # use pumpkin_scheduling::intervals::ReadIntervals;
//! # use pumpkin_scheduling::propagators::ArgTask;
//! let mut engine = PropagationEngine::default();
//!
//! // Two tasks of duration 3 which can start in [0, 1] and [0, 10] respectively.
//! let first = engine
//!     .new_interval(IntervalBounds::fixed_duration(0, 1, 3))
//!     .unwrap();
//! let second = engine
//!     .new_interval(IntervalBounds::fixed_duration(0, 10, 3))
//!     .unwrap();
//!
//! constraints::disjunctive([first, second].map(|interval| ArgTask {
//!     interval,
//!     demand: 1,
//! }))
//! .post(&mut engine)
//! .expect("the tasks fit on the resource");
//!
//! // The first task occupies [1, 3] whatever its start, so the second task has to follow it.
//! assert_eq!(engine.intervals().start_min(second), 3);
//! ```

mod cumulative;
mod disjunctive;

pub use cumulative::*;
pub use disjunctive::*;

use crate::basic_types::Inconsistency;
use crate::engine::PropagationEngine;
use crate::engine::PropagatorConstructor;

/// A [`Constraint`] is a relation over intervals. It disqualifies certain start and end times of
/// making it into a solution of the problem.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`PropagationEngine`] and propagate.
    ///
    /// This method returns an [`Inconsistency`] if the addition of the [`Constraint`] led to a
    /// conflict.
    fn post(self, engine: &mut PropagationEngine) -> Result<(), Inconsistency>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: PropagatorConstructor,
{
    fn post(self, engine: &mut PropagationEngine) -> Result<(), Inconsistency> {
        let _ = engine.add_propagator(self)?;
        Ok(())
    }
}
