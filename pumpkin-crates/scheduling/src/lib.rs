//! # Pumpkin Scheduling
//! The resource propagators of the Pumpkin constraint programming solver, together with the
//! data structures they are built on.
//!
//! Two resources are supported:
//! - a disjunctive (unary) resource, on which no two tasks overlap; it is propagated with
//!   overload checking, detectable precedences, not-last and edge-finding
//!   ([`propagators::DisjunctivePropagator`]);
//! - a cumulative resource with a constant capacity, on which the demands of the running tasks
//!   never exceed the capacity; it is propagated with energetic overload checking and
//!   edge-finding ([`propagators::CumulativePropagator`]).
//!
//! The algorithms are built on balanced binary trees which maintain an aggregate over the tasks
//! (see [`trees`]). Every algorithm pushes tasks to the right; the symmetric propagation is
//! obtained by running it on the mirrored tasks (see [`propagators::Direction`]).
//!
//! The tasks are intervals owned by an [`intervals::IntervalStore`]; the propagators only see
//! them through the [`intervals::IntervalDomains`] trait. A [`engine::PropagationEngine`] runs
//! the propagators whenever the bounds of one of their intervals change.
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
//! // A task which needs the full capacity in [1, 4] and a task with demand 1 and duration 3.
//! let full = engine
//!     .new_interval(IntervalBounds::fixed_duration(0, 1, 4))
//!     .unwrap();
//! let small = engine
//!     .new_interval(IntervalBounds::fixed_duration(0, 17, 3))
//!     .unwrap();
//!
//! let tasks = [
//!     ArgTask {
//!         interval: full,
//!         demand: 2,
//!     },
//!     ArgTask {
//!         interval: small,
//!         demand: 1,
//!     },
//! ];
//! constraints::cumulative(tasks, 2)
//!     .post(&mut engine)
//!     .expect("the tasks fit on the resource");
//!
//! assert!(engine.intervals().start_min(small) >= 3);
//! ```
#[doc(hidden)]
pub mod pumpkin_asserts;

pub(crate) mod basic_types;
pub(crate) mod math;

pub mod constraints;
pub mod containers;
pub mod engine;
pub mod intervals;
pub mod propagators;
pub mod statistics;
pub mod trees;

pub use basic_types::EmptyDomain;
pub use basic_types::Inconsistency;
pub use basic_types::PropagationStatus;
pub use basic_types::ResourceOverload;
pub use convert_case;
