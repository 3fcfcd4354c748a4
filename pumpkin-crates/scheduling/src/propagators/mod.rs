//! Contains the resource propagators and the algorithms they are built from.
//!
//! The algorithms never modify the intervals themselves: each of them reads a snapshot of the
//! participating tasks, computes the bounds it can tighten and returns them as bound updates,
//! which the propagators then apply in the right [`Direction`]. A failing algorithm thus leaves no
//! partially applied changes behind.

mod local_id;
mod options;
mod resource_task;

pub(crate) mod cumulative;
pub(crate) mod disjunctive;

pub use cumulative::CumulativePropagator;
pub use disjunctive::DisjunctivePropagator;
pub use local_id::LocalId;
pub use options::*;
pub use resource_task::ArgTask;
pub use resource_task::Direction;
pub(crate) use resource_task::BoundUpdate;
pub(crate) use resource_task::IndexedTasks;
pub(crate) use resource_task::ResourceTask;
