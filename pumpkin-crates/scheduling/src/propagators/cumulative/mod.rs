//! The cumulative resource: at any time the demands of the running tasks may not exceed the
//! capacity.
mod cumulative_propagator;
mod edge_finding;
mod overload_checking;

pub use cumulative_propagator::CumulativePropagator;
pub(crate) use edge_finding::edge_finding;
pub(crate) use overload_checking::overload_checking;
