//! Runs resource propagators until none of them can tighten a bound.
//!
//! A [`Propagator`] is created by a [`PropagatorConstructor`], which registers the intervals it
//! reads through a [`PropagatorConstructorContext`]. The [`PropagationEngine`] then re-runs a
//! propagator whenever one of its intervals changes.
mod propagation_engine;
mod propagator;
mod propagator_queue;

pub use propagation_engine::PropagationEngine;
pub use propagator::*;
pub(crate) use propagator_queue::PropagatorQueue;
