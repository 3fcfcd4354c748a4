//! The interval variables which the resource propagators reason over.
//!
//! Propagators only see intervals through [`ReadIntervals`] and [`IntervalDomains`];
//! [`IntervalStore`] is the implementation used by the [`PropagationEngine`].
//!
//! [`PropagationEngine`]: crate::engine::PropagationEngine
mod interval_domains;
mod interval_store;
mod task_view;

pub use interval_domains::*;
pub use interval_store::*;
pub use task_view::*;
