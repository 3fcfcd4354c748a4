//! Balanced trees over tasks sorted by earliest start, aggregating completion times and energies.
//!
//! All trees are built on [`MonoidTree`], a complete binary tree whose internal nodes are the
//! composition of their children.
mod dual_capacity_theta_tree;
mod lambda_theta_tree;
mod monoid_tree;
mod theta_lambda_tree;
mod theta_tree;

pub use dual_capacity_theta_tree::*;
pub use lambda_theta_tree::*;
pub use monoid_tree::*;
pub use theta_lambda_tree::*;
pub use theta_tree::*;
