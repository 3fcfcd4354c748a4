/// The options of the disjunctive propagator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DisjunctiveOptions {
    /// When set, tasks with a duration of zero also take up the resource; otherwise they may be
    /// placed anywhere, including in the middle of other tasks.
    pub strict: bool,
}

/// The options of the cumulative propagator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeOptions {
    /// The tree which is used to detect edge-finding precedences.
    pub edge_finding_tree: CumulativeEdgeFindingTree,
    /// Whether the tasks of which no two can overlap (twice their demand exceeds the capacity)
    /// are additionally propagated as a disjunctive resource.
    pub decompose_high_demand_tasks: bool,
}

impl Default for CumulativeOptions {
    fn default() -> Self {
        Self {
            edge_finding_tree: CumulativeEdgeFindingTree::default(),
            decompose_high_demand_tasks: true,
        }
    }
}

/// Determines how the cumulative edge-finding maintains its tree; both variants find the same
/// bounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CumulativeEdgeFindingTree {
    /// A [`LambdaThetaTree`] which is updated one task at a time.
    ///
    /// [`LambdaThetaTree`]: crate::trees::LambdaThetaTree
    Incremental,
    /// A [`ThetaLambdaTree`] which is filled in a single pass.
    ///
    /// [`ThetaLambdaTree`]: crate::trees::ThetaLambdaTree
    #[default]
    Batch,
}
