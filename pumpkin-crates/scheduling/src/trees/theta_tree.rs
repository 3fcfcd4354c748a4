use super::Monoid;
use super::MonoidTree;

/// A node in the [`ThetaTree`] which keeps track of the ECT and the sum of the minimal durations
/// of the tasks below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThetaNode {
    pub sum_of_duration_min: i64,
    pub earliest_completion_time: i64,
}

impl ThetaNode {
    pub fn leaf(start_min: i64, duration_min: i64) -> Self {
        ThetaNode {
            sum_of_duration_min: duration_min,
            earliest_completion_time: start_min.saturating_add(duration_min),
        }
    }
}

impl Monoid for ThetaNode {
    fn identity() -> Self {
        ThetaNode {
            sum_of_duration_min: 0,
            earliest_completion_time: i64::MIN,
        }
    }

    fn compose(left: &Self, right: &Self) -> Self {
        ThetaNode {
            sum_of_duration_min: left.sum_of_duration_min + right.sum_of_duration_min,
            earliest_completion_time: left
                .earliest_completion_time
                .saturating_add(right.sum_of_duration_min)
                .max(right.earliest_completion_time),
        }
    }
}

/// A structure for efficiently calculating the ECT of a set of tasks (Theta).
///
/// The leaves represent the tasks sorted by earliest start; a task is in Theta when its leaf is
/// not the identity. The ECT of Theta is then the maximum, over all subsets of Theta, of the
/// earliest start of the subset plus the sum of its durations \[1\].
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
#[derive(Clone, Debug)]
pub struct ThetaTree {
    tree: MonoidTree<ThetaNode>,
}

impl ThetaTree {
    pub fn new(num_tasks: usize) -> Self {
        ThetaTree {
            tree: MonoidTree::new(num_tasks),
        }
    }

    /// Returns the earliest completion time of Theta; [`i64::MIN`] if Theta is empty.
    pub fn ect(&self) -> i64 {
        self.tree.result().earliest_completion_time
    }

    pub fn sum_of_duration_min(&self) -> i64 {
        self.tree.result().sum_of_duration_min
    }

    /// Adds the task at `slot` to Theta.
    pub fn insert(&mut self, slot: usize, start_min: i64, duration_min: i64) {
        self.tree.set(slot, ThetaNode::leaf(start_min, duration_min))
    }

    /// Removes the task at `slot` from Theta.
    pub fn remove(&mut self, slot: usize) {
        self.tree.reset(slot)
    }

    pub fn is_inserted(&self, slot: usize) -> bool {
        *self.tree.get(slot) != ThetaNode::identity()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;

    /// The maximum over all non-empty subsets of the earliest start plus the total duration.
    fn brute_force_ect(tasks: &[(i64, i64)]) -> i64 {
        (1..1_u32 << tasks.len())
            .map(|subset| {
                let members = tasks
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| subset & (1 << index) != 0)
                    .map(|(_, task)| *task);
                let (earliest_start, total_duration) = members
                    .fold((i64::MAX, 0), |(start, duration), (task_start, task_duration)| {
                        (start.min(task_start), duration + task_duration)
                    });
                earliest_start + total_duration
            })
            .max()
            .unwrap_or(i64::MIN)
    }

    #[test]
    fn ect_of_empty_tree_is_minus_infinity() {
        let tree = ThetaTree::new(4);
        assert_eq!(tree.ect(), i64::MIN);
        assert_eq!(tree.sum_of_duration_min(), 0);
    }

    #[test]
    fn ect_packs_tasks_back_to_back() {
        // Sorted by earliest start
        let tasks = [(0, 5), (25, 9), (30, 5), (32, 10)];
        let mut tree = ThetaTree::new(tasks.len());
        for (slot, (start_min, duration_min)) in tasks.iter().enumerate() {
            tree.insert(slot, *start_min, *duration_min);
        }

        assert_eq!(tree.ect(), 49);
        assert_eq!(tree.sum_of_duration_min(), 29);

        tree.remove(1);
        assert_eq!(tree.ect(), 45);
        assert!(!tree.is_inserted(1));
        assert!(tree.is_inserted(2));
    }

    #[test]
    fn ect_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..200 {
            let num_tasks = rng.gen_range(1..=8);
            let mut tasks = (0..num_tasks)
                .map(|_| (rng.gen_range(-10..20), rng.gen_range(0..6)))
                .collect::<Vec<(i64, i64)>>();
            tasks.sort();

            let mut tree = ThetaTree::new(num_tasks);
            let mut inserted = vec![];
            for (slot, &(start_min, duration_min)) in tasks.iter().enumerate() {
                if rng.gen_bool(0.7) {
                    tree.insert(slot, start_min, duration_min);
                    inserted.push((start_min, duration_min));
                }
            }

            assert_eq!(tree.ect(), brute_force_ect(&inserted), "tasks {inserted:?}");
        }
    }
}
