use super::Monoid;
use super::MonoidTree;
use super::TreeDiver;

/// A node of the [`DualCapacityThetaTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DualCapacityNode {
    pub energy: i64,
    /// Max over suffixes Ω of `capacity · est(Ω) + energy(Ω)`.
    pub energetic_end_min: i64,
    /// Max over suffixes Ω of `residual_capacity · est(Ω) + energy(Ω)`.
    pub residual_energetic_end_min: i64,
}

impl Monoid for DualCapacityNode {
    fn identity() -> Self {
        DualCapacityNode {
            energy: 0,
            energetic_end_min: i64::MIN,
            residual_energetic_end_min: i64::MIN,
        }
    }

    fn compose(left: &Self, right: &Self) -> Self {
        DualCapacityNode {
            energy: left.energy.saturating_add(right.energy),
            energetic_end_min: right
                .energetic_end_min
                .max(left.energetic_end_min.saturating_add(right.energy)),
            residual_energetic_end_min: right
                .residual_energetic_end_min
                .max(left.residual_energetic_end_min.saturating_add(right.energy)),
        }
    }
}

/// A Theta tree which computes energetic end mins for two capacities at once: the capacity `C`
/// of the resource and the residual capacity `C - c` left over by a task with demand `c`.
///
/// It is used to compute the envelope `Env^c` which determines how far a task with demand `c`
/// can be pushed by edge-finding \[1\].
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in
/// O(kn log n)’, CP 2009.
#[derive(Clone, Debug)]
pub struct DualCapacityThetaTree {
    tree: MonoidTree<DualCapacityNode>,
    capacity: i64,
    residual_capacity: i64,
}

impl DualCapacityThetaTree {
    pub fn new(num_tasks: usize, capacity: i64, residual_capacity: i64) -> Self {
        DualCapacityThetaTree {
            tree: MonoidTree::new(num_tasks),
            capacity,
            residual_capacity,
        }
    }

    pub fn insert(&mut self, slot: usize, start_min: i64, energy: i64) {
        self.tree.set(
            slot,
            DualCapacityNode {
                energy,
                energetic_end_min: self.capacity.saturating_mul(start_min).saturating_add(energy),
                residual_energetic_end_min: self
                    .residual_capacity
                    .saturating_mul(start_min)
                    .saturating_add(energy),
            },
        )
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn residual_energetic_end_min(&self) -> i64 {
        self.tree.result().residual_energetic_end_min
    }

    /// Returns the maximum of `capacity · est(Ω) + energy(Ω)` over the suffixes Ω with
    /// `residual_capacity · est(Ω) + energy(Ω) > threshold`; [`None`] if there is no such suffix.
    pub fn envelope_for_demand(&self, threshold: i64) -> Option<i64> {
        let root = self.tree.result();
        if root.residual_energetic_end_min <= threshold {
            return None;
        }

        let mut diver = EnvelopeDiver {
            threshold,
            energy_alpha: 0,
            energetic_end_min_alpha: i64::MIN,
        };
        self.tree.dive(&mut diver);

        Some(
            diver
                .energetic_end_min_alpha
                .saturating_add(root.energy - diver.energy_alpha),
        )
    }
}

/// Finds the last task α whose suffix exceeds the threshold on the residual capacity, and
/// collects the best energetic end min among the suffixes starting at or before α.
///
/// `energetic_end_min_alpha` is measured up to the end of α, `energy_alpha` is the energy between
/// the start of the current subtree and α.
struct EnvelopeDiver {
    threshold: i64,
    energy_alpha: i64,
    energetic_end_min_alpha: i64,
}

impl TreeDiver<DualCapacityNode> for EnvelopeDiver {
    fn choose_go_left(&mut self, _left: &DualCapacityNode, right: &DualCapacityNode) -> bool {
        if right.residual_energetic_end_min > self.threshold {
            false
        } else {
            self.threshold = self.threshold.saturating_sub(right.energy);
            true
        }
    }

    fn on_leaf_reached(&mut self, _slot: usize, leaf: &DualCapacityNode) {
        self.energy_alpha = leaf.energy;
        self.energetic_end_min_alpha = leaf.energetic_end_min;
    }

    fn on_come_back_from_right(&mut self, left: &DualCapacityNode, _right: &DualCapacityNode) {
        self.energetic_end_min_alpha = self
            .energetic_end_min_alpha
            .max(left.energetic_end_min.saturating_add(self.energy_alpha));
        self.energy_alpha += left.energy;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;

    fn brute_force_envelope(
        tasks: &[(i64, i64)],
        capacity: i64,
        residual_capacity: i64,
        threshold: i64,
    ) -> Option<i64> {
        (0..tasks.len())
            .filter_map(|first| {
                let energy = tasks[first..].iter().map(|(_, energy)| energy).sum::<i64>();
                let start = tasks[first].0;
                (residual_capacity * start + energy > threshold)
                    .then_some(capacity * start + energy)
            })
            .max()
    }

    #[test]
    fn envelope_matches_brute_force() {
        let mut rng = SmallRng::seed_from_u64(17);

        for _ in 0..500 {
            let capacity = rng.gen_range(1..=5);
            let demand = rng.gen_range(1..=capacity);
            let num_tasks = rng.gen_range(1..=7);
            let mut tasks = (0..num_tasks)
                .map(|_| (rng.gen_range(0..12), rng.gen_range(1..12)))
                .collect::<Vec<(i64, i64)>>();
            tasks.sort();

            let mut tree = DualCapacityThetaTree::new(num_tasks, capacity, capacity - demand);
            for (slot, &(start_min, energy)) in tasks.iter().enumerate() {
                tree.insert(slot, start_min, energy);
            }

            let threshold = rng.gen_range(0..50);
            assert_eq!(
                tree.envelope_for_demand(threshold),
                brute_force_envelope(&tasks, capacity, capacity - demand, threshold),
                "tasks {tasks:?}, capacity {capacity}, demand {demand}, threshold {threshold}"
            );
        }
    }

    #[test]
    fn no_envelope_below_the_threshold() {
        let mut tree = DualCapacityThetaTree::new(2, 2, 1);
        tree.insert(0, 0, 2);
        tree.insert(1, 3, 2);

        assert_eq!(tree.residual_energetic_end_min(), 5);
        assert_eq!(tree.envelope_for_demand(5), None);
        assert_eq!(tree.envelope_for_demand(4), Some(8));
    }
}
