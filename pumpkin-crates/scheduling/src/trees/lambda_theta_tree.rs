use super::Monoid;
use super::MonoidTree;
use crate::math::NumExt;

/// A node of the [`LambdaThetaTree`].
///
/// Besides the energy and energetic end min of the firm tasks (Theta) below it, a node tracks the
/// best values which can be obtained by adding at most one grey task (from Lambda) together with
/// the slot of the grey task which achieves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LambdaThetaNode {
    /// Sum of the energies of the tasks in Theta.
    pub energy: i64,
    /// Max over subsets Ω of Theta of `capacity · est(Ω) + energy(Ω)`.
    pub energetic_end_min: i64,
    /// Max of `energy` when at most one grey task is added.
    pub energy_opt: i64,
    pub argmax_energy_opt: Option<usize>,
    /// Max of `energetic_end_min` when at most one grey task is added.
    pub energetic_end_min_opt: i64,
    pub argmax_energetic_end_min_opt: Option<usize>,
}

impl LambdaThetaNode {
    /// A leaf for a task in Theta.
    pub fn theta(start_min: i64, energy: i64, capacity: i64) -> Self {
        let energetic_end_min = capacity.saturating_mul(start_min).saturating_add(energy);
        LambdaThetaNode {
            energy,
            energetic_end_min,
            energy_opt: energy,
            argmax_energy_opt: None,
            energetic_end_min_opt: energetic_end_min,
            argmax_energetic_end_min_opt: None,
        }
    }

    /// A leaf for the grey task at `slot`.
    pub fn lambda(slot: usize, start_min: i64, energy: i64, capacity: i64) -> Self {
        LambdaThetaNode {
            energy: 0,
            energetic_end_min: i64::MIN,
            energy_opt: energy,
            argmax_energy_opt: Some(slot),
            energetic_end_min_opt: capacity.saturating_mul(start_min).saturating_add(energy),
            argmax_energetic_end_min_opt: Some(slot),
        }
    }
}

impl Monoid for LambdaThetaNode {
    fn identity() -> Self {
        LambdaThetaNode {
            energy: 0,
            energetic_end_min: i64::MIN,
            energy_opt: 0,
            argmax_energy_opt: None,
            energetic_end_min_opt: i64::MIN,
            argmax_energetic_end_min_opt: None,
        }
    }

    fn compose(left: &Self, right: &Self) -> Self {
        let energy = left.energy.saturating_add(right.energy);
        let energetic_end_min = right
            .energetic_end_min
            .max(left.energetic_end_min.saturating_add(right.energy));

        // The grey task contributing to the energy is either on the left or on the right.
        let energy_opt_left = left.energy_opt.saturating_add(right.energy);
        let energy_opt_right = left.energy.saturating_add(right.energy_opt);
        let (energy_opt, argmax_energy_opt) = if energy_opt_left > energy_opt_right {
            (energy_opt_left, left.argmax_energy_opt)
        } else {
            (energy_opt_right, right.argmax_energy_opt)
        };

        // The grey task is either in the right subtree, contributes energy to a set starting on
        // the left, or starts a set on the left itself. Ties prefer the cases in that order.
        let ect1 = right.energetic_end_min_opt;
        let ect2 = left.energetic_end_min.saturating_add(right.energy_opt);
        let ect3 = left.energetic_end_min_opt.saturating_add(right.energy);
        let (energetic_end_min_opt, argmax_energetic_end_min_opt) =
            if ect1 >= ect2 && ect1 >= ect3 {
                (ect1, right.argmax_energetic_end_min_opt)
            } else if ect2 >= ect1 && ect2 >= ect3 {
                (ect2, right.argmax_energy_opt)
            } else {
                (ect3, left.argmax_energetic_end_min_opt)
            };

        LambdaThetaNode {
            energy,
            energetic_end_min,
            energy_opt,
            argmax_energy_opt,
            energetic_end_min_opt,
            argmax_energetic_end_min_opt,
        }
    }
}

/// A Theta tree which additionally allows tasks to be greyed out into a set Lambda.
///
/// [`LambdaThetaTree::ect_opt`] is the largest ECT which can be obtained by adding at most one
/// grey task to Theta, and [`LambdaThetaTree::responsible_opt`] is the grey task responsible for
/// it. On a resource with capacity `C`, all quantities are energies: the energy of a task is its
/// duration times its demand and the ECT is the energetic end min divided by `C`, rounded up.
///
/// Both the disjunctive and the cumulative variant are described in \[1\] and \[2\].
///
/// # Bibliography
/// \[1\] P. Vilím, ‘Filtering algorithms for the unary resource constraint’, Archives of Control
/// Sciences, vol. 18, no. 2, pp. 159–202, 2008.
///
/// \[2\] P. Vilím, ‘Edge finding filtering algorithm for discrete cumulative resources in
/// O(kn log n)’, CP 2009.
#[derive(Clone, Debug)]
pub struct LambdaThetaTree {
    tree: MonoidTree<LambdaThetaNode>,
    capacity: i64,
}

impl LambdaThetaTree {
    pub fn disjunctive(num_tasks: usize) -> Self {
        LambdaThetaTree::cumulative(num_tasks, 1)
    }

    pub fn cumulative(num_tasks: usize, capacity: i64) -> Self {
        LambdaThetaTree {
            tree: MonoidTree::new(num_tasks),
            capacity,
        }
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Adds the task at `slot` to Theta.
    pub fn insert(&mut self, slot: usize, start_min: i64, energy: i64) {
        self.tree
            .set(slot, LambdaThetaNode::theta(start_min, energy, self.capacity))
    }

    /// Moves the task at `slot` to Lambda.
    pub fn grey(&mut self, slot: usize, start_min: i64, energy: i64) {
        self.tree.set(
            slot,
            LambdaThetaNode::lambda(slot, start_min, energy, self.capacity),
        )
    }

    /// Removes the task at `slot` from both Theta and Lambda.
    pub fn reset(&mut self, slot: usize) {
        self.tree.reset(slot)
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn energy(&self) -> i64 {
        self.tree.result().energy
    }

    pub fn energetic_end_min(&self) -> i64 {
        self.tree.result().energetic_end_min
    }

    pub fn energetic_end_min_opt(&self) -> i64 {
        self.tree.result().energetic_end_min_opt
    }

    /// The earliest completion time of Theta.
    pub fn ect(&self) -> i64 {
        self.energy_to_time(self.energetic_end_min())
    }

    /// The earliest completion time of Theta with at most one task of Lambda.
    pub fn ect_opt(&self) -> i64 {
        self.energy_to_time(self.energetic_end_min_opt())
    }

    /// The grey task which achieves [`LambdaThetaTree::ect_opt`]; [`None`] if no grey task
    /// increases it.
    pub fn responsible_opt(&self) -> Option<usize> {
        self.tree.result().argmax_energetic_end_min_opt
    }

    fn energy_to_time(&self, energetic_end_min: i64) -> i64 {
        if energetic_end_min == i64::MIN {
            return i64::MIN;
        }
        NumExt::div_ceil(energetic_end_min, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;

    /// `max over Ω ⊆ tasks of C · est(Ω) + energy(Ω)`.
    fn brute_force_energetic_end_min(tasks: &[(i64, i64)], capacity: i64) -> i64 {
        (1..1_u32 << tasks.len())
            .map(|subset| {
                let (earliest_start, energy) = tasks
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| subset & (1 << index) != 0)
                    .fold((i64::MAX, 0), |(start, energy), (_, &(task_start, task_energy))| {
                        (start.min(task_start), energy + task_energy)
                    });
                capacity * earliest_start + energy
            })
            .max()
            .unwrap_or(i64::MIN)
    }

    #[test]
    fn greying_a_task_keeps_it_as_an_option() {
        let tasks = [(0, 5), (25, 9), (30, 5), (32, 10)];
        let mut tree = LambdaThetaTree::disjunctive(tasks.len());
        for (slot, &(start_min, duration)) in tasks.iter().enumerate() {
            tree.insert(slot, start_min, duration);
        }
        assert_eq!(tree.ect(), 49);
        assert_eq!(tree.ect_opt(), 49);
        assert_eq!(tree.responsible_opt(), None);

        tree.grey(2, 30, 5);

        assert_eq!(tree.ect(), 44);
        assert_eq!(tree.ect_opt(), 49);
        assert_eq!(tree.responsible_opt(), Some(2));

        tree.reset(2);

        assert_eq!(tree.ect_opt(), 44);
        assert_eq!(tree.responsible_opt(), None);
    }

    #[test]
    fn cumulative_ect_rounds_up() {
        let mut tree = LambdaThetaTree::cumulative(2, 2);
        tree.insert(0, 0, 3);

        assert_eq!(tree.energetic_end_min(), 3);
        assert_eq!(tree.ect(), 2);

        tree.insert(1, 1, 4);
        assert_eq!(tree.energetic_end_min(), 7);
        assert_eq!(tree.ect(), 4);
    }

    #[test]
    fn empty_tree_has_no_completion_time() {
        let tree = LambdaThetaTree::cumulative(3, 4);
        assert_eq!(tree.ect(), i64::MIN);
        assert_eq!(tree.ect_opt(), i64::MIN);
        assert_eq!(tree.responsible_opt(), None);
    }

    #[test]
    fn optional_values_match_brute_force() {
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..300 {
            let capacity = rng.gen_range(1..=4);
            let num_tasks = rng.gen_range(1..=7);
            let mut tasks = (0..num_tasks)
                .map(|_| (rng.gen_range(-5..15), rng.gen_range(1..10)))
                .collect::<Vec<(i64, i64)>>();
            tasks.sort();

            let mut tree = LambdaThetaTree::cumulative(num_tasks, capacity);
            let mut theta = vec![];
            let mut lambda = vec![];
            for (slot, &(start_min, energy)) in tasks.iter().enumerate() {
                match rng.gen_range(0..3) {
                    0 => {
                        tree.insert(slot, start_min, energy);
                        theta.push((start_min, energy));
                    }
                    1 => {
                        tree.grey(slot, start_min, energy);
                        lambda.push((slot, (start_min, energy)));
                    }
                    _ => {}
                }
            }

            let energetic_end_min = brute_force_energetic_end_min(&theta, capacity);
            assert_eq!(tree.energetic_end_min(), energetic_end_min);

            let with_grey_task = |&(_, task): &(usize, (i64, i64))| {
                let mut extended = theta.clone();
                extended.push(task);
                brute_force_energetic_end_min(&extended, capacity)
            };
            let energetic_end_min_opt = lambda
                .iter()
                .map(with_grey_task)
                .max()
                .unwrap_or(i64::MIN)
                .max(energetic_end_min);
            assert_eq!(tree.energetic_end_min_opt(), energetic_end_min_opt);

            if energetic_end_min_opt > energetic_end_min {
                let responsible = tree.responsible_opt().expect("a grey task is responsible");
                let grey_task = lambda
                    .iter()
                    .find(|(slot, _)| *slot == responsible)
                    .expect("the responsible task is grey");
                assert_eq!(with_grey_task(grey_task), energetic_end_min_opt);
            } else {
                assert_eq!(tree.responsible_opt(), None);
            }
        }
    }
}
