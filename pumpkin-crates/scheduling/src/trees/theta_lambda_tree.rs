use super::Monoid;
use super::MonoidTree;
use super::TreePosition;
use crate::pumpkin_assert_moderate;

/// A node of the [`ThetaLambdaTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvelopeNode {
    /// Max over suffixes of the firm events below this node of the initial envelope of the
    /// first event plus the minimal energy of the suffix.
    pub envelope: i64,
    /// As `envelope`, but where at most one event may use its maximal energy.
    pub envelope_opt: i64,
    pub sum_of_energy_min: i64,
    /// Max over the events below this node of `energy_max - energy_min`.
    pub max_of_energy_delta: i64,
}

impl EnvelopeNode {
    fn event(initial_envelope: i64, energy_min: i64, energy_max: i64) -> Self {
        EnvelopeNode {
            envelope: initial_envelope.saturating_add(energy_min),
            envelope_opt: initial_envelope.saturating_add(energy_max),
            sum_of_energy_min: energy_min,
            max_of_energy_delta: energy_max - energy_min,
        }
    }

    fn optional_event(initial_envelope_opt: i64, energy_max: i64) -> Self {
        EnvelopeNode {
            envelope: i64::MIN,
            envelope_opt: initial_envelope_opt.saturating_add(energy_max),
            sum_of_energy_min: 0,
            max_of_energy_delta: energy_max,
        }
    }
}

impl Monoid for EnvelopeNode {
    fn identity() -> Self {
        EnvelopeNode {
            envelope: i64::MIN,
            envelope_opt: i64::MIN,
            sum_of_energy_min: 0,
            max_of_energy_delta: 0,
        }
    }

    fn compose(left: &Self, right: &Self) -> Self {
        EnvelopeNode {
            envelope: right
                .envelope
                .max(left.envelope.saturating_add(right.sum_of_energy_min)),
            envelope_opt: right.envelope_opt.max(
                right.sum_of_energy_min.saturating_add(
                    left.envelope_opt
                        .max(left.envelope.saturating_add(right.max_of_energy_delta)),
                ),
            ),
            sum_of_energy_min: left.sum_of_energy_min + right.sum_of_energy_min,
            max_of_energy_delta: left.max_of_energy_delta.max(right.max_of_energy_delta),
        }
    }
}

/// The events found by [`ThetaLambdaTree::events_with_optional_envelope_greater_than`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionalEnvelopeWitness {
    /// The first event of the suffix whose optional envelope exceeds the target.
    pub critical_event: usize,
    /// The event which uses its maximal energy in that suffix.
    pub optional_event: usize,
    /// The energy the optional event may use without exceeding the target, when it is placed
    /// after the critical suffix.
    pub available_energy: i64,
}

/// An envelope tree over events sorted by their initial envelope, in which every event is firm
/// (it contributes its minimal energy), optional (it may contribute its maximal energy) or absent.
///
/// For a resource with capacity `C`, an event is a task whose initial envelope is
/// `C · start_min`; the envelope of the tree is then the energetic end min of the firm tasks.
///
/// Besides incremental updates, the tree supports a batch mode: events set through
/// [`ThetaLambdaTree::delayed_add_or_update_event`] only become visible after
/// [`ThetaLambdaTree::recompute_tree_for_delayed_operations`], which rebuilds the tree in a single
/// pass.
#[derive(Clone, Debug)]
pub struct ThetaLambdaTree {
    tree: MonoidTree<EnvelopeNode>,
}

impl ThetaLambdaTree {
    pub fn new(num_events: usize) -> Self {
        ThetaLambdaTree {
            tree: MonoidTree::new(num_events),
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }

    pub fn add_or_update_event(
        &mut self,
        event: usize,
        initial_envelope: i64,
        energy_min: i64,
        energy_max: i64,
    ) {
        pumpkin_assert_moderate!(0 <= energy_min && energy_min <= energy_max);
        self.tree.set(
            event,
            EnvelopeNode::event(initial_envelope, energy_min, energy_max),
        )
    }

    /// Sets the event without updating the tree; see
    /// [`ThetaLambdaTree::recompute_tree_for_delayed_operations`].
    pub fn delayed_add_or_update_event(
        &mut self,
        event: usize,
        initial_envelope: i64,
        energy_min: i64,
        energy_max: i64,
    ) {
        pumpkin_assert_moderate!(0 <= energy_min && energy_min <= energy_max);
        self.tree.set_delayed(
            event,
            EnvelopeNode::event(initial_envelope, energy_min, energy_max),
        )
    }

    pub fn recompute_tree_for_delayed_operations(&mut self) {
        self.tree.recompute()
    }

    pub fn add_or_update_optional_event(
        &mut self,
        event: usize,
        initial_envelope_opt: i64,
        energy_max: i64,
    ) {
        pumpkin_assert_moderate!(0 <= energy_max);
        self.tree.set(
            event,
            EnvelopeNode::optional_event(initial_envelope_opt, energy_max),
        )
    }

    pub fn remove_event(&mut self, event: usize) {
        self.tree.reset(event)
    }

    pub fn envelope(&self) -> i64 {
        self.tree.result().envelope
    }

    pub fn optional_envelope(&self) -> i64 {
        self.tree.result().envelope_opt
    }

    /// The envelope of the suffix of firm events which starts at `event`.
    pub fn envelope_of(&self, event: usize) -> i64 {
        self.tree
            .right_siblings(event)
            .fold(self.tree.get(event).envelope, |envelope, sibling| {
                envelope.saturating_add(sibling.sum_of_energy_min)
            })
    }

    /// The last event whose suffix has an envelope larger than `target`; [`None`] if the envelope
    /// of the tree does not exceed `target`.
    pub fn max_event_with_envelope_greater_than(&self, target: i64) -> Option<usize> {
        if self.envelope() <= target {
            return None;
        }

        let (event, _) = self.max_leaf_with_envelope_greater_than(self.tree.root(), target);
        Some(event)
    }

    /// Finds an optional event and a suffix of firm events which together have an envelope
    /// larger than `target`; [`None`] if the optional envelope does not exceed `target`.
    ///
    /// The envelope of the tree itself should not exceed `target`.
    pub fn events_with_optional_envelope_greater_than(
        &self,
        target: i64,
    ) -> Option<OptionalEnvelopeWitness> {
        pumpkin_assert_moderate!(self.envelope() <= target);
        if self.optional_envelope() <= target {
            return None;
        }

        let mut position = self.tree.root();
        let mut target = target;
        while let Some((left, right)) = self.tree.children(position) {
            let right_node = self.tree.node(right);
            if right_node.envelope_opt > target {
                position = right;
                continue;
            }

            let optional_energy_right = right_node
                .sum_of_energy_min
                .saturating_add(right_node.max_of_energy_delta);
            if self.tree.node(left).envelope > target.saturating_sub(optional_energy_right) {
                let (critical_event, extra) = self.max_leaf_with_envelope_greater_than(
                    left,
                    target.saturating_sub(optional_energy_right),
                );
                let optional_event = self.leaf_with_max_energy_delta(right);
                let optional_leaf = self.tree.get(optional_event);
                return Some(OptionalEnvelopeWitness {
                    critical_event,
                    optional_event,
                    available_energy: optional_leaf.sum_of_energy_min
                        + optional_leaf.max_of_energy_delta
                        - extra,
                });
            }

            target = target.saturating_sub(right_node.sum_of_energy_min);
            position = left;
        }

        let leaf = self.tree.node(position);
        let event = self.slot(position);
        Some(OptionalEnvelopeWitness {
            critical_event: event,
            optional_event: event,
            available_energy: target
                - (leaf.envelope_opt - leaf.sum_of_energy_min - leaf.max_of_energy_delta),
        })
    }

    /// Returns the last leaf below `position` whose suffix has an envelope larger than `target`,
    /// and by how much it exceeds `target`.
    fn max_leaf_with_envelope_greater_than(
        &self,
        mut position: TreePosition,
        mut target: i64,
    ) -> (usize, i64) {
        pumpkin_assert_moderate!(self.tree.node(position).envelope > target);

        while let Some((left, right)) = self.tree.children(position) {
            let right_node = self.tree.node(right);
            if right_node.envelope > target {
                position = right;
            } else {
                target = target.saturating_sub(right_node.sum_of_energy_min);
                position = left;
            }
        }

        (
            self.slot(position),
            self.tree.node(position).envelope - target,
        )
    }

    fn leaf_with_max_energy_delta(&self, mut position: TreePosition) -> usize {
        let max_of_energy_delta = self.tree.node(position).max_of_energy_delta;
        while let Some((left, right)) = self.tree.children(position) {
            position = if self.tree.node(right).max_of_energy_delta == max_of_energy_delta {
                right
            } else {
                left
            };
        }
        self.slot(position)
    }

    fn slot(&self, position: TreePosition) -> usize {
        self.tree
            .slot_of(position)
            .unwrap_or_else(|| unreachable!("descents always end in a leaf"))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::Rng;
    use rand::SeedableRng;

    use super::*;
    use crate::trees::LambdaThetaTree;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Kind {
        Firm,
        Optional,
        Absent,
    }

    /// Events sorted by start; every event has an initial envelope of `capacity · start`.
    fn random_events(rng: &mut SmallRng, capacity: i64) -> Vec<(i64, i64, Kind)> {
        let num_events = rng.gen_range(1..=7);
        let mut events = (0..num_events)
            .map(|_| {
                let kind = match rng.gen_range(0..3) {
                    0 => Kind::Firm,
                    1 => Kind::Optional,
                    _ => Kind::Absent,
                };
                (rng.gen_range(-5..15), rng.gen_range(1..10), kind)
            })
            .collect::<Vec<_>>();
        events.sort_by_key(|&(start, energy, _)| (start, energy));
        events
            .into_iter()
            .map(|(start, energy, kind)| (capacity * start, energy, kind))
            .collect()
    }

    fn brute_force_envelope_of(events: &[(i64, i64, Kind)], event: usize) -> i64 {
        let later_energy = events[event + 1..]
            .iter()
            .filter(|(_, _, kind)| *kind == Kind::Firm)
            .map(|(_, energy, _)| energy)
            .sum::<i64>();
        events[event].0 + events[event].1 + later_energy
    }

    #[test]
    fn envelopes_agree_with_the_lambda_theta_tree() {
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..300 {
            let capacity = rng.gen_range(1..=3);
            let events = random_events(&mut rng, capacity);

            let mut unified = ThetaLambdaTree::new(events.len());
            let mut lambda_theta = LambdaThetaTree::cumulative(events.len(), capacity);
            for (event, &(initial_envelope, energy, kind)) in events.iter().enumerate() {
                let start = initial_envelope / capacity;
                match kind {
                    Kind::Firm => {
                        unified.add_or_update_event(event, initial_envelope, energy, energy);
                        lambda_theta.insert(event, start, energy);
                    }
                    Kind::Optional => {
                        unified.add_or_update_optional_event(event, initial_envelope, energy);
                        lambda_theta.grey(event, start, energy);
                    }
                    Kind::Absent => {}
                }
            }

            assert_eq!(unified.envelope(), lambda_theta.energetic_end_min());
            assert_eq!(
                unified.optional_envelope(),
                lambda_theta.energetic_end_min_opt()
            );
        }
    }

    #[test]
    fn batch_construction_equals_incremental_construction() {
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..100 {
            let events = random_events(&mut rng, 2);
            let mut incremental = ThetaLambdaTree::new(events.len());
            let mut batch = ThetaLambdaTree::new(events.len());

            for (event, &(initial_envelope, energy, _)) in events.iter().enumerate() {
                incremental.add_or_update_event(event, initial_envelope, energy, energy);
                batch.delayed_add_or_update_event(event, initial_envelope, energy, energy);
            }
            batch.recompute_tree_for_delayed_operations();

            assert_eq!(batch.envelope(), incremental.envelope());
            assert_eq!(batch.optional_envelope(), incremental.optional_envelope());
        }
    }

    #[test]
    fn suffix_queries_match_brute_force() {
        let mut rng = SmallRng::seed_from_u64(9);

        for _ in 0..300 {
            let mut events = random_events(&mut rng, 1);
            let mut tree = ThetaLambdaTree::new(events.len());
            for (event, entry) in events.iter_mut().enumerate() {
                entry.2 = Kind::Firm;
                tree.add_or_update_event(event, entry.0, entry.1, entry.1);
            }

            for event in 0..events.len() {
                assert_eq!(tree.envelope_of(event), brute_force_envelope_of(&events, event));
            }

            let target = rng.gen_range(-5..40);
            let expected = (0..events.len())
                .rev()
                .find(|&event| brute_force_envelope_of(&events, event) > target);
            assert_eq!(tree.max_event_with_envelope_greater_than(target), expected);
        }
    }

    #[test]
    fn optional_witness_exceeds_the_target() {
        let mut rng = SmallRng::seed_from_u64(13);

        for _ in 0..300 {
            let events = random_events(&mut rng, 1);
            let mut tree = ThetaLambdaTree::new(events.len());
            for (event, &(initial_envelope, energy, kind)) in events.iter().enumerate() {
                match kind {
                    Kind::Firm => tree.add_or_update_event(event, initial_envelope, energy, energy),
                    Kind::Optional => {
                        tree.add_or_update_optional_event(event, initial_envelope, energy)
                    }
                    Kind::Absent => {}
                }
            }

            let target = tree.envelope().max(rng.gen_range(-5..40));
            let Some(witness) = tree.events_with_optional_envelope_greater_than(target) else {
                assert!(tree.optional_envelope() <= target);
                continue;
            };

            assert_eq!(events[witness.optional_event].2, Kind::Optional);

            // Making the optional event firm yields an envelope above the target.
            let mut firm = events.clone();
            firm[witness.optional_event].2 = Kind::Firm;
            let envelope = (0..firm.len())
                .filter(|&event| firm[event].2 == Kind::Firm)
                .map(|event| brute_force_envelope_of(&firm, event))
                .max()
                .unwrap_or(i64::MIN);
            assert!(envelope > target);
        }
    }

    #[test]
    fn witness_reports_the_available_energy() {
        let mut tree = ThetaLambdaTree::new(3);
        tree.add_or_update_event(0, 0, 4, 4);
        tree.add_or_update_event(1, 2, 3, 3);
        tree.add_or_update_optional_event(2, 3, 5);

        assert_eq!(tree.envelope(), 7);
        assert_eq!(tree.optional_envelope(), 12);

        let witness = tree
            .events_with_optional_envelope_greater_than(9)
            .expect("the optional envelope exceeds 9");

        // The suffix starting at event 1 has an envelope of 5, leaving 4 units before 9.
        assert_eq!(witness.optional_event, 2);
        assert_eq!(witness.critical_event, 1);
        assert_eq!(witness.available_energy, 4);
    }
}
