use std::fmt::Debug;

use crate::pumpkin_assert_extreme;
use crate::pumpkin_assert_simple;

/// The value stored in the nodes of a [`MonoidTree`].
///
/// `compose` has to be associative with `identity` as its neutral element; it does not have to be
/// commutative, the left child always covers earlier slots than the right child.
pub trait Monoid: Clone + PartialEq + Debug {
    fn identity() -> Self;

    fn compose(left: &Self, right: &Self) -> Self;
}

/// Callbacks for a root-to-leaf descent through a [`MonoidTree`]; see [`MonoidTree::dive`].
pub trait TreeDiver<Node> {
    /// Decides whether the descent continues in the left child of `node`.
    fn choose_go_left(&mut self, left: &Node, right: &Node) -> bool;

    fn on_leaf_reached(&mut self, slot: usize, leaf: &Node);

    /// Called on the way back up, after the descent went into the left child.
    fn on_come_back_from_left(&mut self, _left: &Node, _right: &Node) {}

    /// Called on the way back up, after the descent went into the right child.
    fn on_come_back_from_right(&mut self, _left: &Node, _right: &Node) {}
}

/// Identifies a node of a [`MonoidTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreePosition(usize);

/// A complete binary tree with a fixed number of leaves which maintains the composition of all
/// leaves at its root.
///
/// The nodes are stored as a 1-based heap: the root is at index 1 and the children of node `i`
/// are at `2i` and `2i + 1`.
#[derive(Clone, Debug)]
pub struct MonoidTree<Node> {
    nodes: Vec<Node>,
    leaf_count: usize,
}

impl<Node: Monoid> MonoidTree<Node> {
    /// Creates a tree with room for at least `num_leaves` leaves, all set to the identity.
    pub fn new(num_leaves: usize) -> Self {
        let leaf_count = num_leaves.next_power_of_two().max(2);
        MonoidTree {
            nodes: vec![Node::identity(); 2 * leaf_count],
            leaf_count,
        }
    }

    pub fn capacity(&self) -> usize {
        self.leaf_count
    }

    pub fn result(&self) -> &Node {
        &self.nodes[1]
    }

    pub fn get(&self, slot: usize) -> &Node {
        &self.nodes[self.leaf_index(slot)]
    }

    /// Sets the leaf at `slot` and recomputes all of its ancestors.
    pub fn set(&mut self, slot: usize, node: Node) {
        let mut index = self.leaf_index(slot);
        self.nodes[index] = node;

        while index > 1 {
            index /= 2;
            self.nodes[index] = Node::compose(&self.nodes[2 * index], &self.nodes[2 * index + 1]);
        }

        pumpkin_assert_extreme!(self.root_matches_leaves());
    }

    pub fn reset(&mut self, slot: usize) {
        self.set(slot, Node::identity())
    }

    /// Sets the leaf at `slot` without updating its ancestors.
    ///
    /// The tree is in an inconsistent state until [`MonoidTree::recompute`] is called.
    pub fn set_delayed(&mut self, slot: usize, node: Node) {
        let index = self.leaf_index(slot);
        self.nodes[index] = node;
    }

    /// Recomputes every internal node from the leaves in a single bottom-up pass.
    pub fn recompute(&mut self) {
        for index in (1..self.leaf_count).rev() {
            self.nodes[index] = Node::compose(&self.nodes[2 * index], &self.nodes[2 * index + 1]);
        }

        pumpkin_assert_extreme!(self.root_matches_leaves());
    }

    /// Resets every leaf to the identity.
    pub fn clear(&mut self) {
        self.nodes.fill(Node::identity());
    }

    /// Descends from the root to a leaf, letting `diver` choose the direction at every internal
    /// node, and then reports every node on the path on the way back up.
    pub fn dive<Diver: TreeDiver<Node>>(&self, diver: &mut Diver) {
        self.dive_from(self.root(), diver)
    }

    /// Like [`MonoidTree::dive`], but restricted to the subtree rooted at `start`.
    pub fn dive_from<Diver: TreeDiver<Node>>(&self, start: TreePosition, diver: &mut Diver) {
        let mut index = start.0;
        while index < self.leaf_count {
            let left = &self.nodes[2 * index];
            let right = &self.nodes[2 * index + 1];
            index = if diver.choose_go_left(left, right) {
                2 * index
            } else {
                2 * index + 1
            };
        }

        diver.on_leaf_reached(index - self.leaf_count, &self.nodes[index]);

        while index > start.0 {
            let parent = index / 2;
            let left = &self.nodes[2 * parent];
            let right = &self.nodes[2 * parent + 1];
            if index % 2 == 0 {
                diver.on_come_back_from_left(left, right);
            } else {
                diver.on_come_back_from_right(left, right);
            }
            index = parent;
        }
    }

    /// The right siblings of the nodes on the path from the leaf at `slot` to the root, from the
    /// bottom up.
    pub fn right_siblings(&self, slot: usize) -> impl Iterator<Item = &Node> + '_ {
        let mut index = self.leaf_index(slot);
        std::iter::from_fn(move || {
            while index > 1 {
                let is_left_child = index % 2 == 0;
                let sibling = index + 1;
                index /= 2;
                if is_left_child {
                    return Some(&self.nodes[sibling]);
                }
            }
            None
        })
    }

    pub fn root(&self) -> TreePosition {
        TreePosition(1)
    }

    pub fn node(&self, position: TreePosition) -> &Node {
        &self.nodes[position.0]
    }

    /// The left and right child of `position`; [`None`] if `position` is a leaf.
    pub fn children(&self, position: TreePosition) -> Option<(TreePosition, TreePosition)> {
        (position.0 < self.leaf_count)
            .then_some((TreePosition(2 * position.0), TreePosition(2 * position.0 + 1)))
    }

    /// The slot of `position`; [`None`] if `position` is an internal node.
    pub fn slot_of(&self, position: TreePosition) -> Option<usize> {
        if position.0 >= self.leaf_count {
            Some(position.0 - self.leaf_count)
        } else {
            None
        }
    }

    fn leaf_index(&self, slot: usize) -> usize {
        pumpkin_assert_simple!(
            slot < self.leaf_count,
            "slot {slot} is out of range for a tree with {} leaves",
            self.leaf_count
        );
        self.leaf_count + slot
    }

    fn root_matches_leaves(&self) -> bool {
        let fold = self.nodes[self.leaf_count..]
            .iter()
            .fold(Node::identity(), |accumulated, leaf| {
                Node::compose(&accumulated, leaf)
            });
        fold == self.nodes[1]
    }
}
