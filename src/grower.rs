use serde::Deserialize;
use serde::Serialize;

use crate::node::SplittableNode;
use std::collections::VecDeque;

/// Trait for handling the growth of the tree.
pub trait Grower {
    /// Add a node to the grower.
    fn add_node(&mut self, node: SplittableNode);
    /// Get the next node to split, `None` once the grower is drained.
    fn get_next_node(&mut self) -> Option<SplittableNode>;
    /// Check if the grower is empty.
    fn is_empty(&self) -> bool;
}

impl Grower for Vec<SplittableNode> {
    fn add_node(&mut self, node: SplittableNode) {
        self.push(node);
    }

    fn get_next_node(&mut self) -> Option<SplittableNode> {
        self.pop()
    }

    fn is_empty(&self) -> bool {
        <[SplittableNode]>::is_empty(self)
    }
}

impl Grower for VecDeque<SplittableNode> {
    fn add_node(&mut self, node: SplittableNode) {
        self.push_front(node);
    }

    fn get_next_node(&mut self) -> Option<SplittableNode> {
        self.pop_back()
    }

    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

/// Policy for growing the tree.
///
/// Both policies produce the same tree, they only differ in the order nodes
/// are numbered.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub enum GrowPolicy {
    /// Expand the most recently created node first.
    #[default]
    DepthFirst,
    /// Expand nodes level by level.
    BreadthFirst,
}
