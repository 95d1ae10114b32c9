use crate::splitter::GainRecord;
use std::fmt;

/// Which side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Root,
    WhenFalse,
    WhenTrue,
}

/// Why growth stopped at a leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafReason {
    /// The partition holds at most one row.
    Singleton,
    /// Every row in the partition shares one classification.
    Homogeneous,
    /// No candidate reduces the impurity of the partition.
    ZeroGain,
    /// The winning predicate sent every row to the same side.
    EmptySide,
    /// The configured maximum depth was reached.
    MaxDepth,
}

/// A node waiting in the grower to be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplittableNode {
    pub num: usize,
    pub depth: usize,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub num: usize,
    pub depth: usize,
    pub parent_node: usize,
    pub node_type: NodeType,
    /// Indices of the training rows that reached this node.
    pub partition: Vec<usize>,
    pub impurity: f64,
    /// The chosen predicate and its score, `None` on leaves.
    pub split: Option<GainRecord>,
    pub when_false_child: Option<usize>,
    pub when_true_child: Option<usize>,
    pub leaf_reason: Option<LeafReason>,
}

impl Node {
    pub fn new(
        num: usize,
        depth: usize,
        parent_node: usize,
        node_type: NodeType,
        partition: Vec<usize>,
        impurity: f64,
    ) -> Self {
        Node {
            num,
            depth,
            parent_node,
            node_type,
            partition,
            impurity,
            split: None,
            when_false_child: None,
            when_true_child: None,
            leaf_reason: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.node_type == NodeType::Root
    }

    /// Position of the chosen predicate in the candidate set.
    pub fn predicate(&self) -> Option<usize> {
        self.split.map(|s| s.predicate)
    }

    pub fn make_leaf_node(&mut self, reason: LeafReason) {
        self.split = None;
        self.when_false_child = None;
        self.when_true_child = None;
        self.leaf_reason = Some(reason);
    }

    /// Update all the info that is needed if this node is a parent node.
    pub fn make_parent_node(&mut self, split: GainRecord, when_false_child: usize, when_true_child: usize) {
        self.split = Some(split);
        self.when_false_child = Some(when_false_child);
        self.when_true_child = Some(when_true_child);
        self.leaf_reason = None;
    }

    /// Get the path that should be traveled down, given the predicate outcome.
    pub fn get_child_idx(&self, outcome: bool) -> Option<usize> {
        if outcome {
            self.when_true_child
        } else {
            self.when_false_child
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.split, self.when_false_child, self.when_true_child) {
            (Some(s), Some(no), Some(yes)) => write!(
                f,
                "{}:[predicate {}] yes={},no={},gain={},impurity={},cover={}",
                self.num,
                s.predicate,
                yes,
                no,
                s.information_gain,
                self.impurity,
                self.partition.len()
            ),
            _ => write!(f, "{}:leaf,impurity={},cover={}", self.num, self.impurity, self.partition.len()),
        }
    }
}
