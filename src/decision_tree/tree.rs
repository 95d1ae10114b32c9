//! Decision Tree
//!
//! Greedy tree construction over an explicit work-list. Every node picks the
//! candidate with the largest information gain on its own partition.
use crate::constants::{MIN_INFORMATION_GAIN, TREE_INDENT};
use crate::data::Row;
use crate::grower::{GrowPolicy, Grower};
use crate::node::{LeafReason, Node, NodeType, SplittableNode};
use crate::splitter::{GainRecord, GiniSplitter, PartitionResult};
use hashbrown::HashMap;
use log::debug;
use std::cmp::max;
use std::collections::VecDeque;
use std::fmt::{self, Display};

/// Outcome of evaluating a single node.
#[derive(Debug)]
enum SplitDecision {
    Leaf(LeafReason),
    Split(GainRecord, PartitionResult),
}

#[derive(Clone, Debug, Default)]
pub struct Tree {
    /// Node arena, `nodes[i].num == i` and the root is `nodes[0]`.
    pub nodes: Vec<Node>,
    pub depth: usize,
    pub n_leaves: usize,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            depth: 0,
            n_leaves: 0,
        }
    }

    /// Grow the tree from the rows behind `index`.
    ///
    /// * `splitter` - Impurity and gain evaluation over the training set.
    /// * `index` - Training rows the root starts from.
    /// * `grow_policy` - Order in which pending nodes are expanded.
    /// * `max_depth` - Optional depth cap, nodes at this depth become leaves.
    pub fn fit<R: Row>(
        &mut self,
        splitter: &GiniSplitter<R>,
        index: Vec<usize>,
        grow_policy: GrowPolicy,
        max_depth: Option<usize>,
    ) {
        match grow_policy {
            GrowPolicy::DepthFirst => self.grow(splitter, index, max_depth, Vec::<SplittableNode>::new()),
            GrowPolicy::BreadthFirst => self.grow(splitter, index, max_depth, VecDeque::<SplittableNode>::new()),
        }
    }

    fn grow<R: Row, G: Grower>(
        &mut self,
        splitter: &GiniSplitter<R>,
        index: Vec<usize>,
        max_depth: Option<usize>,
        mut growable: G,
    ) {
        let root_impurity = splitter.gini_impurity(&index);
        self.nodes = vec![Node::new(0, 0, 0, NodeType::Root, index, root_impurity)];
        self.depth = 0;
        self.n_leaves = 1;

        growable.add_node(SplittableNode { num: 0, depth: 0 });
        while let Some(next) = growable.get_next_node() {
            let decision = self.evaluate_node(splitter, &self.nodes[next.num], max_depth);
            match decision {
                SplitDecision::Leaf(reason) => {
                    debug!("node {} is a leaf: {:?}", next.num, reason);
                    self.nodes[next.num].make_leaf_node(reason);
                }
                SplitDecision::Split(record, result) => {
                    debug!(
                        "node {} split on predicate {}, gain: {}, sizes: {}/{}",
                        next.num,
                        record.predicate,
                        record.information_gain,
                        result.when_false.len(),
                        result.when_true.len()
                    );
                    let depth = next.depth + 1;
                    let when_false = self.push_child(splitter, next.num, depth, NodeType::WhenFalse, result.when_false);
                    let when_true = self.push_child(splitter, next.num, depth, NodeType::WhenTrue, result.when_true);
                    self.nodes[next.num].make_parent_node(record, when_false, when_true);

                    // A binary split turns one leaf into two.
                    self.n_leaves += 1;
                    self.depth = max(self.depth, depth);
                    growable.add_node(SplittableNode { num: when_false, depth });
                    growable.add_node(SplittableNode { num: when_true, depth });
                }
            }
        }
    }

    fn push_child<R: Row>(
        &mut self,
        splitter: &GiniSplitter<R>,
        parent: usize,
        depth: usize,
        node_type: NodeType,
        partition: Vec<usize>,
    ) -> usize {
        let num = self.nodes.len();
        let impurity = splitter.gini_impurity(&partition);
        self.nodes
            .push(Node::new(num, depth, parent, node_type, partition, impurity));
        num
    }

    fn evaluate_node<R: Row>(&self, splitter: &GiniSplitter<R>, node: &Node, max_depth: Option<usize>) -> SplitDecision {
        let partition = &node.partition;
        if partition.len() <= 1 {
            return SplitDecision::Leaf(LeafReason::Singleton);
        }
        if splitter.is_homogeneous(partition) {
            return SplitDecision::Leaf(LeafReason::Homogeneous);
        }
        if max_depth.is_some_and(|d| node.depth >= d) {
            return SplitDecision::Leaf(LeafReason::MaxDepth);
        }
        let best = match splitter.best_predicate(partition) {
            Some(best) if best.information_gain > MIN_INFORMATION_GAIN => best,
            _ => return SplitDecision::Leaf(LeafReason::ZeroGain),
        };
        let result = splitter.partition(best.predicate, partition);
        if result.has_empty_side() {
            return SplitDecision::Leaf(LeafReason::EmptySide);
        }
        SplitDecision::Split(best, result)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Split count and summed information gain of every predicate used by a node.
    pub fn predicate_usage(&self) -> HashMap<usize, (usize, f64)> {
        let mut usage = HashMap::new();
        for split in self.nodes.iter().filter_map(|n| n.split) {
            let (splits, total_gain) = usage.entry(split.predicate).or_insert((0, 0.0));
            *splits += 1;
            *total_gain += split.information_gain;
        }
        usage
    }

    /// Render the tree one node per line, naming predicates by their label.
    pub fn render(&self, labels: &[&str]) -> String {
        let mut print_buffer: Vec<usize> = if self.nodes.is_empty() { Vec::new() } else { vec![0] };
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let node = &self.nodes[idx];
            let indent = TREE_INDENT.repeat(node.depth);
            match (node.split, node.when_false_child, node.when_true_child) {
                (Some(s), Some(no), Some(yes)) => {
                    let label = labels.get(s.predicate).copied().unwrap_or("?");
                    r += format!(
                        "{}{}:[{}] yes={},no={},gain={:.4},cover={}\n",
                        indent,
                        node.num,
                        label,
                        yes,
                        no,
                        s.information_gain,
                        node.partition.len()
                    )
                    .as_str();
                    print_buffer.push(no);
                    print_buffer.push(yes);
                }
                _ => {
                    r += format!("{}{}:leaf,rows={:?}\n", indent, node.num, node.partition).as_str();
                }
            }
        }
        r
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<usize> = if self.nodes.is_empty() { Vec::new() } else { vec![0] };
        let mut r = String::new();
        while let Some(idx) = print_buffer.pop() {
            let node = &self.nodes[idx];
            r += format!("{}{}\n", TREE_INDENT.repeat(node.depth).as_str(), node).as_str();
            if let (Some(no), Some(yes)) = (node.when_false_child, node.when_true_child) {
                print_buffer.push(no);
                print_buffer.push(yes);
            }
        }
        write!(f, "{}", r)
    }
}
