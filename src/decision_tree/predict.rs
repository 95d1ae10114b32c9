//! Tree Prediction Methods
//!
//! Traversal of a built tree and resolution of the leaf a row lands in.
use super::tree::Tree;
use crate::classifier::LeafResolution;
use crate::data::ClassLabel;
use crate::node::Node;
use crate::predicate::Predicate;
use crate::splitter::class_counts;
use rand::seq::SliceRandom;
use rand::Rng;

impl Tree {
    /// Walk `row` from the root down to the node it should be resolved at.
    ///
    /// That is the leaf it lands in, or the last node on its path when the
    /// child it should move to is missing. `None` only for an empty tree.
    pub fn find_leaf<R>(&self, row: &R, predicates: &[Predicate<R>]) -> Option<&Node> {
        self.nodes.first().map(|root| self.find_leaf_from(root, row, predicates))
    }

    /// Same as `find_leaf`, starting at `start` instead of the root.
    pub fn find_leaf_from<'a, R>(&'a self, start: &'a Node, row: &R, predicates: &[Predicate<R>]) -> &'a Node {
        let mut node = start;
        loop {
            let Some(p) = node.predicate() else {
                return node;
            };
            let child_idx = match predicates.get(p) {
                Some(predicate) => node.get_child_idx(predicate.test(row)),
                None => None,
            };
            match child_idx.and_then(|i| self.nodes.get(i)) {
                Some(child) => node = child,
                None => return node,
            }
        }
    }

    /// The rows a node resolves over: its own partition, or the partition of
    /// the closest ancestor holding any rows. When no ancestor can be reached
    /// the root partition is used.
    pub fn resolution_candidates<'a>(&'a self, node: &'a Node) -> &'a [usize] {
        let mut current = node;
        while current.partition.is_empty() && !current.is_root() {
            match self.nodes.get(current.parent_node) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        match self.nodes.first() {
            Some(root) if current.partition.is_empty() => &root.partition,
            _ => &current.partition,
        }
    }

    /// Pick the training row whose classification answers for `node`.
    ///
    /// * `node` - Node the query row was resolved to.
    /// * `classes` - Classification of every training row.
    /// * `resolution` - Leaf resolution policy.
    /// * `rng` - Randomness for `LeafResolution::Random`.
    pub fn resolve_leaf<T: ClassLabel, G: Rng + ?Sized>(
        &self,
        node: &Node,
        classes: &[T],
        resolution: LeafResolution,
        rng: &mut G,
    ) -> Option<usize> {
        let candidates = self.resolution_candidates(node);
        match candidates {
            [] => None,
            [only] => Some(*only),
            _ => match resolution {
                LeafResolution::Random => candidates.choose(rng).copied(),
                LeafResolution::Majority => majority_row(candidates, classes),
            },
        }
    }
}

/// First row holding the most frequent classification.
fn majority_row<T: ClassLabel>(candidates: &[usize], classes: &[T]) -> Option<usize> {
    let counts = class_counts(candidates.iter().map(|&i| &classes[i]));
    let top = counts.values().copied().max()?;
    candidates.iter().copied().find(|&i| counts.get(&classes[i]) == Some(&top))
}
