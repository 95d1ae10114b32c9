use crate::classifier::config::{ClassifierConfig, ImportanceMethod};
use crate::data::{resolve_classes, Row};
use crate::decision_tree::tree::Tree;
use crate::errors::ClassifierError;
use crate::node::Node;
use crate::predicate::Predicate;
use crate::splitter::{GainRecord, GiniSplitter};
use hashbrown::{HashMap, HashSet};
use log::{info, warn};
use std::fmt::{self, Display};
use std::time::Instant;

/// Decision tree classifier object.
///
/// The tree is grown once, when the classifier is constructed, and is never
/// mutated afterwards.
pub struct DecisionTreeClassifier<R: Row> {
    pub cfg: ClassifierConfig,
    classes: Vec<R::Class>,
    predicates: Vec<Predicate<R>>,
    tree: Tree,
    root_gini_impurity: f64,
    ranked_predicates: Vec<GainRecord>,
}

impl<R: Row> DecisionTreeClassifier<R> {
    /// Build a classifier with the default configuration.
    ///
    /// * `rows` - Training rows, each must carry a classification.
    /// * `predicates` - Candidate predicates, reused at every node. When two
    ///   candidates score the same, the one listed first wins.
    pub fn new(rows: &[R], predicates: Vec<Predicate<R>>) -> Result<Self, ClassifierError> {
        Self::with_config(rows, predicates, ClassifierConfig::default())
    }

    /// Build a classifier.
    ///
    /// * `rows` - Training rows, each must carry a classification.
    /// * `predicates` - Candidate predicates.
    /// * `cfg` - Classifier configuration.
    pub fn with_config(
        rows: &[R],
        predicates: Vec<Predicate<R>>,
        cfg: ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        let classes = resolve_classes(rows)?;
        if predicates.is_empty() {
            return Err(ClassifierError::EmptyPredicateSet);
        }

        let start = Instant::now();
        let splitter = GiniSplitter::new(rows, &classes, &predicates, cfg.parallel);
        let index: Vec<usize> = (0..rows.len()).collect();
        let root_gini_impurity = splitter.gini_impurity(&index);

        let ranked_predicates = splitter.rank_predicates(&index);

        let mut tree = Tree::new();
        tree.fit(&splitter, index, cfg.grow_policy, cfg.max_depth);

        if tree.nodes.len() == 1 && root_gini_impurity > 0.0 {
            warn!("The root could not be split, every row will be resolved over the full training set.");
        }
        info!(
            "Built a decision tree over {0} rows and {1} predicates: {2} nodes, {3} leaves, depth {4}, in {5} ms.",
            rows.len(),
            predicates.len(),
            tree.nodes.len(),
            tree.n_leaves,
            tree.depth,
            start.elapsed().as_millis()
        );

        let classifier = DecisionTreeClassifier {
            cfg,
            classes,
            predicates,
            tree,
            root_gini_impurity,
            ranked_predicates,
        };
        if classifier.cfg.log_tree {
            info!("\n{}", classifier);
        }
        Ok(classifier)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Root of the tree, always present once the classifier is built.
    pub fn root(&self) -> &Node {
        &self.tree.nodes[0]
    }

    pub fn node(&self, num: usize) -> Option<&Node> {
        self.tree.nodes.get(num)
    }

    pub fn n_nodes(&self) -> usize {
        self.tree.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.tree.n_leaves
    }

    pub fn depth(&self) -> usize {
        self.tree.depth
    }

    /// Gini impurity of the full training set.
    pub fn root_gini_impurity(&self) -> f64 {
        self.root_gini_impurity
    }

    /// Every candidate scored against the full training set, best first.
    pub fn ranked_predicates(&self) -> &[GainRecord] {
        &self.ranked_predicates
    }

    pub fn predicates(&self) -> &[Predicate<R>] {
        &self.predicates
    }

    pub fn predicate_label(&self, predicate: usize) -> Option<&str> {
        self.predicates.get(predicate).map(|p| p.label())
    }

    /// Classification of every training row, in training order.
    pub fn classes(&self) -> &[R::Class] {
        &self.classes
    }

    /// `(label, weighted impurity, information gain)` of the predicate a
    /// node split on, `None` for leaves.
    pub fn split_summary(&self, node: &Node) -> Option<(&str, f64, f64)> {
        let split = node.split?;
        let label = self.predicate_label(split.predicate)?;
        Some((label, split.weighted_impurity, split.information_gain))
    }

    /// Distinct classifications of the rows in a node, in partition order.
    pub fn node_classes(&self, node: &Node) -> Vec<R::Class> {
        let mut seen = HashSet::new();
        node.partition
            .iter()
            .map(|&i| &self.classes[i])
            .filter(|c| seen.insert(*c))
            .cloned()
            .collect()
    }

    /// How much each predicate contributes to the tree, keyed by predicate position.
    /// Predicates no node split on are absent.
    ///
    /// * `method` - Importance method to use.
    /// * `normalize` - Scale the values to sum to 1.
    pub fn calculate_predicate_importance(&self, method: ImportanceMethod, normalize: bool) -> HashMap<usize, f64> {
        let importance: HashMap<usize, f64> = self
            .tree
            .predicate_usage()
            .into_iter()
            .map(|(predicate, (splits, total_gain))| {
                let value = match method {
                    ImportanceMethod::Weight => splits as f64,
                    ImportanceMethod::Gain => total_gain / splits as f64,
                    ImportanceMethod::TotalGain => total_gain,
                };
                (predicate, value)
            })
            .collect();
        if !normalize {
            return importance;
        }
        // Sorted so the total does not depend on map order.
        let mut values: Vec<f64> = importance.values().copied().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let total: f64 = values.iter().sum();
        importance.into_iter().map(|(k, v)| (k, v / total)).collect()
    }
}

impl<R: Row> Display for DecisionTreeClassifier<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let labels: Vec<&str> = self.predicates.iter().map(|p| p.label()).collect();
        write!(f, "{}", self.tree.render(&labels))
    }
}
