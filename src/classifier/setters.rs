use crate::classifier::config::{ClassifierConfig, LeafResolution};
use crate::grower::GrowPolicy;

impl ClassifierConfig {
    // Set methods for paramters

    /// Set the leaf resolution policy.
    /// * `leaf_resolution` - How leaves holding several rows are resolved.
    pub fn set_leaf_resolution(mut self, leaf_resolution: LeafResolution) -> Self {
        self.leaf_resolution = leaf_resolution;
        self
    }

    /// Set the grow policy.
    /// * `grow_policy` - Order in which pending nodes are expanded.
    pub fn set_grow_policy(mut self, grow_policy: GrowPolicy) -> Self {
        self.grow_policy = grow_policy;
        self
    }

    /// Set the maximum depth.
    /// * `max_depth` - Nodes at this depth become leaves, `None` leaves the tree unbounded.
    pub fn set_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the seed.
    /// * `seed` - Seed for leaf resolution. With a seed, classifying the same
    ///   row always gives the same answer.
    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set parallel scoring and batch classification.
    /// * `parallel` - Use the rayon thread pool.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether the rendered tree is logged once built.
    /// * `log_tree` - Log the tree at info level.
    pub fn set_log_tree(mut self, log_tree: bool) -> Self {
        self.log_tree = log_tree;
        self
    }
}
