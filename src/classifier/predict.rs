//! Classifier Prediction Methods
//!
//! Single row and batch classification on a built `DecisionTreeClassifier`.
use crate::classifier::core::DecisionTreeClassifier;
use crate::data::Row;
use crate::node::Node;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

impl<R: Row> DecisionTreeClassifier<R> {
    /// The node `row` is resolved at.
    pub fn leaf_for(&self, row: &R) -> &Node {
        self.tree().find_leaf_from(self.root(), row, self.predicates())
    }

    /// Classify a single row.
    ///
    /// Rows landing in a leaf with several training rows get the class of one
    /// of them, see `LeafResolution`. With a configured seed the same row
    /// always gets the same answer, otherwise thread-local randomness is used.
    pub fn classify(&self, row: &R) -> R::Class {
        match self.cfg.seed {
            Some(seed) => self.classify_with_rng(row, &mut StdRng::seed_from_u64(seed)),
            None => self.classify_with_rng(row, &mut rand::thread_rng()),
        }
    }

    /// Classify a single row, drawing leaf resolution randomness from `rng`.
    pub fn classify_with_rng<G: Rng + ?Sized>(&self, row: &R, rng: &mut G) -> R::Class {
        let node = self.leaf_for(row);
        let training_row = self
            .tree()
            .resolve_leaf(node, self.classes(), self.cfg.leaf_resolution, rng);
        // The root partition holds every training row, so a row is always found.
        debug_assert!(training_row.is_some());
        self.classes()[training_row.unwrap_or_default()].clone()
    }

    /// Classify a batch of rows, order preserving.
    ///
    /// With a configured seed, row `i` is resolved with the seed offset by `i`,
    /// so sequential and parallel batches agree.
    pub fn classify_all(&self, rows: &[R]) -> Vec<R::Class> {
        let classify_row = |(i, row): (usize, &R)| match self.cfg.seed {
            Some(seed) => self.classify_with_rng(row, &mut StdRng::seed_from_u64(seed.wrapping_add(i as u64))),
            None => self.classify_with_rng(row, &mut rand::thread_rng()),
        };
        if self.cfg.parallel {
            rows.par_iter().enumerate().map(classify_row).collect()
        } else {
            rows.iter().enumerate().map(classify_row).collect()
        }
    }
}
