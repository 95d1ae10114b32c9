//! Splitter
//!
//! Gini impurity, predicate partitioning and information gain. Everything here
//! works on row indices into the training set, so partitions never copy rows.
use crate::data::{ClassLabel, Row};
use crate::predicate::Predicate;
use hashbrown::HashMap;
use rayon::prelude::*;
use std::cmp::Ordering;

/// The two sides produced by applying one predicate to one partition.
///
/// Both sides keep the order of the input partition and together they hold
/// every input index exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartitionResult {
    pub when_false: Vec<usize>,
    pub when_true: Vec<usize>,
}

impl PartitionResult {
    /// Whether one of the two sides received nothing.
    pub fn has_empty_side(&self) -> bool {
        self.when_false.is_empty() || self.when_true.is_empty()
    }
}

/// Score of a single predicate against a single partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainRecord {
    /// Position of the predicate in the candidate set.
    pub predicate: usize,
    pub weighted_impurity: f64,
    pub information_gain: f64,
}

/// Count how many times each class appears.
pub fn class_counts<'a, T, I>(classes: I) -> HashMap<&'a T, usize>
where
    T: ClassLabel + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts = HashMap::new();
    for c in classes {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Gini impurity of a collection of classifications, `1 - Σ p²`.
///
/// Returns `0.0` for an empty collection.
pub fn gini_impurity<'a, T, I>(classes: I) -> f64
where
    T: ClassLabel + 'a,
    I: IntoIterator<Item = &'a T>,
{
    gini_from_counts(class_counts(classes).into_values().collect())
}

/// Counts are sorted before summing, so two sets with the same class
/// distribution always get bit-identical impurities.
fn gini_from_counts(mut counts: Vec<usize>) -> f64 {
    let n: usize = counts.iter().sum();
    if n == 0 {
        return 0.0;
    }
    counts.sort_unstable();
    let n = n as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum();
    1.0 - sum_sq
}

/// Exact purity of a split, `Σ_side Σ_class c² / |side|`, held as a fraction.
///
/// Information gain is `(score - Σ_class c² / n) / n` for a partition of `n`
/// rows, so ordering scores orders gains without any rounding. Candidates
/// whose gains are mathematically equal compare equal here even when their
/// `f64` gains differ in the last bits. Cross products stay below `n⁵`, so a
/// `u128` holds them for partitions of up to 10⁷ rows; beyond that the
/// comparison falls back to `f64`.
#[derive(Debug, Clone, Copy)]
pub struct SplitScore {
    numerator: u128,
    denominator: u128,
}

impl Default for SplitScore {
    fn default() -> Self {
        SplitScore {
            numerator: 0,
            denominator: 1,
        }
    }
}

impl SplitScore {
    /// Add the `Σ c² / size` term of one non-empty side.
    fn add_side(self, counts: &[usize], size: usize) -> Self {
        let sum_sq: u128 = counts.iter().map(|&c| (c as u128) * (c as u128)).sum();
        let size = size as u128;
        SplitScore {
            numerator: self.numerator.saturating_mul(size).saturating_add(sum_sq.saturating_mul(self.denominator)),
            denominator: self.denominator.saturating_mul(size),
        }
    }
}

impl Ord for SplitScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match (
            self.numerator.checked_mul(other.denominator),
            other.numerator.checked_mul(self.denominator),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => (self.numerator as f64 / self.denominator as f64)
                .total_cmp(&(other.numerator as f64 / other.denominator as f64)),
        }
    }
}

impl PartialOrd for SplitScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SplitScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SplitScore {}

/// Gini based split evaluation over a fixed training set and candidate set.
pub struct GiniSplitter<'a, R: Row> {
    rows: &'a [R],
    classes: &'a [R::Class],
    predicates: &'a [Predicate<R>],
    parallel: bool,
}

impl<'a, R: Row> GiniSplitter<'a, R> {
    /// * `rows` - Training rows.
    /// * `classes` - Resolved classification of every training row, aligned with `rows`.
    /// * `predicates` - Candidate predicates, in tie-break order.
    /// * `parallel` - Score candidates in parallel.
    pub fn new(rows: &'a [R], classes: &'a [R::Class], predicates: &'a [Predicate<R>], parallel: bool) -> Self {
        GiniSplitter {
            rows,
            classes,
            predicates,
            parallel,
        }
    }

    pub fn n_predicates(&self) -> usize {
        self.predicates.len()
    }

    /// Gini impurity of the rows behind `index`.
    pub fn gini_impurity(&self, index: &[usize]) -> f64 {
        gini_impurity(index.iter().map(|&i| &self.classes[i]))
    }

    /// Whether every row behind `index` shares one classification.
    pub fn is_homogeneous(&self, index: &[usize]) -> bool {
        match index.split_first() {
            Some((first, rest)) => rest.iter().all(|&i| self.classes[i] == self.classes[*first]),
            None => true,
        }
    }

    /// Split `index` by the predicate at position `predicate`.
    pub fn partition(&self, predicate: usize, index: &[usize]) -> PartitionResult {
        let p = &self.predicates[predicate];
        let mut result = PartitionResult::default();
        for &i in index {
            if p.test(&self.rows[i]) {
                result.when_true.push(i);
            } else {
                result.when_false.push(i);
            }
        }
        result
    }

    /// Information gain of one predicate against the partition `index`.
    pub fn information_gain(&self, index: &[usize], predicate: usize) -> GainRecord {
        self.gain_against(index, predicate, self.gini_impurity(index)).1
    }

    // An empty side has no weight, its impurity is never evaluated.
    fn gain_against(&self, index: &[usize], predicate: usize, base: f64) -> (SplitScore, GainRecord) {
        let result = self.partition(predicate, index);
        let n = index.len() as f64;
        let mut score = SplitScore::default();
        let mut weighted_impurity = 0.0;
        for side in [&result.when_false, &result.when_true] {
            if side.is_empty() {
                continue;
            }
            let counts: Vec<usize> = class_counts(side.iter().map(|&i| &self.classes[i]))
                .into_values()
                .collect();
            score = score.add_side(&counts, side.len());
            weighted_impurity += (side.len() as f64 / n) * gini_from_counts(counts);
        }
        let record = GainRecord {
            predicate,
            weighted_impurity,
            information_gain: base - weighted_impurity,
        };
        (score, record)
    }

    fn scored_predicates(&self, index: &[usize]) -> Vec<(SplitScore, GainRecord)> {
        let base = self.gini_impurity(index);
        if self.parallel {
            (0..self.predicates.len())
                .into_par_iter()
                .map(|p| self.gain_against(index, p, base))
                .collect()
        } else {
            (0..self.predicates.len())
                .map(|p| self.gain_against(index, p, base))
                .collect()
        }
    }

    /// Score every candidate against `index`, in candidate order.
    pub fn score_predicates(&self, index: &[usize]) -> Vec<GainRecord> {
        self.scored_predicates(index).into_iter().map(|(_, r)| r).collect()
    }

    /// Every candidate scored against `index`, best first.
    /// Candidates with exactly equal gains keep their supplied order.
    pub fn rank_predicates(&self, index: &[usize]) -> Vec<GainRecord> {
        let mut scored = self.scored_predicates(index);
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, r)| r).collect()
    }

    /// The candidate with the largest information gain on `index`.
    /// Ties go to the candidate supplied first. `None` only when there are no candidates.
    pub fn best_predicate(&self, index: &[usize]) -> Option<GainRecord> {
        self.scored_predicates(index)
            .into_iter()
            .reduce(|best, r| if r.0 > best.0 { r } else { best })
            .map(|(_, r)| r)
    }
}
