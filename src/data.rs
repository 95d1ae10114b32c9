use crate::errors::ClassifierError;
use std::fmt::Debug;
use std::hash::Hash;

/// Data trait used throughout the package
/// for the values of the classification column.
pub trait ClassLabel: Clone + Eq + Hash + Debug + std::marker::Send + std::marker::Sync {}

impl<T> ClassLabel for T where T: Clone + Eq + Hash + Debug + std::marker::Send + std::marker::Sync {}

/// A single training or query record.
///
/// Rows are owned by the caller, the classifier only ever reads them.
/// `classification` returns `None` when the label of the row is unknown,
/// which is fine for query rows but rejected for training rows.
pub trait Row: std::marker::Sync {
    /// Type of the classification column.
    type Class: ClassLabel;
    /// The typed value of the classification column.
    fn classification(&self) -> Option<Self::Class>;
}

/// Resolve the classification of every training row, in row order.
///
/// * `rows` - Training rows, every one of them must carry a classification.
pub fn resolve_classes<R: Row>(rows: &[R]) -> Result<Vec<R::Class>, ClassifierError> {
    if rows.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    rows.iter()
        .enumerate()
        .map(|(i, r)| r.classification().ok_or(ClassifierError::DegenerateClassification(i)))
        .collect()
}
