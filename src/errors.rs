//! Errors
//!
//! Custom error types used throughout the `predicate-tree` crate.
use thiserror::Error;

/// Errors that can occur while building or configuring a classifier.
#[derive(Debug, Error, PartialEq)]
pub enum ClassifierError {
    /// No training rows were supplied.
    #[error("The training set is empty, the Gini impurity of an empty set is undefined.")]
    EmptyTrainingSet,
    /// No candidate predicates were supplied.
    #[error("The predicate set is empty, the tree could never be split.")]
    EmptyPredicateSet,
    /// A training row did not expose a classification.
    #[error("Training row {0} has no classification.")]
    DegenerateClassification(usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Unable to write configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
    /// Unable to read configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
}
