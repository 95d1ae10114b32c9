//! Predicate
//!
//! Named boolean tests over a row. A predicate is both a split candidate while
//! the tree is grown and the routing function of the node that chose it.
use std::fmt::{self, Debug};

type TestFn<R> = dyn Fn(&R) -> bool + Send + Sync;

/// A labelled boolean test over rows of type `R`.
pub struct Predicate<R> {
    label: String,
    test: Box<TestFn<R>>,
}

impl<R> Predicate<R> {
    /// Create a new predicate.
    ///
    /// * `label` - Name used in introspection and when displaying the tree.
    /// * `test` - The test itself; rows it returns `true` for go to the
    ///   `when_true` side of a split.
    pub fn new<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Predicate {
            label: label.into(),
            test: Box::new(test),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Apply the test to a row.
    #[inline]
    pub fn test(&self, row: &R) -> bool {
        (self.test)(row)
    }
}

impl<R> Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Predicate").field("label", &self.label).finish()
    }
}
