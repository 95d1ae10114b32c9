mod node;

// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod decision_tree;
pub mod errors;
pub mod grower;
pub mod predicate;
pub mod splitter;

// Individual classes, and functions
pub use classifier::{ClassifierConfig, DecisionTreeClassifier, ImportanceMethod, LeafResolution};
pub use data::Row;
pub use errors::ClassifierError;
pub use grower::GrowPolicy;
pub use node::{LeafReason, Node, NodeType};
pub use predicate::Predicate;
