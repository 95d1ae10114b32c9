// public modules
pub mod config;
pub mod core;
pub mod predict;

// private modules
mod setters;

pub use config::{ClassifierConfig, ConfigIO, ImportanceMethod, LeafResolution};
pub use self::core::DecisionTreeClassifier;
