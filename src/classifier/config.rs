//! Classifier Configuration
//!
//! Defines the configuration structures and enums used by the
//! `DecisionTreeClassifier`, including leaf resolution, grow policy and
//! importance methods.
use crate::errors::ClassifierError;
use crate::grower::GrowPolicy;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How a leaf holding more than one row turns into a single classification.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug, Default)]
pub enum LeafResolution {
    /// Classification of a row drawn uniformly at random from the leaf.
    #[default]
    Random,
    /// Most frequent classification in the leaf, ties go to the class seen first.
    Majority,
}

impl FromStr for LeafResolution {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Random" => Ok(LeafResolution::Random),
            "Majority" => Ok(LeafResolution::Majority),
            _ => Err(ClassifierError::InvalidParameter(
                "leaf_resolution".to_string(),
                "one of Random, Majority".to_string(),
                s.to_string(),
            )),
        }
    }
}

impl FromStr for GrowPolicy {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DepthFirst" => Ok(GrowPolicy::DepthFirst),
            "BreadthFirst" => Ok(GrowPolicy::BreadthFirst),
            _ => Err(ClassifierError::InvalidParameter(
                "grow_policy".to_string(),
                "one of DepthFirst, BreadthFirst".to_string(),
                s.to_string(),
            )),
        }
    }
}

/// Method to calculate predicate importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub enum ImportanceMethod {
    /// The number of nodes that split on the predicate.
    Weight,
    /// The average information gain across those nodes.
    Gain,
    /// The total information gain across those nodes.
    TotalGain,
}

fn default_max_depth() -> Option<usize> {
    None
}
fn default_seed() -> Option<u64> {
    None
}
fn default_parallel() -> bool {
    false
}
fn default_log_tree() -> bool {
    false
}

/// Configuration for the `DecisionTreeClassifier`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ClassifierConfig {
    /// Resolution of leaves holding more than one row.
    #[serde(default)]
    pub leaf_resolution: LeafResolution,
    /// Order in which pending nodes are expanded.
    #[serde(default)]
    pub grow_policy: GrowPolicy,
    /// Optional depth cap, unbounded by default.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    /// Seed for leaf resolution, thread-local randomness when unset.
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,
    /// Score candidates and classify batches in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Log the rendered tree once it is built.
    #[serde(default = "default_log_tree")]
    pub log_tree: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            leaf_resolution: LeafResolution::Random,
            grow_policy: GrowPolicy::DepthFirst,
            max_depth: None,
            seed: None,
            parallel: false,
            log_tree: false,
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save a configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), ClassifierError> {
        fs::write(path, self.json_dump()?).map_err(|e| ClassifierError::UnableToWrite(e.to_string()))
    }

    /// Dump a configuration as a json object.
    fn json_dump(&self) -> Result<String, ClassifierError> {
        serde_json::to_string(self).map_err(|e| ClassifierError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from a json string.
    ///
    /// * `json_str` - String object, which can be deserialized from json.
    fn from_json(json_str: &str) -> Result<Self, ClassifierError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| ClassifierError::UnableToRead(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let json_str = fs::read_to_string(path).map_err(|e| ClassifierError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for ClassifierConfig {}
