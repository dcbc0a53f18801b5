//! Decision-tree classifier over symptom presence bits
//!
//! Components:
//! - Matrix: coercion of raw training cells into booleans
//! - Split: seeded train/held-out partitioning
//! - Tree: CART with Gini impurity
//! - Trainer: normalize → split → fit → evaluate
//! - Model: the immutable fitted result, persistable as JSON

pub mod matrix;
pub mod metrics;
pub mod model;
pub mod split;
pub mod trainer;
pub mod tree;

// Re-export key types
pub use matrix::{coerce_cell, TrainingSet};
pub use metrics::{EvaluationReport, LabelAccuracy};
pub use model::{ModelMetadata, TrainedModel};
pub use split::{train_test_split, Split};
pub use trainer::{ClassifierTrainer, TrainerConfig};
pub use tree::{DecisionTree, Node, TreeParams};
