//! Classifier trainer: normalize, split, fit, evaluate

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;
use uuid::Uuid;

use crate::classifier::matrix::TrainingSet;
use crate::classifier::metrics::EvaluationReport;
use crate::classifier::model::{ModelMetadata, TrainedModel};
use crate::classifier::split::train_test_split;
use crate::classifier::tree::{DecisionTree, TreeParams};
use crate::dataset::TrainingTable;
use crate::errors::{MediError, Result};
use crate::labels::LabelNormalizer;
use crate::types::ConditionLabel;

/// Trainer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Share of rows held out for evaluation (default: 0.2)
    pub test_ratio: f64,

    /// Shuffle seed for the split (default: 42)
    pub seed: u64,

    pub tree: TreeParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            tree: TreeParams::default(),
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.test_ratio) {
            return Err(MediError::ConfigurationError(format!(
                "test_ratio must be in [0.0, 1.0), got {}",
                self.test_ratio
            )));
        }
        if self.tree.min_samples_split < 2 {
            return Err(MediError::ConfigurationError(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.tree.min_samples_leaf == 0 {
            return Err(MediError::ConfigurationError(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fits decision trees over normalized training data
#[derive(Debug, Clone, Default)]
pub struct ClassifierTrainer {
    config: TrainerConfig,
    normalizer: LabelNormalizer,
}

impl ClassifierTrainer {
    /// Trainer with default configuration and label table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrainerConfig, normalizer: LabelNormalizer) -> Self {
        Self { config, normalizer }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &LabelNormalizer {
        &self.normalizer
    }

    /// Coerce a raw table and train on it
    pub fn train_table(&self, table: &TrainingTable) -> Result<TrainedModel> {
        self.train(TrainingSet::from_table(table)?)
    }

    /// Train on a boolean matrix
    pub fn train(&self, mut set: TrainingSet) -> Result<TrainedModel> {
        self.config.validate()?;
        let start = Instant::now();

        // one label space for both partitions
        self.normalizer.normalize_records(&mut set.records);

        let classes: Vec<ConditionLabel> = set
            .records
            .iter()
            .map(|r| r.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let labels: Vec<usize> = set
            .records
            .iter()
            .map(|r| class_index(&classes, &r.label))
            .collect();

        let split = train_test_split(set.len(), self.config.test_ratio, self.config.seed)?;

        let train_rows: Vec<Vec<bool>> = split
            .train
            .iter()
            .map(|&i| set.records[i].symptoms.clone())
            .collect();
        let train_labels: Vec<usize> = split.train.iter().map(|&i| labels[i]).collect();

        let tree = DecisionTree::fit(
            &train_rows,
            &train_labels,
            set.feature_count(),
            classes.len(),
            self.config.tree,
        );

        let pairs: Vec<(usize, usize)> = split
            .test
            .iter()
            .map(|&i| (labels[i], tree.predict(&set.records[i].symptoms)))
            .collect();
        let evaluation = EvaluationReport::from_pairs(&classes, &pairs);

        let model = TrainedModel {
            metadata: ModelMetadata {
                id: Uuid::new_v4(),
                trained_at: Utc::now(),
                training_rows: split.train.len(),
                holdout_rows: split.test.len(),
                seed: self.config.seed,
            },
            feature_names: set.feature_names,
            classes,
            tree,
            evaluation,
        };

        tracing::info!(
            model_id = %model.metadata.id,
            features = model.feature_count(),
            classes = model.classes.len(),
            training_rows = model.metadata.training_rows,
            holdout_rows = model.metadata.holdout_rows,
            depth = model.tree.depth(),
            leaves = model.tree.leaf_count(),
            accuracy = ?model.evaluation.accuracy(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "classifier trained"
        );

        Ok(model)
    }
}

fn class_index(classes: &[ConditionLabel], label: &ConditionLabel) -> usize {
    // classes is sorted and built from these same labels
    classes.binary_search(label).unwrap_or(0)
}
