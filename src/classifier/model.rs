//! Fitted model: the tree plus everything needed to query it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::classifier::metrics::EvaluationReport;
use crate::classifier::tree::DecisionTree;
use crate::errors::{MediError, Result};
use crate::types::ConditionLabel;

/// Provenance of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    pub holdout_rows: usize,
    pub seed: u64,
}

/// Immutable fitted classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub metadata: ModelMetadata,
    /// Symptom names in the exact order query vectors must follow
    pub feature_names: Vec<String>,
    /// Class index → label, sorted
    pub classes: Vec<ConditionLabel>,
    pub tree: DecisionTree,
    pub evaluation: EvaluationReport,
}

impl TrainedModel {
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn label(&self, class: usize) -> &ConditionLabel {
        &self.classes[class]
    }

    /// Write the model as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), model_id = %self.metadata.id, "model saved");
        Ok(())
    }

    /// Read a model previously written by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let model: TrainedModel = serde_json::from_str(&contents)?;
        if model.tree.n_features() != model.feature_names.len()
            || model.tree.n_classes() != model.classes.len()
        {
            return Err(MediError::ConfigurationError(format!(
                "model {} is inconsistent: tree expects {} features / {} classes",
                model.metadata.id,
                model.tree.n_features(),
                model.tree.n_classes()
            )));
        }
        model.tree.validate()?;
        tracing::info!(model_id = %model.metadata.id, "model loaded");
        Ok(model)
    }
}
