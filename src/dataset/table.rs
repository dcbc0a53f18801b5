//! In-memory tables produced by the loader

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::{DrugRecord, PrecautionRecord};

/// Training row as read from disk, before feature coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrainingRow {
    /// One cell per feature column, in column order
    pub cells: Vec<String>,
    pub label: String,
}

/// Symptom/condition training table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingTable {
    /// Symptom column names, in file order
    pub feature_names: Vec<String>,
    pub rows: Vec<RawTrainingRow>,
}

impl TrainingTable {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            rows: Vec::new(),
        }
    }

    /// Append a row; `cells` must follow `feature_names` order
    pub fn push_row<S: Into<String>>(&mut self, cells: Vec<S>, label: impl Into<String>) {
        self.rows.push(RawTrainingRow {
            cells: cells.into_iter().map(Into::into).collect(),
            label: label.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

/// Static reference tables joined against predicted labels
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub precautions: Vec<PrecautionRecord>,
    pub drugs: Vec<DrugRecord>,
}

impl ReferenceTables {
    pub fn new(precautions: Vec<PrecautionRecord>, drugs: Vec<DrugRecord>) -> Self {
        Self { precautions, drugs }
    }

    /// Freeze into shared read-only state
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// All three tables needed to build the pipeline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Datasets {
    pub training: TrainingTable,
    pub references: ReferenceTables,
}
