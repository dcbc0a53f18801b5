//! Predictor: symptom vector → condition label
//!
//! Borrows a trained model through a shared handle and never mutates it.
//! Every query passes `check` first: a wrong-length vector is a
//! `DimensionMismatch`, an all-absent vector is `NoSymptomsSelected`.

use std::sync::Arc;

use crate::classifier::TrainedModel;
use crate::errors::{MediError, Result};
use crate::types::{ClassProbability, ConditionLabel, PredictionResult, SymptomVector};

/// Read-only query interface over a trained model
#[derive(Debug, Clone)]
pub struct Predictor {
    model: Arc<TrainedModel>,
}

impl Predictor {
    pub fn new(model: Arc<TrainedModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        &self.model
    }

    /// Symptom names in query-vector order
    pub fn feature_names(&self) -> &[String] {
        &self.model.feature_names
    }

    /// Labels the model can return
    pub fn labels(&self) -> &[ConditionLabel] {
        &self.model.classes
    }

    /// Validate a query without predicting
    pub fn check(&self, vector: &SymptomVector) -> Result<()> {
        let expected = self.model.feature_count();
        if vector.len() != expected {
            return Err(MediError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        if !vector.has_any() {
            return Err(MediError::NoSymptomsSelected);
        }
        Ok(())
    }

    /// Top predicted label
    pub fn predict(&self, vector: &SymptomVector) -> Result<ConditionLabel> {
        self.check(vector)?;
        let class = self.model.tree.predict(vector.as_slice());
        Ok(self.model.label(class).clone())
    }

    /// Predicted label with the leaf class distribution
    pub fn predict_detailed(&self, vector: &SymptomVector) -> Result<PredictionResult> {
        let label = self.predict(vector)?;
        let probabilities = self.probabilities(vector)?;
        Ok(PredictionResult {
            label,
            probabilities,
        })
    }

    /// Non-zero class probabilities, highest first
    pub fn probabilities(&self, vector: &SymptomVector) -> Result<Vec<ClassProbability>> {
        self.check(vector)?;
        let mut probabilities: Vec<ClassProbability> = self
            .model
            .tree
            .predict_proba(vector.as_slice())
            .into_iter()
            .enumerate()
            .filter(|(_, p)| *p > 0.0)
            .map(|(class, probability)| ClassProbability {
                label: self.model.label(class).clone(),
                probability,
            })
            .collect();
        // stable: equal probabilities keep class order
        probabilities.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(probabilities)
    }

    /// Build a query vector from symptom names
    pub fn vector_from_names<S: AsRef<str>>(&self, names: &[S]) -> Result<SymptomVector> {
        SymptomVector::from_selected(self.feature_names(), names)
    }
}
