//! End-to-end pipeline: train once, then predict and join per query
//!
//! `MediChain` owns the predictor and the reference joiner. Queries only
//! read shared state; `retrain` needs `&mut self`, so a model swap can never
//! overlap a query on the same instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::classifier::{ClassifierTrainer, TrainedModel, TrainerConfig};
use crate::dataset::{Datasets, ReferenceTables, TrainingTable};
use crate::errors::{MediError, Result};
use crate::labels::LabelNormalizer;
use crate::predictor::Predictor;
use crate::reference::{DrugMatches, MatchPolicy, ReferenceJoiner};
use crate::telemetry::{RejectReason, TelemetryCollector, TelemetryEvent};
use crate::types::{PredictionResult, SymptomVector};

/// Library-level settings for building the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    pub trainer: TrainerConfig,
    /// Extra raw → display label aliases on top of the built-in table
    pub label_aliases: BTreeMap<String, String>,
    pub match_policy: MatchPolicy,
}

/// Result of one prediction-and-lookup cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub prediction: PredictionResult,
    /// 0-4 precautions, in column order
    pub precautions: Vec<String>,
    pub drugs: DrugMatches,
}

/// Assembled symptom classification and reference retrieval pipeline
#[derive(Debug, Clone)]
pub struct MediChain {
    trainer: ClassifierTrainer,
    predictor: Predictor,
    joiner: ReferenceJoiner,
    telemetry: TelemetryCollector,
}

impl MediChain {
    /// Normalize, train and wire the pipeline from loaded tables
    pub fn build(datasets: Datasets, settings: PipelineSettings) -> Result<Self> {
        let trainer = trainer(&settings)?;
        let model = trainer.train_table(&datasets.training)?;
        Self::assemble(trainer, Arc::new(model), datasets.references, settings.match_policy)
    }

    /// Wire the pipeline around an existing model
    pub fn from_model(
        model: Arc<TrainedModel>,
        references: ReferenceTables,
        settings: PipelineSettings,
    ) -> Result<Self> {
        let trainer = trainer(&settings)?;
        Self::assemble(trainer, model, references, settings.match_policy)
    }

    fn assemble(
        trainer: ClassifierTrainer,
        model: Arc<TrainedModel>,
        references: ReferenceTables,
        policy: MatchPolicy,
    ) -> Result<Self> {
        let telemetry = TelemetryCollector::new();
        telemetry.record(model_event(&model));

        Ok(Self {
            trainer,
            predictor: Predictor::new(model),
            joiner: ReferenceJoiner::with_policy(references.shared(), policy),
            telemetry,
        })
    }

    /// Use an externally owned collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn joiner(&self) -> &ReferenceJoiner {
        &self.joiner
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        self.predictor.model()
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    /// Symptom names in query-vector order
    pub fn feature_names(&self) -> &[String] {
        self.predictor.feature_names()
    }

    /// Predict a condition and fetch its precautions and drugs
    pub fn diagnose(&self, vector: &SymptomVector) -> Result<Diagnosis> {
        let start = Instant::now();
        let prediction = match self.predictor.predict_detailed(vector) {
            Ok(prediction) => prediction,
            Err(err) => return Err(self.reject(err)),
        };
        let duration_us = start.elapsed().as_micros() as u64;

        let label = prediction.label.as_str();
        self.telemetry.record(TelemetryEvent::PredictionMade {
            label: label.to_string(),
            duration_us,
            timestamp: Instant::now(),
        });

        let precautions = self.joiner.precautions(label);
        if precautions.is_empty() {
            self.telemetry.record(TelemetryEvent::PrecautionMiss {
                label: label.to_string(),
                timestamp: Instant::now(),
            });
        }

        let drugs = self.joiner.drugs(label);
        if drugs.is_empty() {
            self.telemetry.record(TelemetryEvent::DrugMiss {
                label: label.to_string(),
                timestamp: Instant::now(),
            });
        }

        tracing::debug!(
            label,
            confidence = prediction.confidence(),
            precautions = precautions.len(),
            drugs = drugs.len(),
            duration_us,
            "diagnosis complete"
        );

        Ok(Diagnosis {
            prediction,
            precautions,
            drugs,
        })
    }

    /// `diagnose` for a list of symptom names
    pub fn diagnose_symptoms<S: AsRef<str>>(&self, names: &[S]) -> Result<Diagnosis> {
        let vector = self
            .predictor
            .vector_from_names(names)
            .map_err(|err| self.reject(err))?;
        self.diagnose(&vector)
    }

    /// Train a fresh model and swap it in
    ///
    /// On failure the current model stays in place.
    pub fn retrain(&mut self, table: &TrainingTable) -> Result<Arc<TrainedModel>> {
        let model = Arc::new(self.trainer.train_table(table)?);
        self.telemetry.record(model_event(&model));

        let previous = self.predictor.model().metadata.id;
        self.predictor = Predictor::new(Arc::clone(&model));
        tracing::info!(previous = %previous, current = %model.metadata.id, "model replaced");

        Ok(model)
    }

    fn reject(&self, err: MediError) -> MediError {
        tracing::debug!(error = %err, "query rejected");
        self.telemetry.record(TelemetryEvent::QueryRejected {
            reason: RejectReason::from(&err),
            timestamp: Instant::now(),
        });
        err
    }
}

fn trainer(settings: &PipelineSettings) -> Result<ClassifierTrainer> {
    let normalizer = LabelNormalizer::with_aliases(settings.label_aliases.clone())?;
    Ok(ClassifierTrainer::with_config(settings.trainer, normalizer))
}

fn model_event(model: &TrainedModel) -> TelemetryEvent {
    TelemetryEvent::ModelTrained {
        model_id: model.metadata.id.to_string(),
        accuracy: model.evaluation.accuracy(),
        timestamp: Instant::now(),
    }
}
