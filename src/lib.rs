//! MediChain - Symptom Checker & Drug Info Assistant
//!
//! Predicts a likely condition from a set of reported symptoms with a
//! decision-tree classifier, then looks up precautions and drug
//! information for that condition in two reference tables.
//!
//! # Architecture
//!
//! - **dataset**: CSV loading of the training and reference tables
//! - **labels**: raw → display label normalization
//! - **classifier**: seeded split, CART training, held-out evaluation
//! - **predictor**: validated queries against a shared trained model
//! - **reference**: case-insensitive label joins against the reference tables
//! - **pipeline**: one prediction-and-lookup cycle per query

pub mod errors;
pub mod types;

// Re-export commonly used types
pub use errors::{MediError, Result};

pub mod classifier;
pub mod dataset;
pub mod labels;
pub mod pipeline;
pub mod predictor;
pub mod reference;

pub use pipeline::{Diagnosis, MediChain, PipelineSettings};
pub use predictor::Predictor;
pub use reference::ReferenceJoiner;

// Terminal surface
pub mod cli;
pub mod display;
pub mod telemetry;
