//! Type definitions module
//!
//! Records loaded from the datasets and the per-query vector/result types.

pub mod records;
pub mod vector;

// Re-export commonly used types
pub use records::{
    ConditionLabel, DrugAttribute, DrugRecord, PrecautionRecord, SymptomRecord, PRECAUTION_SLOTS,
};
pub use vector::{symptom_key, ClassProbability, PredictionResult, SymptomVector};
