//! Dataset loading
//!
//! Reads the symptom training table and the two reference tables from CSV.

pub mod loader;
pub mod table;

pub use loader::{
    load_datasets, load_references, read_drugs, read_precautions, read_training, DatasetPaths, DEFAULT_LABEL_COLUMN,
};
pub use table::{Datasets, RawTrainingRow, ReferenceTables, TrainingTable};
