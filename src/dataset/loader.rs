//! CSV loader for the training and reference tables
//!
//! Header names are matched case-insensitively; every structural problem is
//! reported as a `DataError` naming the offending table.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::dataset::table::{Datasets, ReferenceTables, TrainingTable};
use crate::errors::{MediError, Result};
use crate::types::{DrugRecord, PrecautionRecord, PRECAUTION_SLOTS};

const TRAINING_TABLE: &str = "symptom";
const PRECAUTION_TABLE: &str = "precaution";
const DRUG_TABLE: &str = "drug";

/// Default label column of the training table
pub const DEFAULT_LABEL_COLUMN: &str = "TYPE";

/// Default file names inside a data directory
pub const SYMPTOMS_FILE: &str = "symptoms_dataset.csv";
pub const DRUGS_FILE: &str = "drugs_side_effects.csv";
pub const PRECAUTIONS_FILE: &str = "disease_precaution.csv";

/// Locations of the three input tables
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    pub symptoms: PathBuf,
    pub drugs: PathBuf,
    pub precautions: PathBuf,
}

impl DatasetPaths {
    /// Standard file names under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            symptoms: dir.join(SYMPTOMS_FILE),
            drugs: dir.join(DRUGS_FILE),
            precautions: dir.join(PRECAUTIONS_FILE),
        }
    }
}

/// Load all three tables
pub fn load_datasets(paths: &DatasetPaths, label_column: &str) -> Result<Datasets> {
    let training = read_training(open(&paths.symptoms)?, label_column)?;
    tracing::info!(
        rows = training.len(),
        features = training.feature_count(),
        "training table loaded"
    );

    Ok(Datasets {
        training,
        references: load_references(paths)?,
    })
}

/// Load only the two reference tables
pub fn load_references(paths: &DatasetPaths) -> Result<ReferenceTables> {
    let precautions = read_precautions(open(&paths.precautions)?)?;
    let drugs = read_drugs(open(&paths.drugs)?)?;
    tracing::info!(
        precautions = precautions.len(),
        drugs = drugs.len(),
        "reference tables loaded"
    );
    Ok(ReferenceTables::new(precautions, drugs))
}

fn open(path: &Path) -> Result<File> {
    tracing::debug!(path = %path.display(), "opening dataset");
    Ok(File::open(path)?)
}

/// Read the symptom/condition training table
///
/// `label_column` holds the condition; every other column is a symptom.
pub fn read_training<R: Read>(reader: R, label_column: &str) -> Result<TrainingTable> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = headers(&mut csv, TRAINING_TABLE)?;

    let label_idx = find_column(&headers, label_column)
        .ok_or_else(|| MediError::data(TRAINING_TABLE, format!("missing label column '{}'", label_column)))?;

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut table = TrainingTable::new(feature_names);
    for (line, record) in csv.records().enumerate() {
        let record = row(record, TRAINING_TABLE, line)?;
        let label = record.get(label_idx).unwrap_or_default();
        if label.is_empty() {
            return Err(MediError::data(
                TRAINING_TABLE,
                format!("row {} has an empty '{}' value", line + 1, label_column),
            ));
        }

        let cells: Vec<&str> = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, c)| c)
            .collect();
        table.push_row(cells, label);
    }

    Ok(table)
}

/// Read the precaution reference table
pub fn read_precautions<R: Read>(reader: R) -> Result<Vec<PrecautionRecord>> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = headers(&mut csv, PRECAUTION_TABLE)?;

    let disease_idx = find_column(&headers, "Disease")
        .ok_or_else(|| MediError::data(PRECAUTION_TABLE, "missing column 'Disease'"))?;
    let slot_idx: Vec<Option<usize>> = (1..=PRECAUTION_SLOTS)
        .map(|n| find_column(&headers, &format!("Precaution_{}", n)))
        .collect();

    let mut records = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = row(record, PRECAUTION_TABLE, line)?;
        let mut precaution = PrecautionRecord::new(record.get(disease_idx).unwrap_or_default());
        for (slot, idx) in slot_idx.iter().enumerate() {
            if let Some(text) = idx.and_then(|i| record.get(i)) {
                precaution = precaution.with_precaution(slot, text);
            }
        }
        records.push(precaution);
    }

    Ok(records)
}

/// Read the drug reference table
pub fn read_drugs<R: Read>(reader: R) -> Result<Vec<DrugRecord>> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = headers(&mut csv, DRUG_TABLE)?;

    let name_idx = find_column(&headers, "drug_name")
        .ok_or_else(|| MediError::data(DRUG_TABLE, "missing column 'drug_name'"))?;
    let condition_idx = find_column(&headers, "medical_condition")
        .ok_or_else(|| MediError::data(DRUG_TABLE, "missing column 'medical_condition'"))?;
    let type_idx = find_column(&headers, "drug_type");
    let side_effect_idx = find_column(&headers, "common_side_effect");

    let known = [Some(name_idx), Some(condition_idx), type_idx, side_effect_idx];
    let extra_idx: Vec<usize> = (0..headers.len())
        .filter(|i| !known.contains(&Some(*i)))
        .collect();

    let mut records = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = row(record, DRUG_TABLE, line)?;
        let mut drug = DrugRecord::new(
            record.get(name_idx).unwrap_or_default(),
            record.get(condition_idx).unwrap_or_default(),
        );
        drug.drug_type = non_blank(type_idx.and_then(|i| record.get(i)));
        drug.common_side_effect = non_blank(side_effect_idx.and_then(|i| record.get(i)));
        for &i in &extra_idx {
            drug = drug.with_attribute(&headers[i], record.get(i).unwrap_or_default());
        }
        records.push(drug);
    }

    Ok(records)
}

fn headers<R: Read>(csv: &mut csv::Reader<R>, table: &str) -> Result<Vec<String>> {
    let headers = csv
        .headers()
        .map_err(|e| MediError::data(table, format!("unreadable header: {}", e)))?;
    if headers.is_empty() {
        return Err(MediError::data(table, "missing header row"));
    }
    Ok(headers.iter().map(str::to_string).collect())
}

fn row(record: csv::Result<StringRecord>, table: &str, line: usize) -> Result<StringRecord> {
    record.map_err(|e| MediError::data(table, format!("row {}: {}", line + 1, e)))
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYMPTOMS_CSV: &str = "\
FEVER,COUGH,SNEEZING,TYPE
1,1,0,FLU
0,0,1,ALLERGY
";

    #[test]
    fn test_read_training() {
        let table = read_training(SYMPTOMS_CSV.as_bytes(), "TYPE").unwrap();
        assert_eq!(table.feature_names, vec!["FEVER", "COUGH", "SNEEZING"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].cells, vec!["1", "1", "0"]);
        assert_eq!(table.rows[1].label, "ALLERGY");
    }

    #[test]
    fn test_read_training_label_anywhere() {
        let csv = "TYPE,FEVER\nCOVID,1\n";
        let table = read_training(csv.as_bytes(), "type").unwrap();
        assert_eq!(table.feature_names, vec!["FEVER"]);
        assert_eq!(table.rows[0].label, "COVID");
    }

    #[test]
    fn test_read_training_missing_label() {
        let err = read_training("FEVER,COUGH\n1,0\n".as_bytes(), "TYPE").unwrap_err();
        assert!(matches!(err, MediError::DataError { ref table, .. } if table == "symptom"));
    }

    #[test]
    fn test_read_training_ragged_row() {
        let err = read_training("FEVER,TYPE\n1,FLU,extra\n".as_bytes(), "TYPE").unwrap_err();
        assert!(matches!(err, MediError::DataError { .. }));
    }

    #[test]
    fn test_read_precautions() {
        let csv = "\
Disease,Precaution_1,Precaution_2,Precaution_3,Precaution_4
Covid 19,wear mask,,isolate,
";
        let records = read_precautions(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].disease, "Covid 19");
        assert_eq!(records[0].listed(), vec!["wear mask", "isolate"]);
    }

    #[test]
    fn test_read_precautions_partial_columns() {
        let csv = "disease,Precaution_2\nAllergies,avoid pollen\n";
        let records = read_precautions(csv.as_bytes()).unwrap();
        assert_eq!(records[0].precautions[0], None);
        assert_eq!(records[0].precautions[1].as_deref(), Some("avoid pollen"));
    }

    #[test]
    fn test_read_precautions_missing_disease() {
        let err = read_precautions("Name,Precaution_1\nx,y\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Disease"));
    }

    #[test]
    fn test_read_drugs() {
        let csv = "\
drug_name,medical_condition,drug_type,common_side_effect,rating,rx_otc
Loratadine,Allergies,antihistamine,headache,8.1,OTC
Paxlovid,Covid 19,,nausea,7.0,Rx
";
        let drugs = read_drugs(csv.as_bytes()).unwrap();
        assert_eq!(drugs.len(), 2);
        assert_eq!(drugs[0].drug_type.as_deref(), Some("antihistamine"));
        assert_eq!(drugs[1].drug_type, None);
        assert_eq!(drugs[1].common_side_effect.as_deref(), Some("nausea"));
        assert_eq!(drugs[0].extra.len(), 2);
        assert_eq!(drugs[0].extra[0].name, "rating");
        assert_eq!(drugs[1].attribute("rx_otc"), Some("Rx"));
    }

    #[test]
    fn test_read_drugs_missing_condition() {
        let err = read_drugs("drug_name,drug_type\nA,B\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("medical_condition"));
    }

    #[test]
    fn test_dataset_paths_in_dir() {
        let paths = DatasetPaths::in_dir("dataset");
        assert!(paths.symptoms.ends_with(SYMPTOMS_FILE));
        assert!(paths.drugs.ends_with(DRUGS_FILE));
        assert!(paths.precautions.ends_with(PRECAUTIONS_FILE));
    }
}
