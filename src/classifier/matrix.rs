//! Feature matrix construction and cell coercion

use serde::{Deserialize, Serialize};

use crate::dataset::TrainingTable;
use crate::errors::{MediError, Result};
use crate::types::SymptomRecord;

/// Boolean feature matrix with one label per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub feature_names: Vec<String>,
    pub records: Vec<SymptomRecord>,
}

impl TrainingSet {
    /// Validate an already-boolean matrix
    pub fn new(feature_names: Vec<String>, records: Vec<SymptomRecord>) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(MediError::ConfigurationError(
                "feature matrix has no symptom columns".to_string(),
            ));
        }
        if records.is_empty() {
            return Err(MediError::ConfigurationError(
                "feature matrix has no rows".to_string(),
            ));
        }
        if let Some((row, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.symptoms.len() != feature_names.len())
        {
            return Err(MediError::ConfigurationError(format!(
                "row {} has {} symptom values, expected {}",
                row + 1,
                record.symptoms.len(),
                feature_names.len()
            )));
        }

        Ok(Self {
            feature_names,
            records,
        })
    }

    /// Coerce a raw table into a boolean matrix
    pub fn from_table(table: &TrainingTable) -> Result<Self> {
        let mut records = Vec::with_capacity(table.len());

        for (row, raw) in table.rows.iter().enumerate() {
            let mut symptoms = Vec::with_capacity(raw.cells.len());
            for (col, cell) in raw.cells.iter().enumerate() {
                let value = coerce_cell(cell).ok_or_else(|| {
                    let column = table
                        .feature_names
                        .get(col)
                        .map(String::as_str)
                        .unwrap_or("?");
                    MediError::ConfigurationError(format!(
                        "column '{}' row {}: '{}' is not boolean or numeric",
                        column,
                        row + 1,
                        cell
                    ))
                })?;
                symptoms.push(value);
            }
            records.push(SymptomRecord::new(symptoms, raw.label.as_str()));
        }

        Self::new(table.feature_names.clone(), records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

/// Read a cell as symptom presence
///
/// Accepts numbers (non-zero is present), `true`/`false` and `yes`/`no`.
pub fn coerce_cell(cell: &str) -> Option<bool> {
    let cell = cell.trim();
    match cell.to_ascii_lowercase().as_str() {
        "true" | "yes" => return Some(true),
        "false" | "no" => return Some(false),
        _ => {}
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .map(|v| v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_cell() {
        assert_eq!(coerce_cell("1"), Some(true));
        assert_eq!(coerce_cell("0"), Some(false));
        assert_eq!(coerce_cell("0.0"), Some(false));
        assert_eq!(coerce_cell("2"), Some(true));
        assert_eq!(coerce_cell(" TRUE "), Some(true));
        assert_eq!(coerce_cell("no"), Some(false));
        assert_eq!(coerce_cell("maybe"), None);
        assert_eq!(coerce_cell(""), None);
        assert_eq!(coerce_cell("NaN"), None);
    }

    #[test]
    fn test_from_table() {
        let mut table = TrainingTable::new(vec!["FEVER".to_string(), "COUGH".to_string()]);
        table.push_row(vec!["1", "0"], "FLU");
        table.push_row(vec!["yes", "true"], "COVID");

        let set = TrainingSet::from_table(&table).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0].symptoms, vec![true, false]);
        assert_eq!(set.records[1].symptoms, vec![true, true]);
    }

    #[test]
    fn test_from_table_rejects_text_column() {
        let mut table = TrainingTable::new(vec!["FEVER".to_string(), "NOTES".to_string()]);
        table.push_row(vec!["1", "feels bad"], "FLU");

        let err = TrainingSet::from_table(&table).unwrap_err();
        assert!(matches!(err, MediError::ConfigurationError(ref msg) if msg.contains("NOTES")));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let table = TrainingTable::new(vec!["FEVER".to_string()]);
        assert!(matches!(
            TrainingSet::from_table(&table),
            Err(MediError::ConfigurationError(_))
        ));

        let records = vec![SymptomRecord::new(vec![], "FLU")];
        assert!(TrainingSet::new(vec![], records).is_err());
    }
}
