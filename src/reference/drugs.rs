//! Drug lookup result

use serde::{Deserialize, Serialize};

use crate::types::DrugRecord;

/// Drug rows matching one condition, in table order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrugMatches {
    rows: Vec<DrugRecord>,
}

impl DrugMatches {
    pub fn new(rows: Vec<DrugRecord>) -> Self {
        Self { rows }
    }

    /// Drug names for selection, deduplicated in first-seen order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.drug_name.as_str()) {
                names.push(&row.drug_name);
            }
        }
        names
    }

    /// Full detail for a drug: its first matching row
    pub fn detail(&self, drug_name: &str) -> Option<&DrugRecord> {
        self.rows.iter().find(|r| r.drug_name == drug_name)
    }

    pub fn rows(&self) -> &[DrugRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
