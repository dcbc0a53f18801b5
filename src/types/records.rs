//! Record types for the training corpus and the reference tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical display name for a health condition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionLabel(String);

impl ConditionLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ConditionLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl AsRef<str> for ConditionLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One training row: symptom presence bits plus its condition label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRecord {
    /// One entry per feature column, in column order
    pub symptoms: Vec<bool>,
    pub label: ConditionLabel,
}

impl SymptomRecord {
    pub fn new(symptoms: Vec<bool>, label: impl Into<ConditionLabel>) -> Self {
        Self {
            symptoms,
            label: label.into(),
        }
    }
}

/// Number of precaution columns carried by the precaution table
pub const PRECAUTION_SLOTS: usize = 4;

/// Precautions recommended for one disease
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrecautionRecord {
    pub disease: String,
    /// Precaution_1..Precaution_4; `None` where the cell is absent or blank
    pub precautions: [Option<String>; PRECAUTION_SLOTS],
}

impl PrecautionRecord {
    pub fn new(disease: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
            precautions: Default::default(),
        }
    }

    /// Set precaution slot `index` (0-based); blank text clears the slot
    pub fn with_precaution(mut self, index: usize, text: impl Into<String>) -> Self {
        if index < PRECAUTION_SLOTS {
            let text = text.into();
            let trimmed = text.trim();
            self.precautions[index] = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
        self
    }

    /// Present precautions in slot order
    pub fn listed(&self) -> Vec<String> {
        self.precautions.iter().flatten().cloned().collect()
    }
}

/// Extra drug column carried through from the drug table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugAttribute {
    pub name: String,
    pub value: String,
}

/// One row of the drug reference table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrugRecord {
    pub drug_name: String,
    pub medical_condition: String,
    pub drug_type: Option<String>,
    pub common_side_effect: Option<String>,
    /// Remaining columns, in table column order
    pub extra: Vec<DrugAttribute>,
}

impl DrugRecord {
    pub fn new(drug_name: impl Into<String>, medical_condition: impl Into<String>) -> Self {
        Self {
            drug_name: drug_name.into(),
            medical_condition: medical_condition.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, drug_type: impl Into<String>) -> Self {
        self.drug_type = Some(drug_type.into());
        self
    }

    pub fn with_side_effect(mut self, side_effect: impl Into<String>) -> Self {
        self.common_side_effect = Some(side_effect.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push(DrugAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Look up an extra attribute by column name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_label_display() {
        let label = ConditionLabel::new("Covid 19");
        assert_eq!(label.to_string(), "Covid 19");
        assert_eq!(label.as_str(), "Covid 19");
    }

    #[test]
    fn test_condition_label_serializes_as_string() {
        let label = ConditionLabel::new("Allergies");
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"Allergies\"");
    }

    #[test]
    fn test_precaution_listed_skips_blanks() {
        let record = PrecautionRecord::new("Covid 19")
            .with_precaution(0, "wear mask")
            .with_precaution(1, "   ")
            .with_precaution(3, "rest");
        assert_eq!(record.listed(), vec!["wear mask", "rest"]);
    }

    #[test]
    fn test_precaution_out_of_range_ignored() {
        let record = PrecautionRecord::new("Flu").with_precaution(7, "ignored");
        assert!(record.listed().is_empty());
    }

    #[test]
    fn test_drug_attribute_lookup() {
        let drug = DrugRecord::new("Paxlovid", "Covid 19")
            .with_attribute("rating", "7.5")
            .with_attribute("rx_otc", "Rx");
        assert_eq!(drug.attribute("rx_otc"), Some("Rx"));
        assert_eq!(drug.attribute("missing"), None);
        assert_eq!(drug.extra[0].name, "rating");
    }
}
