//! Query-side types: the symptom vector and the prediction it yields

use serde::{Deserialize, Serialize};

use crate::errors::{MediError, Result};
use crate::types::records::ConditionLabel;

/// Ordered symptom presence bits, aligned with the trained feature columns
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymptomVector {
    bits: Vec<bool>,
}

impl SymptomVector {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Vector of `len` absent symptoms
    pub fn empty(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Build a vector from selected symptom names
    ///
    /// Names match feature names case-insensitively, with spaces, dashes
    /// and underscores treated as the same separator.
    pub fn from_selected<S: AsRef<str>>(feature_names: &[String], selected: &[S]) -> Result<Self> {
        let keys: Vec<String> = feature_names.iter().map(|f| symptom_key(f)).collect();
        let mut bits = vec![false; feature_names.len()];

        for name in selected {
            let key = symptom_key(name.as_ref());
            match keys.iter().position(|k| *k == key) {
                Some(idx) => bits[idx] = true,
                None => return Err(MediError::UnknownSymptom(name.as_ref().to_string())),
            }
        }

        Ok(Self { bits })
    }

    /// Parse a comma-separated bit list such as `1,0,1`
    pub fn parse_bits(input: &str) -> Result<Self> {
        let mut bits = Vec::new();
        for part in input.split(',') {
            match part.trim() {
                "1" | "true" => bits.push(true),
                "0" | "false" => bits.push(false),
                "" => continue,
                other => {
                    return Err(MediError::InvalidQuery(format!(
                        "'{}' is not a symptom bit (expected 0 or 1)",
                        other
                    )))
                }
            }
        }
        Ok(Self { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether at least one symptom is present
    pub fn has_any(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn set(&mut self, index: usize, present: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = present;
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Names of the present symptoms
    pub fn selected_names<'a>(&self, feature_names: &'a [String]) -> Vec<&'a str> {
        self.bits
            .iter()
            .zip(feature_names)
            .filter(|(bit, _)| **bit)
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

impl From<Vec<bool>> for SymptomVector {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

/// Comparison key for symptom names
pub fn symptom_key(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Probability assigned to one condition at the reached leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: ConditionLabel,
    pub probability: f64,
}

/// Classifier output for one symptom vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: ConditionLabel,
    /// Leaf class distribution, highest probability first
    pub probabilities: Vec<ClassProbability>,
}

impl PredictionResult {
    /// Probability of the predicted label
    pub fn confidence(&self) -> f64 {
        self.probabilities
            .iter()
            .find(|p| p.label == self.label)
            .map(|p| p.probability)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> Vec<String> {
        vec!["FEVER".to_string(), "DRY_COUGH".to_string(), "SNEEZING".to_string()]
    }

    #[test]
    fn test_from_selected_matches_loosely() {
        let v = SymptomVector::from_selected(&features(), &["fever", "Dry Cough"]).unwrap();
        assert_eq!(v.as_slice(), &[true, true, false]);
    }

    #[test]
    fn test_symptom_key_separators() {
        assert_eq!(symptom_key("dry-cough"), "dry_cough");
        assert_eq!(symptom_key(" Dry Cough "), "dry_cough");
        let v = SymptomVector::from_selected(&features(), &["DRY-COUGH"]).unwrap();
        assert_eq!(v.as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_from_selected_unknown() {
        let err = SymptomVector::from_selected(&features(), &["rash"]).unwrap_err();
        assert!(matches!(err, MediError::UnknownSymptom(name) if name == "rash"));
    }

    #[test]
    fn test_parse_bits() {
        let v = SymptomVector::parse_bits("1, 0,1").unwrap();
        assert_eq!(v.as_slice(), &[true, false, true]);
        assert!(SymptomVector::parse_bits("1,2").is_err());
    }

    #[test]
    fn test_has_any() {
        assert!(!SymptomVector::empty(4).has_any());
        let mut v = SymptomVector::empty(4);
        v.set(2, true);
        assert!(v.has_any());
        assert_eq!(v.get(2), Some(true));
    }

    #[test]
    fn test_selected_names() {
        let v = SymptomVector::new(vec![true, false, true]);
        assert_eq!(v.selected_names(&features()), vec!["FEVER", "SNEEZING"]);
    }

    #[test]
    fn test_confidence() {
        let result = PredictionResult {
            label: ConditionLabel::new("Allergies"),
            probabilities: vec![
                ClassProbability { label: ConditionLabel::new("Allergies"), probability: 0.75 },
                ClassProbability { label: ConditionLabel::new("Covid 19"), probability: 0.25 },
            ],
        };
        assert_eq!(result.confidence(), 0.75);
    }
}
