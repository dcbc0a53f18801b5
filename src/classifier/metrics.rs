//! Held-out evaluation

use serde::{Deserialize, Serialize};

use crate::types::ConditionLabel;

/// Accuracy for one condition on the held-out partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAccuracy {
    pub label: ConditionLabel,
    pub correct: usize,
    pub total: usize,
}

impl LabelAccuracy {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Held-out evaluation result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub holdout_size: usize,
    pub correct: usize,
    /// Per-label breakdown, in class order; labels absent from the held-out
    /// partition are omitted
    pub per_label: Vec<LabelAccuracy>,
}

impl EvaluationReport {
    /// Build from (expected, predicted) class index pairs
    pub fn from_pairs(classes: &[ConditionLabel], pairs: &[(usize, usize)]) -> Self {
        let mut correct_by_class = vec![0usize; classes.len()];
        let mut total_by_class = vec![0usize; classes.len()];

        for &(expected, predicted) in pairs {
            total_by_class[expected] += 1;
            if expected == predicted {
                correct_by_class[expected] += 1;
            }
        }

        let per_label = classes
            .iter()
            .enumerate()
            .filter(|(i, _)| total_by_class[*i] > 0)
            .map(|(i, label)| LabelAccuracy {
                label: label.clone(),
                correct: correct_by_class[i],
                total: total_by_class[i],
            })
            .collect();

        Self {
            holdout_size: pairs.len(),
            correct: correct_by_class.iter().sum(),
            per_label,
        }
    }

    /// Overall accuracy; None when nothing was held out
    pub fn accuracy(&self) -> Option<f64> {
        if self.holdout_size == 0 {
            None
        } else {
            Some(self.correct as f64 / self.holdout_size as f64)
        }
    }
}
