//! Reference joiner: predicted label → precautions and drugs
//!
//! Both lookups are read-only scans in table order. A label with no match
//! yields an empty result, never an error.

pub mod drugs;
pub mod matcher;

pub use drugs::DrugMatches;
pub use matcher::MatchPolicy;

use std::sync::Arc;

use crate::dataset::ReferenceTables;
use crate::types::{DrugRecord, PrecautionRecord};

/// Joins labels against the precaution and drug tables
#[derive(Debug, Clone)]
pub struct ReferenceJoiner {
    tables: Arc<ReferenceTables>,
    policy: MatchPolicy,
}

impl ReferenceJoiner {
    /// Joiner with case-insensitive substring matching
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self::with_policy(tables, MatchPolicy::Substring)
    }

    pub fn with_policy(tables: Arc<ReferenceTables>, policy: MatchPolicy) -> Self {
        Self { tables, policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn tables(&self) -> &Arc<ReferenceTables> {
        &self.tables
    }

    /// First precaution row, in table order, whose disease matches `label`
    pub fn precaution_record(&self, label: &str) -> Option<&PrecautionRecord> {
        self.tables
            .precautions
            .iter()
            .find(|r| self.policy.matches(label, &r.disease))
    }

    /// Up to four precautions for `label`, in column order
    pub fn precautions(&self, label: &str) -> Vec<String> {
        match self.precaution_record(label) {
            Some(record) => record.listed(),
            None => {
                tracing::debug!(label, "no precaution row matched");
                Vec::new()
            }
        }
    }

    /// Every drug row whose condition matches `label`
    pub fn drugs(&self, label: &str) -> DrugMatches {
        let rows: Vec<DrugRecord> = self
            .tables
            .drugs
            .iter()
            .filter(|r| self.policy.matches(label, &r.medical_condition))
            .cloned()
            .collect();
        if rows.is_empty() {
            tracing::debug!(label, "no drug row matched");
        }
        DrugMatches::new(rows)
    }
}
