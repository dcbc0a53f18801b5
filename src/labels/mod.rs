//! Label normalization
//!
//! Collapses raw dataset labels (`COLD`, `FLU`, ...) into the display
//! categories shared by the classifier and the reference tables.

use std::collections::BTreeMap;

use crate::errors::{MediError, Result};
use crate::types::{ConditionLabel, SymptomRecord};

/// Built-in raw label → display label table
pub const DEFAULT_ALIASES: [(&str, &str); 4] = [
    ("COLD", "Colds & Flu"),
    ("FLU", "Colds & Flu"),
    ("COVID", "Covid 19"),
    ("ALLERGY", "Allergies"),
];

/// Fixed lookup from raw labels to canonical display labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNormalizer {
    aliases: BTreeMap<String, String>,
}

impl Default for LabelNormalizer {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }
}

impl LabelNormalizer {
    /// Normalizer with the built-in table only
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table extended (or overridden) by `extra`
    ///
    /// Fails if any target is itself an alias key, since normalizing a
    /// canonical label must leave it unchanged.
    pub fn with_aliases<I, K, V>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut normalizer = Self::default();
        for (raw, canonical) in extra {
            normalizer.aliases.insert(raw.into(), canonical.into());
        }

        for (raw, canonical) in &normalizer.aliases {
            if raw != canonical && normalizer.aliases.contains_key(canonical) {
                return Err(MediError::ConfigurationError(format!(
                    "label alias '{}' -> '{}' targets another alias key",
                    raw, canonical
                )));
            }
        }

        Ok(normalizer)
    }

    /// Canonical label for `raw`; unknown labels pass through unchanged
    pub fn normalize(&self, raw: &str) -> ConditionLabel {
        match self.aliases.get(raw) {
            Some(canonical) => ConditionLabel::new(canonical.as_str()),
            None => ConditionLabel::new(raw),
        }
    }

    /// Normalize every record's label in place
    pub fn normalize_records(&self, records: &mut [SymptomRecord]) {
        for record in records.iter_mut() {
            record.label = self.normalize(record.label.as_str());
        }
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }
}
