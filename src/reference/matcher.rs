//! Text matching between predicted labels and reference table keys

use serde::{Deserialize, Serialize};

/// How a label is compared against a reference key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Key contains the label, ignoring case
    #[default]
    Substring,
    /// Key equals the label, ignoring case and surrounding whitespace
    Exact,
}

impl MatchPolicy {
    /// Whether `key` matches `label`; blank keys or labels never match
    pub fn matches(&self, label: &str, key: &str) -> bool {
        let label = label.trim();
        let key = key.trim();
        if label.is_empty() || key.is_empty() {
            return false;
        }

        let label = label.to_lowercase();
        let key = key.to_lowercase();
        match self {
            MatchPolicy::Substring => key.contains(&label),
            MatchPolicy::Exact => key == label,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::Substring => "substring",
            MatchPolicy::Exact => "exact",
        }
    }
}
