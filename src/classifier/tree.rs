//! CART decision tree over boolean features
//!
//! Each internal node tests one symptom: rows without it go to `absent`,
//! rows with it go to `present`. Splits minimize weighted Gini impurity.
//! Features are scanned in column order and the first strictly-best split
//! wins, so fitting is fully deterministic.

use serde::{Deserialize, Serialize};

use crate::errors::{MediError, Result};

/// Growth constraints for the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth (None = grow until leaves are pure)
    pub max_depth: Option<usize>,

    /// Minimum rows a node needs before it may split (default: 2)
    pub min_samples_split: usize,

    /// Minimum rows on each side of a split (default: 1)
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// Tree node stored in a flat arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        /// Training rows per class index
        counts: Vec<usize>,
    },
    Split {
        feature: usize,
        absent: usize,
        present: usize,
        counts: Vec<usize>,
    },
}

impl Node {
    pub fn counts(&self) -> &[usize] {
        match self {
            Node::Leaf { counts } | Node::Split { counts, .. } => counts,
        }
    }
}

/// Fitted decision tree; class indices refer to the caller's label list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
    n_classes: usize,
}

struct Builder<'a> {
    rows: &'a [Vec<bool>],
    labels: &'a [usize],
    n_features: usize,
    n_classes: usize,
    params: TreeParams,
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Fit a tree on `rows` with class indices `labels`
    ///
    /// Callers guarantee `rows` is non-empty, rectangular with `n_features`
    /// columns, and every label is `< n_classes`.
    pub fn fit(
        rows: &[Vec<bool>],
        labels: &[usize],
        n_features: usize,
        n_classes: usize,
        params: TreeParams,
    ) -> Self {
        let mut builder = Builder {
            rows,
            labels,
            n_features,
            n_classes,
            params,
            nodes: Vec::new(),
        };
        let indices: Vec<usize> = (0..rows.len()).collect();
        builder.grow(&indices, 0);

        Self {
            nodes: builder.nodes,
            n_features,
            n_classes,
        }
    }

    /// Class counts of the leaf reached by `row`
    pub fn leaf_counts(&self, row: &[bool]) -> &[usize] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { counts } => return counts,
                Node::Split {
                    feature,
                    absent,
                    present,
                    ..
                } => {
                    idx = if row.get(*feature).copied().unwrap_or(false) {
                        *present
                    } else {
                        *absent
                    };
                }
            }
        }
    }

    /// Majority class index at the reached leaf (ties → lowest index)
    pub fn predict(&self, row: &[bool]) -> usize {
        majority(self.leaf_counts(row))
    }

    /// Class probability distribution at the reached leaf
    pub fn predict_proba(&self, row: &[bool]) -> Vec<f64> {
        let counts = self.leaf_counts(row);
        let total: usize = counts.iter().sum();
        counts
            .iter()
            .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
            .collect()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize) -> usize {
            match &nodes[idx] {
                Node::Leaf { .. } => 0,
                Node::Split { absent, present, .. } => {
                    1 + walk(nodes, *absent).max(walk(nodes, *present))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Check the arena is safe to traverse
    ///
    /// Children must point forward inside the arena, split features must be
    /// in range and every node must carry one count per class.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if self.n_classes == 0 {
            return Err(invalid("tree has no classes".to_string()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if node.counts().len() != self.n_classes {
                return Err(invalid(format!(
                    "node {} has {} class counts, expected {}",
                    idx,
                    node.counts().len(),
                    self.n_classes
                )));
            }

            if let Node::Split {
                feature,
                absent,
                present,
                ..
            } = node
            {
                if *feature >= self.n_features {
                    return Err(invalid(format!(
                        "node {} splits on feature {} of {}",
                        idx, feature, self.n_features
                    )));
                }
                for &child in [absent, present] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(invalid(format!(
                            "node {} has child {} outside {}..{}",
                            idx,
                            child,
                            idx + 1,
                            self.nodes.len()
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(reason: String) -> MediError {
    MediError::ConfigurationError(format!("invalid decision tree: {}", reason))
}

impl<'a> Builder<'a> {
    /// Grow the subtree for `indices`, returning its arena index
    fn grow(&mut self, indices: &[usize], depth: usize) -> usize {
        let counts = self.class_counts(indices);
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            counts: counts.clone(),
        });

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_small = indices.len() < self.params.min_samples_split;
        let too_deep = self.params.max_depth.map_or(false, |max| depth >= max);
        if pure || too_small || too_deep {
            return id;
        }

        let Some(feature) = self.best_feature(indices) else {
            return id;
        };

        let (present_rows, absent_rows): (Vec<usize>, Vec<usize>) =
            indices.iter().partition(|&&i| self.rows[i][feature]);

        let absent = self.grow(&absent_rows, depth + 1);
        let present = self.grow(&present_rows, depth + 1);
        self.nodes[id] = Node::Split {
            feature,
            absent,
            present,
            counts,
        };
        id
    }

    /// Feature with the lowest weighted child impurity, if any separates rows
    fn best_feature(&self, indices: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        let n = indices.len() as f64;

        for feature in 0..self.n_features {
            let mut present = vec![0usize; self.n_classes];
            let mut absent = vec![0usize; self.n_classes];
            for &i in indices {
                if self.rows[i][feature] {
                    present[self.labels[i]] += 1;
                } else {
                    absent[self.labels[i]] += 1;
                }
            }

            let n_present: usize = present.iter().sum();
            let n_absent: usize = absent.iter().sum();
            let min_leaf = self.params.min_samples_leaf.max(1);
            if n_present < min_leaf || n_absent < min_leaf {
                continue;
            }

            let impurity = (n_present as f64 * gini(&present) + n_absent as f64 * gini(&absent)) / n;
            if best.map_or(true, |(_, b)| impurity < b) {
                best = Some((feature, impurity));
            }
        }

        best.map(|(feature, _)| feature)
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }
}

/// Gini impurity of a class count vector
pub fn gini(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count, lowest index on ties
pub fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}
