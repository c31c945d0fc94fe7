//! Random Forest Classifier
//!
//! Inference-only forest deserialized from a JSON artifact exported after
//! training. Split nodes route left when `x <= threshold`; leaves hold
//! per-class weights. Forest probability is the mean of the per-tree
//! class-1 share.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Classifier, InferenceError, LoadError};
use crate::logic::reading::layout::{validate_layout, FEATURE_COUNT};
use crate::logic::reading::{FeatureRow, FeatureValue};

/// Supported artifact format version
pub const FORMAT_VERSION: u32 = 1;

/// Label of the "at-risk" class
pub const POSITIVE_CLASS: i64 = 1;

// ============================================================================
// ARTIFACT SCHEMA
// ============================================================================

/// On-disk forest artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format_version: u32,
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    /// Ordinal encoding per categorical column: index in list = code
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
    pub trees: Vec<TreeArtifact>,
}

fn default_model_type() -> String {
    "random_forest".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct ForestClassifier {
    model_type: String,
    feature_names: Vec<String>,
    /// Per column: category list if categorical
    encoders: Vec<Option<Vec<String>>>,
    positive_index: usize,
    trees: Vec<TreeArtifact>,
}

impl ForestClassifier {
    /// Validate an artifact and build the classifier
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, LoadError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(LoadError::Unsupported(format!(
                "forest format_version {} (expected {})",
                artifact.format_version, FORMAT_VERSION
            )));
        }

        validate_layout(&artifact.feature_names)?;

        if artifact.classes.len() != 2 {
            return Err(LoadError::Invalid(format!(
                "binary classifier expected, got {} classes",
                artifact.classes.len()
            )));
        }
        let positive_index = artifact
            .classes
            .iter()
            .position(|&c| c == POSITIVE_CLASS)
            .ok_or_else(|| LoadError::Invalid(format!("class {} not in classes", POSITIVE_CLASS)))?;

        let mut encoders: Vec<Option<Vec<String>>> = vec![None; FEATURE_COUNT];
        for (column, labels) in &artifact.categories {
            let index = artifact
                .feature_names
                .iter()
                .position(|n| n == column)
                .ok_or_else(|| LoadError::Invalid(format!("categories for unknown column '{}'", column)))?;
            if labels.is_empty() {
                return Err(LoadError::Invalid(format!("empty category list for '{}'", column)));
            }
            encoders[index] = Some(labels.clone());
        }

        if artifact.trees.is_empty() {
            return Err(LoadError::Invalid("forest has no trees".to_string()));
        }
        for (t, tree) in artifact.trees.iter().enumerate() {
            validate_tree(t, tree, artifact.classes.len())?;
        }

        Ok(Self {
            model_type: artifact.model_type,
            feature_names: artifact.feature_names,
            encoders,
            positive_index,
            trees: artifact.trees,
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    /// Encode one row into the numeric vector the trees split on
    fn encode(&self, row: &FeatureRow) -> Result<[f64; FEATURE_COUNT], InferenceError> {
        let mut x = [0.0f64; FEATURE_COUNT];

        for (i, slot) in x.iter_mut().enumerate() {
            let value = row.get(i).ok_or(InferenceError::MissingFeature { index: i })?;
            let feature = &self.feature_names[i];

            *slot = match (&self.encoders[i], value) {
                (Some(labels), FeatureValue::Category(label)) => labels
                    .iter()
                    .position(|l| l == label)
                    .map(|code| code as f64)
                    .ok_or_else(|| InferenceError::UnknownCategory {
                        feature: feature.clone(),
                        value: label.clone(),
                    })?,
                (Some(_), FeatureValue::Number(v)) => {
                    return Err(InferenceError::UnknownCategory {
                        feature: feature.clone(),
                        value: v.to_string(),
                    })
                }
                (None, FeatureValue::Number(v)) => *v,
                (None, FeatureValue::Category(_)) => {
                    return Err(InferenceError::NotNumeric { feature: feature.clone() })
                }
            };
        }

        Ok(x)
    }
}

fn validate_tree(t: usize, tree: &TreeArtifact, n_classes: usize) -> Result<(), LoadError> {
    let len = tree.nodes.len();
    if len == 0 {
        return Err(LoadError::Invalid(format!("tree {} has no nodes", t)));
    }

    for (i, node) in tree.nodes.iter().enumerate() {
        match node {
            Node::Split { feature, threshold, left, right } => {
                if *feature >= FEATURE_COUNT {
                    return Err(LoadError::Invalid(format!(
                        "tree {} node {}: feature index {} out of range",
                        t, i, feature
                    )));
                }
                if !threshold.is_finite() {
                    return Err(LoadError::Invalid(format!(
                        "tree {} node {}: non-finite threshold",
                        t, i
                    )));
                }
                // Children must point forward so traversal always terminates
                for child in [*left, *right] {
                    if child <= i || child >= len {
                        return Err(LoadError::Invalid(format!(
                            "tree {} node {}: child index {} invalid",
                            t, i, child
                        )));
                    }
                }
            }
            Node::Leaf { value } => {
                if value.len() != n_classes {
                    return Err(LoadError::Invalid(format!(
                        "tree {} node {}: leaf has {} weights, expected {}",
                        t, i, value.len(), n_classes
                    )));
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(LoadError::Invalid(format!(
                        "tree {} node {}: leaf weights must be finite and non-negative",
                        t, i
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Walk one tree to its leaf: (node index, class weights)
fn leaf_for<'a>(tree: &'a TreeArtifact, x: &[f64; FEATURE_COUNT]) -> (usize, &'a [f64]) {
    let mut idx = 0;
    loop {
        match &tree.nodes[idx] {
            Node::Split { feature, threshold, left, right } => {
                idx = if x[*feature] <= *threshold { *left } else { *right };
            }
            Node::Leaf { value } => return (idx, value),
        }
    }
}

impl Classifier for ForestClassifier {
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let x = self.encode(row)?;

        let mut sum = 0.0;
        for (t, tree) in self.trees.iter().enumerate() {
            let (node, weights) = leaf_for(tree, &x);
            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                return Err(InferenceError::EmptyLeaf { tree: t, node });
            }
            sum += weights[self.positive_index] / total;
        }

        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

// ============================================================================
// TESTS
// ============================================================================
