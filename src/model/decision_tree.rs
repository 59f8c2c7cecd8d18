//! Regression decision tree
//!
//! CART-style tree with mean-squared-error impurity and midpoint thresholds.
//! Splits are deterministic for a fixed seed; the seed only matters when
//! `max_features` restricts the candidate features per split.

use crate::error::{ForecastError, Result};
use crate::model::{Regressor, TrainedRegressor};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// Tree node: internal nodes carry a split, leaves carry the mean target.
#[derive(Debug, Clone)]
struct TreeNode {
    feature_idx: Option<usize>,
    threshold: Option<f64>,
    value: f64,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(value: f64) -> Self {
        Self {
            feature_idx: None,
            threshold: None,
            value,
            left: None,
            right: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Untrained regression tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    name: String,
    config: TreeConfig,
}

/// Trained regression tree
#[derive(Debug, Clone)]
pub struct TrainedDecisionTree {
    name: String,
    root: TreeNode,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            name: format!("Decision Tree (max_depth={})", config.max_depth),
            config,
        }
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl Regressor for DecisionTree {
    type Trained = TrainedDecisionTree;

    fn fit(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Trained> {
        if features.is_empty() {
            return Err(ForecastError::InsufficientHistory(
                "cannot fit a decision tree on zero rows".to_string(),
            ));
        }
        debug_assert_eq!(features.len(), targets.len());

        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let root = build_node(&self.config, features, targets, &indices, 0, &mut rng);

        Ok(TrainedDecisionTree {
            name: self.name.clone(),
            root,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedRegressor for TrainedDecisionTree {
    fn predict_one(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        while !node.is_leaf() {
            let idx = node.feature_idx.expect("internal node has a feature");
            let threshold = node.threshold.expect("internal node has a threshold");
            node = if features[idx] <= threshold {
                node.left.as_ref().expect("internal node has a left child")
            } else {
                node.right.as_ref().expect("internal node has a right child")
            };
        }
        node.value
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}

fn node_mean(targets: &[f64], indices: &[usize]) -> f64 {
    mean(indices.iter().map(|&i| targets[i]), indices.len())
}

fn node_mse(targets: &[f64], indices: &[usize]) -> f64 {
    let m = node_mean(targets, indices);
    mean(
        indices.iter().map(|&i| (targets[i] - m).powi(2)),
        indices.len(),
    )
}

fn build_node(
    config: &TreeConfig,
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    rng: &mut ChaCha8Rng,
) -> TreeNode {
    let impurity = node_mse(targets, indices);

    if depth >= config.max_depth
        || indices.len() < config.min_samples_split
        || impurity < 1e-10
    {
        return TreeNode::leaf(node_mean(targets, indices));
    }

    match find_best_split(config, features, targets, indices, impurity, rng) {
        Some((feature_idx, threshold, left_idx, right_idx)) => {
            if left_idx.len() < config.min_samples_leaf
                || right_idx.len() < config.min_samples_leaf
            {
                return TreeNode::leaf(node_mean(targets, indices));
            }

            let left = build_node(config, features, targets, &left_idx, depth + 1, rng);
            let right = build_node(config, features, targets, &right_idx, depth + 1, rng);

            TreeNode {
                feature_idx: Some(feature_idx),
                threshold: Some(threshold),
                value: node_mean(targets, indices),
                left: Some(Box::new(left)),
                right: Some(Box::new(right)),
            }
        }
        None => TreeNode::leaf(node_mean(targets, indices)),
    }
}

/// Best variance-reducing split over the candidate features, trying midpoints
/// between consecutive unique values as thresholds.
fn find_best_split(
    config: &TreeConfig,
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    parent_impurity: f64,
    rng: &mut ChaCha8Rng,
) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
    let n_features = features[0].len();
    let max_features = config.max_features.unwrap_or(n_features).min(n_features);

    let mut feature_indices: Vec<usize> = (0..n_features).collect();
    if max_features < n_features {
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);
        feature_indices.sort_unstable();
    }

    let mut best_gain = 0.0;
    let mut best_split: Option<(usize, f64, Vec<usize>, Vec<usize>)> = None;

    for &feature_idx in &feature_indices {
        let mut values: Vec<f64> = indices.iter().map(|&i| features[i][feature_idx]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).expect("feature values are not NaN"));
        values.dedup();

        for window in values.windows(2) {
            let threshold = (window[0] + window[1]) / 2.0;

            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| features[i][feature_idx] <= threshold);

            if left_idx.is_empty() || right_idx.is_empty() {
                continue;
            }

            let n_left = left_idx.len() as f64;
            let n_right = right_idx.len() as f64;
            let weighted = (n_left * node_mse(targets, &left_idx)
                + n_right * node_mse(targets, &right_idx))
                / (n_left + n_right);
            let gain = parent_impurity - weighted;

            if gain > best_gain {
                best_gain = gain;
                best_split = Some((feature_idx, threshold, left_idx, right_idx));
            }
        }
    }

    best_split
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn linear_data(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let features: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64 / 10.0]).collect();
        let targets: Vec<f64> = features.iter().map(|f| 2.0 * f[0] + 1.0).collect();
        (features, targets)
    }

    #[test]
    fn fits_a_linear_relationship() {
        let (features, targets) = linear_data(100);
        let tree = DecisionTree::default();
        let trained = tree.fit(&features, &targets).unwrap();

        let predictions = trained.predict(&features);
        assert_eq!(predictions.len(), 100);

        // In-sample fit on smooth data should be close
        let mse: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>()
            / 100.0;
        assert!(mse < 0.5);
    }

    #[test]
    fn constant_targets_produce_a_single_leaf() {
        let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let targets = vec![2000.0; 20];

        let tree = DecisionTree::default();
        let trained = tree.fit(&features, &targets).unwrap();

        assert_approx_eq!(trained.predict_one(&[3.0]), 2000.0);
        assert_approx_eq!(trained.predict_one(&[999.0]), 2000.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        let tree = DecisionTree::default();
        assert!(tree.fit(&[], &[]).is_err());
    }
}
