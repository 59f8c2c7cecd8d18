//! Bagged decision-tree ensemble
//!
//! Each tree trains on a seeded bootstrap sample of the training rows; the
//! ensemble prediction is the mean of the tree outputs. Per-tree seeds derive
//! from the base seed, so a fixed seed reproduces the forest exactly.

use crate::error::{ForecastError, Result};
use crate::model::decision_tree::{DecisionTree, TreeConfig};
use crate::model::{Regressor, TrainedRegressor};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Bootstrap-sample the training rows per tree
    pub bootstrap: bool,
    /// Base random seed; tree i uses `seed + i`
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Untrained bagged-tree ensemble
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    config: ForestConfig,
}

/// Trained bagged-tree ensemble
#[derive(Debug)]
pub struct TrainedRandomForest {
    name: String,
    trees: Vec<<DecisionTree as Regressor>::Trained>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            name: format!("Random Forest (n_trees={}, seed={})", config.n_trees, config.seed),
            config,
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Regressor for RandomForest {
    type Trained = TrainedRandomForest;

    fn fit(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Trained> {
        if features.is_empty() {
            return Err(ForecastError::InsufficientHistory(
                "cannot fit a random forest on zero rows".to_string(),
            ));
        }
        debug_assert_eq!(features.len(), targets.len());

        let mut trees = Vec::with_capacity(self.config.n_trees);
        for i in 0..self.config.n_trees {
            let seed = self.config.seed.wrapping_add(i as u64);
            let tree = DecisionTree::new(TreeConfig {
                max_depth: self.config.max_depth,
                min_samples_split: self.config.min_samples_split,
                min_samples_leaf: self.config.min_samples_leaf,
                max_features: self.config.max_features,
                seed,
            });

            let trained = if self.config.bootstrap {
                let (sample_x, sample_y) = bootstrap_sample(features, targets, seed);
                tree.fit(&sample_x, &sample_y)?
            } else {
                tree.fit(features, targets)?
            };

            trees.push(trained);
        }

        Ok(TrainedRandomForest {
            name: self.name.clone(),
            trees,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedRandomForest {
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl TrainedRegressor for TrainedRandomForest {
    fn predict_one(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        sum / self.trees.len() as f64
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Draw a seeded sample with replacement, same size as the input.
fn bootstrap_sample(
    features: &[Vec<f64>],
    targets: &[f64],
    seed: u64,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = features.len();

    let mut sample_x = Vec::with_capacity(n);
    let mut sample_y = Vec::with_capacity(n);
    for _ in 0..n {
        let idx = rng.gen_range(0..n);
        sample_x.push(features[idx].clone());
        sample_y.push(targets[idx]);
    }

    (sample_x, sample_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn noisy_trend(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let features: Vec<Vec<f64>> = (0..n)
            .map(|i| vec![i as f64 / 20.0, ((i as f64) / 10.0).sin()])
            .collect();
        let targets: Vec<f64> = features
            .iter()
            .enumerate()
            .map(|(i, f)| f[0] + 2.0 * f[1] + 0.1 * (i % 5) as f64)
            .collect();
        (features, targets)
    }

    #[test]
    fn trains_the_configured_number_of_trees() {
        let (features, targets) = noisy_trend(200);
        let forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            max_depth: 5,
            ..Default::default()
        });

        let trained = forest.fit(&features, &targets).unwrap();
        assert_eq!(trained.n_trees(), 10);
        assert_eq!(trained.predict(&features).len(), 200);
    }

    #[test]
    fn identical_seeds_reproduce_predictions() {
        let (features, targets) = noisy_trend(100);
        let config = ForestConfig {
            n_trees: 5,
            ..Default::default()
        };

        let a = RandomForest::new(config.clone())
            .fit(&features, &targets)
            .unwrap();
        let b = RandomForest::new(config).fit(&features, &targets).unwrap();

        for row in &features {
            assert_eq!(a.predict_one(row), b.predict_one(row));
        }
    }

    #[test]
    fn different_seeds_change_the_forest() {
        let (features, targets) = noisy_trend(100);
        let a = RandomForest::new(ForestConfig {
            n_trees: 5,
            seed: 42,
            ..Default::default()
        })
        .fit(&features, &targets)
        .unwrap();
        let b = RandomForest::new(ForestConfig {
            n_trees: 5,
            seed: 7,
            ..Default::default()
        })
        .fit(&features, &targets)
        .unwrap();

        let differs = features
            .iter()
            .any(|row| a.predict_one(row) != b.predict_one(row));
        assert!(differs);
    }

    #[test]
    fn flat_targets_predict_flat() {
        let features: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (i * 3) as f64]).collect();
        let targets = vec![2000.0; 30];

        let forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            ..Default::default()
        });
        let trained = forest.fit(&features, &targets).unwrap();

        assert_approx_eq!(trained.predict_one(&[5.0, 15.0]), 2000.0);
    }
}
