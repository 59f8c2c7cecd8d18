//! Regression models
//!
//! The forecast engine only depends on the trait pair below: anything that can
//! fit feature vectors to prices and predict from feature vectors satisfies the
//! contract. The crate ships a bagged decision-tree ensemble as the default.

use crate::error::Result;
use std::fmt::Debug;

/// A trained regressor mapping feature vectors to predicted prices.
pub trait TrainedRegressor: Debug {
    /// Predict the price for a single feature vector.
    fn predict_one(&self, features: &[f64]) -> f64;

    /// Predict prices for multiple feature vectors, in order.
    fn predict(&self, features: &[Vec<f64>]) -> Vec<f64> {
        features.iter().map(|f| self.predict_one(f)).collect()
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// A regressor that can be fitted to feature/target pairs.
pub trait Regressor: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedRegressor;

    /// Fit the model on feature vectors and their target prices.
    fn fit(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod decision_tree;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use random_forest::{ForestConfig, RandomForest, TrainedRandomForest};
