//! Seeded random-forest regressor.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ModelError;
use crate::tree::RegressionTree;

/// Forest hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestConfig {
    /// Number of bootstrap trees.
    pub n_trees: usize,
    /// Maximum split depth per tree.
    pub max_depth: usize,
    /// Seed for bootstrap resampling; fixed seed gives fixed fits.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self { n_trees: 50, max_depth: 10, seed: 42 }
    }
}

/// A fitted forest: bagged regression trees plus normalized per-feature
/// importances.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    importances: Vec<f64>,
    n_features: usize,
}

impl RandomForest {
    /// Fit `config.n_trees` trees, each on a bootstrap resample of the
    /// rows of `x`. Importances are squared-error reductions summed over
    /// all splits, normalized to sum to one (all zeros when no tree
    /// found a useful split).
    ///
    /// # Errors
    /// [`ModelError::InsufficientData`] when `x` has no rows or no
    /// columns, or [`ModelError::DimensionMismatch`] when `y` is not
    /// row-aligned with `x`.
    pub fn fit(x: &Array2<f64>, y: &[f64], config: &ForestConfig) -> Result<Self, ModelError> {
        let n = x.nrows();
        if n == 0 || x.ncols() == 0 {
            return Err(ModelError::InsufficientData);
        }
        if y.len() != n {
            return Err(ModelError::DimensionMismatch { expected: n, actual: y.len() });
        }

        let targets = ndarray::ArrayView1::from(y);
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut importances = vec![0.0; x.ncols()];
        let mut trees = Vec::with_capacity(config.n_trees);

        for _ in 0..config.n_trees {
            let rows: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            trees.push(RegressionTree::fit(
                x.view(),
                targets,
                &rows,
                config.max_depth,
                &mut importances,
            ));
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for v in &mut importances {
                *v /= total;
            }
        }

        Ok(Self { trees, importances, n_features: x.ncols() })
    }

    /// Mean prediction over all trees.
    ///
    /// # Errors
    /// [`ModelError::DimensionMismatch`] when `features` has the wrong
    /// length.
    pub fn predict(&self, features: ArrayView1<'_, f64>) -> Result<f64, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    /// Normalized importances, one per feature column of the training
    /// matrix.
    #[must_use]
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    use super::*;

    fn synthetic(n: usize) -> (Array2<f64>, Vec<f64>) {
        // y depends on feature 0 only; feature 1 is noise-free but inert.
        let mut x = Array2::zeros((n, 2));
        let mut y = Vec::with_capacity(n);
        for i in 0..n {
            let v = i as f64 / n as f64;
            x[[i, 0]] = v;
            x[[i, 1]] = ((i * 7919) % 31) as f64;
            y.push(if v < 0.5 { -1.0 } else { 1.0 });
        }
        (x, y)
    }

    #[test]
    fn same_seed_gives_identical_fits() {
        let (x, y) = synthetic(200);
        let config = ForestConfig::default();
        let a = RandomForest::fit(&x, &y, &config).unwrap();
        let b = RandomForest::fit(&x, &y, &config).unwrap();
        let q = array![0.25, 3.0];
        assert_relative_eq!(a.predict(q.view()).unwrap(), b.predict(q.view()).unwrap());
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn learns_a_step_function() {
        let (x, y) = synthetic(200);
        let forest = RandomForest::fit(&x, &y, &ForestConfig::default()).unwrap();
        assert!(forest.predict(array![0.1, 0.0].view()).unwrap() < -0.5);
        assert!(forest.predict(array![0.9, 0.0].view()).unwrap() > 0.5);
    }

    #[test]
    fn importances_are_normalized_and_concentrated() {
        let (x, y) = synthetic(200);
        let forest = RandomForest::fit(&x, &y, &ForestConfig::default()).unwrap();
        let imp = forest.feature_importances();
        assert_relative_eq!(imp.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(imp[0] > imp[1]);
    }

    #[test]
    fn empty_input_is_rejected() {
        let x = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            RandomForest::fit(&x, &[], &ForestConfig::default()),
            Err(ModelError::InsufficientData)
        ));
    }

    #[test]
    fn misaligned_target_is_rejected() {
        let x = array![[1.0], [2.0]];
        assert!(matches!(
            RandomForest::fit(&x, &[1.0], &ForestConfig::default()),
            Err(ModelError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn wrong_query_length_is_rejected() {
        let (x, y) = synthetic(50);
        let forest = RandomForest::fit(&x, &y, &ForestConfig::default()).unwrap();
        assert!(matches!(
            forest.predict(array![1.0].view()),
            Err(ModelError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }
}
