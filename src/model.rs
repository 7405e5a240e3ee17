//! Model collaborator contract and adapters

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{FidelisError, Result};

/// Trait for probabilistic classifiers under evaluation
pub trait Model: Send + Sync {
    /// Predict per-class probabilities for a batch of instances.
    ///
    /// Each output row holds one probability per class for the matching
    /// input row.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Predict per-class probabilities for a single instance
    fn predict_proba_one(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        let batch = x.clone().insert_axis(Axis(0));
        let out = self.predict_proba(&batch)?;
        if out.nrows() != 1 {
            return Err(FidelisError::ModelError(format!(
                "expected 1 output row for a single instance, got {}",
                out.nrows()
            )));
        }
        Ok(out.row(0).to_owned())
    }
}

impl<M: Model + ?Sized> Model for &M {
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        (**self).predict_proba(x)
    }
}

/// Adapter implementing [`Model`] for a plain prediction closure
pub struct FnModel<F>
where
    F: Fn(&Array2<f64>) -> Result<Array2<f64>> + Send + Sync,
{
    predict_fn: F,
}

impl<F> FnModel<F>
where
    F: Fn(&Array2<f64>) -> Result<Array2<f64>> + Send + Sync,
{
    /// Wrap a prediction closure
    pub fn new(predict_fn: F) -> Self {
        Self { predict_fn }
    }
}

impl<F> Model for FnModel<F>
where
    F: Fn(&Array2<f64>) -> Result<Array2<f64>> + Send + Sync,
{
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        (self.predict_fn)(x)
    }
}

/// Linear scorer emitting a single probability-like column `w·x + b`.
///
/// A synthetic stand-in for tests, demos, and benches. Its additive form
/// makes fidelity exact: removing a set of features lowers the score by
/// exactly the sum of their `w_i * x_i` terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LinearModel {
    /// Create a linear model with zero bias
    pub fn new(weights: Array1<f64>) -> Self {
        Self { weights, bias: 0.0 }
    }

    /// Set the bias term
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    /// Number of input features
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

impl Model for LinearModel {
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.weights.len() {
            return Err(FidelisError::ShapeError {
                expected: format!("{} features", self.weights.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        let scores = x.dot(&self.weights) + self.bias;
        Ok(scores.insert_axis(Axis(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_linear_model_scores() {
        let model = LinearModel::new(array![1.0, 2.0, 0.0]);
        let x = array![[2.0, 3.0, 5.0]];

        let out = model.predict_proba(&x).unwrap();
        assert_eq!(out.shape(), &[1, 1]);
        assert_eq!(out[[0, 0]], 8.0);
    }

    #[test]
    fn test_linear_model_with_bias() {
        let model = LinearModel::new(array![1.0]).with_bias(0.5);
        let out = model.predict_proba_one(&array![2.0]).unwrap();
        assert_eq!(out[0], 2.5);
    }

    #[test]
    fn test_linear_model_shape_mismatch() {
        let model = LinearModel::new(array![1.0, 2.0]);
        let result = model.predict_proba(&array![[1.0, 2.0, 3.0]]);
        assert!(matches!(result, Err(FidelisError::ShapeError { .. })));
    }

    #[test]
    fn test_fn_model() {
        let model = FnModel::new(|x: &Array2<f64>| Ok(x.clone()));
        let out = model.predict_proba_one(&array![0.2, 0.8]).unwrap();
        assert_eq!(out, array![0.2, 0.8]);
    }
}
