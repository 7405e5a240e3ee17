//! Baseline values substituted for removed features

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{FidelisError, Result};

/// Reference value substituted for a feature to simulate its absence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Baseline {
    /// The additive identity for every feature
    Zero,
    /// One shared constant for every feature
    Constant(f64),
    /// One reference value per feature position
    PerFeature(Array1<f64>),
}

impl Default for Baseline {
    fn default() -> Self {
        Self::Zero
    }
}

impl Baseline {
    /// Baseline value for the feature at `index`.
    ///
    /// `PerFeature` baselines must be validated against the schema before
    /// indexing.
    pub fn value_for(&self, index: usize) -> f64 {
        match self {
            Baseline::Zero => 0.0,
            Baseline::Constant(value) => *value,
            Baseline::PerFeature(values) => values[index],
        }
    }

    /// Check the baseline against an n-feature schema
    pub fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            Baseline::PerFeature(values) if values.len() != n_features => {
                Err(FidelisError::ShapeError {
                    expected: format!("{} baseline values", n_features),
                    actual: format!("{} baseline values", values.len()),
                })
            }
            _ => Ok(()),
        }
    }
}
