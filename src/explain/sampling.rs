//! Shapley-sampling attributions over a background dataset

use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{FidelisError, Result};
use crate::explain::Explainer;
use crate::importance::ImportanceMap;
use crate::model::Model;
use crate::schema::FeatureSchema;

/// Monte Carlo Shapley-value explainer.
///
/// Attributions are estimated by drawing random feature permutations,
/// starting each walk from a random background sample and recording the
/// marginal change in the target-class probability as instance features
/// replace background features one at a time. Unseeded runs vary between
/// calls; seed for reproducibility.
pub struct SamplingExplainer<M: Model> {
    model: M,
    schema: FeatureSchema,
    background: Array2<f64>,
    target_class: usize,
    n_samples: usize,
    seed: Option<u64>,
}

impl<M: Model> SamplingExplainer<M> {
    /// Create a new explainer over a background dataset
    pub fn new(model: M, schema: FeatureSchema, background: Array2<f64>) -> Result<Self> {
        if background.nrows() == 0 {
            return Err(FidelisError::EmptyInput(
                "background dataset has no rows".to_string(),
            ));
        }
        if background.ncols() != schema.len() {
            return Err(FidelisError::ShapeError {
                expected: format!("{} background columns", schema.len()),
                actual: format!("{} background columns", background.ncols()),
            });
        }

        Ok(Self {
            model,
            schema,
            background,
            target_class: 0,
            n_samples: 100,
            seed: None,
        })
    }

    /// Set the number of permutation samples (minimum 10)
    pub fn with_n_samples(mut self, n: usize) -> Self {
        self.n_samples = n.max(10);
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the class whose probability is attributed
    pub fn with_target_class(mut self, class: usize) -> Self {
        self.target_class = class;
        self
    }

    fn prob(&self, x: &Array1<f64>) -> Result<f64> {
        let row = self.model.predict_proba_one(x)?;
        row.get(self.target_class).copied().ok_or_else(|| {
            FidelisError::ModelError(format!(
                "target class {} out of range for {} outputs",
                self.target_class,
                row.len()
            ))
        })
    }
}

impl<M: Model> Explainer for SamplingExplainer<M> {
    fn explain(&self, instance: &Array1<f64>) -> Result<ImportanceMap> {
        let n_features = self.schema.len();
        if instance.len() != n_features {
            return Err(FidelisError::ShapeError {
                expected: format!("{} features", n_features),
                actual: format!("{} features", instance.len()),
            });
        }

        let mut rng = match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        let mut contributions = vec![0.0; n_features];

        for _ in 0..self.n_samples {
            let mut perm: Vec<usize> = (0..n_features).collect();
            perm.shuffle(&mut rng);

            let bg_idx = rng.gen_range(0..self.background.nrows());
            let mut current = self.background.row(bg_idx).to_owned();
            let mut pred_before = self.prob(&current)?;

            for &feature_idx in &perm {
                current[feature_idx] = instance[feature_idx];
                let pred_after = self.prob(&current)?;

                contributions[feature_idx] += pred_after - pred_before;
                pred_before = pred_after;
            }
        }

        let mut map = ImportanceMap::new();
        for (idx, total) in contributions.into_iter().enumerate() {
            map.push(
                self.schema.name(idx).unwrap_or_default(),
                total / self.n_samples as f64,
            )?;
        }

        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    use crate::model::LinearModel;

    #[test]
    fn test_additive_model_zero_background_is_exact() {
        // With an all-zero background, every permutation walk attributes
        // exactly w_i * x_i to feature i.
        let model = LinearModel::new(array![1.0, 2.0, 3.0]);
        let schema = FeatureSchema::indexed(3);
        let background = Array2::zeros((4, 3));

        let explainer = SamplingExplainer::new(model, schema, background)
            .unwrap()
            .with_n_samples(20)
            .with_seed(7);

        let map = explainer.explain(&array![1.0, 2.0, 3.0]).unwrap();
        assert!((map.get("f0").unwrap() - 1.0).abs() < 1e-10);
        assert!((map.get("f1").unwrap() - 4.0).abs() < 1e-10);
        assert!((map.get("f2").unwrap() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let background = Array2::from_shape_vec(
            (5, 2),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        )
        .unwrap();
        let instance = array![1.5, -2.0];

        let build = || {
            SamplingExplainer::new(
                LinearModel::new(array![0.5, 1.5]),
                FeatureSchema::indexed(2),
                background.clone(),
            )
            .unwrap()
            .with_n_samples(30)
            .with_seed(42)
        };

        let a = build().explain(&instance).unwrap();
        let b = build().explain(&instance).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_empty_background() {
        let result = SamplingExplainer::new(
            LinearModel::new(array![1.0]),
            FeatureSchema::indexed(1),
            Array2::zeros((0, 1)),
        );
        assert!(matches!(result, Err(FidelisError::EmptyInput(_))));
    }

    #[test]
    fn test_rejects_instance_length_mismatch() {
        let explainer = SamplingExplainer::new(
            LinearModel::new(array![1.0, 1.0]),
            FeatureSchema::indexed(2),
            Array2::zeros((2, 2)),
        )
        .unwrap();

        let result = explainer.explain(&array![1.0]);
        assert!(matches!(result, Err(FidelisError::ShapeError { .. })));
    }
}
