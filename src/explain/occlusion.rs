//! Single-feature occlusion attributions

use ndarray::{Array1, Array2};

use crate::error::{FidelisError, Result};
use crate::explain::Explainer;
use crate::fidelity::Baseline;
use crate::importance::ImportanceMap;
use crate::model::Model;
use crate::schema::FeatureSchema;

/// Occlusion explainer.
///
/// The attribution for feature i is `p(x) − p(x with x_i replaced by the
/// baseline value)`: features whose removal lowers the target-class
/// probability score positive. Deterministic, one batched model call per
/// explanation.
pub struct OcclusionExplainer<M: Model> {
    model: M,
    schema: FeatureSchema,
    baseline: Baseline,
    target_class: usize,
}

impl<M: Model> OcclusionExplainer<M> {
    /// Create a new occlusion explainer with a zero baseline
    pub fn new(model: M, schema: FeatureSchema) -> Self {
        Self {
            model,
            schema,
            baseline: Baseline::Zero,
            target_class: 0,
        }
    }

    /// Set the baseline substituted for each occluded feature
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set the class whose probability is attributed
    pub fn with_target_class(mut self, class: usize) -> Self {
        self.target_class = class;
        self
    }
}

impl<M: Model> Explainer for OcclusionExplainer<M> {
    fn explain(&self, instance: &Array1<f64>) -> Result<ImportanceMap> {
        let n_features = self.schema.len();
        if instance.len() != n_features {
            return Err(FidelisError::ShapeError {
                expected: format!("{} features", n_features),
                actual: format!("{} features", instance.len()),
            });
        }
        self.baseline.validate(n_features)?;

        // One batch: the original instance followed by one occluded copy
        // per feature.
        let mut batch = Array2::zeros((n_features + 1, n_features));
        batch.row_mut(0).assign(instance);
        for i in 0..n_features {
            let mut row = batch.row_mut(i + 1);
            row.assign(instance);
            row[i] = self.baseline.value_for(i);
        }

        let probs = self.model.predict_proba(&batch)?;
        if probs.nrows() != n_features + 1 {
            return Err(FidelisError::ModelError(format!(
                "expected {} output rows, got {}",
                n_features + 1,
                probs.nrows()
            )));
        }
        if self.target_class >= probs.ncols() {
            return Err(FidelisError::ModelError(format!(
                "target class {} out of range for {} outputs",
                self.target_class,
                probs.ncols()
            )));
        }

        let original = probs[[0, self.target_class]];
        let mut map = ImportanceMap::new();
        for i in 0..n_features {
            let occluded = probs[[i + 1, self.target_class]];
            map.push(self.schema.name(i).unwrap_or_default(), original - occluded)?;
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
    fn test_linear_attributions_are_exact() {
        // For w·x with a zero baseline, occluding feature i drops the
        // score by exactly w_i * x_i.
        let model = LinearModel::new(array![1.0, 2.0, 0.0]);
        let schema = FeatureSchema::indexed(3);
        let explainer = OcclusionExplainer::new(model, schema);

        let map = explainer.explain(&array![2.0, 3.0, 5.0]).unwrap();
        assert_eq!(map.get("f0"), Some(2.0));
        assert_eq!(map.get("f1"), Some(6.0));
        assert_eq!(map.get("f2"), Some(0.0));
    }

    #[test]
    fn test_deterministic() {
        let model = LinearModel::new(array![0.3, -0.7]);
        let schema = FeatureSchema::indexed(2);
        let explainer = OcclusionExplainer::new(model, schema);

        let x = array![1.0, 2.0];
        assert_eq!(explainer.explain(&x).unwrap(), explainer.explain(&x).unwrap());
    }

    #[test]
    fn test_per_feature_baseline() {
        let model = LinearModel::new(array![1.0, 1.0]);
        let schema = FeatureSchema::indexed(2);
        let explainer = OcclusionExplainer::new(model, schema)
            .with_baseline(Baseline::PerFeature(array![1.0, 0.0]));

        let map = explainer.explain(&array![3.0, 4.0]).unwrap();
        // Occluding f0 replaces 3.0 with 1.0: drop of 2.0
        assert_eq!(map.get("f0"), Some(2.0));
        assert_eq!(map.get("f1"), Some(4.0));
    }

    #[test]
    fn test_baseline_length_mismatch() {
        let model = LinearModel::new(array![1.0, 1.0]);
        let schema = FeatureSchema::indexed(2);
        let explainer = OcclusionExplainer::new(model, schema)
            .with_baseline(Baseline::PerFeature(array![0.0]));

        let result = explainer.explain(&array![1.0, 2.0]);
        assert!(matches!(result, Err(FidelisError::ShapeError { .. })));
    }
}
