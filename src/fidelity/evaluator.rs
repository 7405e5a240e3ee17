//! Remove-and-measure fidelity scoring

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FidelisError, Result};
use crate::explain::Explainer;
use crate::fidelity::Baseline;
use crate::importance::ImportanceMap;
use crate::model::Model;
use crate::schema::FeatureSchema;

/// Which class probability the evaluator differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetClass {
    /// Argmax of the model output on the original instance; the same
    /// class index is then read from the perturbed output
    Predicted,
    /// A fixed class index (one-vs-rest reading)
    Index(usize),
}

impl Default for TargetClass {
    fn default() -> Self {
        Self::Predicted
    }
}

/// Fidelity of one explanation for one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelityScore {
    /// Class whose probability was differenced
    pub target_class: usize,
    /// Probability on the original instance
    pub original: f64,
    /// Probability on the perturbed instance
    pub perturbed: f64,
    /// `original − perturbed`; positive means the flagged features were
    /// influential, near-zero or negative means they were not
    pub delta: f64,
    /// Features overwritten with the baseline, in rank order
    pub perturbed_features: Vec<String>,
}

/// Mean fidelity across a batch of instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelitySummary {
    /// Arithmetic mean of the per-instance deltas
    pub mean_delta: f64,
    /// Per-instance scores in row order
    pub scores: Vec<FidelityScore>,
    /// Sample count that was asked for
    pub n_requested: usize,
    /// Sample count actually evaluated (clamped to the available rows)
    pub n_evaluated: usize,
}

/// Remove-and-measure fidelity evaluator.
///
/// Overwrites the top-k most important features of an instance with a
/// baseline value and reports how much the model's class probability
/// changes. Stateless: every call is a pure function of its inputs plus
/// the model invocations.
#[derive(Debug, Clone)]
pub struct FidelityEvaluator {
    top_k: usize,
    baseline: Baseline,
    target: TargetClass,
}

impl Default for FidelityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl FidelityEvaluator {
    /// Create an evaluator with `top_k = 3`, a zero baseline, and the
    /// predicted class as target
    pub fn new() -> Self {
        Self {
            top_k: 3,
            baseline: Baseline::Zero,
            target: TargetClass::Predicted,
        }
    }

    /// Set the number of top-ranked features to perturb
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the baseline substituted for removed features
    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Set which class probability is differenced
    pub fn with_target(mut self, target: TargetClass) -> Self {
        self.target = target;
        self
    }

    /// Score one explanation for one instance.
    ///
    /// Ranks `importance` by descending absolute score (ties keep the
    /// map's insertion order), overwrites the top-k features with the
    /// baseline, and differences the target-class probability between the
    /// original and perturbed instance. When nothing is selected the
    /// perturbed instance equals the original and the model is invoked
    /// only once, making the zero delta exact.
    pub fn score<M: Model>(
        &self,
        model: &M,
        schema: &FeatureSchema,
        instance: &Array1<f64>,
        importance: &ImportanceMap,
    ) -> Result<FidelityScore> {
        if instance.len() != schema.len() {
            return Err(FidelisError::ShapeError {
                expected: format!("{} features", schema.len()),
                actual: format!("{} features", instance.len()),
            });
        }
        self.baseline.validate(schema.len())?;

        let selected = importance.top_k(self.top_k);
        let mut positions = Vec::with_capacity(selected.len());
        let mut perturbed_features = Vec::with_capacity(selected.len());
        for entry in selected {
            let position = schema
                .position(&entry.feature)
                .ok_or_else(|| FidelisError::FeatureNotFound(entry.feature.clone()))?;
            positions.push(position);
            perturbed_features.push(entry.feature.clone());
        }

        let original_row = model.predict_proba_one(instance)?;
        let target_class = self.resolve_target(&original_row)?;
        let original = finite_prob(&original_row, target_class)?;

        let perturbed = if positions.is_empty() {
            original
        } else {
            let mut copy = instance.clone();
            for &position in &positions {
                copy[position] = self.baseline.value_for(position);
            }
            let perturbed_row = model.predict_proba_one(&copy)?;
            finite_prob(&perturbed_row, target_class)?
        };

        Ok(FidelityScore {
            target_class,
            original,
            perturbed,
            delta: original - perturbed,
            perturbed_features,
        })
    }

    /// Score a batch of instances against precomputed importance mappings.
    ///
    /// Rows are scored in parallel; the result order matches the input
    /// row order.
    pub fn score_batch<M: Model>(
        &self,
        model: &M,
        schema: &FeatureSchema,
        instances: &Array2<f64>,
        importances: &[ImportanceMap],
    ) -> Result<Vec<FidelityScore>> {
        if instances.nrows() != importances.len() {
            return Err(FidelisError::ShapeError {
                expected: format!("{} importance mappings", instances.nrows()),
                actual: format!("{} importance mappings", importances.len()),
            });
        }

        let rows: Vec<Array1<f64>> = instances.rows().into_iter().map(|r| r.to_owned()).collect();
        rows.par_iter()
            .zip(importances.par_iter())
            .map(|(row, importance)| self.score(model, schema, row, importance))
            .collect()
    }

    /// Mean fidelity over the first `num_samples` instances.
    ///
    /// Each instance is explained by `explainer` and scored; the mean is
    /// summed in row order so the reduction is reproducible. `num_samples`
    /// clamps to the number of available rows.
    pub fn average_score<M: Model, E: Explainer>(
        &self,
        model: &M,
        schema: &FeatureSchema,
        instances: &Array2<f64>,
        explainer: &E,
        num_samples: usize,
    ) -> Result<FidelitySummary> {
        if num_samples == 0 {
            return Err(FidelisError::EmptyInput(
                "num_samples must be positive".to_string(),
            ));
        }
        if instances.nrows() == 0 {
            return Err(FidelisError::EmptyInput(
                "instance matrix has no rows".to_string(),
            ));
        }

        let n_evaluated = num_samples.min(instances.nrows());
        if n_evaluated < num_samples {
            debug!(
                requested = num_samples,
                available = instances.nrows(),
                "clamping sample count to available instances"
            );
        }

        let mut scores = Vec::with_capacity(n_evaluated);
        for row in instances.rows().into_iter().take(n_evaluated) {
            let instance = row.to_owned();
            let importance = explainer.explain(&instance)?;
            scores.push(self.score(model, schema, &instance, &importance)?);
        }

        let mean_delta = scores.iter().map(|s| s.delta).sum::<f64>() / n_evaluated as f64;
        debug!(n_evaluated, mean_delta, "fidelity batch complete");

        Ok(FidelitySummary {
            mean_delta,
            scores,
            n_requested: num_samples,
            n_evaluated,
        })
    }

    fn resolve_target(&self, probs: &Array1<f64>) -> Result<usize> {
        match self.target {
            TargetClass::Index(class) => {
                if class < probs.len() {
                    Ok(class)
                } else {
                    Err(FidelisError::ModelError(format!(
                        "target class {} out of range for {} outputs",
                        class,
                        probs.len()
                    )))
                }
            }
            TargetClass::Predicted => probs
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, _)| i)
                .ok_or_else(|| {
                    FidelisError::ModelError("model returned an empty probability row".to_string())
                }),
        }
    }
}

fn finite_prob(probs: &Array1<f64>, class: usize) -> Result<f64> {
    let p = probs.get(class).copied().ok_or_else(|| {
        FidelisError::ModelError(format!(
            "class {} out of range for {} outputs",
            class,
            probs.len()
        ))
    })?;
    if !p.is_finite() {
        return Err(FidelisError::ModelError(format!(
            "non-finite probability {} for class {}",
            p, class
        )));
    }
    Ok(p)
}
