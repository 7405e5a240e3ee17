//! Explanation methods producing per-feature importance scores
//!
//! Provides the explainer collaborator contract plus two built-in
//! attribution methods:
//! - Shapley-sampling attributions over a background dataset
//! - Single-feature occlusion attributions
//!
//! The fidelity evaluator only sees the [`Explainer`] trait; any external
//! attribution method plugs in the same way.

mod occlusion;
mod sampling;

pub use occlusion::OcclusionExplainer;
pub use sampling::SamplingExplainer;

use ndarray::Array1;

use crate::error::Result;
use crate::importance::ImportanceMap;

/// Trait for local explanation methods.
///
/// Implementations may be sampling-based and therefore stochastic unless
/// seeded; that variability is part of the method, not an error.
pub trait Explainer {
    /// Produce an importance mapping for a single instance
    fn explain(&self, instance: &Array1<f64>) -> Result<ImportanceMap>;
}

impl<E: Explainer + ?Sized> Explainer for &E {
    fn explain(&self, instance: &Array1<f64>) -> Result<ImportanceMap> {
        (**self).explain(instance)
    }
}

/// Adapter implementing [`Explainer`] for a plain closure
pub struct FnExplainer<F>
where
    F: Fn(&Array1<f64>) -> Result<ImportanceMap>,
{
    explain_fn: F,
}

impl<F> FnExplainer<F>
where
    F: Fn(&Array1<f64>) -> Result<ImportanceMap>,
{
    /// Wrap an explanation closure
    pub fn new(explain_fn: F) -> Self {
        Self { explain_fn }
    }
}

impl<F> Explainer for FnExplainer<F>
where
    F: Fn(&Array1<f64>) -> Result<ImportanceMap>,
{
    fn explain(&self, instance: &Array1<f64>) -> Result<ImportanceMap> {
        (self.explain_fn)(instance)
    }
}
