//! Feature-importance mappings produced by explanation methods

use serde::{Deserialize, Serialize};

use crate::error::{FidelisError, Result};

/// One signed attribution for a single feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScore {
    /// Feature name
    pub feature: String,
    /// Signed importance score
    pub score: f64,
}

/// Insertion-ordered mapping from feature name to signed importance score.
///
/// Iteration and ranking tie-breaks follow insertion order, so two maps
/// built from the same entries in the same order rank identically.
/// Features absent from the map are treated as zero importance: they are
/// simply never selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportanceMap {
    entries: Vec<FeatureScore>,
}

impl ImportanceMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapping from (feature, score) pairs, preserving order
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (feature, score) in pairs {
            map.push(feature, score)?;
        }
        Ok(map)
    }

    /// Append an attribution; duplicate feature names are rejected
    pub fn push<S: Into<String>>(&mut self, feature: S, score: f64) -> Result<()> {
        let feature = feature.into();
        if self.entries.iter().any(|e| e.feature == feature) {
            return Err(FidelisError::InvalidArgument(format!(
                "duplicate importance entry for feature '{}'",
                feature
            )));
        }
        self.entries.push(FeatureScore { feature, score });
        Ok(())
    }

    /// Score for a feature, if present
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.feature == feature)
            .map(|e| e.score)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[FeatureScore] {
        &self.entries
    }

    /// Entries sorted by absolute score, descending.
    ///
    /// The sort is stable: ties keep insertion order, so the ranking is
    /// deterministic given an identical input mapping.
    pub fn ranked(&self) -> Vec<&FeatureScore> {
        let mut sorted: Vec<&FeatureScore> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.score
                .abs()
                .partial_cmp(&a.score.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Top `k` entries by absolute score, clamped to the available entries
    pub fn top_k(&self, k: usize) -> Vec<&FeatureScore> {
        self.ranked().into_iter().take(k).collect()
    }
}
