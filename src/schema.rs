//! Feature schema for fixed-length instance vectors

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FidelisError, Result};

/// Ordered feature names for a fixed-length instance vector.
///
/// Importance entries are resolved against this ordering. A name that does
/// not appear here cannot be perturbed and is reported as an error rather
/// than skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered list of feature names
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(FidelisError::InvalidArgument(format!(
                    "duplicate feature name '{}'",
                    name
                )));
            }
        }

        Ok(Self { names })
    }

    /// Synthesize an indexed schema with names `f0..f{n-1}`
    pub fn indexed(n: usize) -> Self {
        Self {
            names: (0..n).map(|i| format!("f{}", i)).collect(),
        }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a feature name in the instance ordering
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Feature name at a position
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All feature names in instance order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
