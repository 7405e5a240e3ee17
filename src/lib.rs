//! Fidelis - explanation-fidelity evaluation for probabilistic classifiers
//!
//! Post-hoc explanation methods (Shapley sampling, occlusion, and friends)
//! assign each input feature a signed importance score. This crate measures
//! how faithful those scores are to the model they describe: remove the
//! top-ranked features, re-predict, and see whether the prediction actually
//! moves.
//!
//! # Modules
//!
//! ## Core
//! - [`fidelity`] - Remove-and-measure fidelity evaluation
//! - [`importance`] - Feature-importance mappings and ranking
//!
//! ## Collaborators
//! - [`model`] - The probabilistic-classifier contract and adapters
//! - [`explain`] - Explanation methods and the explainer contract
//!
//! ## Support
//! - [`schema`] - Feature schemas for fixed-length instance vectors
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use fidelis::prelude::*;
//! use ndarray::array;
//!
//! # fn main() -> fidelis::Result<()> {
//! let model = LinearModel::new(array![1.0, 2.0, 0.0]);
//! let schema = FeatureSchema::indexed(3);
//! let importance = ImportanceMap::from_pairs([("f0", 2.0), ("f1", 6.0), ("f2", 0.0)])?;
//!
//! let score = FidelityEvaluator::new()
//!     .with_top_k(1)
//!     .score(&model, &schema, &array![2.0, 3.0, 5.0], &importance)?;
//!
//! assert_eq!(score.delta, 6.0);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Core evaluation
pub mod fidelity;
pub mod importance;

// Collaborator contracts
pub mod explain;
pub mod model;

// Support
pub mod schema;

pub use error::{FidelisError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{FidelisError, Result};

    // Fidelity evaluation
    pub use crate::fidelity::{
        Baseline, FidelityEvaluator, FidelityScore, FidelitySummary, TargetClass,
    };

    // Importance mappings
    pub use crate::importance::{FeatureScore, ImportanceMap};

    // Model collaborators
    pub use crate::model::{FnModel, LinearModel, Model};

    // Explainer collaborators
    pub use crate::explain::{Explainer, FnExplainer, OcclusionExplainer, SamplingExplainer};

    // Schemas
    pub use crate::schema::FeatureSchema;
}
