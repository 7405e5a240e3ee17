//! Explanation Fidelity Example
//!
//! Explains a linear scorer with both built-in explainers and compares
//! their fidelity on the same instances.

use fidelis::prelude::*;
use ndarray::{array, Array2};

fn main() -> anyhow::Result<()> {
    // A scorer that only really uses the first two features
    let model = LinearModel::new(array![2.0, 1.0, 0.05, 0.0]);
    let schema = FeatureSchema::new(["age", "income", "tenure", "noise"])?;

    let instances = array![
        [3.0, 5.0, 1.0, 9.0],
        [1.0, 2.0, 4.0, 3.0],
        [4.0, 1.0, 2.0, 7.0],
    ];
    println!("Dataset: {} instances, {} features", instances.nrows(), schema.len());

    let background = Array2::zeros((4, 4));
    let sampling = SamplingExplainer::new(&model, schema.clone(), background)?
        .with_n_samples(100)
        .with_seed(42);
    let occlusion = OcclusionExplainer::new(&model, schema.clone());

    let evaluator = FidelityEvaluator::new().with_top_k(2);

    let x = instances.row(0).to_owned();
    println!("\nTop attributions for the first instance:");
    for entry in sampling.explain(&x)?.top_k(2) {
        println!("  {}: {:+.4}", entry.feature, entry.score);
    }

    let sampling_summary =
        evaluator.average_score(&model, &schema, &instances, &sampling, instances.nrows())?;
    let occlusion_summary =
        evaluator.average_score(&model, &schema, &instances, &occlusion, instances.nrows())?;

    println!("\nMean fidelity (top-2 removal):");
    println!("  Shapley sampling: {:.4}", sampling_summary.mean_delta);
    println!("  Occlusion:        {:.4}", occlusion_summary.mean_delta);

    for score in &occlusion_summary.scores {
        println!(
            "  perturbed {:?}: {:.3} -> {:.3} (delta {:+.3})",
            score.perturbed_features, score.original, score.perturbed, score.delta
        );
    }

    Ok(())
}
