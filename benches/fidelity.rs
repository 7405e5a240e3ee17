use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fidelis::prelude::*;
use ndarray::{Array1, Array2};
use rand::prelude::*;

fn create_instances(n_rows: usize, n_features: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<f64> = (0..n_rows * n_features).map(|_| rng.gen::<f64>() * 10.0).collect();
    Array2::from_shape_vec((n_rows, n_features), values).unwrap()
}

fn create_model(n_features: usize) -> LinearModel {
    let mut rng = StdRng::seed_from_u64(7);
    let weights: Vec<f64> = (0..n_features).map(|_| rng.gen::<f64>() - 0.5).collect();
    LinearModel::new(Array1::from_vec(weights))
}

fn bench_average_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("average_score");
    group.sample_size(20);

    let n_features = 16;
    let model = create_model(n_features);
    let schema = FeatureSchema::indexed(n_features);

    for n_rows in [100, 1000].iter() {
        let instances = create_instances(*n_rows, n_features);
        let explainer = OcclusionExplainer::new(&model, schema.clone());
        let evaluator = FidelityEvaluator::new().with_top_k(3);

        group.bench_with_input(
            BenchmarkId::new("occlusion", n_rows),
            &instances,
            |b, instances| {
                b.iter(|| {
                    evaluator
                        .average_score(
                            &model,
                            &schema,
                            black_box(instances),
                            &explainer,
                            instances.nrows(),
                        )
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_score_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_batch");

    let n_features = 16;
    let model = create_model(n_features);
    let schema = FeatureSchema::indexed(n_features);
    let instances = create_instances(1000, n_features);
    let explainer = OcclusionExplainer::new(&model, schema.clone());

    let importances: Vec<ImportanceMap> = instances
        .rows()
        .into_iter()
        .map(|row| explainer.explain(&row.to_owned()).unwrap())
        .collect();

    let evaluator = FidelityEvaluator::new().with_top_k(3);

    group.bench_function("precomputed_1000", |b| {
        b.iter(|| {
            evaluator
                .score_batch(&model, &schema, black_box(&instances), &importances)
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_average_score, bench_score_batch);
criterion_main!(benches);
