mod common;

use shrinkmap_core::{Engine, RandomSource};
use shrinkmap_lib::app::Clusterizer;
use shrinkmap_lib::model::config::AppConfig;

fn config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.engine.population_size = 80;
    config.dataset.training_set_size = 40;
    config.run.seed = Some(seed);
    config
}

#[test]
fn test_same_seed_same_prototypes() {
    let raw: Vec<[f64; 4]> = common::three_class_samples(8, 1)
        .iter()
        .map(|s| s.features)
        .collect();
    let inputs = common::embed_all(&raw, 4.0);

    let run = || {
        let mut rng = RandomSource::seeded(12345);
        let mut engine = Engine::new(common::small_settings(50, 3), &mut rng).unwrap();
        let summary = engine.run(&inputs).unwrap();
        (summary.sweeps, engine.prototypes())
    };

    let (sweeps_a, protos_a) = run();
    let (sweeps_b, protos_b) = run();
    assert_eq!(sweeps_a, sweeps_b, "Sweep counts should match");
    assert_eq!(protos_a, protos_b, "Prototypes should be bit-identical");
}

#[test]
fn test_pipeline_report_is_reproducible() {
    let samples = common::three_class_samples(20, 7);

    let a = Clusterizer::new(config(2024))
        .unwrap()
        .run_with_samples(samples.clone())
        .unwrap();
    let b = Clusterizer::new(config(2024))
        .unwrap()
        .run_with_samples(samples)
        .unwrap();

    assert_eq!(a.prototypes, b.prototypes);
    assert_eq!(a.table, b.table);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_different_seeds_diverge() {
    let samples = common::three_class_samples(20, 7);

    let a = Clusterizer::new(config(1))
        .unwrap()
        .run_with_samples(samples.clone())
        .unwrap();
    let b = Clusterizer::new(config(2))
        .unwrap()
        .run_with_samples(samples)
        .unwrap();

    assert_ne!(a.fingerprint, b.fingerprint);
    assert_ne!(a.prototypes, b.prototypes);
}
