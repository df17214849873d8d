use shrinkmap_core::{geometry, EngineSettings, Features, Neuron, NeuronLogic, RandomSource};
use shrinkmap_data::Label;
use shrinkmap_io::RawSample;

/// Per-class centers, chosen so every jittered coordinate stays a one-digit
/// decimal and fits the fixed-width file format.
const CENTERS: [[f64; 4]; 3] = [
    [5.0, 3.4, 1.5, 0.3],
    [5.9, 2.8, 4.3, 1.3],
    [6.6, 3.0, 5.6, 2.0],
];

/// Well-separated three-class samples, `per_class` of each, in class order.
#[allow(dead_code)]
pub fn three_class_samples(per_class: usize, seed: u64) -> Vec<RawSample> {
    let mut rng = RandomSource::seeded(seed);
    let mut samples = Vec::with_capacity(per_class * CENTERS.len());
    for label in Label::ALL {
        let center = CENTERS[label.index()];
        for _ in 0..per_class {
            let mut features = center;
            for f in features.iter_mut() {
                // One decimal of jitter in [-0.1, 0.1].
                *f = ((*f + 0.1 * rng.symmetric()) * 10.0).round() / 10.0;
            }
            samples.push(RawSample { features, label });
        }
    }
    samples
}

/// Renders samples in the fixed-width dataset layout.
#[allow(dead_code)]
pub fn to_dataset_text(samples: &[RawSample]) -> String {
    let mut text = String::new();
    for s in samples {
        let name = match s.label {
            Label::Setosa => "Iris-setosa",
            Label::Versicolor => "Iris-versicolor",
            Label::Virginica => "Iris-virginica",
        };
        let f = s.features;
        text.push_str(&format!(
            "{:.1},{:.1},{:.1},{:.1},{name}\n",
            f[0], f[1], f[2], f[3]
        ));
    }
    text
}

/// Projects raw features onto the unit sphere.
#[allow(dead_code)]
pub fn embed_all(raw: &[[f64; 4]], sphere_radius: f64) -> Vec<Features> {
    raw.iter()
        .map(|r| geometry::embed(r, sphere_radius).unwrap())
        .collect()
}

/// Small, fast engine settings used across scenarios.
#[allow(dead_code)]
pub fn small_settings(population_size: usize, expected_cluster_count: usize) -> EngineSettings {
    EngineSettings {
        population_size,
        expected_cluster_count,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn assert_unit(v: &Features) {
    let n = geometry::norm(v);
    assert!((n - 1.0).abs() < 1e-9, "expected unit norm, got {n}");
}

/// Smallest squared distance between any two prototypes.
#[allow(dead_code)]
pub fn min_pairwise_squared_distance(prototypes: &[Neuron]) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in prototypes.iter().enumerate() {
        for b in &prototypes[i + 1..] {
            min = min.min(a.squared_distance(&b.weights));
        }
    }
    min
}
