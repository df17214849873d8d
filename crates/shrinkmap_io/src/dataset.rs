//! Dataset loading and preprocessing.
//!
//! ## File layout
//!
//! One sample per line, fixed width:
//!
//! ```text
//! 5.1,3.5,1.4,0.2,Iris-setosa
//! ^   ^   ^   ^   ^
//! 0   4   8   12  16
//! ```
//!
//! Four 3-character numeric fields start at columns 0, 4, 8 and 12; the class
//! name runs from column 16 to the end of the line. Blank lines are skipped.
//!
//! ## Preprocessing
//!
//! 1. Optional sign balancing: every feature has its dataset mean subtracted.
//! 2. Stereographic projection at the sphere radius, then unit scaling.
//! 3. Shuffle, then split into a training prefix and a test remainder.

use crate::error::{DatasetError, Result};
use shrinkmap_core::geometry;
use shrinkmap_core::RandomSource;
use shrinkmap_data::{DataPoint, Features, Label, RawFeatures, RAW_DIMENSIONS};
use std::path::Path;

const FIELD_WIDTH: usize = 3;
const FIELD_STRIDE: usize = 4;
const LABEL_COLUMN: usize = 16;

/// A parsed, unprojected sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub features: RawFeatures,
    pub label: Label,
}

/// Parses one line. Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<RawSample>> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(None);
    }

    let mut features = [0.0; RAW_DIMENSIONS];
    for (i, f) in features.iter_mut().enumerate() {
        let start = i * FIELD_STRIDE;
        let field = line
            .get(start..start + FIELD_WIDTH)
            .ok_or_else(|| DatasetError::parse(line_no, format!("field {} is missing", i + 1)))?;
        *f = field.trim().parse::<f64>().map_err(|e| {
            DatasetError::parse(line_no, format!("field {} ({field:?}): {e}", i + 1))
        })?;
    }

    let name = line
        .get(LABEL_COLUMN..)
        .ok_or_else(|| DatasetError::parse(line_no, "label is missing"))?;
    let label = Label::from_dataset_name(name)
        .ok_or_else(|| DatasetError::parse(line_no, format!("unknown label {name:?}")))?;

    Ok(Some(RawSample { features, label }))
}

/// Parses a whole file body. Line numbers in errors are 1-based.
pub fn parse(text: &str) -> Result<Vec<RawSample>> {
    let mut samples = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(sample) = parse_line(line, i + 1)? {
            samples.push(sample);
        }
    }
    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

/// Reads and parses the dataset at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<RawSample>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| DatasetError::from(e).with_context(format!("reading {}", path.display())))?;
    let samples = parse(&text).map_err(|e| e.with_context(format!("parsing {}", path.display())))?;
    tracing::info!(path = %path.display(), samples = samples.len(), "Dataset loaded");
    Ok(samples)
}

/// Subtracts the per-feature mean so every feature takes both signs.
pub fn balance_signs(samples: &mut [RawSample]) {
    if samples.is_empty() {
        return;
    }
    let mut means = [0.0; RAW_DIMENSIONS];
    for s in samples.iter() {
        for (m, f) in means.iter_mut().zip(&s.features) {
            *m += f;
        }
    }
    let n = samples.len() as f64;
    for m in means.iter_mut() {
        *m /= n;
    }
    for s in samples.iter_mut() {
        for (f, m) in s.features.iter_mut().zip(&means) {
            *f -= m;
        }
    }
}

/// Preprocessing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrepareOptions {
    /// Samples placed in the training split; the rest go to the test split.
    pub training_set_size: usize,
    pub sphere_radius: f64,
    pub balance_signs: bool,
}

/// Projected, shuffled samples split into training and test parts.
#[derive(Debug, Clone)]
pub struct Dataset {
    points: Vec<DataPoint>,
    training_count: usize,
}

impl Dataset {
    /// Runs the full preprocessing pipeline over `samples`.
    pub fn prepare(
        mut samples: Vec<RawSample>,
        options: &PrepareOptions,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        if options.training_set_size == 0 || options.training_set_size > samples.len() {
            return Err(DatasetError::Split {
                requested: options.training_set_size,
                available: samples.len(),
            });
        }

        if options.balance_signs {
            balance_signs(&mut samples);
        }

        let mut points = samples
            .iter()
            .map(|s| {
                geometry::embed(&s.features, options.sphere_radius)
                    .map(|features| DataPoint::new(features, s.label))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rng.shuffle(&mut points);

        tracing::debug!(
            training = options.training_set_size,
            test = points.len() - options.training_set_size,
            "Dataset split"
        );

        Ok(Self {
            points,
            training_count: options.training_set_size,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn train(&self) -> &[DataPoint] {
        &self.points[..self.training_count]
    }

    #[must_use]
    pub fn test(&self) -> &[DataPoint] {
        &self.points[self.training_count..]
    }

    /// Training vectors in presentation order, without labels.
    #[must_use]
    pub fn train_features(&self) -> Vec<Features> {
        self.train().iter().map(|p| p.features).collect()
    }
}
