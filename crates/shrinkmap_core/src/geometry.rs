//! Vector helpers for the projected feature space.
//!
//! Inputs and neuron weights are lifted from `RAW_DIMENSIONS` to
//! `FEATURE_DIMENSIONS` by stereographic projection and then scaled to unit
//! length, so plain Euclidean distance between two vectors tracks the angle
//! between them.

use crate::error::{ClusterError, Result};
use shrinkmap_data::{Features, RawFeatures, RAW_DIMENSIONS};

/// Stereographic projection of `raw` at sphere radius `radius`.
///
/// With `S = Σ xᵢ²` and `D = 4r² + S`, coordinate `i < N` becomes `4r²·xᵢ / D`
/// and the added coordinate becomes `(S − 4r²) / D`. For `radius > 0` the
/// denominator is at least `4r²`, so the origin maps to the pole without
/// special casing.
#[must_use]
pub fn project(raw: &RawFeatures, radius: f64) -> Features {
    let rcoeff = 4.0 * radius * radius;
    let sum: f64 = raw.iter().map(|x| x * x).sum();
    let den = rcoeff + sum;

    let mut out = [0.0; RAW_DIMENSIONS + 1];
    for (o, x) in out.iter_mut().zip(raw) {
        *o = rcoeff * x / den;
    }
    out[RAW_DIMENSIONS] = (sum - rcoeff) / den;
    out
}

/// Inverse of [`project`].
///
/// Since `1 − out[N] = 8r² / D`, every raw coordinate is
/// `2·out[i] / (1 − out[N])` whatever the radius was. The added coordinate of
/// a projection is always below 1; returns `None` for vectors that could not
/// have come out of [`project`].
#[must_use]
pub fn unproject(projected: &Features) -> Option<RawFeatures> {
    let gap = 1.0 - projected[RAW_DIMENSIONS];
    if gap <= 0.0 || !gap.is_finite() {
        return None;
    }
    let mut raw = [0.0; RAW_DIMENSIONS];
    for (r, p) in raw.iter_mut().zip(projected) {
        *r = 2.0 * p / gap;
    }
    Some(raw)
}

#[must_use]
pub fn dot(a: &Features, b: &Features) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[must_use]
pub fn norm(v: &Features) -> f64 {
    dot(v, v).sqrt()
}

#[must_use]
pub fn squared_distance(a: &Features, b: &Features) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Scales `v` to unit length in place.
pub fn normalize(v: &mut Features) -> Result<()> {
    let n = norm(v);
    if n == 0.0 || !n.is_finite() {
        return Err(ClusterError::DegenerateVector { norm: n });
    }
    for x in v.iter_mut() {
        *x /= n;
    }
    Ok(())
}

/// [`project`] followed by [`normalize`]: the form every engine vector takes.
pub fn embed(raw: &RawFeatures, radius: f64) -> Result<Features> {
    let mut out = project(raw, radius);
    normalize(&mut out)?;
    Ok(out)
}
