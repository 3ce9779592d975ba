//! Inverse Distance Weighting (IDW) interpolation.
//!
//! Estimates the value at the query point as a weighted mean of the candidates, with
//! weights `1 / d²`:
//!
//! ```text
//! z(p) = Σ(wᵢ · zᵢ) / Σ(wᵢ)    where wᵢ = 1 / d(p, pᵢ)²
//! ```
//!
//! A candidate at distance 0 short-circuits and its value is returned exactly. Weights
//! are taken relative to the closest candidate, `(d_min / dᵢ)²`, which leaves the mean
//! unchanged and keeps every weight in `[0, 1]` for separations whose square would
//! underflow or overflow.

use super::common::WeightedMean;
use super::Interpolator;
use crate::distance::{Distance, DistanceMetric};
use crate::error::Result;
use crate::point::{Point, ValueAccessor};

/// Inverse-squared-distance weighted mean, 0 for an empty neighbourhood
pub fn idw_interpolation<M, F, D>(point: &Point, ref_data: &[Point<M>], get_value: F, metric: &D) -> f64
where
    F: Fn(&Point<M>) -> f64,
    D: Distance,
{
    let mut distances = Vec::with_capacity(ref_data.len());
    let mut closest = f64::INFINITY;
    for ref_point in ref_data {
        let distance = metric.distance(point, ref_point);
        if distance == 0.0 {
            return get_value(ref_point);
        }
        closest = closest.min(distance);
        distances.push(distance);
    }

    let mut acc = WeightedMean::default();
    for (ref_point, &distance) in ref_data.iter().zip(&distances) {
        // Ties with the closest candidate, infinite distances included, weigh 1
        let weight = if distance == closest {
            1.0
        } else {
            let ratio = closest / distance;
            ratio * ratio
        };
        acc.push(get_value(ref_point), weight);
    }

    acc.finish().unwrap_or(0.0)
}

/// IDW interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct IdwInterpolator {
    pub metric: DistanceMetric,
}

impl IdwInterpolator {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }
}

impl<M> Interpolator<M> for IdwInterpolator {
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64> {
        Ok(idw_interpolation(point, ref_data, get_value, &self.metric))
    }

    fn name(&self) -> &str {
        "idw"
    }
}
