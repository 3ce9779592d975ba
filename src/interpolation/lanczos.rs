//! Lanczos interpolation.
//!
//! Weights each candidate by the Lanczos window of its distance to the query point.
//! Candidates at or beyond the kernel radius `a` get no weight; when every candidate is
//! out of reach the estimate is 0.

use super::common::{lanczos_kernel, WeightedMean, DEFAULT_KERNEL_RADIUS};
use super::Interpolator;
use crate::distance::{Distance, DistanceMetric};
use crate::error::{InterpError, Result};
use crate::point::{Point, ValueAccessor};

/// Lanczos-weighted mean of the candidates.
///
/// Fails on an empty neighbourhood.
pub fn lanczos_interpolation<M, F, D>(
    point: &Point,
    ref_data: &[Point<M>],
    get_value: F,
    kernel_radius: f64,
    metric: &D,
) -> Result<f64>
where
    F: Fn(&Point<M>) -> f64,
    D: Distance,
{
    if ref_data.is_empty() {
        return Err(InterpError::EmptyReferenceData {
            method: "lanczos".to_string(),
        });
    }

    let mut acc = WeightedMean::default();
    for ref_point in ref_data {
        let weight = lanczos_kernel(metric.distance(point, ref_point), kernel_radius);
        acc.push(get_value(ref_point), weight);
    }

    Ok(acc.finish().unwrap_or(0.0))
}

/// Lanczos interpolator
#[derive(Debug, Clone, Copy)]
pub struct LanczosInterpolator {
    pub kernel_radius: f64,
    pub metric: DistanceMetric,
}

impl LanczosInterpolator {
    pub fn new(kernel_radius: f64, metric: DistanceMetric) -> Self {
        Self {
            kernel_radius,
            metric,
        }
    }
}

impl Default for LanczosInterpolator {
    fn default() -> Self {
        Self::new(DEFAULT_KERNEL_RADIUS, DistanceMetric::Planar)
    }
}

impl<M> Interpolator<M> for LanczosInterpolator {
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64> {
        lanczos_interpolation(point, ref_data, get_value, self.kernel_radius, &self.metric)
    }

    fn name(&self) -> &str {
        "lanczos"
    }
}
