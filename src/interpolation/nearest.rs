//! Nearest neighbor interpolation.
//!
//! This method returns the value of the closest reference point.
//! It's the simplest interpolation method, offering the fastest
//! performance but a piecewise-constant result.

use super::Interpolator;
use crate::distance::{Distance, DistanceMetric};
use crate::error::Result;
use crate::point::{Point, ValueAccessor};

/// Index of the reference point closest to `point`; ties keep the first one seen
pub fn nearest_index<M, D: Distance>(point: &Point, ref_data: &[Point<M>], metric: &D) -> Option<usize> {
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;

    for (i, ref_point) in ref_data.iter().enumerate() {
        let dist = metric.distance(point, ref_point);
        if nearest.is_none() || dist < min_distance {
            min_distance = dist;
            nearest = Some(i);
        }
    }

    nearest
}

/// Value of the closest reference point, 0 for an empty neighbourhood
pub fn nearest_interpolation<M, F, D>(
    point: &Point,
    ref_data: &[Point<M>],
    get_value: F,
    metric: &D,
) -> f64
where
    F: Fn(&Point<M>) -> f64,
    D: Distance,
{
    match nearest_index(point, ref_data, metric) {
        Some(i) => get_value(&ref_data[i]),
        None => 0.0,
    }
}

/// Nearest neighbor interpolator
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInterpolator {
    pub metric: DistanceMetric,
}

impl NearestInterpolator {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }
}

impl<M> Interpolator<M> for NearestInterpolator {
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64> {
        Ok(nearest_interpolation(point, ref_data, get_value, &self.metric))
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
