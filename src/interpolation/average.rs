//! Average interpolation.
//!
//! Returns the unweighted mean of every candidate value; the query position is ignored.

use super::Interpolator;
use crate::error::Result;
use crate::point::{Point, ValueAccessor};

/// Mean of `get_value` over `ref_data`, 0 for an empty neighbourhood
pub fn average_interpolation<M, F>(_point: &Point, ref_data: &[Point<M>], get_value: F) -> f64
where
    F: Fn(&Point<M>) -> f64,
{
    if ref_data.is_empty() {
        return 0.0;
    }
    let total: f64 = ref_data.iter().map(get_value).sum();
    total / ref_data.len() as f64
}

/// Average interpolator
pub struct AverageInterpolator;

impl<M> Interpolator<M> for AverageInterpolator {
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64> {
        Ok(average_interpolation(point, ref_data, get_value))
    }

    fn name(&self) -> &str {
        "average"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::default_value;

    #[test]
    fn test_average_ignores_query_point() {
        let data: Vec<Point> = vec![
            Point::with_z(0.0, 0.0, 1.0),
            Point::with_z(5.0, 5.0, 2.0),
            Point::with_z(-3.0, 8.0, 6.0),
        ];
        let near = average_interpolation(&Point::xy(0.0, 0.0), &data, default_value);
        let far = average_interpolation(&Point::xy(1e6, -1e6), &data, default_value);
        assert_eq!(near, 3.0);
        assert_eq!(far, 3.0);
    }

    #[test]
    fn test_average_empty() {
        let data: Vec<Point> = Vec::new();
        assert_eq!(average_interpolation(&Point::xy(0.0, 0.0), &data, default_value), 0.0);
    }

    #[test]
    fn test_average_custom_accessor() {
        let data: Vec<Point<f64>> = vec![Point::with_m(0.0, 0.0, 4.0), Point::with_m(1.0, 0.0, 8.0)];
        let value = average_interpolation(&Point::xy(0.5, 0.0), &data, |p| p.m.unwrap_or(0.0));
        assert_eq!(value, 6.0);
    }
}
