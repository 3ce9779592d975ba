//! Bilinear interpolation.
//!
//! This method picks the closest reference point in each of the four quadrants around
//! the query point and blends their values with rectangular area weights spanned by the
//! top-left and bottom-right corners.

use super::Interpolator;
use crate::distance::planar_distance_sq;
use crate::error::{InterpError, Result};
use crate::point::{Point, ValueAccessor};

/// The four corner points closest to a query point: `[top_left, top_right, bottom_left, bottom_right]`
pub type BilinearCorners<'a, M> = [&'a Point<M>; 4];

const QUADRANT_NAMES: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

/// Quadrant of `p` relative to the query position, in corner order
fn quadrant<M>(p: &Point<M>, qx: f64, qy: f64) -> usize {
    match (p.x <= qx, p.y > qy) {
        (true, true) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (false, false) => 3,
    }
}

/// Select the closest reference point in each quadrant around `point`.
///
/// Quadrants are `x ≤ px & y > py`, `x > px & y > py`, `x ≤ px & y ≤ py` and
/// `x > px & y ≤ py`. Distance is planar; ties keep the first point seen.
pub fn get_bilinear_points<'a, M>(
    point: &Point,
    ref_data: &'a [Point<M>],
) -> Result<BilinearCorners<'a, M>> {
    let mut best: [Option<(&'a Point<M>, f64)>; 4] = [None; 4];

    for ref_point in ref_data {
        let slot = &mut best[quadrant(ref_point, point.x, point.y)];
        let dist = planar_distance_sq(point, ref_point);
        let closer = match slot {
            Some((_, best_dist)) => dist < *best_dist,
            None => true,
        };
        if closer {
            *slot = Some((ref_point, dist));
        }
    }

    match best {
        [Some((tl, _)), Some((tr, _)), Some((bl, _)), Some((br, _))] => Ok([tl, tr, bl, br]),
        _ => {
            let missing: Vec<&str> = best
                .iter()
                .zip(QUADRANT_NAMES)
                .filter(|(corner, _)| corner.is_none())
                .map(|(_, name)| name)
                .collect();
            Err(InterpError::InsufficientCorners {
                missing: missing.join(", "),
            })
        }
    }
}

/// Blend the corner values at `point`.
///
/// The rectangle runs from the top-left corner `(x1, y1)` to the bottom-right corner
/// `(x2, y2)`. Points outside it are extrapolated without clamping.
pub fn bilinear_interpolation<M, F>(
    point: &Point,
    corners: &BilinearCorners<'_, M>,
    get_value: F,
) -> Result<f64>
where
    F: Fn(&Point<M>) -> f64,
{
    let [tl, tr, bl, br] = *corners;
    let (px, py) = (point.x, point.y);
    let (x1, y1) = (tl.x, tl.y);
    let (x2, y2) = (br.x, br.y);

    let area = (x2 - x1) * (y2 - y1);
    if area == 0.0 || !area.is_finite() {
        return Err(InterpError::DegenerateGeometry {
            message: format!(
                "bilinear rectangle ({}, {}) - ({}, {}) has no area",
                x1, y1, x2, y2
            ),
        });
    }

    let w_tl = (x2 - px) * (y2 - py) / area;
    let w_tr = (px - x1) * (y2 - py) / area;
    let w_bl = (x2 - px) * (py - y1) / area;
    let w_br = (px - x1) * (py - y1) / area;

    Ok(w_tl * get_value(tl) + w_tr * get_value(tr) + w_bl * get_value(bl) + w_br * get_value(br))
}

/// Bilinear interpolator
///
/// Performs the corner selection itself, so it can be dispatched like the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearInterpolator;

impl<M> Interpolator<M> for BilinearInterpolator {
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64> {
        if ref_data.is_empty() {
            return Ok(0.0);
        }
        let corners = get_bilinear_points(point, ref_data)?;
        bilinear_interpolation(point, &corners, get_value)
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::default_value;

    fn rectangle() -> Vec<Point> {
        vec![
            Point::with_z(0.0, 0.0, 10.0),
            Point::with_z(10.0, 0.0, 20.0),
            Point::with_z(0.0, 10.0, 30.0),
            Point::with_z(10.0, 10.0, 40.0),
        ]
    }

    #[test]
    fn test_corner_selection() {
        let data = rectangle();
        let [tl, tr, bl, br] = get_bilinear_points(&Point::xy(5.0, 5.0), &data).unwrap();
        assert_eq!((tl.x, tl.y), (0.0, 10.0));
        assert_eq!((tr.x, tr.y), (10.0, 10.0));
        assert_eq!((bl.x, bl.y), (0.0, 0.0));
        assert_eq!((br.x, br.y), (10.0, 0.0));
    }

    #[test]
    fn test_corner_selection_prefers_closest_then_first() {
        let mut data = rectangle();
        // Closer bottom-left candidate, then an equally close duplicate
        data.push(Point::with_z(4.0, 4.0, 99.0));
        data.push(Point::with_z(4.0, 4.0, -1.0));
        let corners = get_bilinear_points(&Point::xy(5.0, 5.0), &data).unwrap();
        assert_eq!(corners[2].z, Some(99.0));
    }

    #[test]
    fn test_center_is_mean_of_corners() {
        let data = rectangle();
        let point = Point::xy(5.0, 5.0);
        let corners = get_bilinear_points(&point, &data).unwrap();
        let value = bilinear_interpolation(&point, &corners, default_value).unwrap();
        assert!((value - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_weights_favor_near_corner() {
        let data = rectangle();
        let point = Point::xy(2.0, 8.0);
        let corners = get_bilinear_points(&point, &data).unwrap();
        let value = bilinear_interpolation(&point, &corners, default_value).unwrap();
        // 0.64 * 30 + 0.16 * 40 + 0.16 * 10 + 0.04 * 20
        assert!((value - 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_quadrant() {
        let data: Vec<Point> = vec![
            Point::with_z(0.0, 0.0, 1.0),
            Point::with_z(0.0, 10.0, 2.0),
            Point::with_z(10.0, 10.0, 3.0),
        ];
        let err = get_bilinear_points(&Point::xy(5.0, 5.0), &data).unwrap_err();
        match err {
            InterpError::InsufficientCorners { missing } => assert_eq!(missing, "bottom-right"),
            other => panic!("unexpected error: {}", other),
        }
        assert!(BilinearInterpolator
            .interpolate(&Point::xy(5.0, 5.0), &data, &default_value::<()>)
            .is_err());
    }

    #[test]
    fn test_empty_reference_data() {
        let data: Vec<Point> = Vec::new();
        let value = BilinearInterpolator
            .interpolate(&Point::xy(0.0, 0.0), &data, &default_value::<()>)
            .unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_degenerate_rectangle() {
        let a: Point = Point::with_z(1.0, 1.0, 1.0);
        let corners = [&a, &a, &a, &a];
        assert!(bilinear_interpolation(&Point::xy(1.0, 1.0), &corners, default_value).is_err());
    }
}
