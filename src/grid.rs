//! Regular-grid rasterisation of an interpolated field.
//!
//! A [`GridSpec`] lays `width × height` cells over a [`Bounds`] rectangle. Row 0 is the
//! northern (max y) edge, so the resulting arrays can be written straight to an image.
//! Each cell is estimated at its centre from the candidates a [`Neighborhood`] selects.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::{InterpError, Result};
use crate::interpolation::Interpolator;
use crate::kriging::KrigingInterpolator;
use crate::point::{Point, ValueAccessor};
use crate::rgba::{Rgba, RgbaInterpolator};

/// Axis-aligned extent in reference coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let bounds = Self {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Smallest extent covering every point.
    ///
    /// An axis with no spread is widened by half a unit on each side. Returns `None` for
    /// an empty slice.
    pub fn from_points<M>(points: &[Point<M>]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        if bounds.max_x <= bounds.min_x {
            bounds.min_x -= 0.5;
            bounds.max_x += 0.5;
        }
        if bounds.max_y <= bounds.min_y {
            bounds.min_y -= 0.5;
            bounds.max_y += 0.5;
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(InterpError::InvalidParameter {
                param: "bounds".to_string(),
                message: "Bounds must be finite".to_string(),
            });
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(InterpError::InvalidParameter {
                param: "bounds".to_string(),
                message: format!(
                    "Bounds are inverted or empty: {},{},{},{}",
                    self.min_x, self.min_y, self.max_x, self.max_y
                ),
            });
        }
        Ok(())
    }
}

impl FromStr for Bounds {
    type Err = InterpError;

    /// Parse `min_x,min_y,max_x,max_y`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(InterpError::InvalidParameter {
                param: "bounds".to_string(),
                message: "Bounds must be in format 'min_x,min_y,max_x,max_y'".to_string(),
            });
        }

        let mut values = [0.0; 4];
        for (value, (part, label)) in values
            .iter_mut()
            .zip(parts.iter().zip(["min_x", "min_y", "max_x", "max_y"]))
        {
            *value = part.parse::<f64>().map_err(|_| InterpError::InvalidParameter {
                param: "bounds".to_string(),
                message: format!("Invalid {}: {}", label, part),
            })?;
        }

        Bounds::new(values[0], values[1], values[2], values[3])
    }
}

/// Output raster layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    pub bounds: Bounds,
}

impl GridSpec {
    pub fn new(width: usize, height: usize, bounds: Bounds) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(InterpError::InvalidParameter {
                param: "grid".to_string(),
                message: format!("Grid dimensions must be non-zero, got {}x{}", width, height),
            });
        }
        bounds.validate()?;
        Ok(Self {
            width,
            height,
            bounds,
        })
    }

    /// Cell size along x and y
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.bounds.width() / self.width as f64,
            self.bounds.height() / self.height as f64,
        )
    }

    /// Centre of the cell at `(row, col)`; row 0 is the max-y edge
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        let (dx, dy) = self.cell_size();
        Point::xy(
            self.bounds.min_x + (col as f64 + 0.5) * dx,
            self.bounds.max_y - (row as f64 + 0.5) * dy,
        )
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Supplies the candidate reference points for one query position.
pub trait Neighborhood<M: Clone> {
    fn select<'a>(&self, point: &Point, ref_data: &'a [Point<M>]) -> Cow<'a, [Point<M>]>;
}

/// Every reference point is a candidate for every cell
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPoints;

impl<M: Clone> Neighborhood<M> for AllPoints {
    fn select<'a>(&self, _point: &Point, ref_data: &'a [Point<M>]) -> Cow<'a, [Point<M>]> {
        Cow::Borrowed(ref_data)
    }
}

fn log_fill(operation: &str, spec: &GridSpec, failed: usize, start: Instant) {
    if failed > 0 {
        warn!(
            operation = operation,
            failed_cells = failed,
            total_cells = spec.cell_count(),
            "Some grid cells could not be estimated"
        );
    }
    debug!(
        operation = operation,
        width = spec.width,
        height = spec.height,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Grid filled"
    );
}

/// Estimate every cell with a scalar interpolator. Cells whose estimate fails are NaN.
pub fn fill_grid<M, N>(
    spec: &GridSpec,
    ref_data: &[Point<M>],
    interpolator: &dyn Interpolator<M>,
    get_value: ValueAccessor<'_, M>,
    neighborhood: &N,
) -> Array2<f64>
where
    M: Clone,
    N: Neighborhood<M>,
{
    let start = Instant::now();
    let mut failed = 0usize;

    let grid = Array2::from_shape_fn((spec.height, spec.width), |(row, col)| {
        let center = spec.cell_center(row, col);
        let candidates = neighborhood.select(&center, ref_data);
        match interpolator.interpolate(&center, &candidates, get_value) {
            Ok(value) => value,
            Err(_) => {
                failed += 1;
                f64::NAN
            }
        }
    });

    log_fill(interpolator.name(), spec, failed, start);
    grid
}

/// Estimate every cell's color. Cells whose estimate fails are transparent.
pub fn fill_grid_rgba<M, N>(
    spec: &GridSpec,
    ref_data: &[Point<M>],
    interpolator: &dyn RgbaInterpolator<M>,
    neighborhood: &N,
) -> Array2<Rgba>
where
    M: Clone,
    N: Neighborhood<M>,
{
    let start = Instant::now();
    let mut failed = 0usize;

    let grid = Array2::from_shape_fn((spec.height, spec.width), |(row, col)| {
        let center = spec.cell_center(row, col);
        let candidates = neighborhood.select(&center, ref_data);
        match interpolator.interpolate_rgba(&center, &candidates) {
            Ok(color) => color,
            Err(_) => {
                failed += 1;
                Rgba::TRANSPARENT
            }
        }
    });

    log_fill("rgba", spec, failed, start);
    grid
}

/// Kriging mean and predictive variance over the grid
#[derive(Debug, Clone)]
pub struct KrigingGrid {
    pub mean: Array2<f64>,
    pub variance: Array2<f64>,
}

pub fn fill_grid_kriging(spec: &GridSpec, kriging: &KrigingInterpolator) -> KrigingGrid {
    let start = Instant::now();
    let shape = (spec.height, spec.width);
    let mut mean = Array2::zeros(shape);
    let mut variance = Array2::zeros(shape);

    for ((row, col), value) in mean.indexed_iter_mut() {
        let center = spec.cell_center(row, col);
        *value = kriging.predict(center.x, center.y);
        variance[[row, col]] = kriging.variance(center.x, center.y);
    }

    log_fill("kriging", spec, 0, start);
    KrigingGrid { mean, variance }
}
