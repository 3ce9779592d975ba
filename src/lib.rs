//! # scatterfield
//!
//! Scattered-data interpolation: estimate a scalar or RGBA value at any query position
//! from an irregular set of reference points.
//!
//! ## Key Features
//!
//! - **Local estimators**: average, nearest neighbour, quadrant bilinear, inverse
//!   distance weighting and Lanczos-windowed weighting, selectable by name
//! - **Color fields**: RGBA adapters that blend channels in the squared domain
//! - **Ordinary kriging**: empirical variogram, ridge-regularized model fit and cached
//!   Gram inverse with prediction and variance queries
//! - **Rasterisation**: fill regular grids and render them with perceptual colormaps
//!
//! ## Example
//!
//! ```
//! use scatterfield::interpolation::{
//!     get_interpolation, InterpolationMethod, InterpolationOptions, Interpolator,
//! };
//! use scatterfield::point::{default_value, Point};
//!
//! let reference: Vec<Point> = vec![
//!     Point::with_z(0.0, 0.0, 10.0),
//!     Point::with_z(10.0, 0.0, 20.0),
//!     Point::with_z(0.0, 10.0, 30.0),
//!     Point::with_z(10.0, 10.0, 40.0),
//! ];
//! let idw = get_interpolation(InterpolationMethod::Idw, InterpolationOptions::default());
//! let value = idw
//!     .interpolate(&Point::xy(5.0, 5.0), &reference, &default_value::<()>)
//!     .unwrap();
//! assert!((value - 25.0).abs() < 1e-12);
//! ```

pub mod colormaps;
pub mod config;
pub mod distance;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod kriging;
pub mod logging;
pub mod point;
pub mod rgba;

pub use config::{Config, Estimator};
pub use distance::{Distance, DistanceMetric};
pub use error::{InterpError, Result};
pub use grid::{fill_grid, fill_grid_kriging, fill_grid_rgba, AllPoints, Bounds, GridSpec, Neighborhood};
pub use interpolation::{
    get_interpolation, get_interpolator, get_rgba_interpolation, InterpolationMethod,
    InterpolationOptions, Interpolator,
};
pub use kriging::{FitReport, KrigingInterpolator, KrigingParams, VariogramModel};
pub use logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation,
};
pub use point::{default_value, property_value, Point, Properties, ValueAccessor};
pub use rgba::{Rgba, RgbaInterpolator, RgbaSource};
