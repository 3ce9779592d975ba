//! Interpolation algorithms for scattered reference points.
//!
//! Every estimator shares one calling contract: a query point, the candidate
//! neighbourhood gathered by the caller, and a value accessor. The free functions in the
//! sub-modules implement that contract directly; the [`Interpolator`] structs wrap them
//! so a method can be selected by name at runtime.

pub mod average;
pub mod bilinear;
pub mod common;
pub mod idw;
pub mod lanczos;
pub mod nearest;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::distance::DistanceMetric;
use crate::error::{InterpError, Result};
use crate::point::{Point, ValueAccessor};
use crate::rgba::{Rgba, RgbaInterpolator, RgbaSource};

pub use average::{average_interpolation, AverageInterpolator};
pub use bilinear::{
    bilinear_interpolation, get_bilinear_points, BilinearCorners, BilinearInterpolator,
};
pub use common::{lanczos_kernel, sinc, DEFAULT_KERNEL_RADIUS};
pub use idw::{idw_interpolation, IdwInterpolator};
pub use lanczos::{lanczos_interpolation, LanczosInterpolator};
pub use nearest::{nearest_interpolation, NearestInterpolator};

/// Trait for scalar interpolation methods
pub trait Interpolator<M>: Send + Sync {
    /// Estimate the value at `point` from the candidate reference points
    fn interpolate(
        &self,
        point: &Point,
        ref_data: &[Point<M>],
        get_value: ValueAccessor<'_, M>,
    ) -> Result<f64>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// The estimators selectable by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Average,
    Nearest,
    Bilinear,
    Idw,
    #[default]
    Lanczos,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 5] = [
        InterpolationMethod::Average,
        InterpolationMethod::Nearest,
        InterpolationMethod::Bilinear,
        InterpolationMethod::Idw,
        InterpolationMethod::Lanczos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Average => "average",
            InterpolationMethod::Nearest => "nearest",
            InterpolationMethod::Bilinear => "bilinear",
            InterpolationMethod::Idw => "idw",
            InterpolationMethod::Lanczos => "lanczos",
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = InterpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "average" => Ok(InterpolationMethod::Average),
            "nearest" => Ok(InterpolationMethod::Nearest),
            "bilinear" => Ok(InterpolationMethod::Bilinear),
            "idw" => Ok(InterpolationMethod::Idw),
            "lanczos" => Ok(InterpolationMethod::Lanczos),
            _ => Err(InterpError::InvalidParameter {
                param: "interpolation".to_string(),
                message: format!("Unknown interpolation method: {}", s),
            }),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knobs shared by the distance-weighted estimators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationOptions {
    /// Lanczos kernel radius `a`
    pub kernel_radius: f64,
    /// Metric used by nearest, IDW and Lanczos
    pub distance: DistanceMetric,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            kernel_radius: DEFAULT_KERNEL_RADIUS,
            distance: DistanceMetric::Planar,
        }
    }
}

/// Get a scalar interpolator for a method
pub fn get_interpolation<M>(
    method: InterpolationMethod,
    options: InterpolationOptions,
) -> Box<dyn Interpolator<M>> {
    match method {
        InterpolationMethod::Average => Box::new(AverageInterpolator),
        InterpolationMethod::Nearest => Box::new(NearestInterpolator::new(options.distance)),
        InterpolationMethod::Bilinear => Box::new(BilinearInterpolator),
        InterpolationMethod::Idw => Box::new(IdwInterpolator::new(options.distance)),
        InterpolationMethod::Lanczos => Box::new(LanczosInterpolator::new(
            options.kernel_radius,
            options.distance,
        )),
    }
}

/// Get a scalar interpolator by name
pub fn get_interpolator<M>(name: &str, options: InterpolationOptions) -> Result<Box<dyn Interpolator<M>>> {
    Ok(get_interpolation(name.parse()?, options))
}

/// Get an RGBA interpolator for a method
pub fn get_rgba_interpolation<M: RgbaSource>(
    method: InterpolationMethod,
    options: InterpolationOptions,
) -> Box<dyn RgbaInterpolator<M>> {
    match method {
        InterpolationMethod::Average => Box::new(AverageInterpolator),
        InterpolationMethod::Nearest => Box::new(NearestInterpolator::new(options.distance)),
        InterpolationMethod::Bilinear => Box::new(BilinearInterpolator),
        InterpolationMethod::Idw => Box::new(IdwInterpolator::new(options.distance)),
        InterpolationMethod::Lanczos => Box::new(LanczosInterpolator::new(
            options.kernel_radius,
            options.distance,
        )),
    }
}

/// Convenience for one-off RGBA queries through the dispatch table
pub fn interpolate_rgba<M: RgbaSource>(
    method: InterpolationMethod,
    point: &Point,
    ref_data: &[Point<M>],
) -> Result<Rgba> {
    get_rgba_interpolation(method, InterpolationOptions::default()).interpolate_rgba(point, ref_data)
}
