//! RGBA adapters for the scalar estimators.
//!
//! Color channels are blended in the energy domain: each of R, G and B is squared before
//! it reaches the scalar estimator and square-rooted afterwards. Alpha is blended linearly
//! with the average estimator, except for nearest, which takes alpha from the same
//! nearest point. An empty neighbourhood yields opaque black.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::distance::Distance;
use crate::error::Result;
use crate::interpolation::bilinear::{bilinear_interpolation, get_bilinear_points};
use crate::interpolation::idw::idw_interpolation;
use crate::interpolation::lanczos::lanczos_interpolation;
use crate::interpolation::nearest::nearest_interpolation;
use crate::interpolation::{
    average_interpolation, AverageInterpolator, BilinearInterpolator, IdwInterpolator,
    LanczosInterpolator, NearestInterpolator,
};
use crate::point::{Point, Properties};

/// A color with channels in the 0–255 domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    255.0
}

impl Rgba {
    pub const OPAQUE_BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 255.0,
    };

    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Round and clamp every channel to a byte
    pub fn to_rgba8(&self) -> [u8; 4] {
        let byte = |v: f64| {
            if v.is_finite() {
                v.round().clamp(0.0, 255.0) as u8
            } else {
                0
            }
        };
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::OPAQUE_BLACK
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0] as f64, c[1] as f64, c[2] as f64, c[3] as f64)
    }
}

/// Payloads that expose color channels
pub trait RgbaSource {
    fn red(&self) -> f64;
    fn green(&self) -> f64;
    fn blue(&self) -> f64;
    /// `None` reads as fully opaque
    fn alpha(&self) -> Option<f64>;
}

impl RgbaSource for Rgba {
    fn red(&self) -> f64 {
        self.r
    }
    fn green(&self) -> f64 {
        self.g
    }
    fn blue(&self) -> f64 {
        self.b
    }
    fn alpha(&self) -> Option<f64> {
        Some(self.a)
    }
}

impl RgbaSource for Properties {
    fn red(&self) -> f64 {
        self.get("r").and_then(Value::as_f64).unwrap_or(0.0)
    }
    fn green(&self) -> f64 {
        self.get("g").and_then(Value::as_f64).unwrap_or(0.0)
    }
    fn blue(&self) -> f64 {
        self.get("b").and_then(Value::as_f64).unwrap_or(0.0)
    }
    fn alpha(&self) -> Option<f64> {
        self.get("a").and_then(Value::as_f64)
    }
}

fn red_sq<M: RgbaSource>(p: &Point<M>) -> f64 {
    p.m.as_ref().map_or(0.0, |m| m.red().powi(2))
}

fn green_sq<M: RgbaSource>(p: &Point<M>) -> f64 {
    p.m.as_ref().map_or(0.0, |m| m.green().powi(2))
}

fn blue_sq<M: RgbaSource>(p: &Point<M>) -> f64 {
    p.m.as_ref().map_or(0.0, |m| m.blue().powi(2))
}

fn alpha<M: RgbaSource>(p: &Point<M>) -> f64 {
    p.m.as_ref().and_then(|m| m.alpha()).unwrap_or(255.0)
}

/// Back from squared channels; extrapolation can undershoot zero
fn from_energy(r2: f64, g2: f64, b2: f64, a: f64) -> Rgba {
    Rgba::new(r2.max(0.0).sqrt(), g2.max(0.0).sqrt(), b2.max(0.0).sqrt(), a)
}

pub fn rgba_average_interpolation<M: RgbaSource>(point: &Point, ref_data: &[Point<M>]) -> Rgba {
    if ref_data.is_empty() {
        return Rgba::OPAQUE_BLACK;
    }
    from_energy(
        average_interpolation(point, ref_data, red_sq),
        average_interpolation(point, ref_data, green_sq),
        average_interpolation(point, ref_data, blue_sq),
        average_interpolation(point, ref_data, alpha),
    )
}

pub fn rgba_nearest_interpolation<M: RgbaSource, D: Distance>(
    point: &Point,
    ref_data: &[Point<M>],
    metric: &D,
) -> Rgba {
    if ref_data.is_empty() {
        return Rgba::OPAQUE_BLACK;
    }
    from_energy(
        nearest_interpolation(point, ref_data, red_sq, metric),
        nearest_interpolation(point, ref_data, green_sq, metric),
        nearest_interpolation(point, ref_data, blue_sq, metric),
        nearest_interpolation(point, ref_data, alpha, metric),
    )
}

pub fn rgba_idw_interpolation<M: RgbaSource, D: Distance>(
    point: &Point,
    ref_data: &[Point<M>],
    metric: &D,
) -> Rgba {
    if ref_data.is_empty() {
        return Rgba::OPAQUE_BLACK;
    }
    from_energy(
        idw_interpolation(point, ref_data, red_sq, metric),
        idw_interpolation(point, ref_data, green_sq, metric),
        idw_interpolation(point, ref_data, blue_sq, metric),
        average_interpolation(point, ref_data, alpha),
    )
}

pub fn rgba_lanczos_interpolation<M: RgbaSource, D: Distance>(
    point: &Point,
    ref_data: &[Point<M>],
    kernel_radius: f64,
    metric: &D,
) -> Result<Rgba> {
    if ref_data.is_empty() {
        return Ok(Rgba::OPAQUE_BLACK);
    }
    Ok(from_energy(
        lanczos_interpolation(point, ref_data, red_sq, kernel_radius, metric)?,
        lanczos_interpolation(point, ref_data, green_sq, kernel_radius, metric)?,
        lanczos_interpolation(point, ref_data, blue_sq, kernel_radius, metric)?,
        average_interpolation(point, ref_data, alpha),
    ))
}

/// Fails when a quadrant around `point` has no candidate
pub fn rgba_bilinear_interpolation<M: RgbaSource>(point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
    if ref_data.is_empty() {
        return Ok(Rgba::OPAQUE_BLACK);
    }
    let corners = get_bilinear_points(point, ref_data)?;
    Ok(from_energy(
        bilinear_interpolation(point, &corners, red_sq)?,
        bilinear_interpolation(point, &corners, green_sq)?,
        bilinear_interpolation(point, &corners, blue_sq)?,
        average_interpolation(point, ref_data, alpha),
    ))
}

/// Trait for color interpolation methods
pub trait RgbaInterpolator<M>: Send + Sync {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba>;
}

impl<M: RgbaSource> RgbaInterpolator<M> for AverageInterpolator {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
        Ok(rgba_average_interpolation(point, ref_data))
    }
}

impl<M: RgbaSource> RgbaInterpolator<M> for NearestInterpolator {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
        Ok(rgba_nearest_interpolation(point, ref_data, &self.metric))
    }
}

impl<M: RgbaSource> RgbaInterpolator<M> for IdwInterpolator {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
        Ok(rgba_idw_interpolation(point, ref_data, &self.metric))
    }
}

impl<M: RgbaSource> RgbaInterpolator<M> for LanczosInterpolator {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
        rgba_lanczos_interpolation(point, ref_data, self.kernel_radius, &self.metric)
    }
}

impl<M: RgbaSource> RgbaInterpolator<M> for BilinearInterpolator {
    fn interpolate_rgba(&self, point: &Point, ref_data: &[Point<M>]) -> Result<Rgba> {
        rgba_bilinear_interpolation(point, ref_data)
    }
}
