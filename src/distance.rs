//! Distance strategies shared by the estimators.
//!
//! Nearest, IDW and Lanczos weight candidates by a pluggable metric. Bilinear corner
//! selection and kriging always work on the plane.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InterpError;
use crate::point::Point;

/// Measures the separation between a query point and a reference point.
pub trait Distance: Send + Sync {
    fn distance<A, B>(&self, a: &Point<A>, b: &Point<B>) -> f64;
}

/// Built-in distance metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance on x/y only
    #[default]
    Planar,
    /// Euclidean distance on x/y/z, a missing z counts as 0
    Euclidean3,
}

impl Distance for DistanceMetric {
    #[inline]
    fn distance<A, B>(&self, a: &Point<A>, b: &Point<B>) -> f64 {
        match self {
            DistanceMetric::Planar => planar_distance(a, b),
            DistanceMetric::Euclidean3 => {
                let dz = b.z.unwrap_or(0.0) - a.z.unwrap_or(0.0);
                (planar_distance_sq(a, b) + dz * dz).sqrt()
            }
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = InterpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planar" => Ok(DistanceMetric::Planar),
            "euclidean3" => Ok(DistanceMetric::Euclidean3),
            _ => Err(InterpError::InvalidParameter {
                param: "distance".to_string(),
                message: format!("Unknown distance metric: {}", s),
            }),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Planar => write!(f, "planar"),
            DistanceMetric::Euclidean3 => write!(f, "euclidean3"),
        }
    }
}

/// Squared Euclidean distance on the plane
#[inline]
pub fn planar_distance_sq<A, B>(a: &Point<A>, b: &Point<B>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

/// Euclidean distance on the plane
#[inline]
pub fn planar_distance<A, B>(a: &Point<A>, b: &Point<B>) -> f64 {
    planar_distance_sq(a, b).sqrt()
}
