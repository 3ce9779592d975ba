//! Reference points and value accessors.
//!
//! A [`Point`] is a 2-D (optionally 3-D) position with an optional attribute payload.
//! Estimators never mutate the points they are given; they read a scalar from each
//! reference point through a value accessor supplied per call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form attribute payload, as read from JSON point files.
pub type Properties = serde_json::Map<String, Value>;

/// A position with an optional elevation and an optional payload.
///
/// Query points usually carry no payload and use the default `M = ()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<M = ()> {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<M>,
}

impl Point {
    /// A bare query position.
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }
}

impl<M> Point<M> {
    /// Create a point without elevation or payload.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Create a point whose elevation is its value.
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    /// Create a point carrying a payload.
    pub fn with_m(x: f64, y: f64, m: M) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }
}

/// Extracts the scalar value of a reference point.
///
/// Any `Fn(&Point<M>) -> f64` is an accessor; estimators are generic over it or take it
/// as `&dyn Fn` when dispatched dynamically.
pub type ValueAccessor<'a, M> = &'a dyn Fn(&Point<M>) -> f64;

/// The default accessor: the point's elevation, or 0 when it has none.
pub fn default_value<M>(point: &Point<M>) -> f64 {
    point.z.unwrap_or(0.0)
}

/// Build an accessor reading a numeric attribute from a [`Properties`] payload.
///
/// Missing payloads, missing keys and non-numeric values all read as 0.
pub fn property_value(name: &str) -> impl Fn(&Point<Properties>) -> f64 + '_ {
    move |point| {
        point
            .m
            .as_ref()
            .and_then(|m| m.get(name))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}
