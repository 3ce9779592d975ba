//! Common utilities for interpolation algorithms.
//!
//! This module provides the kernel functions and the weighted-mean accumulator shared by
//! the distance-weighted estimators.

use std::f64::consts::PI;

/// Default Lanczos kernel radius
pub const DEFAULT_KERNEL_RADIUS: f64 = 2.0;

/// Normalized sinc, `sin(πx) / (πx)` with `sinc(0) = 1`
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let pi_x = PI * x;
    pi_x.sin() / pi_x
}

/// Lanczos window `sinc(x) · sinc(x / a)`, zero outside `|x| < a`
#[inline]
pub fn lanczos_kernel(x: f64, a: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    sinc(x) * sinc(x / a)
}

/// Running `Σ w·v / Σ w`
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedMean {
    numerator: f64,
    denominator: f64,
}

impl WeightedMean {
    #[inline]
    pub fn push(&mut self, value: f64, weight: f64) {
        self.numerator += value * weight;
        self.denominator += weight;
    }

    /// The weighted mean, or `None` when the weights sum to zero.
    pub fn finish(&self) -> Option<f64> {
        if self.denominator == 0.0 {
            None
        } else {
            Some(self.numerator / self.denominator)
        }
    }
}
