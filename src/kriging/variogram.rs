//! Variogram binning and model fitting
//!
//! The empirical variogram pairs every two reference points, sorts the pairs by
//! separation and averages them into at most `max_lags` lag classes. Each class carries
//! its mean separation and mean absolute value difference.
//!
//! The theoretical model is linear in two unknowns once the lag is passed through the
//! model's shape basis `f`:
//!
//! ```text
//! γ(h) = c₀ + c₁ · f(h / r)       r = spread of the lag classes
//! ```
//!
//! `c₀` (nugget) and `c₁` are found by ridge-regularized least squares,
//! `W = (XᵀX + I/α)⁻¹ XᵀY`.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::matrix::{invert, Solver};
use crate::error::{InterpError, Result};

/// Theoretical variogram model type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariogramModel {
    /// f(h) = 1 − exp(−(h/r)² / A)
    #[default]
    Gaussian,
    /// f(h) = 1 − exp(−(h/r) / A)
    Exponential,
    /// f(h) = 1.5(h/r) − 0.5(h/r)³, flat beyond the range when evaluated
    Spherical,
}

impl VariogramModel {
    /// Shape basis used for fitting.
    ///
    /// The spherical polynomial is not clamped here; [`Variogram::evaluate`] applies the
    /// plateau beyond the range.
    pub fn basis(&self, h: f64, range: f64, shape: f64) -> f64 {
        let hr = h / range;
        match self {
            VariogramModel::Gaussian => 1.0 - (-(1.0 / shape) * hr * hr).exp(),
            VariogramModel::Exponential => 1.0 - (-(1.0 / shape) * hr).exp(),
            VariogramModel::Spherical => 1.5 * hr - 0.5 * hr * hr * hr,
        }
    }
}

impl FromStr for VariogramModel {
    type Err = InterpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gaussian" => Ok(VariogramModel::Gaussian),
            "exponential" => Ok(VariogramModel::Exponential),
            "spherical" => Ok(VariogramModel::Spherical),
            _ => Err(InterpError::InvalidParameter {
                param: "model".to_string(),
                message: format!("Unknown kriging model: {}", s),
            }),
        }
    }
}

impl fmt::Display for VariogramModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariogramModel::Gaussian => write!(f, "gaussian"),
            VariogramModel::Exponential => write!(f, "exponential"),
            VariogramModel::Spherical => write!(f, "spherical"),
        }
    }
}

/// Fitted variogram parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variogram {
    pub model: VariogramModel,
    pub nugget: f64,
    pub sill: f64,
    pub range: f64,
    /// Shape constant `A`
    pub shape: f64,
}

impl Variogram {
    /// Evaluate the model at separation `h`
    pub fn evaluate(&self, h: f64) -> f64 {
        let slope = (self.sill - self.nugget) / self.range;
        if self.model == VariogramModel::Spherical && h > self.range {
            return self.nugget + slope;
        }
        self.nugget + slope * self.model.basis(h, self.range, self.shape)
    }
}

/// Empirical variogram: lag classes with their mean separation and dissimilarity
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalVariogram {
    /// Mean separation of each class
    pub lags: Vec<f64>,
    /// Mean absolute value difference of each class
    pub semivariance: Vec<f64>,
    /// Number of point pairs in each class
    pub pair_counts: Vec<usize>,
}

impl EmpiricalVariogram {
    /// Bin `(separation, |Δvalue|)` pairs into at most `max_lags` classes.
    ///
    /// With fewer pairs than `max_lags`, every pair is its own class. Otherwise the
    /// separation axis is cut into `max_lags` equal widths and empty widths are dropped.
    pub fn from_pairs(mut pairs: Vec<(f64, f64)>, max_lags: usize) -> Result<Self> {
        if pairs.is_empty() {
            return Err(InterpError::InsufficientData {
                message: "no point pairs to bin".to_string(),
            });
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n_pairs = pairs.len();
        let max_distance = pairs[n_pairs - 1].0;
        let n_lags = n_pairs.min(max_lags);

        let mut lags = Vec::with_capacity(n_lags);
        let mut semivariance = Vec::with_capacity(n_lags);
        let mut pair_counts = Vec::with_capacity(n_lags);

        if n_lags < max_lags {
            for &(d, dv) in &pairs {
                lags.push(d);
                semivariance.push(dv);
                pair_counts.push(1);
            }
        } else {
            let tolerance = max_distance / n_lags as f64;
            let mut j = 0;
            for i in 0..n_lags {
                let upper = (i + 1) as f64 * tolerance;
                let last = i + 1 == n_lags;
                let (mut lag_sum, mut semi_sum, mut count) = (0.0, 0.0, 0usize);
                while j < n_pairs && (last || pairs[j].0 <= upper) {
                    lag_sum += pairs[j].0;
                    semi_sum += pairs[j].1;
                    count += 1;
                    j += 1;
                }
                if count > 0 {
                    lags.push(lag_sum / count as f64);
                    semivariance.push(semi_sum / count as f64);
                    pair_counts.push(count);
                }
            }
        }

        if lags.len() < 2 {
            return Err(InterpError::InsufficientData {
                message: format!("variogram needs at least 2 lag classes, got {}", lags.len()),
            });
        }

        Ok(Self {
            lags,
            semivariance,
            pair_counts,
        })
    }

    /// Number of lag classes, at least 2 once built by [`EmpiricalVariogram::from_pairs`]
    pub fn len(&self) -> usize {
        self.lags.len()
    }

    /// Always false for a variogram built by [`EmpiricalVariogram::from_pairs`]
    pub fn is_empty(&self) -> bool {
        self.lags.is_empty()
    }
}

/// Fit nugget and sill of `model` to the empirical variogram.
///
/// The range is the spread between the first and last lag class. Returns the fitted
/// variogram and the solver that inverted the 2×2 normal matrix.
pub fn fit_variogram(
    empirical: &EmpiricalVariogram,
    model: VariogramModel,
    shape: f64,
    alpha: f64,
) -> Result<(Variogram, Solver)> {
    let n = empirical.len();
    if n < 2 {
        return Err(InterpError::InsufficientData {
            message: format!("variogram needs at least 2 lag classes, got {}", n),
        });
    }

    let range = empirical.lags[n - 1] - empirical.lags[0];
    if !range.is_finite() || range <= 0.0 {
        return Err(InterpError::InsufficientData {
            message: "lag classes span no distance".to_string(),
        });
    }

    let x = Array2::from_shape_fn((n, 2), |(i, j)| {
        if j == 0 {
            1.0
        } else {
            model.basis(empirical.lags[i], range, shape)
        }
    });
    let y = Array1::from(empirical.semivariance.clone());

    let ridge = Array2::<f64>::eye(2) / alpha;
    let normal = x.t().dot(&x) + ridge;
    let inverse = invert(&normal)?;
    let w = inverse.matrix.dot(&x.t()).dot(&y);

    let nugget = w[0];
    let sill = w[1] * range + nugget;

    Ok((
        Variogram {
            model,
            nugget,
            sill,
            range,
            shape,
        },
        inverse.solver,
    ))
}
