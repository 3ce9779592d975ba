//! Ordinary kriging interpolation.
//!
//! A [`KrigingInterpolator`] is fitted once over the whole reference set:
//!
//! 1. pairwise separations and value differences are binned into an empirical variogram,
//! 2. the chosen model is fitted to it by ridge-regularized least squares,
//! 3. the Gram matrix of the fitted model over every reference pair, plus `σ²·I`, is
//!    inverted and cached together with the weight vector `M = K⁻¹·t`.
//!
//! Queries then only evaluate the model between the query position and each reference
//! point: [`predict`](KrigingInterpolator::predict) is a dot product with `M`,
//! [`variance`](KrigingInterpolator::variance) a quadratic form in `K⁻¹`.
//!
//! Construction reports which solver produced each inverse and fails explicitly when
//! the data cannot support a fit.

pub mod matrix;
pub mod variogram;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::{InterpError, Result};
use crate::point::Point;

pub use matrix::{Inverse, Solver};
pub use variogram::{fit_variogram, EmpiricalVariogram, Variogram, VariogramModel};

/// Ridge strength of the variogram fit
pub const DEFAULT_ALPHA: f64 = 100.0;
/// Shape constant `A` of the variogram models
pub const DEFAULT_SHAPE: f64 = 1.0 / 3.0;
/// Upper bound on empirical lag classes
pub const DEFAULT_MAX_LAGS: usize = 30;

/// Fitting parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KrigingParams {
    /// Variogram model
    pub model: VariogramModel,
    /// Measurement-noise variance added to the Gram diagonal
    pub sigma2: f64,
    /// Diffuse prior of the variogram fit; the ridge term is `I / alpha`
    pub alpha: f64,
    /// Shape constant `A`
    pub shape: f64,
    /// Maximum number of lag classes
    pub max_lags: usize,
}

impl Default for KrigingParams {
    fn default() -> Self {
        Self {
            model: VariogramModel::default(),
            sigma2: 0.0,
            alpha: DEFAULT_ALPHA,
            shape: DEFAULT_SHAPE,
            max_lags: DEFAULT_MAX_LAGS,
        }
    }
}

impl KrigingParams {
    pub fn with_model(model: VariogramModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |param: &str, message: String| {
            Err(InterpError::InvalidParameter {
                param: param.to_string(),
                message,
            })
        };

        if !self.sigma2.is_finite() || self.sigma2 < 0.0 {
            return invalid("sigma2", format!("must be finite and non-negative, got {}", self.sigma2));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return invalid("alpha", format!("must be finite and positive, got {}", self.alpha));
        }
        if !self.shape.is_finite() || self.shape <= 0.0 {
            return invalid("shape", format!("must be finite and positive, got {}", self.shape));
        }
        if self.max_lags < 2 {
            return invalid("max_lags", format!("must be at least 2, got {}", self.max_lags));
        }
        Ok(())
    }
}

/// How the fit went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitReport {
    /// Lag classes used for the variogram fit
    pub lag_bins: usize,
    /// Solver of the 2×2 variogram normal equations
    pub variogram_solver: Solver,
    /// Solver of the n×n Gram matrix
    pub gram_solver: Solver,
}

impl FitReport {
    /// Whether either inverse needed the Gauss-Jordan fallback
    pub fn is_fallback(&self) -> bool {
        self.variogram_solver == Solver::GaussJordan || self.gram_solver == Solver::GaussJordan
    }
}

/// A fitted ordinary kriging model
///
/// Immutable after construction; queries only read the cached inverse, so a fitted model
/// can be shared across threads.
#[derive(Debug, Clone)]
pub struct KrigingInterpolator {
    positions: Vec<[f64; 2]>,
    values: Array1<f64>,
    variogram: Variogram,
    k_inv: Array2<f64>,
    weights: Array1<f64>,
    report: FitReport,
}

#[inline]
fn separation(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

impl KrigingInterpolator {
    /// Fit a model over `ref_data`, reading each point's value with `get_value`.
    pub fn new<M, F>(ref_data: &[Point<M>], params: KrigingParams, get_value: F) -> Result<Self>
    where
        F: Fn(&Point<M>) -> f64,
    {
        params.validate()?;
        let start = Instant::now();
        let n = ref_data.len();
        if n < 2 {
            warn!(points = n, "Kriging needs at least 2 reference points");
            return Err(InterpError::InsufficientData {
                message: format!("kriging needs at least 2 reference points, got {}", n),
            });
        }

        let positions: Vec<[f64; 2]> = ref_data.iter().map(|p| [p.x, p.y]).collect();
        let values: Array1<f64> = ref_data.iter().map(&get_value).collect();

        // Lag distance / semivariance
        let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in 0..i {
                pairs.push((
                    separation(positions[i], positions[j]),
                    (values[i] - values[j]).abs(),
                ));
            }
        }

        let (variogram, variogram_solver, lag_bins) =
            EmpiricalVariogram::from_pairs(pairs, params.max_lags)
                .and_then(|empirical| {
                    let (variogram, solver) =
                        fit_variogram(&empirical, params.model, params.shape, params.alpha)?;
                    Ok((variogram, solver, empirical.len()))
                })
                .map_err(|e| {
                    warn!(points = n, model = %params.model, error = %e, "Variogram fit failed");
                    e
                })?;

        // Gram matrix with noise prior
        let mut gram = Array2::from_shape_fn((n, n), |(i, j)| {
            variogram.evaluate(separation(positions[i], positions[j]))
        });
        for i in 0..n {
            gram[[i, i]] += params.sigma2;
        }

        let inverse = matrix::invert(&gram).map_err(|e| {
            warn!(points = n, error = %e, "Gram matrix inversion failed");
            e
        })?;
        let weights = inverse.matrix.dot(&values);

        let report = FitReport {
            lag_bins,
            variogram_solver,
            gram_solver: inverse.solver,
        };

        debug!(
            operation = "kriging_fit",
            points = n,
            model = %params.model,
            lag_bins = lag_bins,
            nugget = variogram.nugget,
            sill = variogram.sill,
            range = variogram.range,
            variogram_solver = ?report.variogram_solver,
            gram_solver = ?report.gram_solver,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Kriging model fitted"
        );

        Ok(Self {
            positions,
            values,
            variogram,
            k_inv: inverse.matrix,
            weights,
            report,
        })
    }

    /// Model values between `(x, y)` and every reference point
    fn model_vector(&self, x: f64, y: f64) -> Array1<f64> {
        self.positions
            .iter()
            .map(|&p| self.variogram.evaluate(separation([x, y], p)))
            .collect()
    }

    /// Kriging estimate at `(x, y)`
    pub fn predict(&self, x: f64, y: f64) -> f64 {
        self.model_vector(x, y).dot(&self.weights)
    }

    /// Predictive variance at `(x, y)`: `γ(0) + kᵀ·K⁻¹·k`
    pub fn variance(&self, x: f64, y: f64) -> f64 {
        let k = self.model_vector(x, y);
        self.variogram.evaluate(0.0) + k.dot(&self.k_inv.dot(&k))
    }

    /// Marginal minus explained variance: `γ(0) − kᵀ·K⁻¹·k`
    pub fn textbook_variance(&self, x: f64, y: f64) -> f64 {
        let k = self.model_vector(x, y);
        self.variogram.evaluate(0.0) - k.dot(&self.k_inv.dot(&k))
    }

    pub fn variogram(&self) -> &Variogram {
        &self.variogram
    }

    pub fn model(&self) -> VariogramModel {
        self.variogram.model
    }

    pub fn nugget(&self) -> f64 {
        self.variogram.nugget
    }

    pub fn sill(&self) -> f64 {
        self.variogram.sill
    }

    pub fn range(&self) -> f64 {
        self.variogram.range
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }

    /// Reference values the model was fitted to
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of reference points, at least 2 for any fitted model
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: [`KrigingInterpolator::new`] rejects fewer than 2 points
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{default_value, property_value, Properties};
    use serde_json::json;

    fn unit_square() -> Vec<Point<Properties>> {
        [(0.0, 0.0, 1.0), (1.0, 0.0, 2.0), (0.0, 1.0, 3.0), (1.0, 1.0, 4.0)]
            .iter()
            .map(|&(x, y, temp)| {
                let mut m = Properties::new();
                m.insert("temp".to_string(), json!(temp));
                Point::with_m(x, y, m)
            })
            .collect()
    }

    fn scattered(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = seed;
        let mut next = move || {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (rng >> 33) as f64 / (1u64 << 31) as f64
        };
        (0..n)
            .map(|_| {
                let x = next() * 100.0;
                let y = next() * 100.0;
                let z = 0.5 * x + 0.3 * y + 10.0 * (x / 20.0).sin();
                Point::with_z(x, y, z)
            })
            .collect()
    }

    #[test]
    fn test_too_few_points() {
        let one: Vec<Point> = vec![Point::with_z(0.0, 0.0, 1.0)];
        let result = KrigingInterpolator::new(&one, KrigingParams::default(), default_value);
        assert!(matches!(result, Err(InterpError::InsufficientData { .. })));

        // Two points give a single lag class
        let two: Vec<Point> = vec![Point::with_z(0.0, 0.0, 1.0), Point::with_z(1.0, 0.0, 2.0)];
        let result = KrigingInterpolator::new(&two, KrigingParams::default(), default_value);
        assert!(matches!(result, Err(InterpError::InsufficientData { .. })));
    }

    #[test]
    fn test_invalid_params() {
        let data = unit_square();
        let params = KrigingParams {
            alpha: 0.0,
            ..KrigingParams::default()
        };
        let result = KrigingInterpolator::new(&data, params, property_value("temp"));
        assert!(matches!(result, Err(InterpError::InvalidParameter { .. })));
    }

    #[test]
    fn test_unit_square_fit() {
        let data = unit_square();
        // (model, predict(0.5, 0.5), predict(0.65, 0.15), gram solver)
        let cases = [
            (VariogramModel::Gaussian, 2.8569152451779507, 2.7884543556631534, Solver::GaussJordan),
            (VariogramModel::Exponential, 2.8600086267459988, 2.8003406905612267, Solver::GaussJordan),
            (VariogramModel::Spherical, 2.4787428546416876, 2.4741925173613524, Solver::Cholesky),
        ];
        for (model, center, off_center, gram_solver) in cases {
            let kriging =
                KrigingInterpolator::new(&data, KrigingParams::with_model(model), property_value("temp"))
                    .unwrap();
            assert_eq!(kriging.len(), 4);
            assert!(!kriging.is_empty());
            assert_eq!(kriging.report().lag_bins, 6);
            assert_eq!(kriging.report().variogram_solver, Solver::Cholesky);
            assert_eq!(kriging.report().gram_solver, gram_solver, "{}", model);
            assert!((kriging.range() - (2f64.sqrt() - 1.0)).abs() < 1e-12);

            assert!((kriging.predict(0.5, 0.5) - center).abs() < 1e-10, "{} center", model);
            assert!((kriging.predict(0.65, 0.15) - off_center).abs() < 1e-10, "{} off center", model);
        }
    }

    #[test]
    fn test_unit_square_gaussian_variance() {
        let data = unit_square();
        let kriging = KrigingInterpolator::new(
            &data,
            KrigingParams::with_model(VariogramModel::Gaussian),
            property_value("temp"),
        )
        .unwrap();

        assert!((kriging.nugget() - 0.8326386325411477).abs() < 1e-10);
        assert!((kriging.sill() - 1.1775295445108764).abs() < 1e-10);
        assert!((kriging.variance(0.5, 0.5) - 2.7355110684092128).abs() < 1e-10);
    }

    #[test]
    fn test_exact_at_reference_points() {
        let data = scattered(40, 7);
        for model in [
            VariogramModel::Gaussian,
            VariogramModel::Exponential,
            VariogramModel::Spherical,
        ] {
            let kriging =
                KrigingInterpolator::new(&data, KrigingParams::with_model(model), default_value).unwrap();
            for p in &data {
                let predicted = kriging.predict(p.x, p.y);
                let expected = default_value(p);
                assert!(
                    (predicted - expected).abs() < 1e-4 * (1.0 + expected.abs()),
                    "{}: predicted {} expected {}",
                    model,
                    predicted,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_deterministic_fit() {
        let data = scattered(60, 99);
        let a = KrigingInterpolator::new(&data, KrigingParams::default(), default_value).unwrap();
        let b = KrigingInterpolator::new(&data, KrigingParams::default(), default_value).unwrap();
        assert_eq!(a.nugget(), b.nugget());
        assert_eq!(a.sill(), b.sill());
        assert_eq!(a.range(), b.range());
        assert_eq!(a.report(), b.report());
        assert_eq!(a.predict(12.5, 80.0), b.predict(12.5, 80.0));
    }

    #[test]
    fn test_variance_forms() {
        let data = scattered(25, 3);
        let kriging = KrigingInterpolator::new(&data, KrigingParams::default(), default_value).unwrap();
        let marginal = kriging.variogram().evaluate(0.0);

        for (x, y) in [(10.0, 10.0), (50.0, 25.0), (90.0, 70.0)] {
            let additive = kriging.variance(x, y);
            let textbook = kriging.textbook_variance(x, y);
            // Both forms share the marginal term and differ in the sign of kᵀK⁻¹k
            assert!(((additive + textbook) / 2.0 - marginal).abs() < 1e-6 * (1.0 + marginal.abs()));
        }
    }

    #[test]
    fn test_noise_regularization_smooths() {
        let data = scattered(30, 11);
        let params = KrigingParams {
            sigma2: 5.0,
            ..KrigingParams::default()
        };
        let noisy = KrigingInterpolator::new(&data, params, default_value).unwrap();
        let exact = KrigingInterpolator::new(&data, KrigingParams::default(), default_value).unwrap();
        assert_eq!(noisy.nugget(), exact.nugget());

        // With a noise prior the model no longer honours every sample exactly
        let max_residual = data
            .iter()
            .map(|p| (noisy.predict(p.x, p.y) - default_value(p)).abs())
            .fold(0.0, f64::max);
        assert!(max_residual > 1e-6);
    }

    #[test]
    fn test_params_json_defaults() {
        let params: KrigingParams = serde_json::from_str(r#"{"model": "spherical"}"#).unwrap();
        assert_eq!(params.model, VariogramModel::Spherical);
        assert_eq!(params.alpha, DEFAULT_ALPHA);
        assert_eq!(params.shape, DEFAULT_SHAPE);
        assert_eq!(params.max_lags, DEFAULT_MAX_LAGS);
        assert_eq!(params.sigma2, 0.0);
    }
}
