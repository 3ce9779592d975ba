//! Test data generation utilities.
//!
//! Deterministic point sets built from a 64-bit linear congruential generator, so
//! property-style tests are reproducible without a random-number dependency.

use scatterfield::point::{Point, Properties};
use scatterfield::rgba::Rgba;
use serde_json::json;

/// Linear congruential generator
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as f64 / (1u64 << 31) as f64
    }

    /// Uniform in [lo, hi)
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    pub fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// `n` points in `[0, extent)²` with uniformly random `z` in `[-50, 50)`
pub fn random_points(n: usize, extent: f64, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.range(0.0, extent);
            let y = rng.range(0.0, extent);
            let z = rng.range(-50.0, 50.0);
            Point::with_z(x, y, z)
        })
        .collect()
}

/// `n` points sampling a smooth surface, suited to kriging
pub fn smooth_surface(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.range(0.0, 100.0);
            let y = rng.range(0.0, 100.0);
            let z = 0.5 * x + 0.3 * y + 10.0 * (x / 20.0).sin();
            Point::with_z(x, y, z)
        })
        .collect()
}

/// `n` points carrying random colors
pub fn random_colors(n: usize, seed: u64) -> Vec<Point<Rgba>> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let x = rng.range(0.0, 10.0);
            let y = rng.range(0.0, 10.0);
            let color = Rgba::new(
                rng.range(0.0, 255.0).round(),
                rng.range(0.0, 255.0).round(),
                rng.range(0.0, 255.0).round(),
                rng.range(0.0, 255.0).round(),
            );
            Point::with_m(x, y, color)
        })
        .collect()
}

/// Corners of the 10×10 square with values 10, 20, 30, 40 in a `temp` attribute
pub fn square_with_properties() -> Vec<Point<Properties>> {
    temp_points(&[(0.0, 0.0, 10.0), (10.0, 0.0, 20.0), (0.0, 10.0, 30.0), (10.0, 10.0, 40.0)])
}

/// Unit square with `temp` 1 to 4, the fixture the published reference values use
pub fn unit_square() -> Vec<Point<Properties>> {
    temp_points(&[(0.0, 0.0, 1.0), (1.0, 0.0, 2.0), (0.0, 1.0, 3.0), (1.0, 1.0, 4.0)])
}

fn temp_points(samples: &[(f64, f64, f64)]) -> Vec<Point<Properties>> {
    samples
        .iter()
        .map(|&(x, y, temp)| {
            let mut m = Properties::new();
            m.insert("temp".to_string(), json!(temp));
            Point::with_m(x, y, m)
        })
        .collect()
}
