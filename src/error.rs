//! Error types for scatterfield.
//!
//! This module defines a single error enum covering the failure conditions of the
//! estimators, the kriging fit, configuration loading and grid rendering.

use thiserror::Error;

/// The main error type for scatterfield operations.
#[derive(Error, Debug)]
pub enum InterpError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// An estimator that cannot degrade gracefully received no reference points
    #[error("Reference data cannot be empty for {method} interpolation")]
    EmptyReferenceData { method: String },

    /// One or more bilinear quadrants around the query point had no candidate
    #[error("Insufficient data to determine all four bilinear corner points (missing: {missing})")]
    InsufficientCorners { missing: String },

    /// Corner or rectangle geometry that cannot produce finite weights
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Not enough reference data to fit a variogram
    #[error("Insufficient data: {message}")]
    InsufficientData { message: String },

    /// Neither Cholesky nor Gauss-Jordan could invert the matrix
    #[error("Singular matrix of size {size}x{size}")]
    SingularMatrix { size: usize },
}

/// Convenience type alias for Results with InterpError
pub type Result<T> = std::result::Result<T, InterpError>;
