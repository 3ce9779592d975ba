//! Logging utilities for scatterfield.
//!
//! This module provides structured logging functionality so that fits, grid fills and
//! failures show up as searchable fields rather than free text.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::error::InterpError;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set. Calling this twice is harmless; the second
/// subscriber is ignored.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => EnvFilter::new(val),
        Err(_) => EnvFilter::new(log_level),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration = start_time.elapsed();
    let duration_ms = duration.as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = Uuid::new_v4();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the reference data a run works on
pub fn log_reference_stats(source: &str, point_count: usize, value_field: Option<&str>) {
    info!(
        operation = "load_points",
        source = source,
        point_count = point_count,
        value_field = value_field.unwrap_or("z"),
        "Reference points loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &InterpError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = error_kind(error),
        "Error occurred"
    );
}

/// Short, stable name of an error variant
pub fn error_kind(error: &InterpError) -> &'static str {
    match error {
        InterpError::Io(_) => "io",
        InterpError::Json(_) => "json",
        InterpError::Image(_) => "image",
        InterpError::Config { .. } => "config",
        InterpError::InvalidParameter { .. } => "invalid_parameter",
        InterpError::EmptyReferenceData { .. } => "empty_reference_data",
        InterpError::InsufficientCorners { .. } => "insufficient_corners",
        InterpError::DegenerateGeometry { .. } => "degenerate_geometry",
        InterpError::InsufficientData { .. } => "insufficient_data",
        InterpError::SingularMatrix { .. } => "singular_matrix",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_timed_operation() {
        // This is more of a functional test to ensure it doesn't panic
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("debug");
        init_tracing("info");
        log_error(
            &InterpError::SingularMatrix { size: 3 },
            "test_init_tracing_twice",
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            error_kind(&InterpError::EmptyReferenceData {
                method: "lanczos".to_string()
            }),
            "empty_reference_data"
        );
        assert_eq!(error_kind(&InterpError::SingularMatrix { size: 2 }), "singular_matrix");
    }
}
