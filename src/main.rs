//! scatterfield - rasterise scattered reference points into a continuous field
//!
//! This is the main entry point for the scatterfield command-line tool.

use anyhow::{Context, Result};
use ndarray::Array2;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use scatterfield::colormaps::{get_colormap, render_rgba, render_scalar, save_image};
use scatterfield::grid::{fill_grid, fill_grid_kriging, fill_grid_rgba, AllPoints, Bounds, GridSpec};
use scatterfield::interpolation::{get_interpolation, get_rgba_interpolation};
use scatterfield::kriging::{FitReport, KrigingInterpolator};
use scatterfield::logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_reference_stats,
    log_timed_operation,
};
use scatterfield::point::{default_value, property_value, Point, Properties, ValueAccessor};
use scatterfield::{Config, Estimator, Rgba};

/// JSON output document
#[derive(Serialize)]
struct GridOutput {
    method: String,
    width: usize,
    height: usize,
    bounds: Bounds,
    /// Row-major, row 0 at max y; failed cells are null
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<Vec<Vec<[u8; 4]>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variance: Option<Vec<Vec<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fit: Option<FitReport>,
}

/// Rasterised field of one run
enum Field {
    Scalar(Array2<f64>),
    Color(Array2<Rgba>),
    Kriging {
        mean: Array2<f64>,
        variance: Array2<f64>,
        report: FitReport,
    },
}

fn rows<T: Clone>(grid: &Array2<T>) -> Vec<Vec<T>> {
    grid.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn load_points(path: &Path) -> Result<Vec<Point<Properties>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read points file {}", path.display()))?;
    let points: Vec<Point<Properties>> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse points file {}", path.display()))?;
    Ok(points)
}

fn compute_field(
    config: &Config,
    spec: &GridSpec,
    points: &[Point<Properties>],
) -> scatterfield::Result<Field> {
    let estimator = config.estimator()?;
    let value_field = config.interpolation.value_field.as_deref();
    let by_field = value_field.map(property_value);
    let get_value: ValueAccessor<'_, Properties> = match &by_field {
        Some(accessor) => accessor,
        None => &default_value::<Properties>,
    };

    match estimator {
        Estimator::Kriging => {
            let kriging = KrigingInterpolator::new(points, config.kriging, get_value)?;
            let grid = fill_grid_kriging(spec, &kriging);
            Ok(Field::Kriging {
                mean: grid.mean,
                variance: grid.variance,
                report: *kriging.report(),
            })
        }
        Estimator::Interpolation(method) if config.interpolation.rgba => {
            let interpolator = get_rgba_interpolation(method, config.interpolation_options());
            Ok(Field::Color(fill_grid_rgba(
                spec,
                points,
                interpolator.as_ref(),
                &AllPoints,
            )))
        }
        Estimator::Interpolation(method) => {
            let interpolator = get_interpolation(method, config.interpolation_options());
            Ok(Field::Scalar(fill_grid(
                spec,
                points,
                interpolator.as_ref(),
                get_value,
                &AllPoints,
            )))
        }
    }
}

fn write_output(config: &Config, spec: &GridSpec, field: &Field, output: &Path) -> Result<()> {
    let is_json = output
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let mut doc = GridOutput {
            method: config.interpolation.method.to_lowercase(),
            width: spec.width,
            height: spec.height,
            bounds: spec.bounds,
            values: None,
            colors: None,
            variance: None,
            fit: None,
        };
        match field {
            Field::Scalar(values) => doc.values = Some(rows(values)),
            Field::Color(colors) => doc.colors = Some(rows(&colors.mapv(|c| c.to_rgba8()))),
            Field::Kriging {
                mean,
                variance,
                report,
            } => {
                doc.values = Some(rows(mean));
                doc.variance = Some(rows(variance));
                doc.fit = Some(*report);
            }
        }
        let file = std::fs::File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &doc)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        return Ok(());
    }

    let img = match field {
        Field::Color(colors) => render_rgba(colors.view()),
        Field::Scalar(values) | Field::Kriging { mean: values, .. } => {
            let colormap = get_colormap(&config.render.colormap)?;
            render_scalar(values.view(), colormap.as_ref())
        }
    };
    save_image(&img, output).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    // Load configuration
    let (config, args) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    info!("Starting scatterfield v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let points = load_points(&args.points_file)?;
    log_reference_stats(
        &args.points_file.display().to_string(),
        points.len(),
        config.interpolation.value_field.as_deref(),
    );

    let bounds = match config.grid.bounds {
        Some(bounds) => bounds,
        None => Bounds::from_points(&points)
            .context("No bounds configured and the points file is empty")?,
    };
    let spec = GridSpec::new(config.grid.width, config.grid.height, bounds)?;

    let start = Instant::now();
    log_operation_start("interpolate", Some(&config.interpolation.method));
    let field = log_timed_operation("fill_grid", || compute_field(&config, &spec, &points))
        .map_err(|e| {
            log_error(&e, "fill_grid");
            e
        })?;
    log_operation_end("interpolate", start, true);

    write_output(&config, &spec, &field, &args.output)?;
    info!(output = %args.output.display(), "Output written");

    Ok(())
}
