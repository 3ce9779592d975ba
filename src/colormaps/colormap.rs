//! Colormap trait and the preset gradients.

use crate::error::{InterpError, Result};

/// Names accepted by [`get_colormap`]
pub const COLORMAP_NAMES: [&str; 7] = [
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "spectral",
];

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A colormap sampled from a `colorgrad` gradient
pub struct GradientColormap {
    name: &'static str,
    gradient: colorgrad::Gradient,
}

impl GradientColormap {
    pub fn new(name: &'static str, gradient: colorgrad::Gradient) -> Self {
        Self { name, gradient }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0)).to_rgba8()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    let (name, gradient) = match name.to_lowercase().as_str() {
        "viridis" => ("viridis", colorgrad::viridis()),
        "plasma" => ("plasma", colorgrad::plasma()),
        "inferno" => ("inferno", colorgrad::inferno()),
        "magma" => ("magma", colorgrad::magma()),
        "cividis" => ("cividis", colorgrad::cividis()),
        "turbo" => ("turbo", colorgrad::turbo()),
        "spectral" => ("spectral", colorgrad::spectral()),
        _ => {
            return Err(InterpError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!(
                    "Unknown colormap: {}. Must be one of: {}",
                    name,
                    COLORMAP_NAMES.join(", ")
                ),
            })
        }
    };
    Ok(Box::new(GradientColormap::new(name, gradient)))
}
