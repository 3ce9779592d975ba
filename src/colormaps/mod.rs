//! Colormaps and image rendering.
//!
//! Scalar grids are colored with perceptual gradients from `colorgrad`; RGBA grids are
//! written as-is.

pub mod colormap;
pub mod render;

pub use colormap::{get_colormap, Colormap, GradientColormap, COLORMAP_NAMES};
pub use render::{render_rgba, render_scalar, save_image, value_range};
