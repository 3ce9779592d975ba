//! Rendering of filled grids to images.

use image::RgbaImage;
use ndarray::ArrayView2;
use std::path::Path;
use tracing::debug;

use super::colormap::Colormap;
use crate::error::Result;
use crate::rgba::Rgba;

/// Finite min and max of a grid, `None` when no cell is finite
pub fn value_range(data: ArrayView2<f64>) -> Option<(f64, f64)> {
    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;

    for &val in data.iter() {
        if val.is_finite() {
            min_val = min_val.min(val);
            max_val = max_val.max(val);
        }
    }

    (min_val <= max_val).then_some((min_val, max_val))
}

/// Color a scalar grid over its own value range. Non-finite cells are transparent.
pub fn render_scalar(data: ArrayView2<f64>, colormap: &dyn Colormap) -> RgbaImage {
    let (height, width) = data.dim();
    let (min_val, max_val) = value_range(data).unwrap_or((0.0, 0.0));

    debug!(
        colormap = colormap.name(),
        width = width,
        height = height,
        min = min_val,
        max = max_val,
        "Rendering scalar grid"
    );

    RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let val = data[[y as usize, x as usize]];
        if val.is_finite() {
            image::Rgba(colormap.map(val, min_val, max_val))
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    })
}

/// Write an RGBA grid directly as pixels
pub fn render_rgba(data: ArrayView2<Rgba>) -> RgbaImage {
    let (height, width) = data.dim();
    RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        image::Rgba(data[[y as usize, x as usize]].to_rgba8())
    })
}

/// Save an image, format chosen by extension
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path)?;
    debug!(path = %path.display(), "Image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::get_colormap;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_value_range_skips_nan() {
        let data = arr2(&[[1.0, f64::NAN], [-2.0, 4.0]]);
        assert_eq!(value_range(data.view()), Some((-2.0, 4.0)));

        let empty = Array2::from_elem((2, 2), f64::NAN);
        assert_eq!(value_range(empty.view()), None);
    }

    #[test]
    fn test_render_scalar() {
        let cmap = get_colormap("viridis").unwrap();
        let data = arr2(&[[0.0, 1.0, f64::NAN]]);
        let img = render_scalar(data.view(), cmap.as_ref());
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.get_pixel(0, 0).0, cmap.map_normalized(0.0));
        assert_eq!(img.get_pixel(1, 0).0, cmap.map_normalized(1.0));
        assert_eq!(img.get_pixel(2, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_render_rgba() {
        let data = arr2(&[[Rgba::new(255.0, 0.0, 0.0, 255.0)], [Rgba::TRANSPARENT]]);
        let img = render_rgba(data.view());
        assert_eq!(img.dimensions(), (1, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 1).0[3], 0);
    }
}
