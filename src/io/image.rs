//! Grayscale depth image loading

use std::path::Path;

use crate::io::error::{Result, StereogramError};
use crate::spatial::DepthMap;

/// Load a depth image as normalized grayscale
///
/// Any format the `image` crate decodes is accepted. Pixels are converted to
/// 16-bit luma so 16-bit depth maps keep their precision; black is 0.0 and
/// white is 1.0 before polarity is applied.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has zero width or height
pub fn load_depth_image(path: &Path) -> Result<DepthMap> {
    let img = image::open(path).map_err(|e| StereogramError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let luma = img.to_luma16();
    let (width, height) = luma.dimensions();
    log::debug!("decoded {width}x{height} depth image {}", path.display());

    DepthMap::from_normalized_samples(width as usize, height as usize, luma.as_raw())
}

/// Output size for an image, filling a missing dimension from the aspect ratio
///
/// With neither dimension given the native size is used.
pub fn fit_dimensions(
    native: (usize, usize),
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    let (native_width, native_height) = native;
    let scaled = |value: usize, from: usize, to: usize| -> usize {
        if from == 0 {
            return value.max(1);
        }
        ((value as f64 * to as f64 / from as f64).round() as usize).max(1)
    };

    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scaled(w, native_width, native_height)),
        (None, Some(h)) => (scaled(h, native_height, native_width), h),
        (None, None) => (native_width, native_height),
    }
}
