//! Immutable depth samples shared read-only by every row of a run

use ndarray::Array2;
use num_traits::{Bounded, ToPrimitive};

use crate::io::error::{Result, StereogramError};

/// Which end of the normalized depth range is nearest to the viewer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthPolarity {
    /// 0.0 is nearest, 1.0 is farthest
    #[default]
    NearIsZero,
    /// 1.0 is nearest, 0.0 is farthest (typical white-is-near depth images)
    NearIsOne,
}

impl DepthPolarity {
    /// Convert a raw sample into the 0-is-near convention used by the solver
    pub fn orient(self, value: f64) -> f64 {
        match self {
            Self::NearIsZero => value,
            Self::NearIsOne => 1.0 - value,
        }
    }
}

/// Rectangular grid of depth samples, nominally in `[0, 1]`
///
/// Values are stored as given; range checks happen when the sampler reads
/// them so that the offending output coordinate can be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    samples: Array2<f64>,
}

impl DepthMap {
    /// Wrap a `(height, width)` array of samples
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(samples: Array2<f64>) -> Result<Self> {
        let (height, width) = samples.dim();
        if height == 0 || width == 0 {
            return Err(StereogramError::InvalidSourceData {
                reason: format!("depth map must not be empty (got {width}x{height})"),
            });
        }
        Ok(Self { samples })
    }

    /// Build a depth map by evaluating `f(row, col)` for every cell
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Result<Self> {
        Self::new(Array2::from_shape_fn((height, width), |(row, col)| {
            f(row, col)
        }))
    }

    /// Depth map with the same depth everywhere
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn uniform(width: usize, height: usize, depth: f64) -> Result<Self> {
        Self::new(Array2::from_elem((height, width), depth))
    }

    /// Normalize unsigned integer samples (e.g. 8 or 16 bit luma) into `[0, 1]`
    ///
    /// Each sample is divided by the type's maximum value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - `samples` does not contain exactly `width * height` values
    pub fn from_normalized_samples<T>(width: usize, height: usize, samples: &[T]) -> Result<Self>
    where
        T: Bounded + ToPrimitive + Copy,
    {
        if samples.len() != width * height {
            return Err(StereogramError::InvalidSourceData {
                reason: format!(
                    "expected {} samples for a {width}x{height} depth map, got {}",
                    width * height,
                    samples.len()
                ),
            });
        }
        let max = T::max_value().to_f64().unwrap_or(1.0).max(f64::MIN_POSITIVE);
        let values = samples
            .iter()
            .map(|sample| sample.to_f64().unwrap_or(0.0) / max)
            .collect();
        let samples = Array2::from_shape_vec((height, width), values).map_err(|e| {
            StereogramError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;
        Self::new(samples)
    }

    /// Convert integer elevations into normalized depth
    ///
    /// Higher elevation is nearer: the highest elevation maps to 0.0 and the
    /// lowest to 1.0. A flat map sits entirely on the far plane.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_elevations(elevations: &Array2<i32>) -> Result<Self> {
        let max = elevations.iter().copied().max().unwrap_or(0);
        let min = elevations.iter().copied().min().unwrap_or(0);
        let range = f64::from(max - min);
        Self::new(elevations.mapv(|elevation| {
            if range > 0.0 {
                f64::from(max - elevation) / range
            } else {
                1.0
            }
        }))
    }

    /// Native width in samples
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    /// Native height in samples
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    /// Raw sample at a native coordinate
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.samples.get([row, col]).copied()
    }

    /// Underlying sample array, indexed `[row, col]`
    pub const fn samples(&self) -> &Array2<f64> {
        &self.samples
    }
}
