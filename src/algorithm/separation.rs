//! Depth to horizontal separation mapping

use crate::io::error::{Result, config_error};

/// Maps normalized depth onto an integer column separation
///
/// Depth 0 (nearest) maps to the near separation and depth 1 to the far
/// separation. Each column is rounded individually to the nearest integer,
/// halves away from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeparationModel {
    near: usize,
    far: usize,
}

impl SeparationModel {
    /// Create a model from separation bounds
    ///
    /// # Errors
    ///
    /// Returns an error if `near < 1` or `near > far`
    pub fn new(near: usize, far: usize) -> Result<Self> {
        if near < 1 {
            return Err(config_error(
                "near_separation",
                &near,
                &"must be at least 1",
            ));
        }
        if near > far {
            return Err(config_error(
                "far_separation",
                &far,
                &format!("must not be smaller than near_separation ({near})"),
            ));
        }
        Ok(Self { near, far })
    }

    /// Separation used for the nearest depth
    pub const fn near(&self) -> usize {
        self.near
    }

    /// Separation used for the farthest depth
    pub const fn far(&self) -> usize {
        self.far
    }

    /// Whether every depth maps to the same separation
    pub const fn is_flat(&self) -> bool {
        self.near == self.far
    }

    /// Separation in columns for a normalized depth
    ///
    /// The sampler has already validated `depth`; the result is kept within
    /// `[near, far]` regardless.
    pub fn separation_for(&self, depth: f64) -> usize {
        let span = (self.far - self.near) as f64;
        let offset = (span * depth).round();
        if offset.is_nan() {
            return self.near;
        }
        self.near + offset.clamp(0.0, span) as usize
    }
}
