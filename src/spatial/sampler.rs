//! Normalized depth lookup at output-grid resolution

use crate::io::error::{Result, StereogramError, config_error};
use crate::math::interpolation::{bilerp, linear_neighbours, nearest_index};
use crate::spatial::depth_map::{DepthMap, DepthPolarity};

/// Policy for mapping output cells onto the depth map's native resolution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Resampling {
    /// Sample whose centre is nearest to the output cell centre
    #[default]
    Nearest,
    /// Blend the four surrounding samples
    Bilinear,
}

/// Read-only view of a depth map at the output grid's dimensions
///
/// Applies resampling, range validation (or clamping) and polarity, in that
/// order, so the solver always sees 0 as nearest.
#[derive(Debug, Clone, Copy)]
pub struct DepthSampler<'a> {
    map: &'a DepthMap,
    width: usize,
    height: usize,
    polarity: DepthPolarity,
    resampling: Resampling,
    clamp: bool,
}

impl<'a> DepthSampler<'a> {
    /// Create a sampler producing a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if either output dimension is zero
    pub fn new(map: &'a DepthMap, width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(config_error("width", &width, &"must be at least 1"));
        }
        if height == 0 {
            return Err(config_error("height", &height, &"must be at least 1"));
        }
        Ok(Self {
            map,
            width,
            height,
            polarity: DepthPolarity::default(),
            resampling: Resampling::default(),
            clamp: false,
        })
    }

    /// Sampler at the depth map's native resolution
    pub fn native(map: &'a DepthMap) -> Self {
        Self {
            map,
            width: map.width(),
            height: map.height(),
            polarity: DepthPolarity::NearIsZero,
            resampling: Resampling::Nearest,
            clamp: false,
        }
    }

    /// Set which end of the raw range is nearest
    #[must_use]
    pub const fn with_polarity(mut self, polarity: DepthPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Set the resampling filter
    #[must_use]
    pub const fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    /// Clamp finite out-of-range samples instead of failing
    #[must_use]
    pub const fn with_clamping(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Output width in columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Output height in rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Normalized depth in `[0, 1]` for an output cell, 0 being nearest
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The coordinate lies outside the output grid (`OutOfRange`)
    /// - A contributing sample is outside `[0, 1]` and clamping is disabled,
    ///   or is NaN (`InvalidDepth`)
    pub fn depth_at(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.height || col >= self.width {
            return Err(StereogramError::OutOfRange {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }

        let value = match self.resampling {
            Resampling::Nearest => {
                let src_row = nearest_index(row, self.height, self.map.height());
                let src_col = nearest_index(col, self.width, self.map.width());
                self.sample(src_row, src_col, row, col)?
            }
            Resampling::Bilinear => {
                let (r0, r1, ty) = linear_neighbours(row, self.height, self.map.height());
                let (c0, c1, tx) = linear_neighbours(col, self.width, self.map.width());
                let top = (
                    self.sample(r0, c0, row, col)?,
                    self.sample(r0, c1, row, col)?,
                );
                let bottom = (
                    self.sample(r1, c0, row, col)?,
                    self.sample(r1, c1, row, col)?,
                );
                bilerp(top, bottom, tx, ty).clamp(0.0, 1.0)
            }
        };

        Ok(self.polarity.orient(value))
    }

    /// Fill `out` with the depths of one output row
    ///
    /// # Errors
    ///
    /// Propagates the first failure from [`Self::depth_at`]
    pub fn row_depths(&self, row: usize, out: &mut Vec<f64>) -> Result<()> {
        out.clear();
        for col in 0..self.width {
            out.push(self.depth_at(row, col)?);
        }
        Ok(())
    }

    // Reads and validates one native sample on behalf of output cell (row, col)
    fn sample(&self, src_row: usize, src_col: usize, row: usize, col: usize) -> Result<f64> {
        let value = self.map.get(src_row, src_col).ok_or(StereogramError::OutOfRange {
            row: src_row,
            col: src_col,
            height: self.map.height(),
            width: self.map.width(),
        })?;

        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else if self.clamp && value.is_finite() {
            Ok(value.clamp(0.0, 1.0))
        } else {
            Err(StereogramError::InvalidDepth { row, col, value })
        }
    }
}
