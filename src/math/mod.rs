//! Mathematical utilities for resampling and separation smoothing

/// Linear interpolation, pixel-centre mapping and integer ramps
pub mod interpolation;
