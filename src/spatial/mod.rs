//! Spatial data structures for depth input and character output
//!
//! This module contains:
//! - The immutable depth map and its polarity convention
//! - Depth sampling at output resolution
//! - The finished character grid

/// Finished character grid
pub mod char_grid;
/// Depth samples and polarity
pub mod depth_map;
/// Resampled, validated depth lookup
pub mod sampler;

pub use char_grid::CharGrid;
pub use depth_map::{DepthMap, DepthPolarity};
pub use sampler::{DepthSampler, Resampling};
