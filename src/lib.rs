//! ASCII autostereogram generation from depth maps
//!
//! Each output row is solved independently: every column either repeats an
//! earlier column at a depth-dependent separation or starts a new chain with
//! a fresh character. Viewed with relaxed or crossed eyes, the repeats fuse
//! into the depth map's shape.

#![deny(unsafe_code)]

/// Separation model, row solver, character assignment and run pipeline
pub mod algorithm;
/// Input/output adapters, command line and error handling
pub mod io;
/// Interpolation helpers for resampling and smoothing
pub mod math;
/// Depth map, depth sampling and the character grid
pub mod spatial;

pub use algorithm::executor::{StereogramConfig, generate, generate_with_progress};
pub use io::error::{Result, StereogramError};
pub use spatial::{CharGrid, DepthMap};
