/// Command-line interface and batch processing
pub mod cli;
/// Constants and configuration defaults
pub mod configuration;
/// Text depth-file parsing
pub mod depthfile;
/// Error types and helpers
pub mod error;
/// Depth image loading
pub mod image;
/// Pattern-file parsing
pub mod patternfile;
/// Row progress display
pub mod progress;
/// Text output of finished grids
pub mod render;
