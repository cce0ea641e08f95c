//! Generation constants and runtime configuration defaults

// Separation bounds, in character columns
/// Default separation for the nearest depth
pub const DEFAULT_NEAR_SEPARATION: usize = 14;
/// Default separation for the farthest depth
pub const DEFAULT_FAR_SEPARATION: usize = 20;

/// Default tolerance when comparing partner separations (exact match)
pub const DEFAULT_SEPARATION_TOLERANCE: usize = 0;

/// Default smoothing window (0 keeps leftmost-wins conflict resolution)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Anti-banding: a fresh character is redrawn at most this many times before
// a different palette entry is forced
/// Maximum redraws when a fresh character repeats its left neighbour
pub const MAX_RESAMPLE_ATTEMPTS: usize = 4;

/// Characters used for fresh pattern cells when no charset is given
pub const DEFAULT_PALETTE: &str =
    "aAbBcdDeEfFgGhHiJKLmMnNOPqQrRstTuVwXyZ12346789@#%$&/\\?^ ,;.:-_+*~\"!=|{}[]()><'`";

// Input settings
/// File extensions parsed as text depth maps rather than images
pub const TEXT_DEPTH_EXTENSIONS: &[&str] = &["txt", "depth"];
/// File extensions decoded as depth images
pub const IMAGE_DEPTH_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "pgm"];

// Output settings
/// Suffix added to output filenames in batch mode
pub const OUTPUT_SUFFIX: &str = "_stereogram";
/// Extension of generated stereogram files
pub const OUTPUT_EXTENSION: &str = "txt";

// Progress bar display settings
/// Width of the row progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
