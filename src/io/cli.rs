//! Command-line interface for single-file and batch stereogram generation

use crate::algorithm::executor::{StereogramConfig, generate_with_progress};
use crate::algorithm::pattern::{FreshCharacters, Palette, PaletteSource};
use crate::algorithm::solver::ConflictPolicy;
use crate::io::configuration::{
    DEFAULT_FAR_SEPARATION, DEFAULT_NEAR_SEPARATION, DEFAULT_SEPARATION_TOLERANCE,
    DEFAULT_SMOOTHING_WINDOW, IMAGE_DEPTH_EXTENSIONS, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    TEXT_DEPTH_EXTENSIONS,
};
use crate::io::depthfile::load_depth_text;
use crate::io::error::{Result, StereogramError};
use crate::io::image::{fit_dimensions, load_depth_image};
use crate::io::patternfile::load_pattern_file;
use crate::io::progress::ProgressManager;
use crate::io::render::{export_grid_as_text, write_grid};
use crate::spatial::{CharGrid, DepthMap, DepthPolarity, Resampling};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "textstereo")]
#[command(
    author,
    version,
    about = "Generate ASCII autostereograms from depth maps"
)]
/// Command-line arguments for the stereogram generator
// Each flag maps onto one independent generation or output switch
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Depth image, text depth file, or directory of depth files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output file (single input) or directory (batch); stdout by default
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Separation in columns for the nearest depth
    #[arg(short, long, default_value_t = DEFAULT_NEAR_SEPARATION)]
    pub near: usize,

    /// Separation in columns for the farthest depth
    #[arg(short, long, default_value_t = DEFAULT_FAR_SEPARATION)]
    pub far: usize,

    /// Output width in characters
    #[arg(short = 'x', long)]
    pub width: Option<usize>,

    /// Output height in lines
    #[arg(short = 'y', long)]
    pub height: Option<usize>,

    /// Random seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pattern file: one line of characters per output row, used in order
    #[arg(short, long, value_name = "PATTERN-FILE")]
    pub pattern: Option<PathBuf>,

    /// Characters to draw fresh pattern cells from
    #[arg(short, long)]
    pub charset: Option<String>,

    /// Use charset characters in order instead of at random
    #[arg(long)]
    pub cyclic: bool,

    /// Spread separation jumps over this many columns (0 disables smoothing)
    #[arg(short = 'm', long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
    pub smoothing: usize,

    /// Allowed separation mismatch between linked columns
    #[arg(short, long, default_value_t = DEFAULT_SEPARATION_TOLERANCE)]
    pub tolerance: usize,

    /// Treat high depth values as near (white is near in images)
    #[arg(short, long)]
    pub invert: bool,

    /// Clamp out-of-range depth values instead of failing
    #[arg(long)]
    pub clamp: bool,

    /// Resampling filter for images whose size differs from the output
    #[arg(short, long, value_enum, default_value_t = Resampling::Nearest)]
    pub resample: Resampling,

    /// Process rows on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists (batch mode)
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Whether batch mode leaves existing outputs untouched
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Whether row progress bars are drawn
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Palette source and fresh-character strategy selected by the flags
    ///
    /// A pattern file takes precedence over a charset and is always read
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file or charset is invalid
    pub fn palette(&self) -> Result<(PaletteSource, FreshCharacters)> {
        if let Some(ref pattern) = self.pattern {
            return Ok((load_pattern_file(pattern)?, FreshCharacters::Cyclic));
        }
        let palette = match self.charset {
            Some(ref charset) => Palette::parse(charset)?,
            None => Palette::default(),
        };
        let strategy = if self.cyclic {
            FreshCharacters::Cyclic
        } else {
            FreshCharacters::Random
        };
        Ok((PaletteSource::Shared(palette), strategy))
    }

    /// Run configuration for a loaded depth map
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern file or charset is invalid
    pub fn config_for(&self, map: &DepthMap, is_text: bool) -> Result<StereogramConfig> {
        // Text depth files already include the margin and the requested size
        let (width, height) = if is_text {
            (map.width(), map.height())
        } else {
            fit_dimensions((map.width(), map.height()), self.width, self.height)
        };
        let (palette, fresh_characters) = self.palette()?;

        Ok(StereogramConfig {
            near_separation: self.near,
            far_separation: self.far,
            width,
            height,
            palette,
            fresh_characters,
            seed: self.seed,
            polarity: if self.invert {
                DepthPolarity::NearIsOne
            } else {
                DepthPolarity::NearIsZero
            },
            conflict_policy: ConflictPolicy::from_window(self.smoothing),
            tolerance: self.tolerance,
            resampling: self.resample,
            clamp_depth: self.clamp,
            parallel: !self.sequential,
        })
    }
}

/// Kind of depth input, decided by file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthInput {
    /// Character-encoded depth file
    Text,
    /// Grayscale image
    Image,
}

impl DepthInput {
    /// Classify a path by extension, `None` if unsupported
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if TEXT_DEPTH_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Text)
        } else if IMAGE_DEPTH_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Image)
        } else {
            None
        }
    }
}

/// Orchestrates loading, generation and output for one file or a directory
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Processor for parsed arguments; progress bars unless `--quiet`
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process the target according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, generation or
    /// writing fails
    pub fn process(&mut self) -> Result<()> {
        if self.cli.target.is_dir() {
            return self.process_batch();
        }

        if DepthInput::from_path(&self.cli.target).is_none() {
            return Err(StereogramError::InvalidSourceData {
                reason: format!(
                    "unsupported depth file '{}'",
                    self.cli.target.display()
                ),
            });
        }

        let target = self.cli.target.clone();
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(1);
        }
        let grid = self.generate_file(&target)?;
        match self.cli.output {
            Some(ref output) => export_grid_as_text(&grid, output)?,
            None => write_grid(&grid, &mut std::io::stdout().lock()).map_err(|e| {
                StereogramError::FileSystem {
                    path: PathBuf::from("<stdout>"),
                    operation: "write output",
                    source: e,
                }
            })?,
        }
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        Ok(())
    }

    fn process_batch(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            let grid = self.generate_file(file)?;
            export_grid_as_text(&grid, &self.output_path(file))?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let read_error = |source: std::io::Error| StereogramError::FileSystem {
            path: self.cli.target.clone(),
            operation: "read directory",
            source,
        };
        for entry in std::fs::read_dir(&self.cli.target).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file()
                && DepthInput::from_path(&path).is_some()
                && !Self::is_generated(&path)
                && self.should_process_file(&path)
            {
                files.push(path);
            }
        }
        files.sort();
        log::debug!("batch of {} depth files", files.len());
        Ok(files)
    }

    // Outputs share the text extension with depth files
    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            // User-facing notice, not a log record
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!(
                    "skipping {}: {} already exists",
                    input_path.display(),
                    output_path.display()
                );
            }
            false
        } else {
            true
        }
    }

    fn generate_file(&mut self, input_path: &Path) -> Result<CharGrid> {
        let is_text = DepthInput::from_path(input_path) == Some(DepthInput::Text);
        let map = if is_text {
            load_depth_text(input_path, self.cli.width, self.cli.height, self.cli.far)?
        } else {
            load_depth_image(input_path)?
        };
        let config = self.cli.config_for(&map, is_text)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, config.height);
        }
        let progress = self.progress_manager.as_ref();
        let grid = generate_with_progress(&map, &config, || {
            if let Some(pm) = progress {
                pm.row_done();
            }
        })?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }
        Ok(grid)
    }

    /// Output path for a batch input: `<dir>/<stem>_stereogram.txt`
    ///
    /// `<dir>` is the `--output` directory when given, else the input's own
    /// directory.
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        );

        match (&self.cli.output, input_path.parent()) {
            (Some(dir), _) => dir.join(output_name),
            (None, Some(parent)) => parent.join(output_name),
            (None, None) => PathBuf::from(output_name),
        }
    }
}
