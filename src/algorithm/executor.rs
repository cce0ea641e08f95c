//! Run configuration and the row-by-row generation pipeline

use log::{debug, info, trace};
use rayon::prelude::*;

use crate::algorithm::linkage::RowLinkage;
use crate::algorithm::pattern::{FreshCharacters, PaletteSource, PatternAssigner};
use crate::algorithm::separation::SeparationModel;
use crate::algorithm::solver::{ConflictPolicy, ConstraintSolver};
use crate::io::configuration::{
    DEFAULT_FAR_SEPARATION, DEFAULT_NEAR_SEPARATION, DEFAULT_SEPARATION_TOLERANCE,
    MAX_GRID_DIMENSION,
};
use crate::io::error::{Result, config_error};
use crate::spatial::{CharGrid, DepthMap, DepthPolarity, DepthSampler, Resampling};

/// Everything a run needs besides the depth map
#[derive(Clone, Debug)]
pub struct StereogramConfig {
    /// Separation for the nearest depth, at least 1
    pub near_separation: usize,
    /// Separation for the farthest depth, at least `near_separation`
    pub far_separation: usize,
    /// Output width in columns
    pub width: usize,
    /// Output height in rows
    pub height: usize,
    /// Palettes for fresh characters
    pub palette: PaletteSource,
    /// How root columns draw characters
    pub fresh_characters: FreshCharacters,
    /// Base seed; drawn once per run when absent
    pub seed: Option<u64>,
    /// Which end of the depth range is near
    pub polarity: DepthPolarity,
    /// Conflict resolution at depth discontinuities
    pub conflict_policy: ConflictPolicy,
    /// Allowed separation mismatch between partner columns
    pub tolerance: usize,
    /// Resampling filter when output and depth map sizes differ
    pub resampling: Resampling,
    /// Clamp out-of-range depth samples instead of failing
    pub clamp_depth: bool,
    /// Process rows on the rayon thread pool
    pub parallel: bool,
}

impl StereogramConfig {
    /// Default configuration for an output of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            near_separation: DEFAULT_NEAR_SEPARATION,
            far_separation: DEFAULT_FAR_SEPARATION,
            width,
            height,
            palette: PaletteSource::default(),
            fresh_characters: FreshCharacters::default(),
            seed: None,
            polarity: DepthPolarity::default(),
            conflict_policy: ConflictPolicy::default(),
            tolerance: DEFAULT_SEPARATION_TOLERANCE,
            resampling: Resampling::default(),
            clamp_depth: false,
            parallel: true,
        }
    }

    /// Default configuration at the depth map's native size
    pub fn for_map(map: &DepthMap) -> Self {
        Self::new(map.width(), map.height())
    }

    /// Validate every setting before any row is processed
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The separation bounds are invalid (`near < 1` or `near > far`)
    /// - A dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - No palette is configured
    pub fn validate(&self) -> Result<SeparationModel> {
        let model = SeparationModel::new(self.near_separation, self.far_separation)?;
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(config_error(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(config_error(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        self.palette.validate()?;
        Ok(model)
    }
}

/// Reusable per-worker buffers for solving and rendering one row
struct RowPipeline<'a> {
    config: &'a StereogramConfig,
    sampler: DepthSampler<'a>,
    base_seed: u64,
    solver: ConstraintSolver,
    linkage: RowLinkage,
}

impl<'a> RowPipeline<'a> {
    fn new(
        config: &'a StereogramConfig,
        sampler: DepthSampler<'a>,
        model: SeparationModel,
        base_seed: u64,
    ) -> Self {
        Self {
            config,
            sampler,
            base_seed,
            solver: ConstraintSolver::new(model, config.conflict_policy, config.tolerance),
            linkage: RowLinkage::new(config.width),
        }
    }

    fn run(&mut self, row: usize) -> Result<Vec<char>> {
        self.solver
            .solve_row(&self.sampler, row, &mut self.linkage)?;
        trace!("row {row}: {} chains", self.linkage.root_count());

        let palette = self.config.palette.palette_for_row(row).ok_or_else(|| {
            config_error("pattern", &row, &"no palette available for row")
        })?;
        let mut assigner = PatternAssigner::for_row(
            palette,
            self.config.fresh_characters,
            self.base_seed,
            row,
            self.config.palette.cyclic_start(row),
        );
        let mut chars = Vec::with_capacity(self.config.width);
        assigner.assign(&self.linkage, &mut chars)?;
        Ok(chars)
    }
}

/// Generate an autostereogram
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any depth sample is
/// invalid; no partial grid is produced
pub fn generate(map: &DepthMap, config: &StereogramConfig) -> Result<CharGrid> {
    generate_with_progress(map, config, || {})
}

/// Generate an autostereogram, calling `on_row` after each finished row
///
/// Rows may finish out of order when running in parallel; the output is
/// identical to a sequential run with the same seed.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any depth sample is
/// invalid; no partial grid is produced
pub fn generate_with_progress(
    map: &DepthMap,
    config: &StereogramConfig,
    on_row: impl Fn() + Sync,
) -> Result<CharGrid> {
    let model = config.validate()?;
    let sampler = DepthSampler::new(map, config.width, config.height)?
        .with_polarity(config.polarity)
        .with_resampling(config.resampling)
        .with_clamping(config.clamp_depth);

    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "generating {}x{} stereogram from {}x{} depth map (separation {}..={})",
        config.width,
        config.height,
        map.width(),
        map.height(),
        model.near(),
        model.far()
    );
    debug!(
        "base seed {base_seed}, policy {:?}, tolerance {}",
        config.conflict_policy, config.tolerance
    );

    let rows: Vec<Vec<char>> = if config.parallel {
        (0..config.height)
            .into_par_iter()
            .map_init(
                || RowPipeline::new(config, sampler, model, base_seed),
                |pipeline, row| {
                    let chars = pipeline.run(row);
                    on_row();
                    chars
                },
            )
            .collect::<Result<_>>()?
    } else {
        let mut pipeline = RowPipeline::new(config, sampler, model, base_seed);
        (0..config.height)
            .map(|row| {
                let chars = pipeline.run(row);
                on_row();
                chars
            })
            .collect::<Result<_>>()?
    };

    CharGrid::from_rows(rows)
}
