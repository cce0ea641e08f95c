//! Row-wise constraint propagation
//!
//! Columns are visited left to right. Column `x` with separation `s` wants
//! to repeat column `x - s`; the link is made when both columns request the
//! same separation (within the tolerance). Columns closer than their own
//! separation to the left margin, and columns whose request conflicts with
//! an earlier column's, become chain roots.

use bitvec::prelude::*;

use crate::algorithm::linkage::RowLinkage;
use crate::algorithm::separation::SeparationModel;
use crate::io::error::Result;
use crate::math::interpolation::integer_ramp;
use crate::spatial::sampler::DepthSampler;

/// How a column whose partner requests a different separation is resolved
///
/// A run uses exactly one policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The earlier column's separation stands; the later column becomes a root
    #[default]
    LeftmostWins,
    /// Separation jumps are spread over a linear ramp of `window` columns
    ///
    /// Columns touched by a ramp link at their smoothed separation; any
    /// conflict left outside the ramps falls back to a root.
    Smooth {
        /// Width of the ramp centred on each discontinuity
        window: usize,
    },
}

impl ConflictPolicy {
    /// Policy for a configured smoothing window; windows below 2 disable ramps
    pub const fn from_window(window: usize) -> Self {
        if window >= 2 {
            Self::Smooth { window }
        } else {
            Self::LeftmostWins
        }
    }
}

/// Builds the linkage of one row at a time, reusing its buffers across rows
#[derive(Clone, Debug)]
pub struct ConstraintSolver {
    model: SeparationModel,
    policy: ConflictPolicy,
    tolerance: usize,
    depths: Vec<f64>,
    raw: Vec<usize>,
    effective: Vec<usize>,
    smoothed: BitVec,
}

impl ConstraintSolver {
    /// Create a solver for the given separation model and conflict policy
    pub fn new(model: SeparationModel, policy: ConflictPolicy, tolerance: usize) -> Self {
        Self {
            model,
            policy,
            tolerance,
            depths: Vec::new(),
            raw: Vec::new(),
            effective: Vec::new(),
            smoothed: BitVec::new(),
        }
    }

    /// Separation model in use
    pub const fn model(&self) -> &SeparationModel {
        &self.model
    }

    /// Conflict policy in use
    pub const fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Solve one output row read through the sampler
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A depth sample is invalid or out of range
    /// - The linkage rejects a link (broken solver invariant)
    pub fn solve_row(
        &mut self,
        sampler: &DepthSampler<'_>,
        row: usize,
        linkage: &mut RowLinkage,
    ) -> Result<()> {
        sampler.row_depths(row, &mut self.depths)?;
        self.solve_current(linkage)
    }

    /// Solve a row from already validated, 0-is-near depths
    ///
    /// # Errors
    ///
    /// Returns an error if the linkage rejects a link (broken solver invariant)
    pub fn solve_depths(&mut self, depths: &[f64], linkage: &mut RowLinkage) -> Result<()> {
        self.depths.clear();
        self.depths.extend_from_slice(depths);
        self.solve_current(linkage)
    }

    /// Effective separation profile of the last solved row
    pub fn separations(&self) -> &[usize] {
        &self.effective
    }

    /// Per-column separations of the last solved row before smoothing
    pub fn raw_separations(&self) -> &[usize] {
        &self.raw
    }

    /// Whether a column's separation was rewritten by a smoothing ramp
    pub fn is_smoothed(&self, col: usize) -> bool {
        self.smoothed.get(col).as_deref() == Some(&true)
    }

    fn solve_current(&mut self, linkage: &mut RowLinkage) -> Result<()> {
        let width = self.depths.len();

        self.raw.clear();
        self.raw
            .extend(self.depths.iter().map(|&depth| self.model.separation_for(depth)));
        self.effective.clear();
        self.effective.extend_from_slice(&self.raw);
        self.smoothed.clear();
        self.smoothed.resize(width, false);

        if let ConflictPolicy::Smooth { window } = self.policy {
            if window >= 2 {
                smooth_discontinuities(
                    &self.raw,
                    window,
                    self.tolerance.max(1),
                    &mut self.effective,
                    &mut self.smoothed,
                );
            }
        }

        linkage.reset(width);
        for (col, &separation) in self.effective.iter().enumerate() {
            // Left margin: no partner exists at this separation
            if separation > col {
                linkage.mark_root(col)?;
                continue;
            }
            let partner = col - separation;
            if self.is_consistent(col, partner) {
                linkage.link(col, partner)?;
            } else {
                linkage.mark_root(col)?;
            }
        }

        log::trace!(
            "solved row of {width} columns with {} roots",
            linkage.root_count()
        );
        Ok(())
    }

    fn is_consistent(&self, col: usize, partner: usize) -> bool {
        let (Some(&own), Some(&other)) = (self.effective.get(col), self.effective.get(partner))
        else {
            return false;
        };
        if own.abs_diff(other) <= self.tolerance {
            return true;
        }
        matches!(self.policy, ConflictPolicy::Smooth { .. })
            && (self.is_smoothed(col) || self.is_smoothed(partner))
    }
}

// Jumps steeper than `threshold`, grouped into ramp spans
struct RampSpan {
    start: usize,
    end: usize,
    first_jump: usize,
    last_jump: usize,
    rising: bool,
}

// Replaces each jump larger than `threshold` with a ramp of `window` columns
// centred on it. Ramps of jumps in the same direction merge. Ramps of
// opposite jumps (the two edges of a narrow plane) are cut where the jumps
// meet, so the plane keeps a peak. A ramp runs from the raw value before its
// first jump to the raw value after its last jump; these sit outside the
// span unless the span was cut or reaches the row edge.
fn smooth_discontinuities(
    raw: &[usize],
    window: usize,
    threshold: usize,
    effective: &mut [usize],
    smoothed: &mut BitSlice,
) {
    let mut spans: Vec<RampSpan> = Vec::new();
    for (index, pair) in raw.windows(2).enumerate() {
        let &[left, right] = pair else {
            continue;
        };
        if left.abs_diff(right) <= threshold {
            continue;
        }
        let jump = index + 1;
        let rising = right > left;
        let mut start = jump.saturating_sub(window / 2);
        let end = (start + window).min(raw.len());

        if let Some(last) = spans.last_mut()
            && start < last.end
        {
            if last.rising == rising {
                last.end = last.end.max(end);
                last.last_jump = jump;
                continue;
            }
            let meet = last.last_jump + (jump - last.last_jump).div_ceil(2);
            last.end = last.end.min(meet);
            start = start.max(last.end);
        }
        spans.push(RampSpan {
            start,
            end,
            first_jump: jump,
            last_jump: jump,
            rising,
        });
    }

    for span in spans {
        let (Some(&left), Some(&right)) = (raw.get(span.first_jump - 1), raw.get(span.last_jump))
        else {
            continue;
        };
        let ramp = integer_ramp(left, right, span.end - span.start);
        for (offset, value) in ramp.into_iter().enumerate() {
            let col = span.start + offset;
            if let Some(slot) = effective.get_mut(col) {
                *slot = value;
                smoothed.set(col, true);
            }
        }
    }
}
