//! Linear interpolation helpers for resampling and separation ramps
//!
//! Coordinates follow the pixel-centre convention: output cell `i` of an
//! axis with `output_len` cells covers the source interval
//! `[i, i + 1) * source_len / output_len`.

/// Linear interpolation between `a` and `b` at parameter `t`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    t.mul_add(b - a, a)
}

/// Bilinear interpolation over the unit square
///
/// `top` and `bottom` hold the (left, right) corner values, `tx` and `ty`
/// are the fractional offsets inside the square.
pub fn bilerp(top: (f64, f64), bottom: (f64, f64), tx: f64, ty: f64) -> f64 {
    lerp(lerp(top.0, top.1, tx), lerp(bottom.0, bottom.1, tx), ty)
}

/// Map an output cell centre onto continuous source coordinates
///
/// The result is expressed in source sample units where sample `k` sits at
/// `k + 0.5`; bilinear sampling subtracts that half pixel itself.
pub fn source_position(index: usize, output_len: usize, source_len: usize) -> f64 {
    if output_len == 0 {
        return 0.0;
    }
    (index as f64 + 0.5) * source_len as f64 / output_len as f64
}

/// Nearest source sample for an output cell
pub fn nearest_index(index: usize, output_len: usize, source_len: usize) -> usize {
    let position = source_position(index, output_len, source_len).floor() as usize;
    position.min(source_len.saturating_sub(1))
}

/// Neighbouring source samples and blend weight for linear resampling
///
/// Returns `(low, high, t)` with `high = low + 1` clamped at the edge.
pub fn linear_neighbours(index: usize, output_len: usize, source_len: usize) -> (usize, usize, f64) {
    let last = source_len.saturating_sub(1);
    let centre = (source_position(index, output_len, source_len) - 0.5).clamp(0.0, last as f64);
    let low = centre.floor() as usize;
    let high = (low + 1).min(last);
    (low, high, centre - low as f64)
}

/// Interior points of a straight ramp between two integer anchors
///
/// Produces `steps` values at parameters `1/(steps+1) .. steps/(steps+1)`,
/// each rounded to the nearest integer. The anchors themselves are excluded.
pub fn integer_ramp(start: usize, end: usize, steps: usize) -> Vec<usize> {
    let denominator = (steps + 1) as f64;
    (1..=steps)
        .map(|i| lerp(start as f64, end as f64, i as f64 / denominator).round() as usize)
        .collect()
}
