//! Text depth maps: one character per cell
//!
//! `' '` and `'0'` are the background plane, `'1'..='9'` and `'a'..='z'`
//! (1 to 26) are raised towards the viewer, `'A'..='Z'` (-1 to -26) sink
//! behind the background.

use std::path::Path;

use ndarray::{Array2, s};

use crate::io::error::{Result, StereogramError, config_error};
use crate::spatial::DepthMap;

/// Elevation encoded by a depth character, `None` if it encodes none
pub fn char_to_elevation(c: char) -> Option<i32> {
    match c {
        ' ' => Some(0),
        '0'..='9' => c.to_digit(10).and_then(|d| i32::try_from(d).ok()),
        'a'..='z' => Some(c as i32 - 'a' as i32 + 1),
        'A'..='Z' => Some('A' as i32 - c as i32 - 1),
        _ => None,
    }
}

// Keep the first `width` cells, centring shorter lines between background
// cells (the odd cell goes to the right).
fn fit_line(line: &[i32], width: usize) -> Vec<i32> {
    if line.len() >= width {
        return line.iter().take(width).copied().collect();
    }
    let left = (width - line.len()) / 2;
    let mut fitted = vec![0; left];
    fitted.extend_from_slice(line);
    fitted.resize(width, 0);
    fitted
}

/// Parse a text depth map into integer elevations
///
/// Lines are right-padded with background to the longest line. An explicit
/// `width` crops or centre-pads every line; an explicit `height` keeps the
/// first `height` lines or centres the map vertically between background
/// lines.
///
/// # Errors
///
/// Returns an error if:
/// - The text contains no lines
/// - A character encodes no elevation
/// - The resulting map has zero width
pub fn parse_depth_text(
    text: &str,
    width: Option<usize>,
    height: Option<usize>,
) -> Result<Array2<i32>> {
    let mut rows = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_index, c) in line.chars().enumerate() {
            let elevation = char_to_elevation(c).ok_or(StereogramError::DepthCharacter {
                line: line_index + 1,
                column: col_index + 1,
                character: c,
            })?;
            row.push(elevation);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(StereogramError::InvalidSourceData {
            reason: "depth file is empty".to_string(),
        });
    }

    if let Some(target) = height {
        if target <= rows.len() {
            rows.truncate(target);
        } else {
            let missing = target - rows.len();
            let above = missing / 2;
            let mut centred = vec![Vec::new(); above];
            centred.append(&mut rows);
            centred.resize(target, Vec::new());
            rows = centred;
        }
    }

    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = width.unwrap_or(longest);
    if width == 0 || rows.is_empty() {
        return Err(StereogramError::InvalidSourceData {
            reason: "depth file contains no cells".to_string(),
        });
    }

    let height = rows.len();
    let cells: Vec<i32> = rows
        .iter_mut()
        .flat_map(|row| {
            row.resize(longest, 0);
            fit_line(row, width)
        })
        .collect();

    Array2::from_shape_vec((height, width), cells).map_err(|e| StereogramError::InvalidSourceData {
        reason: e.to_string(),
    })
}

/// Prepend `margin` background columns to every row
pub fn with_left_margin(elevations: &Array2<i32>, margin: usize) -> Array2<i32> {
    let (height, width) = elevations.dim();
    let mut padded = Array2::zeros((height, width + margin));
    padded.slice_mut(s![.., margin..]).assign(elevations);
    padded
}

/// Read a text depth file into a normalized depth map behind a background margin
///
/// `width` is the total output width: the map keeps `width - margin`
/// columns and `margin` background columns are placed in front of it, so
/// the first depth column has a partner to repeat.
///
/// # Errors
///
/// Returns an error if:
/// - `width` does not leave room for any depth column after the margin
/// - The file cannot be read or parsed
pub fn load_depth_text(
    path: &Path,
    width: Option<usize>,
    height: Option<usize>,
    margin: usize,
) -> Result<DepthMap> {
    let depth_width = width
        .map(|total| {
            total
                .checked_sub(margin)
                .filter(|&columns| columns > 0)
                .ok_or_else(|| {
                    config_error(
                        "width",
                        &total,
                        &format!("must exceed the {margin}-column background margin"),
                    )
                })
        })
        .transpose()?;

    let text = std::fs::read_to_string(path).map_err(|e| StereogramError::FileSystem {
        path: path.to_path_buf(),
        operation: "read depth file",
        source: e,
    })?;
    let elevations = with_left_margin(&parse_depth_text(&text, depth_width, height)?, margin);
    log::debug!(
        "parsed {}x{} text depth map {} ({margin} margin columns)",
        elevations.ncols(),
        elevations.nrows(),
        path.display()
    );
    DepthMap::from_elevations(&elevations)
}
