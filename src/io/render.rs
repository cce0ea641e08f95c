//! Text serialization of finished character grids

use std::io::Write;
use std::path::Path;

use crate::io::error::{Result, StereogramError};
use crate::spatial::CharGrid;

/// Write each grid row as one line terminated by `\n`
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_grid<W: Write>(grid: &CharGrid, out: &mut W) -> std::io::Result<()> {
    for line in grid.lines() {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Render the whole grid into a string
pub fn grid_to_string(grid: &CharGrid) -> String {
    let mut text = String::with_capacity((grid.width() + 1) * grid.height());
    for line in grid.lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Write the grid to a text file, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be created or written
pub fn export_grid_as_text(grid: &CharGrid, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StereogramError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let file = std::fs::File::create(output_path).map_err(|e| StereogramError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create output",
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    write_grid(grid, &mut writer).map_err(|e| StereogramError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write output",
        source: e,
    })
}
