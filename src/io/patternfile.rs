//! Pattern files: one palette per output row

use std::path::Path;

use crate::algorithm::pattern::{Palette, PaletteSource};
use crate::io::error::{Result, StereogramError, config_error};

/// Parse pattern text into per-row palettes
///
/// Row `r` of the stereogram draws its fresh characters, in order, from
/// line `r % lines`.
///
/// # Errors
///
/// Returns an error if the text has no lines, or a line is empty or
/// contains control characters
pub fn parse_pattern_text(text: &str) -> Result<PaletteSource> {
    let palettes = text
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if line.is_empty() {
                return Err(config_error(
                    "pattern",
                    &format!("line {}", index + 1),
                    &"pattern lines must not be empty",
                ));
            }
            Palette::parse(line)
        })
        .collect::<Result<Vec<_>>>()?;

    if palettes.is_empty() {
        return Err(config_error("pattern", &"", &"pattern file is empty"));
    }
    Ok(PaletteSource::PerRow(palettes))
}

/// Read a pattern file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_pattern_file(path: &Path) -> Result<PaletteSource> {
    let text = std::fs::read_to_string(path).map_err(|e| StereogramError::FileSystem {
        path: path.to_path_buf(),
        operation: "read pattern file",
        source: e,
    })?;
    parse_pattern_text(&text)
}
