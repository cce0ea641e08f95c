//! Tests for pattern-file parsing

#[cfg(test)]
mod tests {
    use std::fs;

    use textstereo::algorithm::pattern::PaletteSource;
    use textstereo::io::patternfile::{load_pattern_file, parse_pattern_text};

    // Tests each line becomes the palette of the matching row
    // Verified by merging all lines into one palette
    #[test]
    fn test_lines_become_row_palettes() {
        let source = parse_pattern_text("abc\n#$\n").unwrap();
        match &source {
            PaletteSource::PerRow(palettes) => assert_eq!(palettes.len(), 2),
            PaletteSource::Shared(_) => panic!("expected per-row palettes"),
        }
        assert_eq!(source.palette_for_row(0).unwrap().chars(), &['a', 'b', 'c']);
        assert_eq!(source.palette_for_row(3).unwrap().chars(), &['#', '$']);
    }

    // Tests empty pattern lines and files are configuration errors
    // Verified by skipping empty lines
    #[test]
    fn test_empty_lines_rejected() {
        assert!(parse_pattern_text("ab\n\ncd").unwrap_err().is_config());
        assert!(parse_pattern_text("").unwrap_err().is_config());
    }

    // Tests loading a pattern file from disk
    // Verified by reading only the first line
    #[test]
    fn test_load_pattern_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.txt");
        fs::write(&path, "xy\nz\n").unwrap();
        let source = load_pattern_file(&path).unwrap();
        assert_eq!(source.palette_for_row(1).unwrap().chars(), &['z']);
        assert!(load_pattern_file(&dir.path().join("missing")).is_err());
    }
}
