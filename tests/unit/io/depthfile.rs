//! Tests for text depth-file parsing

#[cfg(test)]
mod tests {
    use std::fs;

    use textstereo::io::depthfile::{
        char_to_elevation, load_depth_text, parse_depth_text, with_left_margin,
    };
    use textstereo::StereogramError;

    // Tests the character encoding of elevations
    // Verified by mapping 'a' to 0
    #[test]
    fn test_char_to_elevation() {
        assert_eq!(char_to_elevation(' '), Some(0));
        assert_eq!(char_to_elevation('0'), Some(0));
        assert_eq!(char_to_elevation('7'), Some(7));
        assert_eq!(char_to_elevation('a'), Some(1));
        assert_eq!(char_to_elevation('z'), Some(26));
        assert_eq!(char_to_elevation('A'), Some(-1));
        assert_eq!(char_to_elevation('Z'), Some(-26));
        assert_eq!(char_to_elevation('#'), None);
    }

    // Tests short lines are padded with background to the longest line
    // Verified by rejecting ragged input
    #[test]
    fn test_ragged_lines_are_padded() {
        let elevations = parse_depth_text("12\n3\n", None, None).unwrap();
        assert_eq!(elevations.dim(), (2, 2));
        assert_eq!(elevations[[1, 0]], 3);
        assert_eq!(elevations[[1, 1]], 0);
    }

    // Tests an explicit width keeps leading cells or centres short lines
    // Verified by cropping from both sides
    #[test]
    fn test_explicit_width() {
        let cropped = parse_depth_text("12345", Some(3), None).unwrap();
        assert_eq!(cropped.row(0).to_vec(), vec![1, 2, 3]);

        let padded = parse_depth_text("12", Some(5), None).unwrap();
        assert_eq!(padded.row(0).to_vec(), vec![0, 1, 2, 0, 0]);
    }

    // Tests an explicit height truncates or centres vertically
    // Verified by appending all background lines at the bottom
    #[test]
    fn test_explicit_height() {
        let truncated = parse_depth_text("1\n2\n3", None, Some(2)).unwrap();
        assert_eq!(truncated.column(0).to_vec(), vec![1, 2]);

        let centred = parse_depth_text("9", None, Some(4)).unwrap();
        assert_eq!(centred.column(0).to_vec(), vec![0, 9, 0, 0]);
    }

    // Tests unknown characters are reported with 1-based positions
    // Verified by skipping unknown characters
    #[test]
    fn test_invalid_character_position() {
        let err = parse_depth_text("11\n1?1", None, None).unwrap_err();
        assert!(matches!(
            err,
            StereogramError::DepthCharacter {
                line: 2,
                column: 2,
                character: '?'
            }
        ));
    }

    // Tests empty input is rejected
    // Verified by returning a zero-sized array
    #[test]
    fn test_empty_text_is_rejected() {
        assert!(parse_depth_text("", None, None).is_err());
        assert!(parse_depth_text("\n\n", None, None).is_err());
    }

    // Tests loading normalizes the highest elevation to the near plane
    // Verified by mapping the lowest elevation to 0
    #[test]
    fn test_load_normalizes_elevations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.txt");
        fs::write(&path, "0a\nA0\n").unwrap();

        let map = load_depth_text(&path, None, None, 0).unwrap();
        assert_eq!(map.get(0, 1), Some(0.0));
        assert_eq!(map.get(1, 0), Some(1.0));
        assert_eq!(map.get(0, 0), Some(0.5));
    }

    // Tests the margin columns are prepended as background
    // Verified by appending the margin on the right
    #[test]
    fn test_with_left_margin() {
        let elevations = parse_depth_text("12\n3", None, None).unwrap();
        let padded = with_left_margin(&elevations, 2);
        assert_eq!(padded.dim(), (2, 4));
        assert_eq!(padded.row(0).to_vec(), vec![0, 0, 1, 2]);
        assert_eq!(padded.row(1).to_vec(), vec![0, 0, 3, 0]);
        assert_eq!(with_left_margin(&elevations, 0), elevations);
    }

    // Tests an explicit width is the total width including the margin
    // Verified by adding the margin on top of the requested width
    #[test]
    fn test_load_reserves_margin_from_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.txt");
        fs::write(&path, "9999\n").unwrap();

        let map = load_depth_text(&path, Some(7), None, 3).unwrap();
        assert_eq!(map.width(), 7);
        let row: Vec<f64> = (0..7).map(|col| map.get(0, col).unwrap()).collect();
        assert_eq!(row, vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        let unsized_map = load_depth_text(&path, None, None, 3).unwrap();
        assert_eq!(unsized_map.width(), 7);
    }

    // Tests a width that leaves no depth columns is a configuration error
    // Verified by saturating the depth width at zero
    #[test]
    fn test_load_rejects_width_within_margin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.txt");
        fs::write(&path, "9999\n").unwrap();

        for width in [2, 3] {
            let err = load_depth_text(&path, Some(width), None, 3).unwrap_err();
            assert!(matches!(
                err,
                StereogramError::Config {
                    parameter: "width",
                    ..
                }
            ));
        }
    }

    // Tests missing files surface as file system errors
    // Verified by mapping read failures to empty input
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_depth_text(&dir.path().join("absent.txt"), None, None, 0).unwrap_err();
        assert!(matches!(err, StereogramError::FileSystem { .. }));
    }
}
