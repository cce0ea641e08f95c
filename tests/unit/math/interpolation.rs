//! Tests for interpolation and ramp helpers

#[cfg(test)]
mod tests {
    use textstereo::math::interpolation::{
        bilerp, integer_ramp, lerp, linear_neighbours, nearest_index, source_position,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // Tests lerp hits both endpoints and the midpoint
    // Verified by swapping the endpoints
    #[test]
    fn test_lerp() {
        assert!(close(lerp(2.0, 6.0, 0.0), 2.0));
        assert!(close(lerp(2.0, 6.0, 1.0), 6.0));
        assert!(close(lerp(2.0, 6.0, 0.5), 4.0));
    }

    // Tests bilinear blending of four corners
    // Verified by blending rows before columns with swapped weights
    #[test]
    fn test_bilerp() {
        assert!(close(bilerp((0.0, 1.0), (0.0, 1.0), 0.25, 0.9), 0.25));
        assert!(close(bilerp((0.0, 0.0), (1.0, 1.0), 0.7, 0.5), 0.5));
        assert!(close(bilerp((0.0, 1.0), (1.0, 0.0), 0.5, 0.5), 0.5));
    }

    // Tests output cell centres map onto source coordinates
    // Verified by dropping the half-pixel offset
    #[test]
    fn test_source_position() {
        assert!(close(source_position(0, 4, 2), 0.25));
        assert!(close(source_position(3, 4, 2), 1.75));
        assert!(close(source_position(0, 0, 5), 0.0));
    }

    // Tests nearest sampling upscales and downscales without leaving the source
    // Verified by rounding instead of flooring the position
    #[test]
    fn test_nearest_index() {
        let upscaled: Vec<usize> = (0..6).map(|i| nearest_index(i, 6, 3)).collect();
        assert_eq!(upscaled, vec![0, 0, 1, 1, 2, 2]);

        let downscaled: Vec<usize> = (0..3).map(|i| nearest_index(i, 3, 9)).collect();
        assert_eq!(downscaled, vec![1, 4, 7]);

        assert_eq!(nearest_index(0, 1, 1), 0);
    }

    // Tests linear neighbours clamp at both edges
    // Verified by letting high run past the last sample
    #[test]
    fn test_linear_neighbours() {
        assert_eq!(linear_neighbours(0, 4, 2), (0, 1, 0.0));
        let (low, high, t) = linear_neighbours(2, 4, 2);
        assert_eq!((low, high), (0, 1));
        assert!(close(t, 0.75));
        assert_eq!(linear_neighbours(3, 4, 2), (1, 1, 0.0));
        assert_eq!(linear_neighbours(0, 3, 1), (0, 0, 0.0));
    }

    // Tests ramps exclude their anchors and round to nearest
    // Verified by including the end anchor
    #[test]
    fn test_integer_ramp() {
        assert_eq!(integer_ramp(4, 10, 5), vec![5, 6, 7, 8, 9]);
        assert_eq!(integer_ramp(10, 4, 2), vec![8, 6]);
        assert!(integer_ramp(1, 9, 0).is_empty());
    }
}
