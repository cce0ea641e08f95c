//! Tests for palettes and per-row character assignment

#[cfg(test)]
mod tests {
    use textstereo::algorithm::linkage::RowLinkage;
    use textstereo::algorithm::pattern::{
        FreshCharacters, Palette, PaletteSource, PatternAssigner, row_seed,
    };
    use textstereo::io::configuration::DEFAULT_PALETTE;

    fn all_roots(width: usize) -> RowLinkage {
        let mut linkage = RowLinkage::new(width);
        for col in 0..width {
            linkage.mark_root(col).unwrap();
        }
        linkage
    }

    fn periodic(width: usize, period: usize) -> RowLinkage {
        let mut linkage = RowLinkage::new(width);
        for col in 0..width {
            if col < period {
                linkage.mark_root(col).unwrap();
            } else {
                linkage.link(col, col - period).unwrap();
            }
        }
        linkage
    }

    // Tests palettes must contain at least one renderable character
    // Verified by accepting empty palettes
    #[test]
    fn test_palette_validation() {
        assert!(Palette::new(vec![]).unwrap_err().is_config());
        assert!(Palette::parse("ab\ncd").unwrap_err().is_config());
        assert!(Palette::parse("\t").is_err());

        let palette = Palette::parse("xyz").unwrap();
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
        assert_eq!(palette.cyclic(4), 'y');
    }

    // Tests the default palette is the built-in character pool
    // Verified by defaulting to an empty palette
    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), DEFAULT_PALETTE.chars().count());
        assert!(palette.chars().iter().all(|c| !c.is_control()));
    }

    // Tests per-row palettes wrap around and start from their first character
    // Verified by indexing pattern lines without the modulo
    #[test]
    fn test_palette_source_rows() {
        let lines = vec![Palette::parse("ab").unwrap(), Palette::parse("cd").unwrap()];
        let source = PaletteSource::PerRow(lines);
        assert_eq!(source.palette_for_row(3).unwrap().chars(), &['c', 'd']);
        assert_eq!(source.cyclic_start(3), 0);
        assert!(source.validate().is_ok());

        let shared = PaletteSource::Shared(Palette::parse("abc").unwrap());
        assert_eq!(shared.cyclic_start(4), 1);
        assert!(PaletteSource::PerRow(vec![]).validate().is_err());
    }

    // Tests row seeds are derived independently of processing order
    // Verified by adding instead of XOR-ing the row index
    #[test]
    fn test_row_seed() {
        assert_eq!(row_seed(0b1010, 0b0110), 0b1100);
        assert_eq!(row_seed(42, 0), 42);
    }

    // Tests linked columns repeat their root's character
    // Verified by drawing fresh characters for linked columns
    #[test]
    fn test_linked_columns_copy_root() {
        let palette = Palette::default();
        let linkage = periodic(30, 7);
        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Random, 9, 3, 0);
        let mut row = Vec::new();
        assigner.assign(&linkage, &mut row).unwrap();

        assert_eq!(row.len(), 30);
        for col in 7..30 {
            assert_eq!(row[col], row[col % 7]);
        }
    }

    // Tests fresh characters avoid repeating their left neighbour
    // Verified by removing the rejection loop
    #[test]
    fn test_roots_avoid_adjacent_repeats() {
        let palette = Palette::parse("ab").unwrap();
        for row_index in 0..20 {
            let mut assigner =
                PatternAssigner::for_row(&palette, FreshCharacters::Random, 5, row_index, 0);
            let mut row = Vec::new();
            assigner.assign(&all_roots(50), &mut row).unwrap();
            assert!(row.windows(2).all(|pair| pair[0] != pair[1]));
        }
    }

    // Tests a single-character palette is accepted and simply repeats
    // Verified by erroring when no different character exists
    #[test]
    fn test_single_character_palette() {
        let palette = Palette::parse("#").unwrap();
        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Random, 1, 0, 0);
        let mut row = Vec::new();
        assigner.assign(&all_roots(8), &mut row).unwrap();
        assert_eq!(row.iter().collect::<String>(), "########");
    }

    // Tests cyclic assignment reads the palette in order from the start offset
    // Verified by ignoring the start offset
    #[test]
    fn test_cyclic_order() {
        let palette = Palette::parse("abc").unwrap();
        let mut row = Vec::new();

        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Cyclic, 0, 0, 0);
        assigner.assign(&all_roots(5), &mut row).unwrap();
        assert_eq!(row.iter().collect::<String>(), "abcab");

        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Cyclic, 0, 1, 1);
        assigner.assign(&all_roots(5), &mut row).unwrap();
        assert_eq!(row.iter().collect::<String>(), "bcabc");
    }

    // Tests cyclic assignment skips an entry that would repeat the neighbour
    // Verified by removing the skip
    #[test]
    fn test_cyclic_skips_repeats() {
        let palette = Palette::parse("aab").unwrap();
        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Cyclic, 0, 0, 0);
        let mut row = Vec::new();
        assigner.assign(&all_roots(4), &mut row).unwrap();
        assert_eq!(row.iter().collect::<String>(), "abab");
    }

    // Tests the same seed and row always give the same characters
    // Verified by seeding from entropy
    #[test]
    fn test_assignment_is_deterministic() {
        let palette = Palette::default();
        let linkage = periodic(60, 9);
        let mut first = Vec::new();
        let mut second = Vec::new();
        let mut other_row = Vec::new();

        PatternAssigner::for_row(&palette, FreshCharacters::Random, 77, 4, 0)
            .assign(&linkage, &mut first)
            .unwrap();
        PatternAssigner::for_row(&palette, FreshCharacters::Random, 77, 4, 0)
            .assign(&linkage, &mut second)
            .unwrap();
        PatternAssigner::for_row(&palette, FreshCharacters::Random, 77, 5, 0)
            .assign(&linkage, &mut other_row)
            .unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other_row);
    }

    // Tests unresolved columns are reported instead of rendered
    // Verified by treating unvisited columns as roots
    #[test]
    fn test_incomplete_linkage_is_rejected() {
        let palette = Palette::default();
        let mut linkage = RowLinkage::new(3);
        linkage.mark_root(0).unwrap();
        let mut assigner = PatternAssigner::for_row(&palette, FreshCharacters::Random, 0, 0, 0);
        let mut row = Vec::new();
        assert!(assigner.assign(&linkage, &mut row).is_err());
    }
}
