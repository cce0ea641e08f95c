//! Tests for progress bar bookkeeping

#[cfg(test)]
mod tests {
    use std::path::Path;

    use textstereo::io::progress::ProgressManager;

    // Tests rows are counted on the active file's bar
    // Verified by incrementing the batch bar instead
    #[test]
    fn test_rows_counted_per_file() {
        let mut manager = ProgressManager::new();
        manager.initialize(2);
        assert_eq!(manager.rows_done(), 0);

        manager.start_file(Path::new("a.png"), 5);
        manager.row_done();
        manager.row_done();
        assert_eq!(manager.rows_done(), 2);

        manager.start_file(Path::new("b.png"), 3);
        assert_eq!(manager.rows_done(), 0);
        manager.complete_file();
        assert_eq!(manager.rows_done(), 0);
        manager.finish();
    }

    // Tests row updates without an active file are ignored
    // Verified by creating a bar lazily on row_done
    #[test]
    fn test_row_done_without_file() {
        let manager = ProgressManager::default();
        manager.row_done();
        assert_eq!(manager.rows_done(), 0);
        manager.finish();
    }
}
