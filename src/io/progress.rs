//! Row progress display for single files and batches

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>24}} [{{bar:{PROGRESS_BAR_WIDTH}.green/white}}] {{pos}}/{{len}} rows"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] depth files [{{bar:{PROGRESS_BAR_WIDTH}.green/white}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Row bar for the file being rendered, plus a file bar in batch mode
///
/// Rayon workers tick the row bar concurrently; `ProgressBar` is `Sync`.
pub struct ProgressManager {
    bars: MultiProgress,
    files: Option<ProgressBar>,
    rows: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager that shows nothing until a file starts
    pub fn new() -> Self {
        Self {
            bars: MultiProgress::new(),
            files: None,
            rows: None,
        }
    }

    /// Announce how many files will be rendered; batches get a file bar
    pub fn initialize(&mut self, file_count: usize) {
        if file_count < 2 {
            return;
        }
        let bar = self.bars.add(ProgressBar::new(file_count as u64));
        bar.set_style(FILE_STYLE.clone());
        self.files = Some(bar);
    }

    /// Replace the row bar with one for `rows` rows of `path`
    pub fn start_file(&mut self, path: &Path, rows: usize) {
        let bar = self.bars.add(ProgressBar::new(rows as u64));
        bar.set_style(ROW_STYLE.clone());
        bar.set_prefix(
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        if let Some(previous) = self.rows.replace(bar) {
            previous.finish_and_clear();
        }
    }

    /// Tick the row bar
    pub fn row_done(&self) {
        if let Some(bar) = &self.rows {
            bar.inc(1);
        }
    }

    /// Rows finished for the current file
    pub fn rows_done(&self) -> u64 {
        self.rows.as_ref().map_or(0, ProgressBar::position)
    }

    /// Drop the row bar and advance the file bar
    pub fn complete_file(&mut self) {
        if let Some(bar) = self.rows.take() {
            bar.finish_and_clear();
        }
        if let Some(files) = &self.files {
            files.inc(1);
        }
    }

    /// Finish the file bar and clear the terminal area
    pub fn finish(&self) {
        if let Some(files) = &self.files {
            files.finish_with_message("done");
        }
        if let Err(error) = self.bars.clear() {
            log::debug!("could not clear progress bars: {error}");
        }
    }
}
