//! Finished character grid produced one row at a time

use ndarray::{Array2, ArrayView1};

use crate::io::error::{Result, StereogramError};

/// Rendered autostereogram, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    cells: Array2<char>,
}

impl CharGrid {
    /// Assemble a grid from finished rows of equal length
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is empty, or row
    /// lengths differ
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(StereogramError::InvalidSourceData {
                reason: "character grid must not be empty".to_string(),
            });
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(StereogramError::InvalidSourceData {
                reason: format!(
                    "row {index} has {} characters, expected {width}",
                    row.len()
                ),
            });
        }

        let cells = Array2::from_shape_vec((height, width), rows.into_iter().flatten().collect())
            .map_err(|e| StereogramError::InvalidSourceData {
                reason: e.to_string(),
            })?;
        Ok(Self { cells })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Character at a cell
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get([row, col]).copied()
    }

    /// View of a single row
    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, char>> {
        (row < self.height()).then(|| self.cells.row(row))
    }

    /// Iterate over rows as strings
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.rows().into_iter().map(|row| row.iter().collect())
    }

    /// Underlying character array
    pub const fn cells(&self) -> &Array2<char> {
        &self.cells
    }
}
