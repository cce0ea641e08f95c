//! Per-row "same-as" linkage stored as an index arena
//!
//! Each column starts `Unvisited` and is finalized exactly once, either as a
//! chain `Root` or `Linked` to an earlier column. Links are compressed at
//! link time so they always point directly at a root.

use bitvec::prelude::*;

use crate::io::error::{Result, computation_error};

/// Resolution state of a single column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnState {
    /// Not yet processed by the solver
    Unvisited,
    /// Unlinked column that receives a fresh character
    Root,
    /// Column that repeats the character of the given root column
    Linked(usize),
}

/// Union-find style forest over the columns of one row
#[derive(Clone, Debug, Default)]
pub struct RowLinkage {
    links: Vec<Option<usize>>,
    visited: BitVec,
}

impl RowLinkage {
    /// Create a linkage with every column unvisited
    pub fn new(width: usize) -> Self {
        Self {
            links: vec![None; width],
            visited: bitvec![0; width],
        }
    }

    /// Clear all state and resize for a new row, reusing allocations
    pub fn reset(&mut self, width: usize) {
        self.links.clear();
        self.links.resize(width, None);
        self.visited.clear();
        self.visited.resize(width, false);
    }

    /// Number of columns in the row
    pub fn width(&self) -> usize {
        self.links.len()
    }

    /// Current state of a column, or `None` outside the row
    pub fn state(&self, col: usize) -> Option<ColumnState> {
        let link = *self.links.get(col)?;
        if !self.is_visited(col) {
            return Some(ColumnState::Unvisited);
        }
        Some(link.map_or(ColumnState::Root, ColumnState::Linked))
    }

    /// Finalize a column as a chain root
    ///
    /// # Errors
    ///
    /// Returns an error if the column is outside the row or already finalized
    pub fn mark_root(&mut self, col: usize) -> Result<()> {
        self.ensure_unvisited(col)?;
        self.visited.set(col, true);
        Ok(())
    }

    /// Finalize `col` as a copy of `partner`, linking it to `partner`'s root
    ///
    /// Returns the root the column was linked to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `col` is outside the row or already finalized
    /// - `partner` is not strictly left of `col`
    /// - `partner` has not been finalized yet
    pub fn link(&mut self, col: usize, partner: usize) -> Result<usize> {
        self.ensure_unvisited(col)?;
        if partner >= col {
            return Err(computation_error(
                "row linkage",
                &format!("column {col} cannot link to column {partner} at or after it"),
            ));
        }
        if !self.is_visited(partner) {
            return Err(computation_error(
                "row linkage",
                &format!("column {col} links to unresolved column {partner}"),
            ));
        }

        let root = self.root_of(partner).ok_or_else(|| {
            computation_error("row linkage", &format!("column {partner} has no root"))
        })?;
        if let Some(slot) = self.links.get_mut(col) {
            *slot = Some(root);
        }
        self.visited.set(col, true);
        Ok(root)
    }

    /// Direct link target of a column
    pub fn link_of(&self, col: usize) -> Option<usize> {
        self.links.get(col).copied().flatten()
    }

    /// Follow links from `col` to its chain root
    ///
    /// Walks at most `width` steps; `None` if `col` is outside the row or the
    /// walk does not terminate.
    pub fn root_of(&self, col: usize) -> Option<usize> {
        let mut current = col;
        for _ in 0..=self.width() {
            match *self.links.get(current)? {
                None => return Some(current),
                Some(next) => current = next,
            }
        }
        None
    }

    /// Whether every column has been finalized
    pub fn is_complete(&self) -> bool {
        self.visited.all()
    }

    /// Raw link table, `None` for roots and unvisited columns
    pub fn links(&self) -> &[Option<usize>] {
        &self.links
    }

    /// Number of finalized root columns
    pub fn root_count(&self) -> usize {
        self.visited
            .iter_ones()
            .filter(|&col| self.link_of(col).is_none())
            .count()
    }

    fn is_visited(&self, col: usize) -> bool {
        self.visited.get(col).as_deref() == Some(&true)
    }

    fn ensure_unvisited(&self, col: usize) -> Result<()> {
        if col >= self.width() {
            return Err(computation_error(
                "row linkage",
                &format!("column {col} outside row of width {}", self.width()),
            ));
        }
        if self.is_visited(col) {
            return Err(computation_error(
                "row linkage",
                &format!("column {col} finalized twice"),
            ));
        }
        Ok(())
    }
}
