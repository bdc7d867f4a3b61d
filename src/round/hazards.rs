//! Board cells and the per-round hazard layout.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::HazardSource;

/// A cell on the board. Row 0 is the first decision, the top row is the last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Exactly one hazard column per row.
///
/// Indexed by row; the layout has one entry for every row of the board and
/// nothing else, so "one hazard per row" holds by construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardLayout {
    columns: Vec<u8>,
}

impl HazardLayout {
    /// Draw a fresh layout, one independent column per row.
    pub fn generate<H: HazardSource + ?Sized>(source: &mut H, rows: usize, columns: usize) -> Self {
        let columns = columns.clamp(1, usize::from(u8::MAX));
        let picks = (0..rows)
            .map(|row| (source.hazard_column(row, columns) % columns) as u8)
            .collect();
        Self { columns: picks }
    }

    /// Build a layout from explicit columns, one per row.
    #[cfg(test)]
    pub(crate) fn from_columns(columns: Vec<u8>) -> Self {
        Self { columns }
    }

    /// Number of rows covered.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.len()
    }

    /// Hazard column of `row`, or `None` past the top of the board.
    #[must_use]
    pub fn column(&self, row: usize) -> Option<usize> {
        self.columns.get(row).map(|&col| usize::from(col))
    }

    #[must_use]
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.column(cell.row) == Some(cell.col)
    }

    /// Every hazard cell, bottom row first.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns
            .iter()
            .enumerate()
            .map(|(row, &col)| Cell::new(row, usize::from(col)))
    }
}
